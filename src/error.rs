use genomap::GenomeMapError;
use std::io;
use thiserror::Error;

use crate::file::FileError;

#[derive(Error, Debug)]
pub enum RateMapError {
    #[error("Genetic map parsing error: {0}")]
    MapParsingError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    #[error("File reading error: {0}")]
    FileError(#[from] FileError),
    #[error("Genetic map '{0}' contains no rows")]
    EmptyMap(String),
    #[error("Chromosome key '{0}' does not exist")]
    NoChrom(String),
    #[error("GenomeMap Error: error updating GenomeMap")]
    GenomeMapError(#[from] GenomeMapError),
    #[error("Liftover tool '{0}' failed ({1})")]
    LiftoverFailed(String, String),
    #[error("Plotting error: {0}")]
    PlotError(String),
}

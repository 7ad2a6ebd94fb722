//! Writing per-chromosome HapMap tables.
//!
//! [`MapSink`] is the narrow interface the report pipeline writes through;
//! [`DirSink`] writes one TSV per chromosome into a directory, and
//! [`MemorySink`] keeps the tables in memory.
use csv::WriterBuilder;
use indexmap::IndexMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::RateMapError;
use crate::file::OutputFile;
use crate::partition::{HapMapRecord, Partitioned};

/// Something that accepts the ordered chromosome tables.
pub trait MapSink {
    fn write_partitioned(&mut self, partitioned: &Partitioned) -> Result<(), RateMapError>;
}

/// Write a HapMap table (with header) as TSV.
pub fn write_hapmap<W: Write>(writer: W, records: &[HapMapRecord]) -> Result<(), RateMapError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `<chrom>.txt` (or `<chrom>.txt.gz`) files into a directory.
pub struct DirSink {
    pub outdir: PathBuf,
    pub gzip: bool,
    written: Vec<PathBuf>,
}

impl DirSink {
    /// Constructs a new `DirSink`.
    ///
    /// # Arguments
    ///
    /// * `outdir` - The directory the tables are written into. It is created,
    /// along with any missing parents, when the tables are written.
    /// * `gzip` - Whether to write gzip-compressed `<chrom>.txt.gz` files
    /// instead of plaintext `<chrom>.txt`.
    pub fn new(outdir: impl AsRef<Path>, gzip: bool) -> Self {
        Self {
            outdir: outdir.as_ref().to_path_buf(),
            gzip,
            written: Vec::new(),
        }
    }

    /// The output path of a chromosome's table.
    pub fn chrom_path(&self, chrom: &str) -> PathBuf {
        let ext = if self.gzip { "txt.gz" } else { "txt" };
        self.outdir.join(format!("{}.{}", chrom, ext))
    }

    /// The files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl MapSink for DirSink {
    fn write_partitioned(&mut self, partitioned: &Partitioned) -> Result<(), RateMapError> {
        fs::create_dir_all(&self.outdir)?;
        for (chrom, records) in partitioned.iter() {
            let path = self.chrom_path(chrom);
            let writer = OutputFile::new(&path).writer()?;
            write_hapmap(writer, records)?;
            debug!("wrote {} rows to {}", records.len(), path.display());
            self.written.push(path);
        }
        info!(
            "wrote {} chromosome files to {}",
            partitioned.len(),
            self.outdir.display()
        );
        Ok(())
    }
}

/// Keeps copies of the tables, keyed by chromosome in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub tables: IndexMap<String, Vec<HapMapRecord>>,
}

impl MapSink for MemorySink {
    fn write_partitioned(&mut self, partitioned: &Partitioned) -> Result<(), RateMapError> {
        for (chrom, records) in partitioned.iter() {
            self.tables.insert(chrom.clone(), records.clone());
        }
        Ok(())
    }
}

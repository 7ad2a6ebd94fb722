//! Derive recombination rate maps from sex-specific genetic linkage maps.
//!
//! A linkage map gives, for each marker, its chromosome, physical position
//! and cumulative male, female and sex-averaged genetic positions (cM). From
//! this, [`calc_rates`] derives the local recombination rate (cM/Mb) at every
//! marker, [`ChromosomeOrder`] puts the chromosomes in natural order
//! (`1, 2, ..., 10, ..., X, Y, MT`) and [`partition`] splits the result into
//! one HapMap-formatted table per chromosome.
//!
//! ```no_run
//! use ratemap::prelude::*;
//! let rows = read_genetic_map("FileS2").expect("could not read genetic map");
//! let report = Report::build(&rows, true).expect("could not partition map");
//!
//! let mut sink = DirSink::new("Littrell2018_rn6", false);
//! sink.write_partitioned(&report.partitioned).expect("could not write tables");
//!
//! for (chrom, table) in report.partitioned.iter() {
//!     println!("{}\t{}", chrom, table.len());
//! }
//! ```
//!
//! The `ratemap` binary (built with `--features cli`) runs the whole
//! pipeline, including the rate plot:
//!
//! ```bash
//! ratemap rates FileS2 --outdir Littrell2018_rn6 --plot rn6_map.png
//! ```

pub mod chrom;
pub mod error;
mod file;
pub mod liftover;
pub mod map;
mod numeric;
pub mod output;
pub mod partition;
pub mod plot;
pub mod rates;
pub mod report;

pub use chrom::{ChromosomeOrder, PLACEHOLDER_CHROMS};
pub use error::RateMapError;
pub use map::{read_genetic_map, MapRow, Position, RateFloat};
pub use partition::{partition, HapMapRecord, Partitioned};
pub use rates::{calc_rates, RatedRow, Track};

pub mod prelude {
    pub use crate::chrom::ChromosomeOrder;
    pub use crate::error::RateMapError;
    pub use crate::liftover::{run_liftover, LiftoverConfig};
    pub use crate::map::{read_genetic_map, MapRow};
    pub use crate::output::{DirSink, MapSink};
    pub use crate::partition::{partition, Partitioned};
    pub use crate::plot::{PlotData, PlotRenderer};
    pub use crate::rates::{calc_rates, RatedRow, Track};
    pub use crate::report::{run_report, Report, ReportOptions};
}

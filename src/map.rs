//! Reading sex-specific genetic linkage maps.
//!
//! The input is a tab-separated table with (at least) the columns:
//!
//! ```text
//! chr     pos         male        female      Sex_avg
//! 1       1234567     0.000000    0.000000    0.000000
//! 1       2234567     0.512000    0.430000    0.471000
//! ```
//!
//! Columns are matched by header name; any extra columns are ignored. A
//! missing column or an unparseable value aborts reading with the underlying
//! [`csv::Error`], which names the offending record.
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RateMapError;
use crate::file::InputFile;

/// The float type for genetic positions and recombination rates.
pub type RateFloat = f64;

/// The integer type for physical positions.
pub type Position = u64;

/// Physical positions are stored in basepairs, rates are reported per megabase.
pub const BP_PER_MB: RateFloat = 1e6;

/// One marker of a linkage map: a physical position and its male, female and
/// sex-averaged cumulative genetic positions in centiMorgans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRow {
    #[serde(rename = "chr")]
    pub chrom: String,
    #[serde(rename = "pos")]
    pub position: Position,
    #[serde(rename = "male")]
    pub male_cm: RateFloat,
    #[serde(rename = "female")]
    pub female_cm: RateFloat,
    #[serde(rename = "Sex_avg")]
    pub sex_avg_cm: RateFloat,
}

impl MapRow {
    pub fn new(
        chrom: &str,
        position: Position,
        male_cm: RateFloat,
        female_cm: RateFloat,
        sex_avg_cm: RateFloat,
    ) -> Self {
        Self {
            chrom: chrom.to_string(),
            position,
            male_cm,
            female_cm,
            sex_avg_cm,
        }
    }

    /// The physical position in megabases.
    pub fn position_mb(&self) -> RateFloat {
        self.position as RateFloat / BP_PER_MB
    }
}

/// Read a (possibly gzip-compressed) genetic map into rows, in file order.
///
/// Row order is kept exactly as in the file; sortedness within a chromosome
/// is assumed, not checked. An empty table is reported as
/// [`RateMapError::EmptyMap`].
pub fn read_genetic_map(filepath: &str) -> Result<Vec<MapRow>, RateMapError> {
    let input_file = InputFile::new(filepath);
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(input_file.reader()?);
    let header = rdr.headers()?.clone();
    debug!(header = ?header, "reading genetic map {}", filepath);

    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<MapRow>, csv::Error>>()?;

    if rows.is_empty() {
        return Err(RateMapError::EmptyMap(filepath.to_string()));
    }
    info!("read {} markers from {}", rows.len(), filepath);
    Ok(rows)
}

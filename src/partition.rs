//! Splitting a rated genetic map into per-chromosome HapMap tables.
//!
//! Each chromosome's table uses the HapMap recombination map layout:
//!
//! ```text
//! Chromosome      Position(bp)    Rate(cM/Mb)     Map(cM)
//! 1       1000000 1.5     0.0
//! 1       2000000 1.5     1.5
//! 1       3000000 2.0     3.5
//! ```
//!
//! with the sex-averaged rate and map position. Chromosomes that are expected
//! in the output but carry no markers (see
//! [`PLACEHOLDER_CHROMS`](crate::chrom::PLACEHOLDER_CHROMS)) get a single
//! all-zero placeholder row.
use genomap::GenomeMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chrom::{canonical_label, ChromosomeOrder};
use crate::error::RateMapError;
use crate::map::{Position, RateFloat};
use crate::rates::RatedRow;

/// One row of a HapMap-formatted recombination map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HapMapRecord {
    #[serde(rename = "Chromosome")]
    pub chrom: String,
    #[serde(rename = "Position(bp)")]
    pub position: Position,
    #[serde(rename = "Rate(cM/Mb)")]
    pub rate: RateFloat,
    #[serde(rename = "Map(cM)")]
    pub map_pos: RateFloat,
}

impl HapMapRecord {
    /// The sex-averaged record of a rated row, under its canonical chromosome label.
    pub fn from_rated(rated: &RatedRow) -> Self {
        Self {
            chrom: canonical_label(rated.chrom()),
            position: rated.row.position,
            rate: rated.rates.sex_avg,
            map_pos: rated.row.sex_avg_cm,
        }
    }

    /// The zero-filled row standing in for a chromosome without markers.
    pub fn placeholder(chrom: &str) -> Self {
        Self {
            chrom: chrom.to_string(),
            position: 0,
            rate: 0.0,
            map_pos: 0.0,
        }
    }
}

/// Per-chromosome HapMap tables, in natural chromosome order.
pub struct Partitioned {
    pub map: GenomeMap<Vec<HapMapRecord>>,
    placeholders: Vec<String>,
}

impl Partitioned {
    /// Return the number of chromosomes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Return if there are no chromosomes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over chromosome name and table tuples, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<HapMapRecord>)> {
        self.map.iter()
    }

    /// The table of one chromosome.
    pub fn get(&self, chrom: &str) -> Result<&Vec<HapMapRecord>, RateMapError> {
        self.map
            .get(chrom)
            .ok_or(RateMapError::NoChrom(chrom.to_string()))
    }

    /// The chromosomes given a placeholder row.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Total number of rows over all tables.
    pub fn total_rows(&self) -> usize {
        self.iter().map(|(_, table)| table.len()).sum()
    }

    /// All tables concatenated in chromosome order.
    pub fn concat(&self) -> Vec<HapMapRecord> {
        self.iter()
            .flat_map(|(_, table)| table.iter().cloned())
            .collect()
    }
}

/// Partition rated rows into one table per chromosome of `order`.
///
/// Rows keep their relative input order within each table. Every chromosome
/// in `order` gets exactly one table; those without rows get a single
/// placeholder row. A row whose chromosome is missing from `order` is an
/// error, since it would otherwise be dropped.
pub fn partition(rows: &[RatedRow], order: &ChromosomeOrder) -> Result<Partitioned, RateMapError> {
    let mut groups: IndexMap<String, Vec<HapMapRecord>> = IndexMap::new();
    for rated in rows {
        let record = HapMapRecord::from_rated(rated);
        groups.entry(record.chrom.clone()).or_default().push(record);
    }

    if let Some(missing) = groups.keys().find(|chrom| !order.contains(chrom)) {
        return Err(RateMapError::NoChrom(missing.clone()));
    }

    let mut map = GenomeMap::new();
    let mut placeholders = Vec::new();
    for chrom in order.iter() {
        let table = match groups.swap_remove(chrom) {
            Some(table) => table,
            None => {
                debug!("no markers on chromosome {}, adding placeholder row", chrom);
                placeholders.push(chrom.to_string());
                vec![HapMapRecord::placeholder(chrom)]
            }
        };
        map.insert(chrom, table)?;
    }

    let partitioned = Partitioned { map, placeholders };
    info!(
        "partitioned {} rows into {} chromosomes ({} placeholders)",
        rows.len(),
        partitioned.len(),
        partitioned.placeholders.len()
    );
    Ok(partitioned)
}

//! Local recombination rates (cM/Mb) from cumulative genetic positions.
//!
//! Rates are first differences of each genetic position column divided by the
//! first difference of the physical position (in Mb), taken between each row
//! and its predecessor in the *global* row order, i.e. across chromosome
//! boundaries. Row 0 has no predecessor and is backward-filled from the next
//! computed rate.
//!
//! # Developer Notes
//! Differencing and filling are global rather than per chromosome, so the
//! first marker of every chromosome after the first carries a rate computed
//! against the last marker of the preceding chromosome (usually a negative
//! or otherwise meaningless value). Existing rate maps were produced this
//! way, so it is left as is; whether it should be per chromosome is open.
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::map::{MapRow, RateFloat};
use crate::numeric::{backfill, diff_ratio};

/// Which rate track of a [`RatedRow`] to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Track {
    Male,
    Female,
    #[default]
    SexAvg,
}

/// Male, female and sex-averaged values of one quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SexRates {
    pub male: RateFloat,
    pub female: RateFloat,
    pub sex_avg: RateFloat,
}

impl SexRates {
    pub fn get(&self, track: Track) -> RateFloat {
        match track {
            Track::Male => self.male,
            Track::Female => self.female,
            Track::SexAvg => self.sex_avg,
        }
    }

    fn is_finite(&self) -> bool {
        self.male.is_finite() && self.female.is_finite() && self.sex_avg.is_finite()
    }
}

/// A [`MapRow`] with its physical position in Mb and its local recombination
/// rates in cM/Mb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedRow {
    pub row: MapRow,
    pub position_mb: RateFloat,
    pub rates: SexRates,
}

impl RatedRow {
    pub fn chrom(&self) -> &str {
        &self.row.chrom
    }
}

/// Difference and backward-fill one genetic position column.
///
/// A value still undefined after filling (only possible for single-row input)
/// becomes NaN.
fn column_rates(values: &[RateFloat], positions_mb: &[RateFloat]) -> Vec<RateFloat> {
    backfill(&diff_ratio(values, positions_mb))
        .into_iter()
        .map(|rate| rate.unwrap_or(RateFloat::NAN))
        .collect()
}

/// Calculate the male, female and sex-averaged recombination rates of every row.
///
/// The output has the same length and order as `rows`. Each column is
/// differenced and filled independently. A zero physical step between
/// consecutive rows produces an infinite or NaN rate, which is passed through
/// unchanged.
pub fn calc_rates(rows: &[MapRow]) -> Vec<RatedRow> {
    let positions_mb: Vec<RateFloat> = rows.iter().map(MapRow::position_mb).collect();
    let column = |f: fn(&MapRow) -> RateFloat| -> Vec<RateFloat> {
        let values: Vec<RateFloat> = rows.iter().map(f).collect();
        column_rates(&values, &positions_mb)
    };
    let male = column(|r: &MapRow| r.male_cm);
    let female = column(|r: &MapRow| r.female_cm);
    let sex_avg = column(|r: &MapRow| r.sex_avg_cm);

    if rows.len() == 1 {
        warn!("single-row genetic map: no rate can be computed, writing NaN");
    }

    let rated: Vec<RatedRow> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| RatedRow {
            row: row.clone(),
            position_mb: positions_mb[i],
            rates: SexRates {
                male: male[i],
                female: female[i],
                sex_avg: sex_avg[i],
            },
        })
        .collect();

    let non_finite = rated.iter().filter(|r| !r.rates.is_finite()).count();
    if non_finite > 0 {
        warn!(
            "{} of {} rows have a non-finite rate (repeated physical position?)",
            non_finite,
            rated.len()
        );
    }
    debug!("calculated rates for {} rows", rated.len());
    rated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::read_genetic_map;
    use crate::numeric::{assert_float_eq, assert_floats_eq};

    fn track(rated: &[RatedRow], track: Track) -> Vec<RateFloat> {
        rated.iter().map(|r| r.rates.get(track)).collect()
    }

    #[test]
    fn test_rates_single_chromosome() {
        let rows = vec![
            MapRow::new("1", 0, 0.0, 0.0, 0.0),
            MapRow::new("1", 1_000_000, 1.0, 3.0, 2.0),
            MapRow::new("1", 2_000_000, 3.0, 4.0, 3.5),
        ];
        let rated = calc_rates(&rows);
        assert_eq!(rated.len(), 3);
        assert_floats_eq(&track(&rated, Track::Male), &[1.0, 1.0, 2.0], 1e-12);
        assert_floats_eq(&track(&rated, Track::Female), &[3.0, 3.0, 1.0], 1e-12);
        assert_floats_eq(&track(&rated, Track::SexAvg), &[2.0, 2.0, 1.5], 1e-12);
        assert_floats_eq(
            &rated.iter().map(|r| r.position_mb).collect::<Vec<_>>(),
            &[0.0, 1.0, 2.0],
            1e-12,
        );
    }

    #[test]
    fn test_rates_preserve_rows() {
        let rows = read_genetic_map("tests/data/littrell_test_map.txt").unwrap();
        let rated = calc_rates(&rows);
        assert_eq!(rated.len(), rows.len());
        for (r, row) in rated.iter().zip(rows.iter()) {
            assert_eq!(&r.row, row);
        }
    }

    #[test]
    fn test_backfill_equals_second_row() {
        let rows = read_genetic_map("tests/data/littrell_test_map.txt").unwrap();
        let rated = calc_rates(&rows);
        for t in [Track::Male, Track::Female, Track::SexAvg] {
            assert_float_eq(rated[0].rates.get(t), rated[1].rates.get(t), 1e-12);
        }
        assert_float_eq(rated[0].rates.male, 1.0, 1e-12);
        assert_float_eq(rated[0].rates.female, 2.0, 1e-12);
        assert_float_eq(rated[0].rates.sex_avg, 1.5, 1e-12);
    }

    #[test]
    fn test_rates_cross_chromosome_boundary() {
        let rows = read_genetic_map("tests/data/littrell_test_map.txt").unwrap();
        let rated = calc_rates(&rows);
        // first marker of chr2 is differenced against the last marker of chr1
        assert_eq!(rated[4].chrom(), "2");
        assert_float_eq(rated[4].rates.sex_avg, (0.0 - 4.5) / (0.5 - 4.0), 1e-12);
        assert_float_eq(rated[5].rates.sex_avg, 1.5, 1e-12);
    }

    #[test]
    fn test_zero_step_propagates_non_finite() {
        let rows = vec![
            MapRow::new("1", 0, 0.0, 0.0, 0.0),
            MapRow::new("1", 1_000_000, 1.0, 1.0, 1.0),
            MapRow::new("1", 1_000_000, 2.0, 1.0, 1.5),
        ];
        let rated = calc_rates(&rows);
        assert_eq!(rated[2].rates.male, RateFloat::INFINITY);
        assert!(rated[2].rates.female.is_nan());
        assert_eq!(rated[2].rates.sex_avg, RateFloat::INFINITY);
        assert_float_eq(rated[0].rates.male, 1.0, 1e-12);
    }

    #[test]
    fn test_single_row_is_nan() {
        let rated = calc_rates(&[MapRow::new("1", 10, 0.0, 0.0, 0.0)]);
        assert_eq!(rated.len(), 1);
        assert!(rated[0].rates.sex_avg.is_nan());
        assert!(rated[0].rates.male.is_nan());
    }

    #[test]
    fn test_empty() {
        assert!(calc_rates(&[]).is_empty());
    }
}

//! The end-to-end pipeline: genetic map in, per-chromosome rate maps and a
//! rate plot out.
//!
//! Each stage takes the previous stage's output by reference and returns a
//! new value: rows → [`calc_rates`] → [`ChromosomeOrder`] → [`partition`].
//! Writing files and drawing the plot happen only at the end, through a
//! [`MapSink`] and a [`PlotRenderer`].
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::chrom::{distinct_labels, ChromosomeOrder};
use crate::error::RateMapError;
use crate::map::{read_genetic_map, MapRow};
use crate::output::MapSink;
use crate::partition::{partition, Partitioned};
use crate::plot::{PlotData, PlotRenderer};
use crate::rates::{calc_rates, RatedRow, Track};

/// Options for [`run_report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Directory for the per-chromosome files.
    pub outdir: PathBuf,
    /// Path of the rate plot, if one should be drawn.
    pub plot: Option<PathBuf>,
    /// Rate track shown in the plot.
    pub track: Track,
    /// Add placeholder tables for Y and MT when they have no markers.
    pub placeholders: bool,
    /// Write gzip-compressed tables.
    pub gzip: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("Littrell2018_rn6"),
            plot: Some(PathBuf::from("rn6_map.png")),
            track: Track::SexAvg,
            placeholders: true,
            gzip: false,
        }
    }
}

/// The derived tables of one genetic map.
pub struct Report {
    pub rated: Vec<RatedRow>,
    /// Natural order of the chromosomes with markers.
    pub data_order: ChromosomeOrder,
    /// `data_order` plus any placeholder chromosomes.
    pub order: ChromosomeOrder,
    pub partitioned: Partitioned,
}

impl Report {
    /// Calculate rates and partition them by chromosome.
    pub fn build(rows: &[MapRow], placeholders: bool) -> Result<Report, RateMapError> {
        if rows.is_empty() {
            return Err(RateMapError::EmptyMap("<no rows>".to_string()));
        }
        let rated = calc_rates(rows);
        let labels = distinct_labels(rated.iter().map(RatedRow::chrom));
        let data_order = ChromosomeOrder::new(labels.iter().map(String::as_str));
        let order = if placeholders {
            data_order.with_placeholders()
        } else {
            data_order.clone()
        };
        info!(
            "{} chromosomes with markers, {} in output",
            data_order.len(),
            order.len()
        );
        let partitioned = partition(&rated, &order)?;
        Ok(Report {
            rated,
            data_order,
            order,
            partitioned,
        })
    }

    /// The plot panels: chromosomes with markers only, in natural order.
    pub fn plot_data(&self, track: Track) -> PlotData {
        PlotData::new(&self.rated, &self.data_order, track)
    }
}

/// Read `input`, write its per-chromosome rate maps to `sink` and, if
/// `renderer` is given, draw the rate plot.
pub fn run_report(
    input: &str,
    options: &ReportOptions,
    sink: &mut dyn MapSink,
    renderer: Option<&mut dyn PlotRenderer>,
) -> Result<Report, RateMapError> {
    let rows = read_genetic_map(input)?;
    let report = Report::build(&rows, options.placeholders)?;
    if let Some(renderer) = renderer {
        renderer.render(&report.plot_data(options.track))?;
    }
    sink.write_partitioned(&report.partitioned)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{DirSink, MemorySink};
    use crate::partition::HapMapRecord;
    use tempfile::tempdir;

    const TEST_MAP: &str = "tests/data/littrell_test_map.txt";

    #[derive(Default)]
    struct RecordingRenderer {
        plots: Vec<PlotData>,
    }

    impl PlotRenderer for RecordingRenderer {
        fn render(&mut self, plot: &PlotData) -> Result<(), RateMapError> {
            self.plots.push(plot.clone());
            Ok(())
        }
    }

    #[test]
    fn test_run_report_memory() {
        let mut sink = MemorySink::default();
        let mut renderer = RecordingRenderer::default();
        let report = run_report(
            TEST_MAP,
            &ReportOptions::default(),
            &mut sink,
            Some(&mut renderer),
        )
        .unwrap();

        let names: Vec<&String> = sink.tables.keys().collect();
        assert_eq!(names, vec!["1", "2", "10", "X", "Y", "MT"]);
        assert_eq!(sink.tables["MT"], vec![HapMapRecord::placeholder("MT")]);
        assert_eq!(report.partitioned.total_rows(), report.rated.len() + 2);

        assert_eq!(renderer.plots.len(), 1);
        let plot = &renderer.plots[0];
        assert_eq!(plot.panels.len(), 4);
        assert_eq!(plot.track, Track::SexAvg);
    }

    #[test]
    fn test_no_placeholders() {
        let rows = read_genetic_map(TEST_MAP).unwrap();
        let report = Report::build(&rows, false).unwrap();
        assert_eq!(report.order, report.data_order);
        assert_eq!(report.partitioned.len(), 4);
        assert!(report.partitioned.placeholders().is_empty());
    }

    #[test]
    fn test_present_placeholder_not_duplicated() {
        let rows = vec![
            MapRow::new("Y", 1_000_000, 0.0, 0.0, 0.0),
            MapRow::new("Y", 2_000_000, 0.0, 0.1, 0.05),
        ];
        let report = Report::build(&rows, true).unwrap();
        assert_eq!(report.order.as_slice(), &["Y", "MT"]);
        assert_eq!(report.partitioned.get("Y").unwrap().len(), 2);
        assert_eq!(report.partitioned.placeholders(), &["MT"]);
    }

    #[test]
    fn test_empty_rows() {
        assert!(matches!(
            Report::build(&[], true),
            Err(RateMapError::EmptyMap(_))
        ));
    }

    #[test]
    fn test_run_report_files() {
        let dir = tempdir().unwrap();
        let options = ReportOptions {
            outdir: dir.path().join("out"),
            plot: None,
            ..Default::default()
        };
        let mut sink = DirSink::new(&options.outdir, options.gzip);
        run_report(TEST_MAP, &options, &mut sink, None).unwrap();

        assert_eq!(sink.written().len(), 6);
        let chr10 = std::fs::read_to_string(options.outdir.join("10.txt")).unwrap();
        let lines: Vec<&str> = chr10.lines().collect();
        assert_eq!(lines[0], "Chromosome\tPosition(bp)\tRate(cM/Mb)\tMap(cM)");
        assert_eq!(lines[2], "10\t3000000\t0.75\t1.5");
        assert_eq!(lines.len(), 3);
    }
}

//! The diagnostic recombination rate plot.
//!
//! One panel per chromosome, in natural chromosome order, laid out on a grid
//! of [`PANEL_COLUMNS`] columns. All panels share the y-axis range `[0, max]`,
//! where `max` is the largest finite rate over every chromosome.
//!
//! Assembling the panels ([`PlotData`]) is pure; drawing goes through the
//! [`PlotRenderer`] trait. The `plot` feature provides [`BitmapRenderer`],
//! which draws a PNG with `plotters`.
use indexmap::IndexMap;
use tracing::debug;

use crate::chrom::{canonical_label, ChromosomeOrder};
use crate::error::RateMapError;
use crate::map::RateFloat;
use crate::numeric::max_finite;
use crate::rates::{RatedRow, Track};

/// Number of panel columns in the plot grid.
pub const PANEL_COLUMNS: usize = 5;

/// A grid with a fixed number of columns and just enough rows for `panels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGrid {
    pub panels: usize,
    pub rows: usize,
    pub cols: usize,
}

impl PanelGrid {
    pub fn new(panels: usize) -> Self {
        Self {
            panels,
            rows: panels.div_ceil(PANEL_COLUMNS),
            cols: PANEL_COLUMNS,
        }
    }

    /// The (row, column) cell of panel `i`, or `None` past the last panel.
    pub fn cell(&self, i: usize) -> Option<(usize, usize)> {
        (i < self.panels).then(|| (i / self.cols, i % self.cols))
    }

    /// Number of grid cells left empty in the last row.
    pub fn unused_cells(&self) -> usize {
        self.rows * self.cols - self.panels
    }
}

/// The points of one chromosome panel: (position in Mb, rate in cM/Mb).
#[derive(Debug, Clone, PartialEq)]
pub struct ChromSeries {
    pub chrom: String,
    pub points: Vec<(RateFloat, RateFloat)>,
}

impl ChromSeries {
    pub fn title(&self) -> String {
        format!("Chr {}", self.chrom)
    }

    /// The x-axis range covering every marker.
    pub fn x_range(&self) -> (RateFloat, RateFloat) {
        let min = self.points.iter().map(|p| p.0).fold(RateFloat::INFINITY, RateFloat::min);
        let max = self.points.iter().map(|p| p.0).fold(RateFloat::NEG_INFINITY, RateFloat::max);
        if min.is_finite() && max > min {
            (min, max)
        } else if min.is_finite() {
            (min, min + 1.0)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Everything needed to draw the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub track: Track,
    pub panels: Vec<ChromSeries>,
    pub y_max: RateFloat,
    pub grid: PanelGrid,
}

impl PlotData {
    /// Build one panel per chromosome of `order` that has markers in `rows`.
    ///
    /// Chromosomes of `order` without markers are skipped.
    pub fn new(rows: &[RatedRow], order: &ChromosomeOrder, track: Track) -> Self {
        let mut by_chrom: IndexMap<String, Vec<(RateFloat, RateFloat)>> = IndexMap::new();
        for rated in rows {
            by_chrom
                .entry(canonical_label(rated.chrom()))
                .or_default()
                .push((rated.position_mb, rated.rates.get(track)));
        }

        let panels: Vec<ChromSeries> = order
            .iter()
            .filter_map(|chrom| {
                by_chrom.get(chrom).map(|points| ChromSeries {
                    chrom: chrom.to_string(),
                    points: points.clone(),
                })
            })
            .collect();

        let y_max = match max_finite(rows.iter().map(|r| r.rates.get(track))) {
            Some(max) if max > 0.0 => max,
            _ => 1.0,
        };
        let grid = PanelGrid::new(panels.len());
        debug!(
            "plot grid {}x{} for {} chromosomes ({} unused cells), y max {}",
            grid.rows,
            grid.cols,
            grid.panels,
            grid.unused_cells(),
            y_max
        );
        Self {
            track,
            panels,
            y_max,
            grid,
        }
    }
}

/// Something that draws a [`PlotData`].
pub trait PlotRenderer {
    fn render(&mut self, plot: &PlotData) -> Result<(), RateMapError>;
}

#[cfg(feature = "plot")]
pub use self::bitmap::BitmapRenderer;

#[cfg(feature = "plot")]
mod bitmap {
    use plotters::coord::Shift;
    use plotters::prelude::*;
    use std::path::{Path, PathBuf};
    use tracing::info;

    use super::{PlotData, PlotRenderer};
    use crate::error::RateMapError;

    /// Pixel size of a single panel.
    const PANEL_SIZE: (u32, u32) = (360, 240);

    /// Draws the plot as a PNG bitmap.
    pub struct BitmapRenderer {
        pub path: PathBuf,
    }

    impl BitmapRenderer {
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }
    }

    fn draw_panels<DB>(
        root: &DrawingArea<DB, Shift>,
        plot: &PlotData,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE)?;
        let areas = if plot.grid.rows == 0 {
            Vec::new()
        } else {
            root.split_evenly((plot.grid.rows, plot.grid.cols))
        };

        // cells past the last chromosome are never drawn on
        for (i, series) in plot.panels.iter().enumerate() {
            let Some((row, col)) = plot.grid.cell(i) else {
                break;
            };
            let area = &areas[row * plot.grid.cols + col];
            let (x_min, x_max) = series.x_range();
            let mut chart = ChartBuilder::on(area)
                .caption(series.title(), ("sans-serif", 14))
                .margin(8)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(x_min..x_max, 0.0..plot.y_max)?;

            chart
                .configure_mesh()
                .x_desc("Positions in Mb")
                .y_desc("cM/Mb")
                .label_style(("sans-serif", 10))
                .light_line_style(BLACK.mix(0.05))
                .draw()?;

            chart.draw_series(LineSeries::new(
                series.points.iter().copied().filter(|(_, y)| y.is_finite()),
                BLUE.mix(0.7).stroke_width(1),
            ))?;
        }
        root.present()?;
        Ok(())
    }

    impl PlotRenderer for BitmapRenderer {
        fn render(&mut self, plot: &PlotData) -> Result<(), RateMapError> {
            let width = PANEL_SIZE.0 * plot.grid.cols as u32;
            let height = PANEL_SIZE.1 * plot.grid.rows.max(1) as u32;
            let root = BitMapBackend::new(&self.path, (width, height)).into_drawing_area();
            draw_panels(&root, plot).map_err(|e| RateMapError::PlotError(e.to_string()))?;
            info!(
                "wrote {} panel rate plot to {}",
                plot.grid.panels,
                self.path.display()
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::read_genetic_map;
    use crate::numeric::assert_float_eq;
    use crate::rates::calc_rates;

    #[test]
    fn test_panel_grid() {
        let grid = PanelGrid::new(22);
        assert_eq!((grid.rows, grid.cols), (5, 5));
        assert_eq!(grid.unused_cells(), 3);
        assert_eq!(grid.cell(0), Some((0, 0)));
        assert_eq!(grid.cell(7), Some((1, 2)));
        assert_eq!(grid.cell(21), Some((4, 1)));
        assert_eq!(grid.cell(22), None);

        assert_eq!(PanelGrid::new(5).rows, 1);
        assert_eq!(PanelGrid::new(6).rows, 2);
        assert_eq!(PanelGrid::new(0).rows, 0);
    }

    #[test]
    fn test_panel_cells_fill_grid_row_major() {
        let grid = PanelGrid::new(12);
        let cells: Vec<(usize, usize)> = (0..grid.panels).filter_map(|i| grid.cell(i)).collect();
        assert_eq!(cells.len(), 12);
        for (i, &(row, col)) in cells.iter().enumerate() {
            assert!(row < grid.rows && col < grid.cols);
            // the flat area index the renderer draws panel i into
            assert_eq!(row * grid.cols + col, i);
        }
        assert_eq!(cells.last(), Some(&(2, 1)));
        assert_eq!(grid.unused_cells(), 3);
    }

    #[test]
    fn test_plot_data_panels_in_order() {
        let rows = read_genetic_map("tests/data/littrell_test_map.txt").unwrap();
        let rated = calc_rates(&rows);
        let order = ChromosomeOrder::new(rows.iter().map(|r| r.chrom.as_str())).with_placeholders();
        let plot = PlotData::new(&rated, &order, Track::SexAvg);

        let titles: Vec<String> = plot.panels.iter().map(ChromSeries::title).collect();
        // placeholder chromosomes have no markers to plot
        assert_eq!(titles, vec!["Chr 1", "Chr 2", "Chr 10", "Chr X"]);
        assert_eq!(plot.grid.rows, 1);
        assert_eq!(plot.panels[1].points.len(), 3);
        assert_float_eq(plot.panels[1].points[0].0, 0.5, 1e-12);
    }

    #[test]
    fn test_shared_y_max() {
        let rows = read_genetic_map("tests/data/littrell_test_map.txt").unwrap();
        let rated = calc_rates(&rows);
        let order = ChromosomeOrder::new(rows.iter().map(|r| r.chrom.as_str()));

        assert_float_eq(PlotData::new(&rated, &order, Track::SexAvg).y_max, 2.0, 1e-12);
        assert_float_eq(PlotData::new(&rated, &order, Track::Male).y_max, 2.0, 1e-12);
        assert_float_eq(PlotData::new(&rated, &order, Track::Female).y_max, 2.0, 1e-12);
    }

    #[test]
    fn test_y_max_ignores_non_finite() {
        let rows = vec![
            crate::map::MapRow::new("1", 0, 0.0, 0.0, 0.0),
            crate::map::MapRow::new("1", 1_000_000, 0.5, 0.5, 0.5),
            crate::map::MapRow::new("1", 1_000_000, 1.0, 1.0, 1.0),
        ];
        let rated = calc_rates(&rows);
        let order = ChromosomeOrder::new(["1"]);
        let plot = PlotData::new(&rated, &order, Track::SexAvg);
        assert_float_eq(plot.y_max, 0.5, 1e-12);
    }

    #[test]
    fn test_x_range_single_point() {
        let series = ChromSeries {
            chrom: "1".to_string(),
            points: vec![(3.0, 1.0)],
        };
        assert_eq!(series.x_range(), (3.0, 4.0));
    }
}

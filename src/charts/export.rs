//! Static Chart Export
//! Renders a chart state to a PNG file with plotters.

use crate::charts::state::{AxisId, ChartState, Dataset, ValueRange};
use egui::Color32;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: the chart has no data points")]
    Empty,
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Draw(err.to_string())
}

fn rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

/// Pad a value range by 5% on each side so lines do not touch the frame.
fn padded(range: ValueRange) -> std::ops::Range<f64> {
    let pad = range.span() * 0.05;
    (range.min - pad)..(range.max + pad)
}

pub struct ChartExporter;

impl ChartExporter {
    /// Write `state` to `path` as a PNG of `width` x `height` pixels.
    pub fn export_png(
        state: &ChartState,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ExportError> {
        let (Some(first), Some(last)) = (state.labels.first(), state.labels.last()) else {
            return Err(ExportError::Empty);
        };
        if !state.has_points() {
            return Err(ExportError::Empty);
        }
        let x_range = (*first as f64 - 0.5)..(*last as f64 + 0.5);

        let primary = state.value_range(AxisId::Primary);
        let secondary = state.value_range(AxisId::Secondary);
        let y_range = padded(primary.or(secondary).ok_or(ExportError::Empty)?);
        let y1_range = padded(secondary.or(primary).ok_or(ExportError::Empty)?);

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .caption(&state.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70);
        if state.y1_axis.is_some() {
            builder.right_y_label_area_size(70);
        }

        let mut chart = builder
            .build_cartesian_2d(x_range.clone(), y_range)
            .map_err(draw_err)?
            .set_secondary_coord(x_range, y1_range);

        chart
            .configure_mesh()
            .x_desc(state.x_axis.title.as_str())
            .y_desc(state.y_axis.title.as_str())
            .x_label_formatter(&|x: &f64| {
                if x.fract() == 0.0 {
                    format!("{:.0}", x)
                } else {
                    String::new()
                }
            })
            .draw()
            .map_err(draw_err)?;

        if let Some(y1) = &state.y1_axis {
            chart
                .configure_secondary_axes()
                .y_desc(y1.title.as_str())
                .draw()
                .map_err(draw_err)?;
        }

        for dataset in &state.datasets {
            let color = rgb(dataset.style.color);
            let stroke = color.stroke_width(dataset.style.line_width.round().max(1.0) as u32);
            let radius = (dataset.style.point_radius / 2.0).round().max(1.0) as i32;
            let segments = dataset_segments(dataset, &state.labels);
            let points: Vec<(f64, f64)> = dataset
                .points(&state.labels)
                .into_iter()
                .map(|[x, y]| (x, y))
                .collect();

            match dataset.axis {
                AxisId::Primary => {
                    for (i, segment) in segments.into_iter().enumerate() {
                        let series = chart
                            .draw_series(LineSeries::new(segment, stroke))
                            .map_err(draw_err)?;
                        if i == 0 {
                            series.label(dataset.label.as_str()).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], stroke)
                            });
                        }
                    }
                    chart
                        .draw_series(
                            points
                                .iter()
                                .map(|&(x, y)| Circle::new((x, y), radius, color.filled())),
                        )
                        .map_err(draw_err)?;
                }
                AxisId::Secondary => {
                    for (i, segment) in segments.into_iter().enumerate() {
                        let series = chart
                            .draw_secondary_series(LineSeries::new(segment, stroke))
                            .map_err(draw_err)?;
                        if i == 0 {
                            series.label(dataset.label.as_str()).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], stroke)
                            });
                        }
                    }
                    chart
                        .draw_secondary_series(
                            points
                                .iter()
                                .map(|&(x, y)| Circle::new((x, y), radius, color.filled())),
                        )
                        .map_err(draw_err)?;
                }
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

fn dataset_segments(dataset: &Dataset, labels: &[i32]) -> Vec<Vec<(f64, f64)>> {
    dataset
        .segments(labels)
        .into_iter()
        .map(|segment| segment.into_iter().map(|[x, y]| (x, y)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::presenter::{country_update, ChartPresenter};
    use crate::data::{Indicator, Series, YearRange};

    #[test]
    fn empty_chart_is_not_exported() {
        let presenter = ChartPresenter::country_view();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        assert!(matches!(
            ChartExporter::export_png(presenter.state(), &path, 800, 600),
            Err(ExportError::Empty)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn all_gap_series_is_not_exported() {
        let mut presenter = ChartPresenter::country_view();
        let range = YearRange::new(2018, 2020);
        presenter.render(country_update(
            Indicator::Gdp,
            "India",
            range,
            &Series::from_range(range, |_| None),
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ChartExporter::export_png(presenter.state(), &dir.path().join("c.png"), 800, 600),
            Err(ExportError::Empty)
        ));
    }

    #[test]
    fn segments_become_tuples() {
        let range = YearRange::new(2018, 2020);
        let series = Series::from_range(range, |y| (y != 2019).then_some(2.0));
        let update = country_update(Indicator::Gdp, "India", range, &series);
        assert_eq!(
            dataset_segments(&update.datasets[0], &update.labels),
            vec![vec![(2018.0, 2.0), (2020.0, 2.0)]]
        );
    }
}

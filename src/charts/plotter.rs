//! Chart Plotter Module
//! Draws a chart state as an interactive line chart using egui_plot.

use crate::charts::state::{AxisId, ChartState};
use crate::stats::{Correlation, SeriesSummary};
use egui::{Color32, RichText};
use egui_plot::{AxisHints, HPlacement, Legend, Line, LineStyle, Plot, PlotPoints, Points};

/// Creates line charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw `state` with one or two vertical scales.
    ///
    /// egui_plot has a single coordinate system, so values on the secondary
    /// scale are mapped onto the primary range and the right axis labels are
    /// mapped back.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, state: &ChartState, height: f32) {
        let primary = state.value_range(AxisId::Primary);
        let secondary = state.value_range(AxisId::Secondary);
        let mapping = match (secondary, primary) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        };

        let mut y_axes = vec![AxisHints::new_y().label(Self::axis_text(
            &state.y_axis.title,
            state.y_axis.color,
        ))];
        if let (Some(y1), Some((from, to))) = (&state.y1_axis, mapping) {
            y_axes.push(
                AxisHints::new_y()
                    .label(Self::axis_text(&y1.title, y1.color))
                    .placement(HPlacement::Right)
                    .formatter(move |mark, _range| {
                        format!("{:.2}", to.map_onto(&from, mark.value))
                    }),
            );
        }

        let mut plot = Plot::new(id.to_string())
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(state.x_axis.title.clone())
            .custom_y_axes(y_axes)
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            });
        if let (Some(first), Some(last)) = (state.labels.first(), state.labels.last()) {
            plot = plot
                .include_x(*first as f64 - 0.5)
                .include_x(*last as f64 + 0.5);
        }
        if let Some(range) = primary.or(secondary) {
            plot = plot.include_y(range.min).include_y(range.max);
        }

        let baseline = primary.or(secondary).map(|r| r.min).unwrap_or(0.0);

        plot.show(ui, |plot_ui| {
            for dataset in &state.datasets {
                let project = |p: [f64; 2]| -> [f64; 2] {
                    match (dataset.axis, mapping) {
                        (AxisId::Secondary, Some((from, to))) => [p[0], from.map_onto(&to, p[1])],
                        _ => p,
                    }
                };
                let color = dataset.style.color;

                for segment in dataset.segments(&state.labels) {
                    let points: PlotPoints = segment.iter().map(|&p| project(p)).collect();
                    let mut line = Line::new(points)
                        .color(color)
                        .width(dataset.style.line_width)
                        .name(&dataset.label);
                    if dataset.style.dashed {
                        line = line.style(LineStyle::dashed_loose());
                    }
                    if dataset.style.fill {
                        line = line.fill(baseline as f32);
                    }
                    plot_ui.line(line);
                }

                let points: PlotPoints = dataset
                    .points(&state.labels)
                    .into_iter()
                    .map(project)
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(dataset.style.point_radius / 2.0)
                        .color(color)
                        .name(&dataset.label),
                );
            }
        });
    }

    fn axis_text(title: &str, color: Option<Color32>) -> RichText {
        let text = RichText::new(title).strong();
        match color {
            Some(c) => text.color(c),
            None => text,
        }
    }

    /// Draw summary statistics of the plotted series.
    pub fn draw_summary_table(ui: &mut egui::Ui, id: &str, summary: &SeriesSummary) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("summary_{}", id)))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Years", "Gaps", "Mean", "Min", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        ui.label(RichText::new(summary.count.to_string()).size(11.0));
                        ui.label(RichText::new(summary.gaps.to_string()).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", summary.mean)).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", summary.min)).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", summary.max)).size(11.0));
                        ui.end_row();
                    });
            });
    }

    /// One-line description of a correlation.
    pub fn correlation_text(correlation: &Correlation) -> String {
        let significance = if correlation.is_significant {
            "significant"
        } else {
            "not significant"
        };
        format!(
            "r = {:.2} ({} {}, p = {:.3}, {}, {} years)",
            correlation.r,
            correlation.strength(),
            correlation.direction(),
            correlation.p_value,
            significance,
            correlation.pairs
        )
    }
}

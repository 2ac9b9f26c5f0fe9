//! Chart Viewer Widget
//! Central panel showing the chart of the active view.

use crate::charts::{ChartPlotter, ChartPresenter, IndiaPresenter, INDIA_NOTES};
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 420.0;

pub struct ChartViewer;

impl ChartViewer {
    /// Countries view: title, line chart, summary table.
    pub fn show_countries(ui: &mut egui::Ui, presenter: &ChartPresenter) {
        let state = presenter.state();

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            Self::title(ui, &state.title);

            if let Some(notice) = presenter.notice() {
                Self::notice(ui, notice);
            }

            if state.labels.is_empty() {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            }

            ChartPlotter::draw_line_chart(ui, "country_chart", state, CHART_HEIGHT);
            ui.add_space(10.0);

            match presenter.summary() {
                Some(summary) => ChartPlotter::draw_summary_table(ui, "country", summary),
                None => {
                    ui.label(
                        RichText::new("No values available for this selection")
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                }
            }
        });
    }

    /// India view: dual-scale chart with the explanation underneath.
    pub fn show_india(ui: &mut egui::Ui, presenter: &IndiaPresenter) {
        let state = presenter.state();

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            Self::title(ui, &state.title);
            if let Some(notice) = presenter.notice() {
                Self::notice(ui, notice);
            }
            ChartPlotter::draw_line_chart(ui, "india_chart", state, CHART_HEIGHT);
            ui.add_space(10.0);

            egui::Frame::none()
                .rounding(8.0)
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(presenter.heading()).size(18.0).strong());
                    ui.add_space(8.0);
                    ui.label(RichText::new(presenter.explanation()).size(16.0));

                    if let Some(correlation) = presenter.correlation() {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(ChartPlotter::correlation_text(correlation))
                                .size(12.0)
                                .color(Color32::GRAY),
                        );
                    }

                    for note in INDIA_NOTES {
                        ui.add_space(8.0);
                        ui.label(RichText::new(note).size(13.0));
                    }
                });
        });
    }

    fn notice(ui: &mut egui::Ui, notice: &str) {
        ui.label(
            RichText::new(notice)
                .size(12.0)
                .color(Color32::from_rgb(220, 53, 69)),
        );
    }

    fn title(ui: &mut egui::Ui, title: &str) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(title).size(20.0).strong());
        });
        ui.add_space(8.0);
    }
}

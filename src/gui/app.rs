//! Happiness Board Main Application
//! Main window with a tab per view, a control panel and a chart viewer.

use crate::charts::{ChartExporter, ChartState};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, UiOrchestrator};
use egui::SidePanel;
use tracing::{error, info, warn};

const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Countries,
    India,
}

/// Main application window.
pub struct HappinessBoardApp {
    board: UiOrchestrator,
    tab: Tab,
    export_status: Option<String>,
}

impl HappinessBoardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, board: UiOrchestrator) -> Self {
        Self {
            board,
            tab: Tab::Countries,
            export_status: None,
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::Changed(control) => {
                self.export_status = None;
                match self.tab {
                    Tab::Countries => self.board.on_country_control(control),
                    Tab::India => self.board.on_india_control(control),
                }
            }
            ControlPanelAction::ExportPng => {
                let state = match self.tab {
                    Tab::Countries => self.board.country_chart().state().clone(),
                    Tab::India => self.board.india_chart().state().clone(),
                };
                self.handle_export_png(&state);
            }
            ControlPanelAction::None => {}
        }
    }

    /// Ask for a destination, render the chart to PNG and open it.
    fn handle_export_png(&mut self, state: &ChartState) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("happiness_chart.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match ChartExporter::export_png(state, &path, EXPORT_WIDTH, EXPORT_HEIGHT) {
            Ok(()) => {
                info!(path = %path.display(), "chart exported");
                self.export_status = Some(format!("Exported {}", path.display()));
                if let Err(err) = open::that(&path) {
                    warn!("could not open exported chart: {err}");
                }
            }
            Err(err) => {
                error!("chart export failed: {err}");
                self.export_status = Some(format!("Export error: {}", err));
            }
        }
    }
}

impl eframe::App for HappinessBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.board.poll();

        // Request repaint while fetches are outstanding
        if self.board.is_busy() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Countries, "🌍 Countries");
                ui.selectable_value(&mut self.tab, Tab::India, "🇮🇳 India");
            });
        });

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = match self.tab {
                        Tab::Countries => ControlPanel::show_countries(ui, &self.board),
                        Tab::India => ControlPanel::show_india(ui, &self.board),
                    };
                    if let Some(status) = &self.export_status {
                        ui.label(egui::RichText::new(status).size(11.0));
                    }
                    self.handle_action(action);
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Countries => ChartViewer::show_countries(ui, self.board.country_chart()),
            Tab::India => ChartViewer::show_india(ui, self.board.india_chart()),
        });
    }
}

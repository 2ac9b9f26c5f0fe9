//! Control Panel Widget
//! Left side panel with the selection controls of the active view.

use crate::data::{Indicator, YearRangeController};
use crate::gui::orchestrator::{Control, DirectoryState, UiOrchestrator};
use egui::{Color32, ComboBox, RichText};

const LABEL_WIDTH: f32 = 90.0;
const COMBO_WIDTH: f32 = 180.0;

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Changed(Control),
    ExportPng,
}

/// Stateless drawing of the controls; every value is read from the orchestrator.
pub struct ControlPanel;

impl ControlPanel {
    /// Draw the Countries view controls.
    pub fn show_countries(ui: &mut egui::Ui, board: &UiOrchestrator) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        Self::header(ui, "🌍 Countries", "Happiness indicators by country");

        ui.label(RichText::new("🔧 Selection").size(14.0).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Country:"));
            let enabled = !board.countries().is_empty();
            ui.add_enabled_ui(enabled, |ui| {
                ComboBox::from_id_salt("country")
                    .width(COMBO_WIDTH)
                    .selected_text(board.country().unwrap_or(""))
                    .show_ui(ui, |ui| {
                        for name in board.countries() {
                            if ui
                                .selectable_label(board.country() == Some(name.as_str()), name)
                                .clicked()
                            {
                                action = ControlPanelAction::Changed(Control::Country(name.clone()));
                            }
                        }
                    });
            });
        });

        match board.directory_state() {
            DirectoryState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading countries...").size(11.0));
                });
            }
            DirectoryState::Failed(_) => {
                ui.label(
                    RichText::new("Country list unavailable")
                        .size(11.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
            DirectoryState::NotStarted | DirectoryState::Ready => {}
        }

        ui.add_space(5.0);
        if let Some(change) =
            Self::indicator_combo(ui, "indicator", &Indicator::COUNTRY_VIEW, board.country_indicator())
        {
            action = ControlPanelAction::Changed(change);
        }

        ui.add_space(5.0);
        if let Some(change) = Self::year_combos(ui, "country_years", board.country_years()) {
            action = ControlPanelAction::Changed(change);
        }

        if Self::footer(ui, board.status(), board.country_chart().state().has_points()) {
            action = ControlPanelAction::ExportPng;
        }

        action
    }

    /// Draw the India view controls.
    pub fn show_india(ui: &mut egui::Ui, board: &UiOrchestrator) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        Self::header(ui, "🇮🇳 India", "What moves India's happiness?");

        ui.label(RichText::new("🔧 Selection").size(14.0).strong());
        ui.add_space(8.0);

        if let Some(change) = Self::indicator_combo(
            ui,
            "india_indicator",
            &Indicator::INDIA_VIEW,
            board.india_indicator(),
        ) {
            action = ControlPanelAction::Changed(change);
        }

        ui.add_space(5.0);
        if let Some(change) = Self::year_combos(ui, "india_years", board.india_years()) {
            action = ControlPanelAction::Changed(change);
        }

        if Self::footer(ui, board.status(), board.india_chart().state().has_points()) {
            action = ControlPanelAction::ExportPng;
        }

        action
    }

    fn header(ui: &mut egui::Ui, title: &str, subtitle: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new(title)
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new(subtitle).size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);
    }

    fn indicator_combo(
        ui: &mut egui::Ui,
        id: &str,
        choices: &[Indicator],
        selected: Indicator,
    ) -> Option<Control> {
        let mut change = None;
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Indicator:"));
            ComboBox::from_id_salt(id)
                .width(COMBO_WIDTH)
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for indicator in choices {
                        if ui
                            .selectable_label(selected == *indicator, indicator.label())
                            .clicked()
                        {
                            change = Some(Control::Indicator(*indicator));
                        }
                    }
                });
        });
        change
    }

    /// Start and end year dropdowns; end years below the start are disabled.
    fn year_combos(ui: &mut egui::Ui, id: &str, years: &YearRangeController) -> Option<Control> {
        let mut change = None;
        let range = years.range();

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Start Year:"));
            ComboBox::from_id_salt(format!("{}_start", id))
                .width(COMBO_WIDTH)
                .selected_text(range.start.to_string())
                .show_ui(ui, |ui| {
                    for year in years.years() {
                        if ui
                            .selectable_label(range.start == year, year.to_string())
                            .clicked()
                        {
                            change = Some(Control::StartYear(year));
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("End Year:"));
            ComboBox::from_id_salt(format!("{}_end", id))
                .width(COMBO_WIDTH)
                .selected_text(range.end.to_string())
                .show_ui(ui, |ui| {
                    for option in years.end_options() {
                        let label =
                            egui::SelectableLabel::new(range.end == option.year, option.year.to_string());
                        if ui.add_enabled(option.enabled, label).clicked() {
                            change = Some(Control::EndYear(option.year));
                        }
                    }
                });
        });

        change
    }

    /// Export button and status line. Returns `true` when export was clicked.
    fn footer(ui: &mut egui::Ui, status: &str, can_export: bool) -> bool {
        let mut export = false;

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(can_export, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    export = true;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if status.starts_with("Loaded") || status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(status).size(11.0).color(status_color));

        export
    }
}

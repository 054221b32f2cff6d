use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Category, Field};
use crate::state::AppState;

/// A change requested by a filter widget, applied once the frame's widgets
/// no longer borrow the state.
enum FilterAction {
    Toggle(Field, Category),
    All(Field),
    None(Field),
    TopTitles,
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in Field::ALL {
                let all_values = dataset.distinct_values(field);
                let n_selected = state.criteria.selected(field).map_or(0, |s| s.len());
                let header_text = format!("{}  ({n_selected}/{})", field.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field)
                    .default_open(field != Field::JobTitle)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                actions.push(FilterAction::All(field));
                            }
                            if ui.small_button("None").clicked() {
                                actions.push(FilterAction::None(field));
                            }
                            if field == Field::JobTitle
                                && ui
                                    .small_button(format!("Top {}", state.top_titles))
                                    .clicked()
                            {
                                actions.push(FilterAction::TopTitles);
                            }
                        });

                        ScrollArea::vertical()
                            .id_salt(("filter_values", field))
                            .max_height(260.0)
                            .show(ui, |ui: &mut Ui| {
                                for val in &all_values {
                                    let mut checked = state.criteria.is_selected(field, val);
                                    let text = RichText::new(val.to_string())
                                        .color(state.color_for(field, val));
                                    if ui.checkbox(&mut checked, text).changed() {
                                        actions.push(FilterAction::Toggle(field, val.clone()));
                                    }
                                }
                            });
                    });
            }
        });

    for action in actions {
        match action {
            FilterAction::Toggle(field, value) => state.toggle_filter_value(field, &value),
            FilterAction::All(field) => state.select_all(field),
            FilterAction::None(field) => state.select_none(field),
            FilterAction::TopTitles => state.select_top_titles(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("Reset filters").clicked() {
            state.reset_filters();
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} in view",
                ds.len(),
                state.view.len()
            ));
        }
        if let Some(path) = &state.source {
            ui.separator();
            ui.weak(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load file: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::GenderColors;
use crate::data::model::{DataSource, Gender, GenderFilter};
use crate::state::{AppState, ViewKind};

const MAX_SUGGESTIONS: usize = 8;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, colors: &GenderColors) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Name ----
            ui.strong("Search a Name:");
            if ui.text_edit_singleline(&mut state.filters.name_query).changed() {
                state.refresh_views();
            }
            name_suggestions(ui, state);
            ui.separator();

            // ---- Year ----
            ui.strong("Choose a Year:");
            let (min, max) = (state.config.min_year, state.config.max_year);
            ui.add(egui::Slider::new(&mut state.filters.year, min..=max));
            ui.separator();

            // ---- Top N ----
            ui.strong("Number of Top Names to Show:");
            egui::ComboBox::from_id_salt("top_n")
                .selected_text(state.filters.top_n.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for &n in &state.config.top_n_choices {
                        ui.selectable_value(&mut state.filters.top_n, n, n.to_string());
                    }
                });
            ui.separator();

            // ---- Gender ----
            ui.strong("Filter by Gender:");
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut state.filters.gender, GenderFilter::All, "All");
                for gender in Gender::ALL.into_iter().rev() {
                    let option = GenderFilter::Only(gender);
                    ui.radio_value(&mut state.filters.gender, option, option.to_string());
                }
            });
            ui.add_space(4.0);
            for (label, color) in colors.legend_entries() {
                ui.label(RichText::new(format!("■ {label}")).color(color));
            }
        });

    // Recompute the views after any widget change.
    state.refresh_views();
}

/// Clickable names close to the query, shown while the exact query has no
/// trend rows.
fn name_suggestions(ui: &mut Ui, state: &mut AppState) {
    let matches = state.name_suggestions(MAX_SUGGESTIONS);
    if matches.is_empty() {
        return;
    }
    ui.small("Did you mean:");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for name in matches {
            if ui.small_button(&name).clicked() {
                state.filters.name_query = name;
                state.refresh_views();
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open archive…").clicked() {
                open_archive_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload from SSA").clicked() {
                state.reload_remote();
                ui.close_menu();
            }
            ui.separator();
            ui.add_enabled_ui(state.dataset.is_some(), |ui: &mut Ui| {
                ui.menu_button("Export", |ui: &mut Ui| {
                    for kind in ViewKind::ALL {
                        if ui.button(format!("{}…", kind.label())).clicked() {
                            export_dialog(state, kind);
                            ui.close_menu();
                        }
                    }
                });
            });
        });

        ui.separator();

        if let Some(source) = &state.pending_load {
            ui.spinner();
            ui.label(format!("Downloading {source}…"));
        } else if let (Some(ds), Some(wonders)) = (&state.dataset, &state.one_hit_wonders) {
            let years = ds
                .year_range()
                .map(|(a, b)| format!(", {a}–{b}"))
                .unwrap_or_default();
            ui.label(format!(
                "{} records{years}, {} one-hit wonders",
                ds.len(),
                wonders.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_archive_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open national names archive")
        .add_filter("ZIP archive", &["zip"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening local archive {}", path.display());
        state.request_load(DataSource::Local(path));
    }
}

pub fn export_dialog(state: &mut AppState, kind: ViewKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Export {}", kind.label().to_lowercase()))
        .set_file_name(format!("{}.csv", kind.file_stem()))
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .save_file();

    if let Some(path) = file {
        match state.export_view(kind, &path) {
            Ok(rows) => {
                state.status_message = None;
                log::info!("Exported {} ({rows} rows)", kind.label());
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

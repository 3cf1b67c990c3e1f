use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::GenderColors;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Leading records of the selected year in dataset order.
pub fn detail_table(ui: &mut Ui, state: &AppState, colors: &GenderColors) {
    ui.heading("Detailed Name Data");
    let rows = &state.views.detail;
    if rows.is_empty() {
        ui.label(format!("No records for {}.", state.filters.year));
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["#", "Name", "Gender", "Count", "Year"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let i = row.index();
                let record = &rows[i];
                row.col(|ui| {
                    ui.label(i.to_string());
                });
                row.col(|ui| {
                    ui.label(&record.name);
                });
                row.col(|ui| {
                    ui.label(
                        RichText::new(record.gender.code()).color(colors.color_for(record.gender)),
                    );
                });
                row.col(|ui| {
                    ui.label(record.count.to_string());
                });
                row.col(|ui| {
                    ui.label(record.year.to_string());
                });
            });
        });
}

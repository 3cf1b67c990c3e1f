use eframe::egui::{self, ScrollArea, Ui};

use crate::color::GenderColors;
use crate::config::DashboardConfig;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NamesDashboardApp {
    pub state: AppState,
    colors: GenderColors,
}

impl NamesDashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
            colors: GenderColors::default(),
        }
    }
}

impl eframe::App for NamesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.colors);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state, &self.colors);
        });

        // Blocking load runs after the notice above has been shown once.
        if self.state.run_pending_load() {
            ctx.request_repaint();
        }
    }
}

fn central_panel(ui: &mut Ui, state: &mut AppState, colors: &GenderColors) {
    ui.heading("National Names Analysis");

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.is_loading() {
                ui.spinner();
            } else {
                ui.label("No dataset loaded  (File → Reload from SSA, or File → Open archive…)");
            }
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.active_tab, Tab::NameTrends, "Name Trends");
        ui.selectable_value(&mut state.active_tab, Tab::YearOverview, "Year Overview");
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            match state.active_tab {
                Tab::NameTrends => {
                    plot::trend_chart(ui, state, colors);
                    ui.add_space(12.0);
                    plot::one_hit_chart(ui, state, colors);
                }
                Tab::YearOverview => {
                    plot::top_names_chart(ui, state, colors);
                    ui.add_space(12.0);
                    table::detail_table(ui, state, colors);
                }
            }
            ui.add_space(12.0);
            ui.label("Explore the dataset and uncover interesting trends!");
        });
}

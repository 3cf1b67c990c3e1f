use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::GenderColors;
use crate::data::model::{Gender, NameRecord, NameTotal};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Name Trends tab
// ---------------------------------------------------------------------------

/// Births per year for the queried name, one line per gender.
pub fn trend_chart(ui: &mut Ui, state: &AppState, colors: &GenderColors) {
    let query = &state.filters.name_query;
    ui.heading("Name Popularity Over Time");

    if !state.has_trend() {
        ui.label("No data available for the entered name.");
        return;
    }
    ui.label(format!("Trends for '{query}'"));

    let mut series: BTreeMap<Gender, Vec<&NameRecord>> = BTreeMap::new();
    for record in &state.views.trend {
        series.entry(record.gender).or_default().push(record);
    }

    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Count")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (gender, mut records) in series {
                records.sort_by_key(|r| r.year);
                let points: PlotPoints = records
                    .iter()
                    .map(|r| [f64::from(r.year), f64::from(r.count)])
                    .collect();
                let line = Line::new(points)
                    .name(gender.to_string())
                    .color(colors.color_for(gender))
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}

/// One bar per one-hit-wonder name of the selected year, stacked by gender.
pub fn one_hit_chart(ui: &mut Ui, state: &AppState, colors: &GenderColors) {
    let year = state.filters.year;
    ui.heading("One-Hit Wonder Names");
    ui.label(format!(
        "One-Hit Wonders in {year} ({} names)",
        state.views.one_hit_for_year.len()
    ));

    // Histogram over names: rows per (name, gender).
    let mut per_name: BTreeMap<&str, BTreeMap<Gender, u32>> = BTreeMap::new();
    for record in &state.views.one_hit_for_year {
        *per_name
            .entry(record.name.as_str())
            .or_default()
            .entry(record.gender)
            .or_default() += 1;
    }
    let labels: Vec<String> = per_name.keys().map(|n| n.to_string()).collect();

    // Stack F below M by offsetting each bar by what is already drawn.
    let mut base = vec![0.0_f64; per_name.len()];
    let charts: Vec<BarChart> = Gender::ALL
        .into_iter()
        .map(|gender| {
            let bars = per_name
                .iter()
                .enumerate()
                .map(|(x, (name, counts))| {
                    let height = f64::from(counts.get(&gender).copied().unwrap_or(0));
                    let bar = Bar::new(x as f64, height)
                        .name(*name)
                        .base_offset(base[x]);
                    base[x] += height;
                    bar
                })
                .collect();
            BarChart::new(bars)
                .name(gender.to_string())
                .color(colors.color_for(gender))
                .width(0.8)
        })
        .collect();

    Plot::new("one_hit_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Name")
        .y_axis_label("count")
        .x_axis_formatter(move |mark, _range| name_at(&labels, mark.value))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Year Overview tab
// ---------------------------------------------------------------------------

/// Top-N totals of the selected year, coloured by gender.
pub fn top_names_chart(ui: &mut Ui, state: &AppState, colors: &GenderColors) {
    let (top_n, year) = (state.filters.top_n, state.filters.year);
    ui.heading("Top Names by Year");
    ui.label(format!("Top {top_n} Names in {year}"));

    let top: &[NameTotal] = &state.views.top_names;
    let labels: Vec<String> = top.iter().map(|t| t.name.clone()).collect();

    let charts: Vec<BarChart> = Gender::ALL
        .into_iter()
        .map(|gender| {
            let bars = top
                .iter()
                .enumerate()
                .filter(|(_, t)| t.gender == gender)
                .map(|(x, t)| Bar::new(x as f64, t.count as f64).name(&t.name))
                .collect();
            BarChart::new(bars)
                .name(gender.to_string())
                .color(colors.color_for(gender))
                .width(0.8)
        })
        .collect();

    Plot::new("top_names_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Name")
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| name_at(&labels, mark.value))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Axis label for bar position `x`: the name at that index, blank between
/// bars.
fn name_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_only_on_bar_positions() {
        let labels = vec!["Ava".to_string(), "Mia".to_string()];
        assert_eq!(name_at(&labels, 0.0), "Ava");
        assert_eq!(name_at(&labels, 1.0), "Mia");
        assert_eq!(name_at(&labels, 0.5), "");
        assert_eq!(name_at(&labels, 2.0), "");
        assert_eq!(name_at(&labels, -1.0), "");
    }
}

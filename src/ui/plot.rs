use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::heat_color;
use crate::data::views::GeoPoint;
use crate::state::AppState;

const CRASH_COLOR: Color32 = Color32::from_rgb(214, 77, 77);
const MIDPOINT_COLOR: Color32 = Color32::GOLD;

// ---------------------------------------------------------------------------
// Injury map (threshold-filtered crash locations)
// ---------------------------------------------------------------------------

/// Scatter of collisions that injured at least the chosen number of people.
pub fn injury_map(ui: &mut Ui, state: &AppState) {
    Plot::new("injury_map")
        .height(360.0)
        .x_axis_label("longitude")
        .y_axis_label("latitude")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(to_plot_points(&state.injury_points))
                    .radius(1.5)
                    .color(CRASH_COLOR)
                    .name("collisions"),
            );
        });
}

// ---------------------------------------------------------------------------
// Hour map + minute histogram
// ---------------------------------------------------------------------------

/// Scatter of the chosen hour's collisions with the slice midpoint marked.
pub fn hour_map(ui: &mut Ui, state: &AppState) {
    Plot::new("hour_map")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label("longitude")
        .y_axis_label("latitude")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(to_plot_points(&state.hour_points))
                    .radius(2.0)
                    .color(CRASH_COLOR)
                    .name("collisions"),
            );
            if let Some(center) = state.map_center {
                plot_ui.points(
                    Points::new(vec![[center.longitude, center.latitude]])
                        .radius(5.0)
                        .color(MIDPOINT_COLOR)
                        .name("midpoint"),
                );
            }
        });
}

/// Bar chart of crashes per minute within the chosen hour, shaded by
/// relative count.
pub fn minute_chart(ui: &mut Ui, state: &AppState) {
    let max = state.minute_counts.iter().copied().max().unwrap_or(0).max(1);
    let bars: Vec<Bar> = state
        .minute_counts
        .iter()
        .enumerate()
        .map(|(minute, &count)| {
            Bar::new(minute as f64, count as f64)
                .width(0.85)
                .fill(heat_color(count as f64 / max as f64))
        })
        .collect();

    Plot::new("minute_histogram")
        .height(240.0)
        .x_axis_label("minute")
        .y_axis_label("crashes")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("crashes"));
        });
}

fn to_plot_points(points: &[GeoPoint]) -> PlotPoints {
    points
        .iter()
        .map(|p| [p.longitude, p.latitude])
        .collect()
}

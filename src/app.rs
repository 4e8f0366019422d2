use eframe::egui;

use crate::config::Config;
use crate::state::{AppState, STREET_RANKING_SIZE};
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CrashviewApp {
    pub state: AppState,
}

impl CrashviewApp {
    pub fn new(config: &Config) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for CrashviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the query views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_views(ui, &self.state);
        });

        // ---- Raw data window (checkbox-toggled) ----
        if self.state.show_raw {
            let table = self.state.table.clone();
            let mut open = true;
            egui::Window::new("Raw data")
                .open(&mut open)
                .default_size([760.0, 420.0])
                .show(ctx, |ui| match &table {
                    Some(table) => tables::raw_table(ui, table),
                    None => {
                        ui.label("No collision data loaded.");
                    }
                });
            if !open {
                self.state.show_raw = false;
            }
        }
    }
}

fn central_views(ui: &mut egui::Ui, state: &AppState) {
    if state.table.is_none() {
        ui.vertical_centered(|ui: &mut egui::Ui| {
            ui.add_space(120.0);
            ui.heading("No collision data");
            ui.label(
                "Open a collisions CSV export (File → Open…), point CRASHVIEW_DATA at one, \
                 or create a demo file with `cargo run --bin generate_sample`.",
            );
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut egui::Ui| {
            ui.heading("Where are the most people injured?");
            ui.label(format!(
                "Collisions injuring at least {} people",
                state.injured_threshold
            ));
            plot::injury_map(ui, state);
            ui.separator();

            ui.heading("How many collisions occur during a given time of day?");
            ui.label(format!(
                "{} vehicle collisions between {}:00 and {}:00",
                state.hour_count,
                state.hour,
                (state.hour + 1) % 24
            ));
            if state.hour_count == 0 {
                ui.label("No collisions recorded in this hour.");
            } else {
                plot::hour_map(ui, state);
                ui.label(format!(
                    "Breakdown by minute between {}:00 and {}:00",
                    state.hour,
                    (state.hour + 1) % 24
                ));
                plot::minute_chart(ui, state);
            }
            ui.separator();

            ui.heading(format!(
                "Top {STREET_RANKING_SIZE} most dangerous streets by affected type"
            ));
            tables::street_table(ui, &state.street_ranking);
        });
}

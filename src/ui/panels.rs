use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::views::AffectedType;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the control panel. Each control refreshes only the view it owns.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    if state.table.is_none() {
        ui.label("No collision data loaded.");
        return;
    }

    ui.strong("Injury map");
    if ui
        .add(egui::Slider::new(&mut state.injured_threshold, 1..=19).text("min. persons injured"))
        .changed()
    {
        state.refresh_injury_view();
    }
    ui.add_space(8.0);

    ui.strong("Time of day");
    if ui
        .add(egui::Slider::new(&mut state.hour, 0..=23).text("hour to observe"))
        .changed()
    {
        state.refresh_hour_view();
    }
    ui.add_space(8.0);

    ui.strong("Street ranking");
    egui::ComboBox::from_id_salt("affected_type")
        .selected_text(state.affected.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for affected in AffectedType::ALL {
                if ui
                    .selectable_label(state.affected == affected, affected.to_string())
                    .clicked()
                {
                    state.affected = affected;
                    state.refresh_street_view();
                }
            }
        });
    ui.add_space(8.0);

    ui.separator();
    ui.checkbox(&mut state.show_raw, "Show raw data");
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

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} collisions loaded from {}",
                table.len(),
                state.cache.source().display()
            ));
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
        .set_title("Open collision records")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("opening `{}`", path.display());
        state.open_source(path);
    }
}

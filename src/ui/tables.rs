use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::CollisionTable;
use crate::data::views::StreetCount;

// ---------------------------------------------------------------------------
// Street ranking (top-N, already sorted)
// ---------------------------------------------------------------------------

pub fn street_table(ui: &mut Ui, ranking: &[StreetCount]) {
    if ranking.is_empty() {
        ui.label("No streets match the selected type.");
        return;
    }

    ui.push_id("street_ranking", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder().at_least(180.0))
            .column(Column::auto().at_least(80.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("On street");
                });
                header.col(|ui| {
                    ui.strong("Injured");
                });
            })
            .body(|mut body| {
                for entry in ranking {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&entry.street);
                        });
                        row.col(|ui| {
                            ui.label(entry.injured.to_string());
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Raw data (virtualized; the normalized table can hold 100k rows)
// ---------------------------------------------------------------------------

pub fn raw_table(ui: &mut Ui, table: &CollisionTable) {
    let mut builder = TableBuilder::new(ui).striped(true);
    for _ in &table.columns {
        builder = builder.column(Column::auto().at_least(90.0).clip(true));
    }

    builder
        .header(20.0, |mut header| {
            for name in &table.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let record = &table.rows[row.index()];
                for name in &table.columns {
                    row.col(|ui| {
                        if let Some(cell) = record.get(name) {
                            ui.label(cell.to_string());
                        }
                    });
                }
            });
        });
}

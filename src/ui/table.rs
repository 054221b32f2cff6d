use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::sorted_by_salary_desc;
use crate::data::model::{Field, SalaryDataset, SALARY_IN_USD};
use crate::ui::format;

const ROW_HEIGHT: f32 = 18.0;

/// The filtered records, highest salary first, one column per source column.
pub fn records_table(ui: &mut Ui, view: &SalaryDataset) {
    let rows = sorted_by_salary_desc(view);
    let extra = view.extra_columns();

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .max_scroll_height(420.0);
    for _ in 0..Field::ALL.len() + 1 + extra.len() {
        table = table.column(Column::auto().at_least(70.0).clip(true));
    }

    table
        .header(22.0, |mut header| {
            for field in Field::ALL {
                header.col(|ui| {
                    ui.strong(field.column());
                });
            }
            header.col(|ui| {
                ui.strong(SALARY_IN_USD);
            });
            for name in extra {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let rec = rows[row.index()];
                for field in Field::ALL {
                    row.col(|ui| {
                        ui.label(rec.category(field).map(|c| c.to_string()).unwrap_or_default());
                    });
                }
                row.col(|ui| {
                    ui.label(format::usd_f64(rec.salary_in_usd));
                });
                for name in extra {
                    row.col(|ui| {
                        ui.label(rec.extra.get(name).map(|v| v.to_string()).unwrap_or_default());
                    });
                }
            });
        });
}

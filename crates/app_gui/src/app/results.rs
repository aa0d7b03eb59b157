//! Results panel: model description, ranked table, CSV export.

use super::{ACCENT, UiApp};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use flora_core::{confidence_hue, export_csv, format_confidence};
use rfd::FileDialog;

impl UiApp {
    pub(super) fn render_results_panel(&mut self, ui: &mut egui::Ui) {
        if let Some(profile) = self
            .session
            .registry()
            .get(self.session.current_model())
        {
            egui::Frame::group(ui.style())
                .fill(egui::Color32::from_gray(248))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(&profile.description);
                });
        }

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Classification results").color(ACCENT));
        });
        ui.add_space(8.0);

        if self.session.rows().is_empty() {
            ui.label("Load an image or start the camera to see results.");
        } else {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::remainder())
                .column(Column::remainder())
                .header(24.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Flower");
                    });
                    header.col(|ui| {
                        ui.strong("Confidence");
                    });
                })
                .body(|mut body| {
                    for (idx, row) in self.session.rows().iter().enumerate() {
                        body.row(22.0, |mut table_row| {
                            table_row.col(|ui| {
                                let text = egui::RichText::new(&row.label);
                                ui.label(if idx == 0 { text.strong() } else { text });
                            });
                            table_row.col(|ui| {
                                let hue = confidence_hue(row.confidence) / 360.0;
                                let color = egui::Color32::from(egui::ecolor::Hsva::new(
                                    hue, 0.59, 0.78, 1.0,
                                ));
                                let text = egui::RichText::new(format_confidence(row.confidence))
                                    .color(color);
                                ui.label(if idx == 0 { text.strong() } else { text });
                            });
                        });
                    }
                });
        }

        ui.add_space(12.0);
        let can_export = !self.session.rows().is_empty();
        if ui
            .add_enabled(can_export, egui::Button::new("Export CSV"))
            .clicked()
            && let Some(path) = FileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_file_name("floraview_results.csv")
                .save_file()
        {
            if let Err(e) = export_csv(self.session.rows(), &path) {
                self.status = format!("Export failed: {e}");
            } else {
                self.status = format!("CSV exported: {}", path.display());
            }
        }

        if !self.status.is_empty() {
            ui.add_space(6.0);
            ui.label(&self.status);
        }
    }
}

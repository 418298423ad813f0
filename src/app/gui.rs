use crate::app::{App, PathField, RunState, Severity};
use egui::{Align, Button, Color32, Frame, RichText, Rounding, Stroke, TextEdit};

const ACCENT: Color32 = Color32::from_rgb(0x6B, 0x9B, 0xFF);
const BACKGROUND: Color32 = Color32::from_rgb(0x1E, 0x22, 0x2A);

fn panel_frame() -> Frame {
    Frame {
        fill: BACKGROUND,
        rounding: Rounding::same(4.0),
        stroke: Stroke::new(1.0, ACCENT),
        inner_margin: egui::style::Margin::same(12.0),
        ..Default::default()
    }
}

pub fn render(app: &mut App, ctx: &egui::Context) {
    egui::CentralPanel::default().frame(panel_frame()).show(ctx, |ui| {
        let mut browse = None;

        egui::Grid::new("path_fields")
            .num_columns(3)
            .spacing([10.0, 10.0])
            .show(ui, |ui| {
                for field in PathField::ALL {
                    ui.label(field.label());
                    ui.add(
                        TextEdit::singleline(app.field_mut(field))
                            .hint_text(field.placeholder())
                            .desired_width(400.0),
                    );
                    if ui.button("Browse").clicked() {
                        browse = Some(field);
                    }
                    ui.end_row();
                }
            });

        // Dialog helpers block until the user is done with them
        if let Some(field) = browse {
            app.browse(field);
        }

        ui.add_space(20.0);

        ui.vertical_centered(|ui| {
            let idle = app.run_state == RunState::Idle;
            let run_button = Button::new(RichText::new("Run IL2CppDumper").color(Color32::WHITE))
                .fill(Color32::from_rgb(0, 128, 0));
            if ui.add_enabled(idle, run_button).clicked() {
                let ctx = ctx.clone();
                app.trigger_run(Box::new(move || ctx.request_repaint()));
            }
        });

        ui.add_space(20.0);

        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Command Output:").size(16.0).color(ACCENT));

            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for entry in &app.log {
                        let line = format!(
                            "[{}] {}",
                            entry.at.format("%H:%M:%S"),
                            entry.text.trim_end_matches('\n')
                        );
                        ui.label(RichText::new(line).monospace().color(severity_color(entry.severity)));
                    }
                    if app.scroll_to_bottom {
                        ui.scroll_to_cursor(Some(Align::BOTTOM));
                        app.scroll_to_bottom = false;
                    }
                });
        });
    });
}

fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Error => Color32::from_rgb(0xFF, 0x6B, 0x6B),
        Severity::Success => Color32::from_rgb(0x6B, 0xFF, 0x6B),
        Severity::System => Color32::from_rgb(0x6B, 0x6B, 0xFF),
        Severity::Info => Color32::from_rgb(0xBB, 0xBB, 0xBB),
        Severity::Warning => Color32::from_rgb(0xFF, 0xD7, 0x00),
    }
}

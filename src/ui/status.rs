//! Status-Bar am unteren Bildschirmrand.

use crate::app::EditorState;
use crate::interaction::ActiveGesture;

/// Rendert die Status-Bar
pub fn render_status_bar(
    ctx: &egui::Context,
    state: &EditorState,
    active: ActiveGesture,
    fps: f32,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let name = if state.diagram.name.is_empty() {
                "Unbenannt"
            } else {
                &state.diagram.name
            };
            ui.label(format!(
                "{} | Elemente: {} | Links: {}",
                name,
                state.diagram.element_count(),
                state.diagram.link_count()
            ));

            ui.separator();

            ui.label(format!("Selektiert: {}", state.selection.len()));

            if active != ActiveGesture::Idle {
                ui.separator();
                ui.label(format!("{:?}", active));
            }

            if !state.status_message.is_empty() {
                ui.separator();
                ui.label(&state.status_message);
            }

            if state.options.show_fps {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("FPS: {:.0}", fps));
                });
            }
        });
    });
}

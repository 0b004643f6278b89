//! Top-Menü (File, Edit, View).

use crate::app::{EditorIntent, EditorState};
use crate::interaction::ActiveGesture;

/// Rendert die Menü-Leiste
pub fn render_menu(
    ctx: &egui::Context,
    state: &EditorState,
    active: ActiveGesture,
) -> Vec<EditorIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    events.push(EditorIntent::NewDiagramRequested);
                    ui.close();
                }

                if ui.button("Open...").clicked() {
                    events.push(EditorIntent::OpenFileRequested);
                    ui.close();
                }

                ui.separator();

                if ui.button("Save").clicked() {
                    events.push(EditorIntent::SaveRequested);
                    ui.close();
                }

                if ui.button("Save As...").clicked() {
                    events.push(EditorIntent::SaveAsRequested);
                    ui.close();
                }

                ui.separator();

                if ui.button("Exit").clicked() {
                    events.push(EditorIntent::ExitRequested);
                    ui.close();
                }
            });

            ui.menu_button("Edit", |ui| {
                let has_selection = !state.selection.is_empty();

                if ui
                    .add_enabled(has_selection, egui::Button::new("Delete Selected"))
                    .clicked()
                {
                    events.push(EditorIntent::DeleteSelectedRequested);
                    ui.close();
                }

                if ui.button("Select All (Ctrl+A)").clicked() {
                    events.push(EditorIntent::SelectAllRequested);
                    ui.close();
                }

                if ui
                    .add_enabled(has_selection, egui::Button::new("Clear Selection"))
                    .clicked()
                {
                    events.push(EditorIntent::ClearSelectionRequested);
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                let mut snap = state.options.snap_to_grid;
                if ui.checkbox(&mut snap, "Snap to Grid").clicked() {
                    events.push(EditorIntent::ToggleGridSnapRequested);
                    ui.close();
                }

                let mut fps = state.options.show_fps;
                if ui.checkbox(&mut fps, "Show FPS").clicked() {
                    events.push(EditorIntent::ToggleFpsRequested);
                    ui.close();
                }
            });

            // laufende Geste rechtsbündig anzeigen
            if active != ActiveGesture::Idle {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(gesture_label(active));
                });
            }
        });
    });

    events
}

fn gesture_label(active: ActiveGesture) -> &'static str {
    match active {
        ActiveGesture::Idle => "",
        ActiveGesture::Drag => "Verschieben...",
        ActiveGesture::Resize => "Größe ändern...",
        ActiveGesture::Link => "Verlinken...",
        ActiveGesture::Marquee => "Auswählen...",
    }
}

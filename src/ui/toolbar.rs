//! Element-Palette: ein Knopf pro Katalogtyp plus Schnellzugriffe.

use crate::app::{EditorIntent, EditorState};

/// Rendert die Palette und gibt erzeugte Events zurück.
pub fn render_toolbar(ctx: &egui::Context, state: &EditorState) -> Vec<EditorIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Elemente:");
            ui.separator();

            for spec in state.catalog.specs() {
                if ui.button(&spec.label).clicked() {
                    events.push(EditorIntent::AddElementRequested {
                        tag: spec.tag.clone(),
                    });
                }
            }

            ui.separator();

            let mut snap = state.options.snap_to_grid;
            if ui.checkbox(&mut snap, "Raster").clicked() {
                events.push(EditorIntent::ToggleGridSnapRequested);
            }

            ui.separator();

            let has_selection = !state.selection.is_empty();
            if ui
                .add_enabled(has_selection, egui::Button::new("Löschen"))
                .clicked()
            {
                events.push(EditorIntent::DeleteSelectedRequested);
            }
        });
    });

    events
}

//! Zentraler Szenen-Viewport: Scrollbereich, Painter und Eingaben.

use glam::Vec2;

use crate::app::{EditorController, EditorIntent, EditorState};
use crate::render::{LinkRenderer, NodeRenderer};

use super::input::{collect_keyboard_intents, InputState};

/// Rendert den Szenenbereich und sammelt die Eingabe-Intents des Frames.
pub fn render_viewport(
    ctx: &egui::Context,
    state: &EditorState,
    controller: &EditorController,
    renderer: &mut LinkRenderer,
    nodes: &NodeRenderer,
    input: &mut InputState,
) -> Vec<EditorIntent> {
    let mut events = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        let avail = ui.available_size();
        if let Some(intent) = input.track_viewport(Vec2::new(avail.x, avail.y)) {
            events.push(intent);
        }

        events.extend(collect_keyboard_intents(ui, !state.selection.is_empty()));

        // Scrollbars pro Achse nur, wenn der Inhalt den Viewport sprengt
        egui::ScrollArea::new([controller.layout.hscroll(), controller.layout.vscroll()])
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let overall = controller.layout.overall;
                let desired = egui::vec2(overall.x.max(avail.x), overall.y.max(avail.y));
                let (response, painter) =
                    ui.allocate_painter(desired, egui::Sense::click_and_drag());
                let origin = response.rect.min;

                renderer.paint_grid(
                    &painter,
                    origin,
                    Vec2::new(desired.x, desired.y),
                    &state.options,
                );
                renderer.paint_wires(&painter, origin, &controller.wires, &state.options);
                nodes.paint(
                    &painter,
                    origin,
                    &state.diagram,
                    &state.selection,
                    &controller.interaction,
                    &state.options,
                );
                renderer.paint_marquee(
                    &painter,
                    origin,
                    controller.interaction.marquee.rect(),
                    &state.options,
                );

                events.extend(input.collect_pointer_intents(ui, &response, origin));
            });
    });

    events
}

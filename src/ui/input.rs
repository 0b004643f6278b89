//! Viewport-Eingaben: Zeiger-Gesten und Tastatur-Shortcuts werden auf
//! [`EditorIntent`]s abgebildet.

use glam::Vec2;

use crate::app::EditorIntent;

/// Verfolgt den Zeigerzustand über Frames (Geste läuft, Viewport-Größe).
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Primärtaste wurde im Viewport gedrückt und ist noch unten.
    pointer_active: bool,
    viewport_size: Vec2,
}

impl InputState {
    /// Meldet eine geänderte Viewport-Größe genau einmal.
    pub fn track_viewport(&mut self, size: Vec2) -> Option<EditorIntent> {
        if size == self.viewport_size {
            return None;
        }
        self.viewport_size = size;
        Some(EditorIntent::ViewportResized { size })
    }

    /// Zeiger-Events des Frames in Szene-Koordinaten (relativ zu `origin`).
    pub fn collect_pointer_intents(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        origin: egui::Pos2,
    ) -> Vec<EditorIntent> {
        let mut events = Vec::new();

        let (pressed, down, released, pos, modifiers) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.modifiers,
            )
        });

        let Some(pos) = pos else {
            if released {
                self.pointer_active = false;
            }
            return events;
        };
        let scene = Vec2::new(pos.x - origin.x, pos.y - origin.y);

        if pressed && response.hovered() {
            self.pointer_active = true;
            events.push(EditorIntent::PointerPressed {
                pos: scene,
                additive: modifiers.command || modifiers.shift,
            });
        } else if down && self.pointer_active {
            events.push(EditorIntent::PointerDragged { pos: scene });
        }

        if released && self.pointer_active {
            self.pointer_active = false;
            events.push(EditorIntent::PointerReleased { pos: scene });
        }

        events
    }
}

/// Globale Tastatur-Shortcuts.
pub(super) fn collect_keyboard_intents(ui: &egui::Ui, has_selection: bool) -> Vec<EditorIntent> {
    let mut events = Vec::new();

    let (modifiers, key_n, key_o, key_s, key_a, key_del, key_escape) = ui.input(|i| {
        (
            i.modifiers,
            i.key_pressed(egui::Key::N),
            i.key_pressed(egui::Key::O),
            i.key_pressed(egui::Key::S),
            i.key_pressed(egui::Key::A),
            i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            i.key_pressed(egui::Key::Escape),
        )
    });

    if modifiers.command && key_n {
        events.push(EditorIntent::NewDiagramRequested);
    }
    if modifiers.command && key_o {
        events.push(EditorIntent::OpenFileRequested);
    }
    if modifiers.command && key_s {
        if modifiers.shift {
            events.push(EditorIntent::SaveAsRequested);
        } else {
            events.push(EditorIntent::SaveRequested);
        }
    }
    if modifiers.command && key_a {
        events.push(EditorIntent::SelectAllRequested);
    }
    if key_del && has_selection {
        events.push(EditorIntent::DeleteSelectedRequested);
    }
    if key_escape {
        events.push(EditorIntent::CancelGestureRequested);
    }

    // Pfeiltasten über die Event-Liste, um das Repeat-Flag für den
    // großen Schritt zu bekommen
    ui.input(|i| {
        for event in &i.events {
            let egui::Event::Key {
                key,
                pressed: true,
                repeat,
                ..
            } = event
            else {
                continue;
            };
            let direction = match key {
                egui::Key::ArrowUp => Vec2::new(0.0, -1.0),
                egui::Key::ArrowDown => Vec2::new(0.0, 1.0),
                egui::Key::ArrowLeft => Vec2::new(-1.0, 0.0),
                egui::Key::ArrowRight => Vec2::new(1.0, 0.0),
                _ => continue,
            };
            if has_selection {
                events.push(EditorIntent::NudgeSelected {
                    direction,
                    repeated: *repeat,
                });
            }
        }
    });

    events
}

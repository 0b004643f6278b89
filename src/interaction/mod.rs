//! Gesten-Schicht: Drag, Resize, Link, Marquee und Lebenszyklus.
//!
//! Der [`InteractionManager`] bündelt die Einzel-Gesten und stellt
//! sicher, dass immer höchstens eine Geste aktiv ist. Alle Manager sind
//! UI-frei und arbeiten auf Szene-Koordinaten.

pub mod drag;
pub mod hit_test;
pub mod lifecycle;
pub mod linking;
pub mod resize;
pub mod selection;

pub use drag::DragManager;
pub use hit_test::{element_at, hit_test, HitTarget};
pub use lifecycle::LifecycleManager;
pub use linking::{LinkingManager, Marking};
pub use resize::{ResizeManager, SizeHandle};
pub use selection::{MarqueeGesture, SelectionState};

use glam::Vec2;

use crate::core::Diagram;
use crate::render::wire::WireLayout;
use crate::shared::EditorOptions;

/// Die gerade laufende Geste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveGesture {
    #[default]
    Idle,
    Drag,
    Resize,
    Link,
    Marquee,
}

/// Fassade über alle Gesten-Manager; routet Zeiger-Eingaben anhand des
/// Hit-Tests an die jeweils zuständige Geste.
#[derive(Debug, Clone, Default)]
pub struct InteractionManager {
    pub drag: DragManager,
    pub resize: ResizeManager,
    pub linking: LinkingManager,
    pub marquee: MarqueeGesture,
}

impl InteractionManager {
    pub fn active(&self) -> ActiveGesture {
        if self.drag.is_active() {
            ActiveGesture::Drag
        } else if self.resize.is_active() {
            ActiveGesture::Resize
        } else if self.linking.is_active() {
            ActiveGesture::Link
        } else if self.marquee.is_active() {
            ActiveGesture::Marquee
        } else {
            ActiveGesture::Idle
        }
    }

    /// Primärtaste gedrückt: Treffer auflösen und die passende Geste armen.
    pub fn pointer_pressed(
        &mut self,
        diagram: &mut Diagram,
        selection: &mut SelectionState,
        wires: &WireLayout,
        pos: Vec2,
        additive: bool,
    ) {
        if self.active() != ActiveGesture::Idle {
            return;
        }

        match hit_test(diagram, selection, wires, pos) {
            HitTarget::LinkButton { from, to } => {
                diagram.remove_link(from, to);
            }
            HitTarget::SizeHandle { id, handle } => {
                self.resize.start(diagram, id, handle);
            }
            HitTarget::LinkHandle { id } => {
                self.linking.start(diagram, selection, id, pos);
            }
            HitTarget::DeleteButton { id } => {
                LifecycleManager::delete_node(diagram, selection, id);
            }
            HitTarget::Element { id } => {
                if additive {
                    selection.toggle(id);
                } else if !self.drag.start(diagram, selection, id, pos) {
                    // nicht verschiebbar: nur selektieren
                    selection.select_only(id);
                }
            }
            HitTarget::Background => {
                self.marquee.start(selection, pos, additive);
            }
        }
    }

    /// Zeigerbewegung mit gehaltener Primärtaste.
    pub fn pointer_dragged(
        &mut self,
        diagram: &mut Diagram,
        pos: Vec2,
        options: &EditorOptions,
    ) {
        match self.active() {
            ActiveGesture::Drag => self.drag.update(diagram, pos),
            ActiveGesture::Resize => self.resize.update(diagram, pos, options),
            ActiveGesture::Link => {
                let hover = element_at(diagram, pos);
                self.linking.update(diagram, pos, hover);
            }
            ActiveGesture::Marquee => self.marquee.update(pos),
            ActiveGesture::Idle => {}
        }
    }

    /// Primärtaste losgelassen: aktive Geste abschließen.
    pub fn pointer_released(
        &mut self,
        diagram: &mut Diagram,
        selection: &mut SelectionState,
        pos: Vec2,
    ) {
        match self.active() {
            ActiveGesture::Drag => self.drag.finish(diagram, pos),
            ActiveGesture::Resize => self.resize.finish(),
            ActiveGesture::Link => self.linking.finish(diagram),
            ActiveGesture::Marquee => self.marquee.finish(diagram, selection),
            ActiveGesture::Idle => {}
        }
    }

    /// Escape: aktive Geste verwerfen, ohne Modelländerungen abzuschließen.
    pub fn cancel(&mut self, diagram: &mut Diagram) {
        match self.active() {
            ActiveGesture::Drag => self.drag.cancel(),
            ActiveGesture::Resize => self.resize.finish(),
            ActiveGesture::Link => self.linking.finish(diagram),
            ActiveGesture::Marquee => self.marquee.cancel(),
            ActiveGesture::Idle => {}
        }
    }
}

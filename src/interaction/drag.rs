//! Drag-Geste: Pool, Zeiger-Offsets, Drop-Ziele und Tastatur-Nudge.

use glam::Vec2;

use crate::core::geometry::Rect;
use crate::core::Diagram;
use crate::shared::EditorOptions;

use super::selection::SelectionState;

#[derive(Debug, Clone)]
struct DragEntry {
    id: u64,
    /// Zeiger minus absolute Elementposition, beim Armen eingefroren.
    offset: Vec2,
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        entries: Vec<DragEntry>,
        /// Drop-Ziel-Rechtecke, einmalig beim Armen gecacht.
        targets: Vec<(u64, Rect)>,
        hit: Option<u64>,
    },
}

/// Verschiebe-Geste über dem Element-Pool der Selektion.
#[derive(Debug, Clone, Default)]
pub struct DragManager {
    state: DragState,
}

impl DragManager {
    /// Armt die Geste auf dem gegriffenen Element.
    ///
    /// Ist das Element nicht selektiert, kollabiert die Auswahl vorher
    /// auf genau dieses Element. Der Pool besteht aus allen selektierten,
    /// verschiebbaren Elementen in Selektionsreihenfolge.
    pub fn start(
        &mut self,
        diagram: &Diagram,
        selection: &mut SelectionState,
        grabbed: u64,
        pointer: Vec2,
    ) -> bool {
        let Some(node) = diagram.node(grabbed) else {
            return false;
        };
        if !node.draggable {
            return false;
        }

        if !selection.contains(grabbed) {
            selection.select_only(grabbed);
        }

        let entries: Vec<DragEntry> = selection
            .iter()
            .filter_map(|id| diagram.node(id))
            .filter(|n| n.draggable && !n.transient)
            .map(|n| DragEntry {
                id: n.id,
                offset: pointer - diagram.absolute_position(n.id),
            })
            .collect();
        if entries.is_empty() {
            return false;
        }

        let targets: Vec<(u64, Rect)> = diagram
            .elements()
            .filter(|n| n.is_group && n.allow_drop)
            .filter(|n| {
                entries
                    .iter()
                    .all(|e| e.id != n.id && !diagram.is_ancestor_of(e.id, n.id))
            })
            .filter_map(|n| diagram.absolute_rect(n.id).map(|r| (n.id, r)))
            .collect();

        self.state = DragState::Dragging {
            entries,
            targets,
            hit: None,
        };
        true
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Aktuell getroffenes Drop-Ziel (für die Hervorhebung).
    pub fn hit_target(&self) -> Option<u64> {
        match &self.state {
            DragState::Dragging { hit, .. } => *hit,
            DragState::Idle => None,
        }
    }

    /// Bewegt den Pool; jede neue absolute Position ist Zeiger minus
    /// eingefrorenem Offset.
    pub fn update(&mut self, diagram: &mut Diagram, pointer: Vec2) {
        let DragState::Dragging {
            entries,
            targets,
            hit,
        } = &mut self.state
        else {
            return;
        };

        for entry in entries.iter() {
            let Some(parent) = diagram.node(entry.id).and_then(|n| n.parent) else {
                continue;
            };
            let parent_abs = diagram.absolute_position(parent);
            let new_abs = pointer - entry.offset;
            diagram.set_position(entry.id, new_abs - parent_abs);
        }

        // Das letzte Ziel unter dem Zeiger gewinnt
        *hit = targets
            .iter()
            .filter(|(_, rect)| rect.contains(pointer))
            .map(|(id, _)| *id)
            .last();
    }

    /// Schließt die Geste ab.
    ///
    /// Liegt der Zeiger über einem Drop-Ziel, wandern alle Pool-Elemente
    /// (außer dem Ziel selbst und seinen Vorfahren) unter das Ziel; die
    /// neue Position ist die absolute Position relativ zum Zielursprung,
    /// pro Achse auf ≥ 0 geklemmt. Ohne Ziel bleiben sie, wo sie sind.
    pub fn finish(&mut self, diagram: &mut Diagram, pointer: Vec2) {
        let DragState::Dragging {
            entries, targets, ..
        } = std::mem::take(&mut self.state)
        else {
            return;
        };

        let hit = targets
            .iter()
            .filter(|(_, rect)| rect.contains(pointer))
            .map(|(id, _)| *id)
            .last();
        let Some(target) = hit else {
            return;
        };

        let target_abs = diagram.absolute_position(target);
        for entry in entries {
            if entry.id == target || diagram.is_ancestor_of(entry.id, target) {
                continue;
            }
            let rel = (diagram.absolute_position(entry.id) - target_abs).max(Vec2::ZERO);
            diagram.reparent(entry.id, target, rel);
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pfeiltasten-Verschiebung der selektierten, verschiebbaren Elemente.
    /// Key-Repeat schaltet auf den großen Schritt.
    pub fn nudge(
        diagram: &mut Diagram,
        selection: &SelectionState,
        direction: Vec2,
        repeated: bool,
        options: &EditorOptions,
    ) {
        let step = if repeated {
            options.move_large_step
        } else {
            options.move_small_step
        };
        let ids: Vec<u64> = selection
            .iter()
            .filter(|id| diagram.node(*id).map(|n| n.draggable).unwrap_or(false))
            .collect();
        for id in ids {
            if let Some(pos) = diagram.node(id).map(|n| n.position) {
                diagram.set_position(id, pos + direction * step);
            }
        }
    }
}

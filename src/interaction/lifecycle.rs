//! Element-Lebenszyklus: Löschen über Knopf und Entfernen-Taste.

use crate::core::Diagram;

use super::selection::SelectionState;

/// Löschoperationen; nur Elemente mit gesetztem `deletable` fallen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleManager;

impl LifecycleManager {
    /// Löscht ein einzelnes Element (Klick auf den Löschknopf).
    pub fn delete_node(diagram: &mut Diagram, selection: &mut SelectionState, id: u64) -> bool {
        let deletable = diagram.node(id).map(|n| n.deletable).unwrap_or(false);
        if !deletable {
            return false;
        }
        selection.remove(id);
        diagram.remove(id)
    }

    /// Löscht alle löschbaren Elemente der Selektion in einem
    /// Suspend-Block (Entfernen-Taste).
    pub fn delete_selected(diagram: &mut Diagram, selection: &mut SelectionState) {
        let ids: Vec<u64> = selection
            .iter()
            .filter(|id| diagram.node(*id).map(|n| n.deletable).unwrap_or(false))
            .collect();
        if ids.is_empty() {
            return;
        }

        diagram.suspend();
        for id in ids {
            selection.remove(id);
            diagram.remove(id);
        }
        diagram.resume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiagramEvent, ElementCatalog};
    use glam::Vec2;

    #[test]
    fn test_delete_selected_ueberspringt_nicht_loeschbare() {
        let c = ElementCatalog::standard();
        let mut d = Diagram::new();
        let a = d.attach(c.create("task", "a", Vec2::ZERO));
        let mut pinned = c.create("task", "pinned", Vec2::new(100.0, 0.0));
        pinned.deletable = false;
        let pinned = d.attach(pinned);

        let mut selection = SelectionState::new();
        selection.insert(a);
        selection.insert(pinned);
        d.drain_events();

        LifecycleManager::delete_selected(&mut d, &mut selection);

        assert!(!d.contains(a));
        assert!(d.contains(pinned));
        assert!(selection.contains(pinned), "nicht löschbare bleiben selektiert");
        assert_eq!(d.drain_events(), vec![DiagramEvent::Resumed]);
    }

    #[test]
    fn test_delete_selected_mit_fuenf_elementen_ein_refresh() {
        let c = ElementCatalog::standard();
        let mut d = Diagram::new();
        let mut selection = SelectionState::new();
        for i in 0..5 {
            let id = d.attach(c.create("task", "n", Vec2::new(i as f32 * 50.0, 0.0)));
            selection.insert(id);
        }
        d.drain_events();

        LifecycleManager::delete_selected(&mut d, &mut selection);

        assert_eq!(d.element_count(), 0);
        assert_eq!(d.drain_events(), vec![DiagramEvent::Resumed]);
    }

    #[test]
    fn test_delete_node_respektiert_flag() {
        let c = ElementCatalog::standard();
        let mut d = Diagram::new();
        let mut pinned = c.create("task", "pinned", Vec2::ZERO);
        pinned.deletable = false;
        let pinned = d.attach(pinned);
        let mut selection = SelectionState::new();

        assert!(!LifecycleManager::delete_node(&mut d, &mut selection, pinned));
        assert!(d.contains(pinned));
    }
}

//! Selektion: geordnete Auswahlmenge und Marquee-Geste.

use glam::Vec2;
use indexmap::IndexSet;

use crate::core::geometry::Rect;
use crate::core::Diagram;

/// Geordnete Menge selektierter Element-Ids.
///
/// Die Einfügereihenfolge bestimmt u.a. die Reihenfolge des Drag-Pools.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    ids: IndexSet<u64>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }

    pub fn insert(&mut self, id: u64) {
        self.ids.insert(id);
    }

    pub fn remove(&mut self, id: u64) {
        self.ids.shift_remove(&id);
    }

    /// Kollabiert die Auswahl auf genau ein Element.
    pub fn select_only(&mut self, id: u64) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Additiver Klick: Element rein oder raus.
    pub fn toggle(&mut self, id: u64) {
        if !self.ids.insert(id) {
            self.ids.shift_remove(&id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Marquee-Selektion auf dem Szenen-Hintergrund.
///
/// Der Rahmen wird aus Anker- und aktuellem Punkt normalisiert und
/// erlaubt damit negatives Aufziehen. Bei Abschluss werden alle
/// Elemente selektiert, deren absolute obere linke Ecke innerhalb der
/// (inklusiven) Grenzen liegt.
#[derive(Debug, Clone, Default)]
pub struct MarqueeGesture {
    active: Option<(Vec2, Vec2)>,
}

impl MarqueeGesture {
    /// Beginnt die Geste; ohne additiven Modifier wird die Auswahl
    /// vorab geleert.
    pub fn start(&mut self, selection: &mut SelectionState, anchor: Vec2, additive: bool) {
        if !additive {
            selection.clear();
        }
        self.active = Some((anchor, anchor));
    }

    pub fn update(&mut self, pos: Vec2) {
        if let Some((_, current)) = self.active.as_mut() {
            *current = pos;
        }
    }

    /// Aktueller Rahmen in Szene-Koordinaten.
    pub fn rect(&self) -> Option<Rect> {
        self.active.map(|(a, b)| Rect::from_corners(a, b))
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Schließt die Geste ab und selektiert in einem Suspend-Block.
    pub fn finish(&mut self, diagram: &mut Diagram, selection: &mut SelectionState) {
        let Some(rect) = self.rect() else {
            return;
        };
        self.active = None;

        let min = rect.min;
        let max = rect.max();

        diagram.suspend();
        let hits: Vec<u64> = diagram
            .elements()
            .filter(|n| !n.transient)
            .filter(|n| {
                let p = diagram.absolute_position(n.id);
                // Inklusive Grenzen: die Ecke darf auf dem Rand liegen
                min.x <= p.x && p.x <= max.x && min.y <= p.y && p.y <= max.y
            })
            .map(|n| n.id)
            .collect();
        for id in hits {
            selection.insert(id);
        }
        diagram.resume();
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiagramEvent, Node};

    fn node_at(x: f32, y: f32) -> Node {
        Node::new("task").at(Vec2::new(x, y))
    }

    #[test]
    fn test_marquee_grenzen_sind_inklusiv() {
        let mut d = Diagram::new();
        let inside = d.attach(node_at(150.0, 150.0));
        let outside = d.attach(node_at(151.0, 151.0));
        d.drain_events();

        let mut selection = SelectionState::new();
        let mut marquee = MarqueeGesture::default();
        marquee.start(&mut selection, Vec2::ZERO, false);
        marquee.update(Vec2::new(150.0, 150.0));
        marquee.finish(&mut d, &mut selection);

        assert!(selection.contains(inside), "Ecke auf dem Rand zählt");
        assert!(!selection.contains(outside), "151 liegt außerhalb");
    }

    #[test]
    fn test_marquee_negatives_aufziehen() {
        let mut d = Diagram::new();
        let a = d.attach(node_at(50.0, 50.0));

        let mut selection = SelectionState::new();
        let mut marquee = MarqueeGesture::default();
        marquee.start(&mut selection, Vec2::new(100.0, 100.0), false);
        marquee.update(Vec2::new(10.0, 10.0));
        assert_eq!(
            marquee.rect().map(|r| r.min),
            Some(Vec2::new(10.0, 10.0))
        );
        marquee.finish(&mut d, &mut selection);

        assert!(selection.contains(a));
    }

    #[test]
    fn test_marquee_ohne_additiv_leert_auswahl() {
        let mut selection = SelectionState::new();
        selection.insert(99);

        let mut marquee = MarqueeGesture::default();
        marquee.start(&mut selection, Vec2::ZERO, false);
        assert!(selection.is_empty());

        selection.insert(99);
        marquee.start(&mut selection, Vec2::ZERO, true);
        assert!(selection.contains(99));
    }

    #[test]
    fn test_marquee_finish_laeuft_im_suspend_block() {
        let mut d = Diagram::new();
        d.attach(node_at(5.0, 5.0));
        d.drain_events();

        let mut selection = SelectionState::new();
        let mut marquee = MarqueeGesture::default();
        marquee.start(&mut selection, Vec2::ZERO, false);
        marquee.update(Vec2::new(20.0, 20.0));
        marquee.finish(&mut d, &mut selection);

        assert_eq!(d.drain_events(), vec![DiagramEvent::Resumed]);
    }

    #[test]
    fn test_toggle_und_select_only() {
        let mut s = SelectionState::new();
        s.toggle(1);
        s.toggle(2);
        assert_eq!(s.len(), 2);
        s.toggle(1);
        assert!(!s.contains(1));
        s.select_only(7);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![7]);
    }
}

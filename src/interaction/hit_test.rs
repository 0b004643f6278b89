//! Hit-Test der Szene: Affordanz-Geometrie und Trefferauflösung.
//!
//! Die Geometrie der Griffe und Knöpfe liegt hier zentral, damit
//! Renderer und Hit-Test dieselben Rechtecke verwenden.

use glam::Vec2;

use crate::core::geometry::Rect;
use crate::core::Diagram;
use crate::render::wire::WireLayout;
use crate::shared::options::{DELETE_BUTTON_RADIUS, HANDLE_SIZE, LINK_BUTTON_RADIUS, LINK_HANDLE_RADIUS};

use super::resize::SizeHandle;
use super::selection::SelectionState;

/// Ergebnis eines Hit-Tests, nach Priorität geordnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Löschknopf eines Links.
    LinkButton { from: u64, to: u64 },
    /// Resize-Griff eines selektierten Elements.
    SizeHandle { id: u64, handle: SizeHandle },
    /// Link-Griff am rechten Elementrand.
    LinkHandle { id: u64 },
    /// Element-Löschknopf.
    DeleteButton { id: u64 },
    /// Elementkörper.
    Element { id: u64 },
    Background,
}

/// Mittelpunkt eines Resize-Griffs auf dem Elementrechteck.
pub fn handle_center(rect: Rect, handle: SizeHandle) -> Vec2 {
    let min = rect.min;
    let max = rect.max();
    let center = rect.center();
    match handle {
        SizeHandle::N => Vec2::new(center.x, min.y),
        SizeHandle::S => Vec2::new(center.x, max.y),
        SizeHandle::E => Vec2::new(max.x, center.y),
        SizeHandle::W => Vec2::new(min.x, center.y),
        SizeHandle::Ne => Vec2::new(max.x, min.y),
        SizeHandle::Nw => min,
        SizeHandle::Se => max,
        SizeHandle::Sw => Vec2::new(min.x, max.y),
    }
}

/// Quadrat eines Resize-Griffs.
pub fn handle_rect(rect: Rect, handle: SizeHandle) -> Rect {
    let center = handle_center(rect, handle);
    Rect::new(
        center - Vec2::splat(HANDLE_SIZE / 2.0),
        Vec2::splat(HANDLE_SIZE),
    )
}

/// Mittelpunkt des Link-Griffs (rechter Elementrand).
pub fn link_handle_center(rect: Rect) -> Vec2 {
    Vec2::new(rect.max().x, rect.center().y)
}

/// Mittelpunkt des Element-Löschknopfs (obere rechte Ecke).
pub fn delete_button_center(rect: Rect) -> Vec2 {
    rect.min + Vec2::new(rect.size.x, 0.0)
}

/// Löst einen Zeigerpunkt in das oberste Ziel auf.
///
/// Priorität: Link-Löschknöpfe, dann die Affordanzen selektierter
/// Elemente, dann Elementkörper (tiefstes/zuletzt eingefügtes Element
/// gewinnt), sonst Hintergrund.
pub fn hit_test(
    diagram: &Diagram,
    selection: &SelectionState,
    wires: &WireLayout,
    pos: Vec2,
) -> HitTarget {
    for wire in &wires.wires {
        if let Some(button) = wire.button {
            if button.distance(pos) <= LINK_BUTTON_RADIUS {
                return HitTarget::LinkButton {
                    from: wire.from,
                    to: wire.to,
                };
            }
        }
    }

    for id in selection.iter() {
        let Some(node) = diagram.node(id) else {
            continue;
        };
        let Some(rect) = diagram.absolute_rect(id) else {
            continue;
        };

        if node.sizable {
            for handle in SizeHandle::ALL {
                if handle_rect(rect, handle).contains(pos) {
                    return HitTarget::SizeHandle { id, handle };
                }
            }
        }
        if node.linkable && link_handle_center(rect).distance(pos) <= LINK_HANDLE_RADIUS {
            return HitTarget::LinkHandle { id };
        }
        if node.deletable && delete_button_center(rect).distance(pos) <= DELETE_BUTTON_RADIUS {
            return HitTarget::DeleteButton { id };
        }
    }

    match element_at(diagram, pos) {
        Some(id) => HitTarget::Element { id },
        None => HitTarget::Background,
    }
}

/// Oberstes Element unter dem Punkt (nur Elementkörper): das tiefste,
/// zuletzt eingefügte Element gewinnt.
pub fn element_at(diagram: &Diagram, pos: Vec2) -> Option<u64> {
    let mut best: Option<(usize, usize, u64)> = None;
    for (index, node) in diagram.elements().enumerate() {
        if node.transient {
            continue;
        }
        let Some(rect) = diagram.absolute_rect(node.id) else {
            continue;
        };
        if !rect.contains(pos) {
            continue;
        }
        let mut depth = 0;
        let mut parent = node.parent;
        while let Some(p) = parent {
            depth += 1;
            parent = diagram.node(p).and_then(|n| n.parent);
        }
        if best.map(|(d, i, _)| (depth, index) > (d, i)).unwrap_or(true) {
            best = Some((depth, index, node.id));
        }
    }
    best.map(|(_, _, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ElementCatalog;

    #[test]
    fn test_handle_center_eckgriffe() {
        let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(handle_center(rect, SizeHandle::Nw), Vec2::new(10.0, 20.0));
        assert_eq!(handle_center(rect, SizeHandle::Se), Vec2::new(110.0, 70.0));
        assert_eq!(handle_center(rect, SizeHandle::N), Vec2::new(60.0, 20.0));
    }

    #[test]
    fn test_element_treffer_kind_vor_gruppe() {
        let c = ElementCatalog::standard();
        let mut d = Diagram::new();
        let group = d.attach(c.create("group", "g", Vec2::new(100.0, 100.0)));
        let mut child = c.create("task", "t", Vec2::new(20.0, 20.0));
        child.parent = Some(group);
        let child = d.attach(child);

        let selection = SelectionState::new();
        let wires = WireLayout::default();

        // Punkt im Kind (absolut 130,130)
        let hit = hit_test(&d, &selection, &wires, Vec2::new(130.0, 130.0));
        assert_eq!(hit, HitTarget::Element { id: child });

        // Punkt nur in der Gruppe
        let hit = hit_test(&d, &selection, &wires, Vec2::new(110.0, 110.0));
        assert_eq!(hit, HitTarget::Element { id: group });
    }

    #[test]
    fn test_affordanzen_nur_fuer_selektierte() {
        let c = ElementCatalog::standard();
        let mut d = Diagram::new();
        // Filter 110x46, nicht sizable: der Link-Griff liegt frei
        let a = d.attach(c.create("filter", "a", Vec2::new(100.0, 100.0)));

        let mut selection = SelectionState::new();
        let wires = WireLayout::default();

        // Link-Griff am rechten Rand
        let link_handle = Vec2::new(210.0, 123.0);
        assert_eq!(
            hit_test(&d, &selection, &wires, link_handle),
            HitTarget::Background
        );

        selection.insert(a);
        assert_eq!(
            hit_test(&d, &selection, &wires, link_handle),
            HitTarget::LinkHandle { id: a }
        );
    }

    #[test]
    fn test_size_griff_hat_vorrang_vor_link_griff() {
        let c = ElementCatalog::standard();
        let mut d = Diagram::new();
        // Task 120x60: E-Griff und Link-Griff teilen sich (220,130)
        let a = d.attach(c.create("task", "a", Vec2::new(100.0, 100.0)));

        let mut selection = SelectionState::new();
        selection.insert(a);
        let wires = WireLayout::default();

        assert_eq!(
            hit_test(&d, &selection, &wires, Vec2::new(220.0, 130.0)),
            HitTarget::SizeHandle {
                id: a,
                handle: SizeHandle::E
            }
        );
        assert_eq!(
            hit_test(&d, &selection, &wires, Vec2::new(100.0, 100.0)),
            HitTarget::SizeHandle {
                id: a,
                handle: SizeHandle::Nw
            }
        );
    }

    #[test]
    fn test_leere_szene_ist_hintergrund() {
        let d = Diagram::new();
        let selection = SelectionState::new();
        let wires = WireLayout::default();
        assert_eq!(
            hit_test(&d, &selection, &wires, Vec2::new(50.0, 50.0)),
            HitTarget::Background
        );
    }
}

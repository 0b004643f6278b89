//! Link-Geste: Zeiger-Pseudoknoten, provisorische Linien, Eignungs-
//! Markierungen und die Registry der Link-Löschknöpfe.

use std::collections::HashSet;

use glam::Vec2;
use indexmap::IndexSet;

use crate::core::{Diagram, DiagramEvent, DiagramObserver, EventKind, LinkPolicy, Node};

use super::selection::SelectionState;

/// Kantenlänge des Zeiger-Pseudoknotens.
const POINTER_SIZE: f32 = 4.0;

/// Eignungs-Markierung eines Elements während der Link-Geste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marking {
    /// Nicht verlinkbar oder von keiner Quelle aus erlaubt.
    NotAllowed,
    /// Bereits von einer Quelle aus verlinkt.
    AlreadyLinked,
}

#[derive(Debug, Clone)]
struct LinkGesture {
    pointer_id: u64,
    sources: Vec<u64>,
    not_allowed: HashSet<u64>,
    already_linked: HashSet<u64>,
    hovered: Option<u64>,
}

/// Verbindungs-Geste ab dem Link-Griff eines Elements.
///
/// Während der Geste hängt eine provisorische Linie von jeder Quelle an
/// einem transienten Zeigerknoten; beim Überfahren eines unmarkierten
/// Ziels wird sie durch den echten Link ersetzt (und beim Verlassen
/// wieder zurückgetauscht).
#[derive(Debug, Clone, Default)]
pub struct LinkingManager {
    gesture: Option<LinkGesture>,
    /// Löschknopf-Registry, geführt über Link-Benachrichtigungen,
    /// Schlüssel `(Quelle, Ziel)`.
    buttons: IndexSet<(u64, u64)>,
}

impl LinkingManager {
    /// Armt die Geste.
    ///
    /// Der Quell-Pool ist die Selektion (nur verlinkbare Elemente), wenn
    /// das gegriffene Element selektiert ist, sonst nur das Element
    /// selbst.
    pub fn start(
        &mut self,
        diagram: &mut Diagram,
        selection: &SelectionState,
        source: u64,
        pointer: Vec2,
    ) -> bool {
        let Some(node) = diagram.node(source) else {
            return false;
        };
        if !node.linkable || node.transient {
            return false;
        }

        let mut sources: Vec<u64> = if selection.contains(source) {
            selection
                .iter()
                .filter(|id| {
                    diagram
                        .node(*id)
                        .map(|n| n.linkable && !n.transient)
                        .unwrap_or(false)
                })
                .collect()
        } else {
            vec![source]
        };
        if sources.is_empty() {
            sources.push(source);
        }

        let mut pointer_node = Node::new("pointer")
            .at(pointer - Vec2::splat(POINTER_SIZE / 2.0))
            .with_size(Vec2::splat(POINTER_SIZE))
            .with_policy(LinkPolicy::None);
        pointer_node.draggable = false;
        pointer_node.sizable = false;
        pointer_node.deletable = false;
        pointer_node.transient = true;
        let pointer_id = diagram.attach(pointer_node);

        // Eignung aller übrigen Elemente einmalig beim Armen bestimmen
        let mut not_allowed = HashSet::new();
        let mut already_linked = HashSet::new();
        for n in diagram.elements() {
            if n.transient || sources.contains(&n.id) {
                continue;
            }
            if !n.linkable || !sources.iter().any(|s| diagram.can_link(*s, n.id)) {
                not_allowed.insert(n.id);
            } else if sources.iter().any(|s| diagram.is_linked(*s, n.id)) {
                already_linked.insert(n.id);
            }
        }

        for s in sources.clone() {
            diagram.add_link(s, pointer_id);
        }

        self.gesture = Some(LinkGesture {
            pointer_id,
            sources,
            not_allowed,
            already_linked,
            hovered: None,
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn pointer_id(&self) -> Option<u64> {
        self.gesture.as_ref().map(|g| g.pointer_id)
    }

    /// Markierung eines Elements während der laufenden Geste.
    pub fn marking(&self, id: u64) -> Option<Marking> {
        let gesture = self.gesture.as_ref()?;
        if gesture.not_allowed.contains(&id) {
            Some(Marking::NotAllowed)
        } else if gesture.already_linked.contains(&id) {
            Some(Marking::AlreadyLinked)
        } else {
            None
        }
    }

    /// Bewegt den Zeigerknoten und verarbeitet Hover-Wechsel.
    ///
    /// `hover` ist das Element unter dem Zeiger (bereits ohne den
    /// Zeigerknoten selbst); markierte Elemente und Quellen werden
    /// ignoriert.
    pub fn update(&mut self, diagram: &mut Diagram, pointer: Vec2, hover: Option<u64>) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };

        diagram.set_position(gesture.pointer_id, pointer - Vec2::splat(POINTER_SIZE / 2.0));

        let target = hover.filter(|id| {
            *id != gesture.pointer_id
                && !gesture.sources.contains(id)
                && !gesture.not_allowed.contains(id)
                && !gesture.already_linked.contains(id)
                && diagram.node(*id).map(|n| !n.transient).unwrap_or(false)
        });

        if target == gesture.hovered {
            return;
        }

        // Verlassen: echten Link wieder gegen die provisorische Linie tauschen
        if let Some(old) = gesture.hovered.take() {
            for s in gesture.sources.clone() {
                diagram.remove_link(s, old);
                diagram.add_link(s, gesture.pointer_id);
            }
        }

        // Betreten: provisorische Linie gegen den echten Link tauschen
        if let Some(new) = target {
            for s in gesture.sources.clone() {
                diagram.remove_link(s, gesture.pointer_id);
                diagram.add_link(s, new);
            }
            gesture.hovered = Some(new);
        }
    }

    /// Schließt die Geste ab: übrig gebliebene provisorische Linien
    /// fallen weg (Abbruch), echte Links bleiben; der Zeigerknoten wird
    /// genau einmal entfernt.
    pub fn finish(&mut self, diagram: &mut Diagram) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };

        for s in &gesture.sources {
            diagram.remove_link(*s, gesture.pointer_id);
        }
        diagram.remove(gesture.pointer_id);
    }

    /// Existiert ein Löschknopf für den Link `(from, to)`?
    pub fn has_button(&self, from: u64, to: u64) -> bool {
        self.buttons.contains(&(from, to))
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }
}

impl DiagramObserver for LinkingManager {
    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::LinkAdded,
            EventKind::LinkRemoved,
            EventKind::Detached,
            EventKind::Resumed,
        ]
    }

    fn notify(&mut self, diagram: &mut Diagram, event: &DiagramEvent) {
        match *event {
            DiagramEvent::LinkAdded { from, to } => {
                let transient = diagram.node(to).map(|n| n.transient).unwrap_or(true);
                if !transient {
                    self.buttons.insert((from, to));
                }
            }
            DiagramEvent::LinkRemoved { from, to } => {
                self.buttons.shift_remove(&(from, to));
            }
            DiagramEvent::Detached { id } => {
                self.buttons.retain(|(from, to)| *from != id && *to != id);
            }
            DiagramEvent::Resumed => {
                // Nach einem Batch (z.B. Laden) aus dem Modell neu aufbauen
                self.buttons = diagram
                    .elements()
                    .flat_map(|n| n.links().map(|l| (l.from, l.to)))
                    .filter(|(_, to)| {
                        diagram.node(*to).map(|n| !n.transient).unwrap_or(false)
                    })
                    .collect();
            }
            _ => {}
        }
    }
}

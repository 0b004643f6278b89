//! Szenen-Container: Element-Arena, Wurzelgruppe, Link-Operationen und
//! Benachrichtigungs-Warteschlange.
//!
//! Alle Modelländerungen laufen über die Methoden des [`Diagram`], damit
//! Änderungsbenachrichtigungen konsistent ausgelöst werden. Während eines
//! `suspend`/`resume`-Blocks werden keine Einzel-Events erzeugt; das
//! abschließende `resume` stellt genau ein [`DiagramEvent::Resumed`] ein.

use std::collections::VecDeque;

use glam::Vec2;
use indexmap::IndexMap;

use super::events::DiagramEvent;
use super::geometry::Rect;
use super::link::Link;
use super::node::{LinkPolicy, Node};

/// Id der impliziten Wurzelgruppe.
pub const ROOT_ID: u64 = 0;

/// Erzeugt eine zufällige, v4-förmige Kennung für Szenen.
pub fn new_uid() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let random = || RandomState::new().build_hasher().finish();
    let a = random();
    let b = random();

    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        a as u32,
        (a >> 32) as u16,
        ((a >> 48) as u16) & 0x0fff,
        (b as u16 & 0x3fff) | 0x8000,
        (b >> 16) & 0xffff_ffff_ffff
    )
}

/// Die Szene: Elemente in Einfügereihenfolge plus Wurzelgruppe.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub uid: String,
    pub name: String,
    nodes: IndexMap<u64, Node>,
    next_id: u64,
    suspend_depth: u32,
    events: VecDeque<DiagramEvent>,
}

impl Diagram {
    pub fn new() -> Self {
        let mut root = Node::new("group").named("root");
        root.id = ROOT_ID;
        root.draggable = false;
        root.sizable = false;
        root.linkable = false;
        root.deletable = false;
        root.is_group = true;
        root.policy = LinkPolicy::None;

        let mut nodes = IndexMap::new();
        nodes.insert(ROOT_ID, root);

        Self {
            uid: new_uid(),
            name: String::new(),
            nodes,
            next_id: 1,
            suspend_depth: 0,
            events: VecDeque::new(),
        }
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    pub fn node(&self, id: u64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Alle Elemente außer der Wurzelgruppe, in Einfügereihenfolge.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.id != ROOT_ID)
    }

    /// Direkte Kinder eines Elements, in Einfügereihenfolge.
    pub fn children(&self, parent: u64) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(move |n| n.parent == Some(parent))
    }

    /// Anzahl der Elemente ohne Wurzelgruppe und Gesten-Pseudoknoten.
    pub fn element_count(&self) -> usize {
        self.elements().filter(|n| !n.transient).count()
    }

    /// Gesamtzahl aller Links.
    pub fn link_count(&self) -> usize {
        self.nodes.values().map(Node::link_count).sum()
    }

    /// Ist `ancestor` ein (transitives) Elternelement von `id`?
    pub fn is_ancestor_of(&self, ancestor: u64, id: u64) -> bool {
        let mut current = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.nodes.get(&p).and_then(|n| n.parent);
        }
        false
    }

    /// Absolute Position: Summe der Positions-Kette bis zur Wurzel.
    pub fn absolute_position(&self, id: u64) -> Vec2 {
        let mut pos = Vec2::ZERO;
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(node) = self.nodes.get(&c) else {
                break;
            };
            pos += node.position;
            current = node.parent;
        }
        pos
    }

    /// Rechteck des Elements in absoluten Szene-Koordinaten.
    pub fn absolute_rect(&self, id: u64) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        Some(Rect::new(self.absolute_position(id), node.size))
    }

    // ── Aufbau ──────────────────────────────────────────────────────

    /// Hängt ein Element in die Szene; ohne Elternangabe unter die Wurzel.
    ///
    /// Eine Id von 0 (oder eine bereits vergebene) wird durch die nächste
    /// freie ersetzt.
    pub fn attach(&mut self, mut node: Node) -> u64 {
        if node.id == ROOT_ID || self.nodes.contains_key(&node.id) {
            if node.id != ROOT_ID {
                log::warn!("Element-Id {} bereits vergeben, neue Id wird zugewiesen", node.id);
            }
            node.id = self.next_id;
        }
        self.next_id = self.next_id.max(node.id + 1);

        match node.parent {
            Some(p) if self.nodes.contains_key(&p) => {}
            _ => node.parent = Some(ROOT_ID),
        }

        let id = node.id;
        self.nodes.insert(id, node);
        self.emit(DiagramEvent::Attached { id });
        id
    }

    /// Entfernt ein Element samt Kind-Elementen.
    ///
    /// Zuerst fallen alle ausgehenden Links des Teilbaums, dann alle von
    /// außen eingehenden, danach die Elemente selbst (tiefste zuerst).
    pub fn remove(&mut self, id: u64) -> bool {
        if id == ROOT_ID || !self.nodes.contains_key(&id) {
            return false;
        }

        let subtree = self.collect_subtree(id);

        for &n in &subtree {
            self.remove_links(n);
        }

        // Eingehende Links von außerhalb des Teilbaums einsammeln,
        // dann entfernen (Borrow-Konflikt vermeiden)
        let mut incoming = Vec::new();
        for node in self.nodes.values() {
            if subtree.contains(&node.id) {
                continue;
            }
            for &target in &subtree {
                if node.is_linked_to(target) {
                    incoming.push((node.id, target));
                }
            }
        }
        for (from, to) in incoming {
            self.remove_link(from, to);
        }

        for &n in subtree.iter().rev() {
            self.nodes.shift_remove(&n);
            self.emit(DiagramEvent::Detached { id: n });
        }
        true
    }

    /// Entfernt alle Kinder der Wurzelgruppe in einem Suspend-Block.
    pub fn clear(&mut self) {
        self.suspend();
        let roots: Vec<u64> = self.children(ROOT_ID).map(|n| n.id).collect();
        for id in roots {
            self.remove(id);
        }
        self.resume();
    }

    /// Teilbaum-Ids: das Element zuerst, danach die Nachkommen.
    fn collect_subtree(&self, id: u64) -> Vec<u64> {
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            let parent = out[i];
            out.extend(self.children(parent).map(|n| n.id));
            i += 1;
        }
        out
    }

    // ── Änderungen ──────────────────────────────────────────────────

    /// Setzt die elternrelative Position; löst nur bei echter Änderung aus.
    pub fn set_position(&mut self, id: u64, position: Vec2) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.position == position {
            return false;
        }
        node.position = position;
        self.emit(DiagramEvent::PositionChanged { id });
        true
    }

    /// Positions-Schreibzugriff ohne Benachrichtigung.
    ///
    /// Für das Grid-Snapping des Layout-Managers, das sonst die gerade
    /// verarbeitete Benachrichtigung erneut auslösen würde.
    pub fn set_position_silent(&mut self, id: u64, position: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = position;
        }
    }

    pub fn set_size(&mut self, id: u64, size: Vec2) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.size == size {
            return false;
        }
        node.size = size;
        self.emit(DiagramEvent::SizeChanged { id });
        true
    }

    pub fn set_name(&mut self, id: u64, name: impl Into<String>) -> bool {
        let name = name.into();
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.name == name {
            return false;
        }
        node.name = name;
        self.emit(DiagramEvent::Renamed { id });
        true
    }

    /// Hängt ein Element unter ein neues Elternelement und setzt dabei die
    /// neue elternrelative Position.
    pub fn reparent(&mut self, id: u64, parent: u64, position: Vec2) -> bool {
        if id == ROOT_ID || !self.nodes.contains_key(&parent) || self.is_ancestor_of(id, parent) {
            return false;
        }
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.parent = Some(parent);
        node.position = position;
        self.emit(DiagramEvent::Reparented { id, parent });
        true
    }

    // ── Links ───────────────────────────────────────────────────────

    /// Prüft, ob `from` einen Link auf `to` anlegen darf (rein, keine
    /// Mutation).
    ///
    /// Auswertungsreihenfolge der Richtlinie: none → all → directed →
    /// Positivliste. Selbst-Verlinkung ist über diese Prüfung nicht
    /// verboten (Selbst-Links werden als Schleife gerendert).
    pub fn can_link(&self, from: u64, to: u64) -> bool {
        let (Some(source), Some(target)) = (self.nodes.get(&from), self.nodes.get(&to)) else {
            return false;
        };

        match &source.policy {
            LinkPolicy::None => false,
            LinkPolicy::All => true,
            LinkPolicy::Directed => !target.is_linked_to(from),
            LinkPolicy::Tags(tags) => tags.iter().any(|t| t == &target.tag),
        }
    }

    /// Legt einen Link an, sofern die Richtlinie es erlaubt.
    ///
    /// Ein bereits existierender Link wird ersetzt und löst die
    /// Benachrichtigung erneut aus.
    pub fn add_link(&mut self, from: u64, to: u64) -> bool {
        if !self.can_link(from, to) {
            return false;
        }
        let Some(source) = self.nodes.get_mut(&from) else {
            return false;
        };
        source.links.insert(to, Link::new(from, to));
        self.emit(DiagramEvent::LinkAdded { from, to });
        true
    }

    /// Existiert ein Link von `from` nach `to`?
    pub fn is_linked(&self, from: u64, to: u64) -> bool {
        self.nodes
            .get(&from)
            .map(|n| n.is_linked_to(to))
            .unwrap_or(false)
    }

    /// Entfernt einen Link; ohne Link passiert nichts (idempotent).
    pub fn remove_link(&mut self, from: u64, to: u64) -> bool {
        let Some(source) = self.nodes.get_mut(&from) else {
            return false;
        };
        if source.links.shift_remove(&to).is_none() {
            return false;
        }
        self.emit(DiagramEvent::LinkRemoved { from, to });
        true
    }

    /// Entfernt alle ausgehenden Links eines Elements (idempotent).
    pub fn remove_links(&mut self, id: u64) {
        let targets: Vec<u64> = match self.nodes.get(&id) {
            Some(node) => node.links.keys().copied().collect(),
            None => return,
        };
        for to in targets {
            self.remove_link(id, to);
        }
    }

    // ── Benachrichtigungen ──────────────────────────────────────────

    /// Beginnt einen Batch-Block: Einzel-Events werden unterdrückt.
    pub fn suspend(&mut self) {
        self.suspend_depth += 1;
    }

    /// Beendet den Batch-Block; der äußerste `resume` stellt genau ein
    /// `Resumed`-Event ein.
    pub fn resume(&mut self) {
        match self.suspend_depth {
            0 => log::warn!("resume ohne passendes suspend"),
            1 => {
                self.suspend_depth = 0;
                self.events.push_back(DiagramEvent::Resumed);
            }
            _ => self.suspend_depth -= 1,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspend_depth > 0
    }

    /// Zieht alle anstehenden Events ab (für die Observer-Pumpe).
    pub fn drain_events(&mut self) -> Vec<DiagramEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: DiagramEvent) {
        if self.suspend_depth == 0 {
            self.events.push_back(event);
        }
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::NodeShape;

    fn linkable_node(name: &str) -> Node {
        Node::new("task").named(name).with_policy(LinkPolicy::All)
    }

    fn diagram_with_two_nodes() -> (Diagram, u64, u64) {
        let mut d = Diagram::new();
        d.drain_events();
        let a = d.attach(linkable_node("a"));
        let b = d.attach(linkable_node("b"));
        d.drain_events();
        (d, a, b)
    }

    #[test]
    fn test_new_diagram_hat_wurzelgruppe() {
        let d = Diagram::new();
        let root = d.node(ROOT_ID).expect("Wurzelgruppe erwartet");
        assert_eq!(root.name, "root");
        assert!(root.is_group);
        assert!(!root.draggable && !root.linkable && !root.sizable && !root.deletable);
        assert_eq!(d.element_count(), 0);
    }

    #[test]
    fn test_attach_vergibt_fortlaufende_ids() {
        let mut d = Diagram::new();
        let a = d.attach(linkable_node("a"));
        let b = d.attach(linkable_node("b"));
        assert_ne!(a, b);
        assert_eq!(d.node(a).map(|n| n.parent), Some(Some(ROOT_ID)));
    }

    #[test]
    fn test_attach_behaelt_vorgegebene_id() {
        let mut d = Diagram::new();
        let mut n = linkable_node("a");
        n.id = 42;
        assert_eq!(d.attach(n), 42);
        // Folge-Ids kollidieren nicht
        assert_eq!(d.attach(linkable_node("b")), 43);
    }

    #[test]
    fn test_add_und_remove_link_symmetrisch() {
        let (mut d, a, b) = diagram_with_two_nodes();

        assert!(d.add_link(a, b));
        assert!(d.is_linked(a, b));
        assert_eq!(
            d.drain_events(),
            vec![DiagramEvent::LinkAdded { from: a, to: b }]
        );

        assert!(d.remove_link(a, b));
        assert!(!d.is_linked(a, b));
        assert_eq!(
            d.drain_events(),
            vec![DiagramEvent::LinkRemoved { from: a, to: b }]
        );
    }

    #[test]
    fn test_remove_link_ist_idempotent() {
        let (mut d, a, b) = diagram_with_two_nodes();
        d.add_link(a, b);
        assert!(d.remove_link(a, b));
        assert!(!d.remove_link(a, b));
        d.remove_links(a);
        d.remove_links(a);
        assert_eq!(d.node(a).map(Node::link_count), Some(0));
    }

    #[test]
    fn test_can_link_richtlinien_reihenfolge() {
        let mut d = Diagram::new();
        let none = d.attach(Node::new("task").with_policy(LinkPolicy::None));
        let all = d.attach(Node::new("task").with_policy(LinkPolicy::All));
        let directed = d.attach(Node::new("task").with_policy(LinkPolicy::Directed));
        let listed = d.attach(
            Node::new("task").with_policy(LinkPolicy::Tags(vec!["group".to_string()])),
        );
        let group = d.attach(Node::new("group"));

        assert!(!d.can_link(none, all));
        assert!(d.can_link(all, none));
        assert!(d.can_link(directed, all));
        assert!(!d.can_link(listed, all), "task nicht in Positivliste");
        assert!(d.can_link(listed, group));
    }

    #[test]
    fn test_selbst_link_ist_erlaubt() {
        let (mut d, a, _) = diagram_with_two_nodes();
        assert!(d.can_link(a, a));
        assert!(d.add_link(a, a));
        assert!(d.is_linked(a, a));
    }

    #[test]
    fn test_can_link_directed_verweigert_rueckkante() {
        let mut d = Diagram::new();
        let a = d.attach(Node::new("task").with_policy(LinkPolicy::Directed));
        let b = d.attach(Node::new("task").with_policy(LinkPolicy::Directed));

        assert!(d.add_link(a, b));
        // b verlinkt bereits zurück? Nein: a → b existiert, also darf b nicht mehr
        assert!(!d.can_link(b, a));
        assert!(!d.add_link(b, a));
    }

    #[test]
    fn test_can_link_ist_rein() {
        let (mut d, a, b) = diagram_with_two_nodes();
        let before = d.link_count();
        d.can_link(a, b);
        d.can_link(b, a);
        assert_eq!(d.link_count(), before);
        assert!(d.drain_events().is_empty());
    }

    #[test]
    fn test_doppeltes_add_link_ersetzt_und_benachrichtigt_erneut() {
        let (mut d, a, b) = diagram_with_two_nodes();
        assert!(d.add_link(a, b));
        assert!(d.add_link(a, b));
        assert_eq!(d.node(a).map(Node::link_count), Some(1));
        assert_eq!(d.drain_events().len(), 2);
    }

    #[test]
    fn test_remove_kaskadiert_ueber_links() {
        let (mut d, a, b) = diagram_with_two_nodes();
        d.add_link(a, b);
        d.add_link(b, a);
        d.drain_events();

        assert!(d.remove(b));
        assert!(!d.contains(b));
        // Der eingehende Link a→b ist mit entfernt
        assert!(!d.is_linked(a, b));

        let events = d.drain_events();
        assert_eq!(
            events,
            vec![
                DiagramEvent::LinkRemoved { from: b, to: a },
                DiagramEvent::LinkRemoved { from: a, to: b },
                DiagramEvent::Detached { id: b },
            ]
        );
    }

    #[test]
    fn test_remove_entfernt_kindelemente() {
        let mut d = Diagram::new();
        let mut g = Node::new("group");
        g.is_group = true;
        g.allow_drop = true;
        let group = d.attach(g);
        let mut child = linkable_node("child");
        child.parent = Some(group);
        let child = d.attach(child);

        assert!(d.remove(group));
        assert!(!d.contains(group));
        assert!(!d.contains(child));
    }

    #[test]
    fn test_wurzel_ist_nicht_loeschbar() {
        let mut d = Diagram::new();
        assert!(!d.remove(ROOT_ID));
        assert!(d.contains(ROOT_ID));
    }

    #[test]
    fn test_set_position_nur_bei_aenderung() {
        let (mut d, a, _) = diagram_with_two_nodes();
        assert!(d.set_position(a, Vec2::new(10.0, 20.0)));
        assert!(!d.set_position(a, Vec2::new(10.0, 20.0)));
        assert_eq!(d.drain_events(), vec![DiagramEvent::PositionChanged { id: a }]);
    }

    #[test]
    fn test_set_position_silent_ohne_event() {
        let (mut d, a, _) = diagram_with_two_nodes();
        d.set_position_silent(a, Vec2::new(30.0, 30.0));
        assert_eq!(d.node(a).map(|n| n.position), Some(Vec2::new(30.0, 30.0)));
        assert!(d.drain_events().is_empty());
    }

    #[test]
    fn test_absolute_position_ueber_elternkette() {
        let mut d = Diagram::new();
        let mut g = Node::new("group").at(Vec2::new(100.0, 50.0));
        g.is_group = true;
        let group = d.attach(g);
        let mut child = linkable_node("child").at(Vec2::new(10.0, 5.0));
        child.parent = Some(group);
        let child = d.attach(child);

        assert_eq!(d.absolute_position(child), Vec2::new(110.0, 55.0));
    }

    #[test]
    fn test_suspend_unterdrueckt_einzel_events() {
        let (mut d, a, b) = diagram_with_two_nodes();

        d.suspend();
        d.add_link(a, b);
        d.set_position(a, Vec2::new(5.0, 5.0));
        d.remove(b);
        d.resume();

        assert_eq!(d.drain_events(), vec![DiagramEvent::Resumed]);
    }

    #[test]
    fn test_geschachteltes_suspend_liefert_ein_resumed() {
        let (mut d, a, _) = diagram_with_two_nodes();

        d.suspend();
        d.suspend();
        d.set_position(a, Vec2::new(5.0, 5.0));
        d.resume();
        assert!(d.drain_events().is_empty(), "innerer resume beendet den Block nicht");
        d.resume();
        assert_eq!(d.drain_events(), vec![DiagramEvent::Resumed]);
    }

    #[test]
    fn test_reparent_verhindert_zyklen() {
        let mut d = Diagram::new();
        let mut outer = Node::new("group");
        outer.is_group = true;
        let outer = d.attach(outer);
        let mut inner = Node::new("group");
        inner.is_group = true;
        inner.parent = Some(outer);
        let inner = d.attach(inner);

        assert!(!d.reparent(outer, inner, Vec2::ZERO));
        assert!(d.reparent(inner, ROOT_ID, Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_clear_entfernt_alles_in_einem_block() {
        let (mut d, a, b) = diagram_with_two_nodes();
        d.add_link(a, b);
        d.drain_events();

        d.clear();
        assert_eq!(d.element_count(), 0);
        assert_eq!(d.drain_events(), vec![DiagramEvent::Resumed]);
    }

    #[test]
    fn test_new_uid_hat_v4_form() {
        let uid = new_uid();
        let parts: Vec<&str> = uid.split('-').collect();
        assert_eq!(parts.len(), 5);
        assert_eq!(
            parts.iter().map(|p| p.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(parts[2].starts_with('4'));
    }

    #[test]
    fn test_shape_default_ist_rechteck() {
        assert_eq!(Node::new("task").shape, NodeShape::Rectangle);
    }
}

//! Elementmodell: Knoten, Formen und Link-Richtlinien.

use glam::Vec2;
use indexmap::IndexMap;

use super::geometry::Rect;
use super::link::Link;

/// Umrissform eines Elements; entscheidet über die Randmathematik der
/// Verbindungslinien (Kreis- vs. Polygon-Schnitt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeShape {
    #[default]
    Rectangle,
    Ellipse,
}

/// Link-Richtlinie eines Elements: wer darf von hier aus verlinkt werden.
///
/// Persistente Form ist der kommaseparierte String des Originals:
/// `"none"`, `"all"`, `"directed"`, alles andere ist eine Positivliste
/// von Typ-Tags. Eine fehlende Richtlinie verhält sich wie `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Verweigert jede Verlinkung.
    #[default]
    None,
    /// Erlaubt jede Verlinkung.
    All,
    /// Erlaubt die Verlinkung, solange das Ziel nicht bereits zurück
    /// auf die Quelle verlinkt (keine unmittelbaren Zyklen).
    Directed,
    /// Erlaubt nur Ziele, deren Typ-Tag gelistet ist.
    Tags(Vec<String>),
}

impl LinkPolicy {
    /// Parst die persistente String-Form.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "none" => LinkPolicy::None,
            "all" => LinkPolicy::All,
            "directed" => LinkPolicy::Directed,
            other => LinkPolicy::Tags(
                other
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
            ),
        }
    }

    /// Persistente String-Form.
    pub fn as_string(&self) -> String {
        match self {
            LinkPolicy::None => "none".to_string(),
            LinkPolicy::All => "all".to_string(),
            LinkPolicy::Directed => "directed".to_string(),
            LinkPolicy::Tags(tags) => tags.join(","),
        }
    }
}

/// Ein Element der Szene: Knoten, Gruppe oder transienter Gesten-Knoten.
///
/// Die Position ist relativ zum Elternelement; absolute Koordinaten
/// liefert das [`Diagram`](super::diagram::Diagram). Positions- und
/// Größenänderungen laufen über die Diagram-Methoden, damit die
/// Änderungsbenachrichtigungen ausgelöst werden.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: u64,
    /// Typ-Tag, z.B. `"task"`, `"group"`, `"csv-importer"`.
    pub tag: String,
    pub name: String,
    /// Position relativ zum Elternelement.
    pub position: Vec2,
    pub size: Vec2,
    pub shape: NodeShape,
    pub parent: Option<u64>,

    pub draggable: bool,
    pub sizable: bool,
    pub linkable: bool,
    pub deletable: bool,
    pub policy: LinkPolicy,

    /// Untere/obere Grenze für die Größenänderung.
    pub min_size: Vec2,
    pub max_size: Vec2,

    pub is_group: bool,
    /// Gruppen mit gesetztem Flag nehmen gezogene Elemente auf.
    pub allow_drop: bool,
    /// Gesten-Pseudoknoten: unsichtbar für Layout, Persistenz und Hit-Test.
    pub transient: bool,

    pub(crate) links: IndexMap<u64, Link>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: 0,
            tag: tag.into(),
            name: String::new(),
            position: Vec2::ZERO,
            size: Vec2::new(100.0, 50.0),
            shape: NodeShape::Rectangle,
            parent: None,
            draggable: true,
            sizable: true,
            linkable: true,
            deletable: true,
            policy: LinkPolicy::None,
            min_size: Vec2::ZERO,
            max_size: Vec2::INFINITY,
            is_group: false,
            allow_drop: false,
            transient: false,
            links: IndexMap::new(),
        }
    }

    // ── Builder-Hilfen für Aufbau und Tests ─────────────────────────

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Rechteck in Eltern-Koordinaten.
    pub fn local_rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Existiert ein Link von diesem Element zum Ziel?
    pub fn is_linked_to(&self, target: u64) -> bool {
        self.links.contains_key(&target)
    }

    /// Ausgehende Links in Einfügereihenfolge.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

//! Element-Katalog: Registry der Elementtypen mit ihren Standardwerten.
//!
//! Ersetzt die Namensauflösung über Builder-Klassen durch eine Daten-
//! Registry: pro Typ-Tag Darstellung, Form, Standardgröße, Verhaltens-
//! Flags und Link-Richtlinie. Unbekannte Tags fallen auf den generischen
//! Elementtyp zurück (das Tag bleibt erhalten).

use glam::Vec2;
use indexmap::IndexMap;

use super::node::{LinkPolicy, Node, NodeShape};

/// Bauplan eines Elementtyps.
#[derive(Debug, Clone)]
pub struct ElementSpec {
    pub tag: String,
    /// Anzeigename in der Palette.
    pub label: String,
    pub shape: NodeShape,
    pub size: Vec2,
    pub min_size: Vec2,
    pub draggable: bool,
    pub sizable: bool,
    pub linkable: bool,
    pub deletable: bool,
    pub policy: LinkPolicy,
    pub is_group: bool,
    pub allow_drop: bool,
}

impl ElementSpec {
    fn generic(tag: &str, label: &str) -> Self {
        Self {
            tag: tag.to_string(),
            label: label.to_string(),
            shape: NodeShape::Rectangle,
            size: Vec2::new(120.0, 60.0),
            min_size: Vec2::new(40.0, 30.0),
            draggable: true,
            sizable: true,
            linkable: true,
            deletable: true,
            policy: LinkPolicy::All,
            is_group: false,
            allow_drop: false,
        }
    }

    /// ETL-Grundform: feste Größe, gerichtete Verlinkung.
    fn etl(tag: &str, label: &str) -> Self {
        Self {
            sizable: false,
            size: Vec2::new(110.0, 46.0),
            policy: LinkPolicy::Directed,
            ..Self::generic(tag, label)
        }
    }
}

/// Registry aller bekannten Elementtypen, in Palettenreihenfolge.
#[derive(Debug, Clone)]
pub struct ElementCatalog {
    specs: IndexMap<String, ElementSpec>,
}

impl ElementCatalog {
    /// Eingebaute Typen: generisches Element, Gruppe und das ETL-Set.
    pub fn standard() -> Self {
        let mut catalog = Self {
            specs: IndexMap::new(),
        };

        catalog.register(ElementSpec::generic("task", "Task"));

        catalog.register(ElementSpec {
            linkable: false,
            policy: LinkPolicy::None,
            is_group: true,
            allow_drop: true,
            size: Vec2::new(240.0, 160.0),
            min_size: Vec2::new(80.0, 60.0),
            ..ElementSpec::generic("group", "Group")
        });

        catalog.register(ElementSpec {
            linkable: false,
            ..ElementSpec::etl("csv-importer", "CSV Importer")
        });
        catalog.register(ElementSpec {
            policy: LinkPolicy::None,
            ..ElementSpec::etl("csv-exporter", "CSV Exporter")
        });
        catalog.register(ElementSpec::etl("filter", "Filter"));
        catalog.register(ElementSpec {
            shape: NodeShape::Ellipse,
            size: Vec2::new(80.0, 80.0),
            ..ElementSpec::etl("mapper", "Mapper")
        });
        catalog.register(ElementSpec::etl("merger", "Merger"));
        catalog.register(ElementSpec::etl("script", "Script"));

        catalog
    }

    pub fn register(&mut self, spec: ElementSpec) {
        self.specs.insert(spec.tag.clone(), spec);
    }

    pub fn spec(&self, tag: &str) -> Option<&ElementSpec> {
        self.specs.get(tag)
    }

    pub fn specs(&self) -> impl Iterator<Item = &ElementSpec> {
        self.specs.values()
    }

    /// Baut ein Element nach den Katalog-Standards; unbekannte Tags
    /// erhalten die generischen Standardwerte mit erhaltenem Tag.
    pub fn create(&self, tag: &str, name: impl Into<String>, position: Vec2) -> Node {
        let spec = match self.specs.get(tag) {
            Some(spec) => spec.clone(),
            None => ElementSpec::generic(tag, tag),
        };

        let mut node = Node::new(spec.tag)
            .named(name)
            .at(position)
            .with_size(spec.size)
            .with_shape(spec.shape)
            .with_policy(spec.policy);
        node.min_size = spec.min_size;
        node.draggable = spec.draggable;
        node.sizable = spec.sizable;
        node.linkable = spec.linkable;
        node.deletable = spec.deletable;
        node.is_group = spec.is_group;
        node.allow_drop = spec.allow_drop;
        node
    }
}

impl Default for ElementCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

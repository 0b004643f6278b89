//! JSON-Persistenz der Szene.
//!
//! Das Format ist eine flache Elementliste mit elternrelativen
//! Koordinaten; Links referenzieren Ziel-Ids. Vorwärtsreferenzen sind
//! erlaubt: Beim Laden werden zuerst alle Elemente angelegt und die
//! Link-Paare anschließend aufgelöst. Paare, die sich nicht auflösen
//! lassen (fehlendes Ziel oder von der Richtlinie verweigert), werden
//! mit einer Warnung verworfen.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::{Diagram, ElementCatalog, LinkPolicy};

fn default_true() -> bool {
    true
}

/// Ein Element im Dateiformat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_true")]
    pub sizable: bool,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default = "default_true")]
    pub linkable: bool,
    #[serde(rename = "linkConstraints", default)]
    pub link_constraints: String,
    #[serde(default = "default_true")]
    pub deletable: bool,
    /// Ziel-Ids der ausgehenden Links; `null` wenn keine.
    #[serde(default)]
    pub links: Option<Vec<u64>>,
}

/// Die gesamte Szene im Dateiformat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramDescriptor {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<ElementDescriptor>,
}

impl DiagramDescriptor {
    /// Serialisiert die Szene: flache Liste aller Elemente ohne
    /// Wurzelgruppe und Gesten-Pseudoknoten.
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let elements = diagram
            .elements()
            .filter(|n| !n.transient)
            .map(|node| {
                let links: Vec<u64> = node.links().map(|l| l.to).collect();
                ElementDescriptor {
                    kind: node.tag.clone(),
                    id: node.id,
                    name: node.name.clone(),
                    x: node.position.x,
                    y: node.position.y,
                    sizable: node.sizable,
                    draggable: node.draggable,
                    linkable: node.linkable,
                    link_constraints: node.policy.as_string(),
                    deletable: node.deletable,
                    links: if links.is_empty() { None } else { Some(links) },
                }
            })
            .collect();

        Self {
            uid: diagram.uid.clone(),
            name: diagram.name.clone(),
            elements,
        }
    }

    /// Baut die Szene aus dem Deskriptor auf.
    ///
    /// Elementdefaults (Größe, Form) kommen aus dem Katalog; die
    /// persistierten Flags und die Richtlinie überschreiben sie. Die
    /// Link-Paare werden nach dem Anlegen aller Elemente wiederholt
    /// angewendet, bis keine weiteren mehr aufgehen; der Rest fällt
    /// verlustbehaftet weg.
    pub fn into_diagram(self, catalog: &ElementCatalog) -> Diagram {
        let mut diagram = Diagram::new();
        diagram.uid = self.uid;
        diagram.name = self.name;

        diagram.suspend();

        let mut pairs: Vec<(u64, u64)> = Vec::new();
        for desc in self.elements {
            let mut node = catalog.create(&desc.kind, &desc.name, Vec2::new(desc.x, desc.y));
            node.id = desc.id;
            node.sizable = desc.sizable;
            node.draggable = desc.draggable;
            node.linkable = desc.linkable;
            node.deletable = desc.deletable;
            node.policy = LinkPolicy::parse(&desc.link_constraints);

            let id = diagram.attach(node);
            if let Some(links) = desc.links {
                pairs.extend(links.into_iter().map(|to| (id, to)));
            }
        }

        // Auflösungsschleife: ein Durchlauf kann Paare freischalten
        // (z.B. Positivlisten nach Anlage des Ziels), daher bis zum
        // Stillstand wiederholen
        loop {
            let before = pairs.len();
            pairs.retain(|&(from, to)| !diagram.add_link(from, to));
            if pairs.is_empty() || pairs.len() == before {
                break;
            }
        }
        for (from, to) in &pairs {
            log::warn!("Link {} → {} nicht auflösbar, wird verworfen", from, to);
        }

        diagram.resume();
        diagram
    }
}

/// Schreibt die Szene als formatiertes JSON.
pub fn save_to_path(diagram: &Diagram, path: &Path) -> Result<()> {
    let descriptor = DiagramDescriptor::from_diagram(diagram);
    let content = serde_json::to_string_pretty(&descriptor)
        .context("Szene konnte nicht serialisiert werden")?;
    std::fs::write(path, content)
        .with_context(|| format!("Datei konnte nicht geschrieben werden: {}", path.display()))?;
    log::info!(
        "Szene gespeichert: {} ({} Elemente)",
        path.display(),
        diagram.element_count()
    );
    Ok(())
}

/// Liest eine Szene aus einer JSON-Datei.
pub fn load_from_path(path: &Path, catalog: &ElementCatalog) -> Result<Diagram> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {}", path.display()))?;
    let descriptor: DiagramDescriptor =
        serde_json::from_str(&content).context("Szene konnte nicht geparst werden")?;
    let diagram = descriptor.into_diagram(catalog);
    log::info!(
        "Szene geladen: {} ({} Elemente, {} Links)",
        path.display(),
        diagram.element_count(),
        diagram.link_count()
    );
    Ok(diagram)
}

//! Layout-Manager: Raster-Einrasten, Rand-Elemente und Gesamtgröße.
//!
//! Konsumiert Diagramm-Benachrichtigungen: Positionsänderungen werden
//! auf das Raster gerundet (stiller Schreibzugriff, keine erneute
//! Benachrichtigung), Rand-Elemente nachgeführt und daraus die
//! Gesamtgröße der Szene samt Scrollbar-Sichtbarkeit pro Achse
//! abgeleitet.

use glam::Vec2;

use crate::core::{Diagram, DiagramEvent, DiagramObserver, EventKind};
use crate::shared::EditorOptions;

#[derive(Debug, Clone)]
pub struct LayoutManager {
    pub grid_size: Vec2,
    pub snap_to_grid: bool,
    margin: f32,
    viewport: Vec2,
    /// Gesamtgröße des Szeneninhalts (mindestens die Viewport-Größe).
    pub overall: Vec2,
    /// Element mit der größten rechten Kante.
    edge_x: Option<u64>,
    /// Element mit der größten unteren Kante.
    edge_y: Option<u64>,
}

impl LayoutManager {
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            grid_size: Vec2::from(options.grid_size),
            snap_to_grid: options.snap_to_grid,
            margin: options.layout_margin,
            viewport: Vec2::ZERO,
            overall: Vec2::ZERO,
            edge_x: None,
            edge_y: None,
        }
    }

    /// Übernimmt geänderte Optionen (Raster, Snap-Schalter).
    pub fn sync_options(&mut self, options: &EditorOptions) {
        self.grid_size = Vec2::from(options.grid_size);
        self.snap_to_grid = options.snap_to_grid;
        self.margin = options.layout_margin;
    }

    pub fn set_viewport(&mut self, diagram: &Diagram, size: Vec2) {
        self.viewport = size;
        self.resize_to_fit(diagram);
    }

    /// Horizontale Scrollbar nötig? Inhalt, der den Viewport exakt
    /// füllt, blendet sie aus.
    pub fn hscroll(&self) -> bool {
        self.overall.x > self.viewport.x
    }

    pub fn vscroll(&self) -> bool {
        self.overall.y > self.viewport.y
    }

    /// Voller Neuaufbau, z.B. nach Szenenwechsel (Neu/Laden).
    pub fn refresh(&mut self, diagram: &Diagram) {
        self.rescan_edges(diagram);
        self.resize_to_fit(diagram);
    }

    /// Rundet die Position des Elements auf das Raster; stiller
    /// Schreibzugriff, damit die gerade verarbeitete Benachrichtigung
    /// nicht erneut ausgelöst wird.
    fn snap_position(&self, diagram: &mut Diagram, id: u64) {
        if !self.snap_to_grid {
            return;
        }
        let Some(node) = diagram.node(id) else {
            return;
        };
        if node.transient {
            return;
        }
        let snapped = Vec2::new(
            (node.position.x / self.grid_size.x).round() * self.grid_size.x,
            (node.position.y / self.grid_size.y).round() * self.grid_size.y,
        );
        if snapped != node.position {
            diagram.set_position_silent(id, snapped);
        }
    }

    /// Voller Scan nach den Rand-Elementen.
    fn rescan_edges(&mut self, diagram: &Diagram) {
        self.edge_x = None;
        self.edge_y = None;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for node in diagram.elements() {
            if node.transient {
                continue;
            }
            let pos = diagram.absolute_position(node.id);
            let right = pos.x + node.size.x;
            let bottom = pos.y + node.size.y;
            if right > max_x {
                max_x = right;
                self.edge_x = Some(node.id);
            }
            if bottom > max_y {
                max_y = bottom;
                self.edge_y = Some(node.id);
            }
        }
    }

    /// Gesamtgröße aus Viewport und Rand-Elementen (plus Rand).
    fn resize_to_fit(&mut self, diagram: &Diagram) {
        let mut content = Vec2::ZERO;
        if let Some(id) = self.edge_x {
            if let Some(rect) = diagram.absolute_rect(id) {
                content.x = rect.max().x + self.margin;
            }
        }
        if let Some(id) = self.edge_y {
            if let Some(rect) = diagram.absolute_rect(id) {
                content.y = rect.max().y + self.margin;
            }
        }
        self.overall = self.viewport.max(content);
    }

    /// Schlägt das bewegte Element die gecachten Ränder (oder ist es
    /// selbst Rand-Element), ist ein Rescan fällig.
    fn edges_affected(&self, diagram: &Diagram, id: u64) -> bool {
        if self.edge_x == Some(id) || self.edge_y == Some(id) {
            return true;
        }
        let Some(rect) = diagram.absolute_rect(id) else {
            return true;
        };
        let beats_x = self
            .edge_x
            .and_then(|e| diagram.absolute_rect(e))
            .map(|r| rect.max().x > r.max().x)
            .unwrap_or(true);
        let beats_y = self
            .edge_y
            .and_then(|e| diagram.absolute_rect(e))
            .map(|r| rect.max().y > r.max().y)
            .unwrap_or(true);
        beats_x || beats_y
    }
}

impl DiagramObserver for LayoutManager {
    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::Attached,
            EventKind::Detached,
            EventKind::Reparented,
            EventKind::PositionChanged,
            EventKind::SizeChanged,
            EventKind::Resumed,
        ]
    }

    fn notify(&mut self, diagram: &mut Diagram, event: &DiagramEvent) {
        match *event {
            DiagramEvent::PositionChanged { id } | DiagramEvent::Reparented { id, .. } => {
                self.snap_position(diagram, id);
                if self.edges_affected(diagram, id) {
                    self.rescan_edges(diagram);
                }
            }
            DiagramEvent::SizeChanged { id } => {
                if self.edges_affected(diagram, id) {
                    self.rescan_edges(diagram);
                }
            }
            DiagramEvent::Attached { .. }
            | DiagramEvent::Detached { .. }
            | DiagramEvent::Resumed => {
                self.rescan_edges(diagram);
            }
            _ => {}
        }
        self.resize_to_fit(diagram);
    }
}

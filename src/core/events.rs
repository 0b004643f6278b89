//! Änderungsbenachrichtigungen des Diagramms und die Observer-Schnittstelle.

use super::diagram::Diagram;

/// Benachrichtigung über eine Modelländerung.
///
/// Während eines `suspend`/`resume`-Blocks werden keine Einzel-Events
/// erzeugt; das abschließende `resume` liefert genau ein [`DiagramEvent::Resumed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramEvent {
    /// Element wurde der Szene hinzugefügt.
    Attached { id: u64 },
    /// Element wurde aus der Szene entfernt.
    Detached { id: u64 },
    /// Element wurde unter ein neues Elternelement gehängt.
    Reparented { id: u64, parent: u64 },
    PositionChanged { id: u64 },
    SizeChanged { id: u64 },
    Renamed { id: u64 },
    LinkAdded { from: u64, to: u64 },
    LinkRemoved { from: u64, to: u64 },
    /// Ende eines Suspend-Blocks: ein voller Layout-/Render-Durchlauf.
    Resumed,
}

/// Event-Art, ohne Nutzdaten; Observer melden hierüber ihr Interesse an.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Attached,
    Detached,
    Reparented,
    PositionChanged,
    SizeChanged,
    Renamed,
    LinkAdded,
    LinkRemoved,
    Resumed,
}

impl DiagramEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DiagramEvent::Attached { .. } => EventKind::Attached,
            DiagramEvent::Detached { .. } => EventKind::Detached,
            DiagramEvent::Reparented { .. } => EventKind::Reparented,
            DiagramEvent::PositionChanged { .. } => EventKind::PositionChanged,
            DiagramEvent::SizeChanged { .. } => EventKind::SizeChanged,
            DiagramEvent::Renamed { .. } => EventKind::Renamed,
            DiagramEvent::LinkAdded { .. } => EventKind::LinkAdded,
            DiagramEvent::LinkRemoved { .. } => EventKind::LinkRemoved,
            DiagramEvent::Resumed => EventKind::Resumed,
        }
    }
}

/// Empfänger von Diagramm-Benachrichtigungen.
///
/// `interests` deklariert die konsumierten Event-Arten; die Pumpe
/// überspringt Observer für alle anderen Events.
pub trait DiagramObserver {
    fn interests(&self) -> &'static [EventKind];

    fn notify(&mut self, diagram: &mut Diagram, event: &DiagramEvent);
}

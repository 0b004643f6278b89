//! Gerichtete Verbindung zwischen zwei Elementen.

/// Link von einem Quell- zu einem Zielelement; beide Endpunkte sind
/// Pflicht.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub from: u64,
    pub to: u64,
}

impl Link {
    pub fn new(from: u64, to: u64) -> Self {
        Self { from, to }
    }
}

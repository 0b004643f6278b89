//! Zentrale Konfiguration für den NodeFlow Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Layout ──────────────────────────────────────────────────────────

/// Rastergröße des Layout-Managers pro Achse.
pub const GRID_SIZE: [f32; 2] = [10.0, 10.0];
/// Rand um die äußersten Elemente beim Anpassen der Gesamtgröße.
pub const LAYOUT_MARGIN: f32 = 20.0;

// ── Tastatur ────────────────────────────────────────────────────────

/// Pfeiltasten-Schritt (erster Tastendruck).
pub const MOVE_SMALL_STEP: f32 = 10.0;
/// Pfeiltasten-Schritt bei gehaltener Taste (Key-Repeat).
pub const MOVE_LARGE_STEP: f32 = 30.0;

// ── Verbindungslinien ───────────────────────────────────────────────

/// Aufblas-Rand der Elementrechtecke für die Rand-Schnittpunkte.
pub const WIRE_MARGIN: f32 = 2.0;
/// Maximaler Abstand des Link-Löschknopfs vom Startpunkt der Linie.
pub const WIRE_BUTTON_DISTANCE_MAX: f32 = 20.0;

// ── Affordanzen ─────────────────────────────────────────────────────

/// Kantenlänge der acht Resize-Griffe.
pub const HANDLE_SIZE: f32 = 8.0;
/// Radius des Link-Griffs am rechten Elementrand.
pub const LINK_HANDLE_RADIUS: f32 = 6.0;
/// Radius des Element-Löschknopfs.
pub const DELETE_BUTTON_RADIUS: f32 = 7.0;
/// Radius des Link-Löschknopfs auf der Linie.
pub const LINK_BUTTON_RADIUS: f32 = 5.0;

// ── Farben ──────────────────────────────────────────────────────────

/// Füllfarbe normaler Elemente (RGBA).
pub const NODE_FILL: [f32; 4] = [0.18, 0.22, 0.30, 1.0];
/// Umrissfarbe normaler Elemente.
pub const NODE_OUTLINE: [f32; 4] = [0.55, 0.62, 0.72, 1.0];
/// Füllfarbe von Gruppen.
pub const GROUP_FILL: [f32; 4] = [0.13, 0.15, 0.18, 0.6];
/// Umrissfarbe von Gruppen.
pub const GROUP_OUTLINE: [f32; 4] = [0.35, 0.40, 0.48, 1.0];
/// Umrissfarbe selektierter Elemente (Magenta).
pub const SELECTION_OUTLINE: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
/// Farbe der Verbindungslinien und Pfeilspitzen.
pub const WIRE_COLOR: [f32; 4] = [0.75, 0.8, 0.85, 1.0];
/// Farbe der Raster-Punkte.
pub const GRID_DOT_COLOR: [f32; 4] = [0.3, 0.33, 0.38, 1.0];
/// Farbe des Marquee-Rahmens.
pub const MARQUEE_COLOR: [f32; 4] = [0.3, 0.7, 1.0, 1.0];
/// Markierung nicht verlinkbarer Ziele während einer Link-Geste (Rot).
pub const MARK_NOT_ALLOWED: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
/// Markierung bereits verlinkter Ziele (Gelb).
pub const MARK_ALREADY_LINKED: [f32; 4] = [0.9, 0.8, 0.2, 1.0];
/// Hervorhebung getroffener Drop-Ziele (Grün).
pub const MARK_DROP_HIT: [f32; 4] = [0.2, 0.8, 0.3, 1.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `nodeflow_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Layout ──────────────────────────────────────────────────
    /// Rastergröße pro Achse
    pub grid_size: [f32; 2],
    /// Positionen beim Verschieben auf das Raster einrasten
    pub snap_to_grid: bool,
    /// Rand um die äußersten Elemente
    pub layout_margin: f32,

    // ── Tastatur ────────────────────────────────────────────────
    /// Pfeiltasten-Schritt (erster Tastendruck)
    pub move_small_step: f32,
    /// Pfeiltasten-Schritt bei Key-Repeat
    pub move_large_step: f32,

    // ── Verbindungslinien ───────────────────────────────────────
    /// Aufblas-Rand für die Rand-Schnittpunkte
    pub wire_margin: f32,
    /// Linienfarbe
    pub wire_color: [f32; 4],

    // ── Darstellung ─────────────────────────────────────────────
    /// FPS-Anzeige in der Status-Leiste
    #[serde(default)]
    pub show_fps: bool,
    /// Füllfarbe normaler Elemente
    pub node_fill: [f32; 4],
    /// Umrissfarbe normaler Elemente
    pub node_outline: [f32; 4],
    /// Füllfarbe von Gruppen
    pub group_fill: [f32; 4],
    /// Umrissfarbe von Gruppen
    pub group_outline: [f32; 4],
    /// Umrissfarbe selektierter Elemente
    pub selection_outline: [f32; 4],
    /// Farbe der Raster-Punkte
    pub grid_dot_color: [f32; 4],
    /// Farbe des Marquee-Rahmens
    pub marquee_color: [f32; 4],
    /// Markierung nicht verlinkbarer Ziele
    pub mark_not_allowed: [f32; 4],
    /// Markierung bereits verlinkter Ziele
    pub mark_already_linked: [f32; 4],
    /// Hervorhebung getroffener Drop-Ziele
    pub mark_drop_hit: [f32; 4],
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_to_grid: true,
            layout_margin: LAYOUT_MARGIN,

            move_small_step: MOVE_SMALL_STEP,
            move_large_step: MOVE_LARGE_STEP,

            wire_margin: WIRE_MARGIN,
            wire_color: WIRE_COLOR,

            show_fps: false,
            node_fill: NODE_FILL,
            node_outline: NODE_OUTLINE,
            group_fill: GROUP_FILL,
            group_outline: GROUP_OUTLINE,
            selection_outline: SELECTION_OUTLINE,
            grid_dot_color: GRID_DOT_COLOR,
            marquee_color: MARQUEE_COLOR,
            mark_not_allowed: MARK_NOT_ALLOWED,
            mark_already_linked: MARK_ALREADY_LINKED,
            mark_drop_hit: MARK_DROP_HIT,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("nodeflow_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("nodeflow_editor.toml")
    }
}

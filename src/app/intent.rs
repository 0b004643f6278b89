//! Editor-Intents: Eingaben aus UI und Tastatur ohne eigene
//! Mutationslogik; die Verarbeitung übernimmt der Controller.

use std::path::PathBuf;

use glam::Vec2;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    // ── Zeiger ──────────────────────────────────────────────────────
    /// Primärtaste gedrückt (Szene-Koordinaten).
    PointerPressed { pos: Vec2, additive: bool },
    /// Zeiger mit gehaltener Primärtaste bewegt.
    PointerDragged { pos: Vec2 },
    /// Primärtaste losgelassen.
    PointerReleased { pos: Vec2 },

    // ── Tastatur ────────────────────────────────────────────────────
    /// Selektion per Pfeiltaste verschieben; `repeated` bei Key-Repeat.
    NudgeSelected { direction: Vec2, repeated: bool },
    /// Entfernen-Taste: löschbare Selektion fällt.
    DeleteSelectedRequested,
    SelectAllRequested,
    ClearSelectionRequested,
    /// Escape: laufende Geste verwerfen (ohne Geste: Selektion leeren).
    CancelGestureRequested,

    // ── Palette ─────────────────────────────────────────────────────
    /// Neues Element des Typs in die Szene setzen.
    AddElementRequested { tag: String },

    // ── Datei ───────────────────────────────────────────────────────
    NewDiagramRequested,
    /// Öffnen-Dialog anfordern.
    OpenFileRequested,
    /// Unter aktuellem Pfad speichern; ohne Pfad wie Speichern-unter.
    SaveRequested,
    SaveAsRequested,
    /// Dialog-Ergebnis: Datei laden.
    FileSelected { path: PathBuf },
    /// Dialog-Ergebnis: Zielpfad zum Speichern.
    SaveFilePathSelected { path: PathBuf },

    // ── Ansicht ─────────────────────────────────────────────────────
    ToggleGridSnapRequested,
    ToggleFpsRequested,
    /// Sichtbarer Szenenbereich hat sich geändert.
    ViewportResized { size: Vec2 },

    ExitRequested,
}

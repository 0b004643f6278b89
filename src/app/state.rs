//! Editor-Zustand: Szene, Selektion, Optionen und UI-Flags.

use std::path::PathBuf;

use crate::core::{Diagram, ElementCatalog};
use crate::interaction::SelectionState;
use crate::shared::EditorOptions;

/// Zentrale Datenhaltung des Editors.
pub struct EditorState {
    pub diagram: Diagram,
    pub selection: SelectionState,
    pub options: EditorOptions,
    pub catalog: ElementCatalog,

    // ── UI-Flags ────────────────────────────────────────────────────
    /// Öffnen-Dialog beim nächsten Frame anzeigen (rfd blockiert,
    /// daher außerhalb des egui-Closures abgefragt).
    pub show_open_dialog: bool,
    /// Speichern-Dialog beim nächsten Frame anzeigen.
    pub show_save_dialog: bool,
    /// Pfad der aktuell geladenen Datei.
    pub current_file_path: Option<PathBuf>,
    /// Meldung in der Status-Leiste.
    pub status_message: String,
    /// Anwendung beim nächsten Frame beenden.
    pub should_exit: bool,
}

impl EditorState {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            diagram: Diagram::new(),
            selection: SelectionState::new(),
            options,
            catalog: ElementCatalog::standard(),
            show_open_dialog: false,
            show_save_dialog: false,
            current_file_path: None,
            status_message: String::new(),
            should_exit: false,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

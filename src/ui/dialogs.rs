//! Datei-Dialoge (rfd blockiert, daher außerhalb des egui-Closures).

use crate::app::{EditorIntent, EditorState};

/// Verarbeitet ausstehende Datei-Dialoge und gibt Intents zurück.
pub fn handle_file_dialogs(state: &mut EditorState) -> Vec<EditorIntent> {
    let mut events = Vec::new();

    if state.show_open_dialog {
        state.show_open_dialog = false;

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("NodeFlow Diagram", &["json"])
            .pick_file()
        {
            events.push(EditorIntent::FileSelected { path });
        }
    }

    if state.show_save_dialog {
        state.show_save_dialog = false;

        let default_name = state
            .current_file_path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("diagram.json");

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("NodeFlow Diagram", &["json"])
            .set_file_name(default_name)
            .save_file()
        {
            events.push(EditorIntent::SaveFilePathSelected { path });
        }
    }

    events
}

//! Editor-Controller: verarbeitet Intents, pumpt die
//! Diagramm-Benachrichtigungen in die Observer und hält die
//! Leitungsgeometrie aktuell.

use anyhow::Result;
use glam::Vec2;

use crate::core::{Diagram, DiagramObserver};
use crate::interaction::{ActiveGesture, InteractionManager, LifecycleManager};
use crate::layout::LayoutManager;
use crate::render::wire::{layout_wires, WireLayout};
use crate::shared::EditorOptions;
use crate::storage;

use super::intent::EditorIntent;
use super::state::EditorState;

pub struct EditorController {
    pub interaction: InteractionManager,
    pub layout: LayoutManager,
    /// Leitungsgeometrie des letzten Frames; Eingabe für Hit-Test und
    /// Renderer.
    pub wires: WireLayout,
}

impl EditorController {
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            interaction: InteractionManager::default(),
            layout: LayoutManager::new(options),
            wires: WireLayout::default(),
        }
    }

    /// Verarbeitet einen Intent und bringt danach Observer und
    /// Leitungsgeometrie auf Stand.
    pub fn handle_intent(&mut self, state: &mut EditorState, intent: EditorIntent) -> Result<()> {
        match intent {
            // ── Zeiger ──────────────────────────────────────────────
            EditorIntent::PointerPressed { pos, additive } => {
                self.interaction.pointer_pressed(
                    &mut state.diagram,
                    &mut state.selection,
                    &self.wires,
                    pos,
                    additive,
                );
            }
            EditorIntent::PointerDragged { pos } => {
                self.interaction
                    .pointer_dragged(&mut state.diagram, pos, &state.options);
            }
            EditorIntent::PointerReleased { pos } => {
                self.interaction
                    .pointer_released(&mut state.diagram, &mut state.selection, pos);
            }

            // ── Tastatur ────────────────────────────────────────────
            EditorIntent::NudgeSelected {
                direction,
                repeated,
            } => {
                crate::interaction::DragManager::nudge(
                    &mut state.diagram,
                    &state.selection,
                    direction,
                    repeated,
                    &state.options,
                );
            }
            EditorIntent::DeleteSelectedRequested => {
                LifecycleManager::delete_selected(&mut state.diagram, &mut state.selection);
            }
            EditorIntent::SelectAllRequested => {
                let ids: Vec<u64> = state
                    .diagram
                    .elements()
                    .filter(|n| !n.transient)
                    .map(|n| n.id)
                    .collect();
                state.selection.clear();
                for id in ids {
                    state.selection.insert(id);
                }
            }
            EditorIntent::ClearSelectionRequested => state.selection.clear(),
            EditorIntent::CancelGestureRequested => {
                if self.interaction.active() != ActiveGesture::Idle {
                    self.interaction.cancel(&mut state.diagram);
                } else {
                    state.selection.clear();
                }
            }

            // ── Palette ─────────────────────────────────────────────
            EditorIntent::AddElementRequested { tag } => {
                self.add_element(state, &tag);
            }

            // ── Datei ───────────────────────────────────────────────
            EditorIntent::NewDiagramRequested => {
                self.replace_diagram(state, Diagram::new());
                state.current_file_path = None;
                state.status_message = "Neue Szene".to_string();
            }
            EditorIntent::OpenFileRequested => state.show_open_dialog = true,
            EditorIntent::SaveRequested => match state.current_file_path.clone() {
                Some(path) => {
                    storage::save_to_path(&state.diagram, &path)?;
                    state.status_message = format!("Gespeichert: {}", path.display());
                }
                None => state.show_save_dialog = true,
            },
            EditorIntent::SaveAsRequested => state.show_save_dialog = true,
            EditorIntent::FileSelected { path } => {
                let diagram = storage::load_from_path(&path, &state.catalog)?;
                self.replace_diagram(state, diagram);
                state.status_message = format!("Geladen: {}", path.display());
                state.current_file_path = Some(path);
            }
            EditorIntent::SaveFilePathSelected { path } => {
                storage::save_to_path(&state.diagram, &path)?;
                state.status_message = format!("Gespeichert: {}", path.display());
                state.current_file_path = Some(path);
            }

            // ── Ansicht ─────────────────────────────────────────────
            EditorIntent::ToggleGridSnapRequested => {
                state.options.snap_to_grid = !state.options.snap_to_grid;
                self.layout.sync_options(&state.options);
            }
            EditorIntent::ToggleFpsRequested => {
                state.options.show_fps = !state.options.show_fps;
            }
            EditorIntent::ViewportResized { size } => {
                self.layout.set_viewport(&state.diagram, size);
            }

            EditorIntent::ExitRequested => {
                if let Err(e) = state.options.save_to_file(&EditorOptions::config_path()) {
                    log::warn!("Optionen konnten nicht gespeichert werden: {}", e);
                }
                state.should_exit = true;
            }
        }

        self.pump(state);
        Ok(())
    }

    /// Neues Element aus dem Katalog, leicht versetzt platziert und
    /// direkt selektiert.
    fn add_element(&mut self, state: &mut EditorState, tag: &str) {
        let count = state.diagram.element_count();
        let position = Vec2::splat(40.0 + (count % 8) as f32 * 20.0);
        let label = state
            .catalog
            .spec(tag)
            .map(|s| s.label.clone())
            .unwrap_or_else(|| tag.to_string());
        let name = format!("{} {}", label, count + 1);

        let node = state.catalog.create(tag, name, position);
        let id = state.diagram.attach(node);
        state.selection.select_only(id);
    }

    /// Tauscht die Szene aus (Neu/Laden) und setzt Gesten, Selektion
    /// und Layout zurück.
    fn replace_diagram(&mut self, state: &mut EditorState, diagram: Diagram) {
        if self.interaction.active() != ActiveGesture::Idle {
            self.interaction.cancel(&mut state.diagram);
        }
        state.diagram = diagram;
        state.selection.clear();
        self.interaction = InteractionManager::default();
        self.layout.refresh(&state.diagram);
    }

    /// Observer-Pumpe: anstehende Events an Layout- und Link-Observer
    /// verteilen, verwaiste Selektionseinträge räumen, danach die
    /// Leitungsgeometrie neu berechnen.
    fn pump(&mut self, state: &mut EditorState) {
        loop {
            let events = state.diagram.drain_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                if let crate::core::DiagramEvent::Detached { id } = event {
                    state.selection.remove(*id);
                }
                if self.layout.interests().contains(&event.kind()) {
                    self.layout.notify(&mut state.diagram, event);
                }
                if self.interaction.linking.interests().contains(&event.kind()) {
                    self.interaction.linking.notify(&mut state.diagram, event);
                }
            }
        }

        // Selektion kann nach einem Szenenwechsel Ids enthalten, die es
        // nicht mehr gibt
        let stale: Vec<u64> = state
            .selection
            .iter()
            .filter(|id| !state.diagram.contains(*id))
            .collect();
        for id in stale {
            state.selection.remove(id);
        }

        self.wires = layout_wires(&state.diagram, state.options.wire_margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> (EditorState, EditorController) {
        let state = EditorState::default();
        let controller = EditorController::new(&state.options);
        (state, controller)
    }

    #[test]
    fn test_add_element_selektiert_das_neue_element() {
        let (mut state, mut controller) = editor();
        controller
            .handle_intent(
                &mut state,
                EditorIntent::AddElementRequested {
                    tag: "task".to_string(),
                },
            )
            .expect("Intent");

        assert_eq!(state.diagram.element_count(), 1);
        assert_eq!(state.selection.len(), 1);
        let id = state.selection.iter().next().expect("Selektion");
        assert_eq!(state.diagram.node(id).map(|n| n.name.clone()), Some("Task 1".to_string()));
    }

    #[test]
    fn test_select_all_und_delete() {
        let (mut state, mut controller) = editor();
        for _ in 0..3 {
            controller
                .handle_intent(
                    &mut state,
                    EditorIntent::AddElementRequested {
                        tag: "filter".to_string(),
                    },
                )
                .expect("Intent");
        }

        controller
            .handle_intent(&mut state, EditorIntent::SelectAllRequested)
            .expect("Intent");
        assert_eq!(state.selection.len(), 3);

        controller
            .handle_intent(&mut state, EditorIntent::DeleteSelectedRequested)
            .expect("Intent");
        assert_eq!(state.diagram.element_count(), 0);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_escape_kaskade_geste_vor_selektion() {
        let (mut state, mut controller) = editor();
        controller
            .handle_intent(
                &mut state,
                EditorIntent::AddElementRequested {
                    tag: "task".to_string(),
                },
            )
            .expect("Intent");

        // Marquee auf dem Hintergrund starten
        controller
            .handle_intent(
                &mut state,
                EditorIntent::PointerPressed {
                    pos: Vec2::new(500.0, 500.0),
                    additive: false,
                },
            )
            .expect("Intent");
        assert_eq!(controller.interaction.active(), ActiveGesture::Marquee);

        controller
            .handle_intent(&mut state, EditorIntent::CancelGestureRequested)
            .expect("Intent");
        assert_eq!(controller.interaction.active(), ActiveGesture::Idle);
    }

    #[test]
    fn test_speichern_ohne_pfad_fordert_dialog_an() {
        let (mut state, mut controller) = editor();
        controller
            .handle_intent(&mut state, EditorIntent::SaveRequested)
            .expect("Intent");
        assert!(state.show_save_dialog);
    }

    #[test]
    fn test_neue_szene_raeumt_selektion_und_pfad() {
        let (mut state, mut controller) = editor();
        state.current_file_path = Some(std::path::PathBuf::from("/tmp/x.json"));
        controller
            .handle_intent(
                &mut state,
                EditorIntent::AddElementRequested {
                    tag: "task".to_string(),
                },
            )
            .expect("Intent");

        controller
            .handle_intent(&mut state, EditorIntent::NewDiagramRequested)
            .expect("Intent");
        assert_eq!(state.diagram.element_count(), 0);
        assert!(state.selection.is_empty());
        assert!(state.current_file_path.is_none());
    }

    #[test]
    fn test_wires_folgen_dem_modell() {
        let (mut state, mut controller) = editor();
        let a = state
            .diagram
            .attach(state.catalog.create("task", "a", Vec2::ZERO));
        let b = state
            .diagram
            .attach(state.catalog.create("task", "b", Vec2::new(300.0, 0.0)));
        state.diagram.add_link(a, b);

        controller
            .handle_intent(&mut state, EditorIntent::ClearSelectionRequested)
            .expect("Intent");
        assert_eq!(controller.wires.wires.len(), 1);
    }
}

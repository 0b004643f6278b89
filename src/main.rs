//! NodeFlow Editor.
//!
//! Interaktiver Knoten-Diagramm-Editor (Flussdiagramme, ETL-Strecken)
//! mit egui: Elemente platzieren, verschieben, gruppieren, verlinken
//! und als JSON speichern.

use eframe::egui;
use nodeflow_editor::app::{EditorController, EditorIntent, EditorState};
use nodeflow_editor::render::{LinkRenderer, NodeRenderer};
use nodeflow_editor::shared::EditorOptions;
use nodeflow_editor::ui;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("NodeFlow Editor v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("NodeFlow Editor"),
            renderer: eframe::Renderer::Glow,
            multisampling: 4,
            ..Default::default()
        };

        eframe::run_native(
            "NodeFlow Editor",
            options,
            Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct EditorApp {
    state: EditorState,
    controller: EditorController,
    renderer: LinkRenderer,
    nodes: NodeRenderer,
    input: ui::InputState,
}

impl EditorApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let editor_options = EditorOptions::load_from_file(&config_path);

        let state = EditorState::new(editor_options);
        let controller = EditorController::new(&state.options);

        Self {
            state,
            controller,
            renderer: LinkRenderer::default(),
            nodes: NodeRenderer::default(),
            input: ui::InputState::default(),
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.renderer.fps.tick(ctx.input(|i| i.stable_dt));
        self.renderer.animating = self.controller.interaction.linking.is_active();

        let events = self.collect_ui_events(ctx);

        let has_meaningful_events = events
            .iter()
            .any(|e| !matches!(e, EditorIntent::ViewportResized { .. }));

        self.process_events(events);

        self.maybe_request_repaint(ctx, has_meaningful_events);
    }
}

impl EditorApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<EditorIntent> {
        let mut events = Vec::new();

        let active = self.controller.interaction.active();

        ui::render_status_bar(ctx, &self.state, active, self.renderer.fps.value());
        events.extend(ui::render_menu(ctx, &self.state, active));
        events.extend(ui::render_toolbar(ctx, &self.state));
        events.extend(ui::handle_file_dialogs(&mut self.state));

        events.extend(ui::render_viewport(
            ctx,
            &self.state,
            &self.controller,
            &mut self.renderer,
            &self.nodes,
            &mut self.input,
        ));

        events
    }

    fn process_events(&mut self, events: Vec<EditorIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Intent-Verarbeitung fehlgeschlagen: {:#}", e);
                self.state.status_message = format!("Fehler: {:#}", e);
            }
        }
    }

    /// Repaint nur bei Bedarf: echte Events, Zeigerbewegung oder eine
    /// laufende Link-Geste (animierter Provisorium-Draht).
    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        if has_meaningful_events
            || ctx.input(|i| i.pointer.is_moving())
            || self.renderer.animating
        {
            ctx.request_repaint();
        }
    }
}

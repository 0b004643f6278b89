//! Integrationstests für die JSON-Persistenz über den Controller:
//! Speichern, Laden, Vorwärtsreferenzen und verlustbehaftete Links.

use glam::Vec2;
use nodeflow_editor::app::{EditorController, EditorIntent, EditorState};
use nodeflow_editor::{load_from_path, LinkPolicy};
use std::path::PathBuf;

fn editor() -> (EditorState, EditorController) {
    let state = EditorState::default();
    let controller = EditorController::new(&state.options);
    (state, controller)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("nodeflow_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_speichern_und_laden_ueber_den_controller() {
    let (mut state, mut controller) = editor();
    state.diagram.name = "Strecke".to_string();
    let a = state
        .diagram
        .attach(state.catalog.create("csv-importer", "Quelle", Vec2::new(20.0, 30.0)));
    let b = state
        .diagram
        .attach(state.catalog.create("mapper", "Mapping", Vec2::new(200.0, 30.0)));
    state.diagram.add_link(a, b);

    let path = temp_path("roundtrip");
    controller
        .handle_intent(
            &mut state,
            EditorIntent::SaveFilePathSelected { path: path.clone() },
        )
        .expect("Speichern");
    assert_eq!(state.current_file_path.as_deref(), Some(path.as_path()));

    // Szene verwerfen und wieder laden
    controller
        .handle_intent(&mut state, EditorIntent::NewDiagramRequested)
        .expect("Neue Szene");
    assert_eq!(state.diagram.element_count(), 0);

    controller
        .handle_intent(&mut state, EditorIntent::FileSelected { path: path.clone() })
        .expect("Laden");
    std::fs::remove_file(&path).ok();

    assert_eq!(state.diagram.name, "Strecke");
    assert_eq!(state.diagram.element_count(), 2);
    assert!(state.diagram.is_linked(a, b));
    // Katalog-Defaults greifen wieder: Mapper bleibt ellipsenförmig 80x80
    assert_eq!(
        state.diagram.node(b).map(|n| n.size),
        Some(Vec2::new(80.0, 80.0))
    );
    // Importer bleibt nicht verlinkbar
    assert_eq!(state.diagram.node(a).map(|n| n.linkable), Some(false));
}

#[test]
fn test_laden_mit_vorwaertsreferenz_und_totem_ziel() {
    let catalog = nodeflow_editor::ElementCatalog::standard();
    let path = temp_path("forward");
    let json = r#"{
        "uid": "f3a1",
        "name": "vorwärts",
        "elements": [
            {"type": "task", "id": 1, "name": "a", "x": 0, "y": 0,
             "sizable": true, "draggable": true, "linkable": true,
             "linkConstraints": "all", "deletable": true, "links": [3, 99]},
            {"type": "task", "id": 3, "name": "b", "x": 200, "y": 0,
             "sizable": true, "draggable": true, "linkable": true,
             "linkConstraints": "all", "deletable": true, "links": null}
        ]
    }"#;
    std::fs::write(&path, json).expect("Testdatei schreiben");

    let diagram = load_from_path(&path, &catalog).expect("Laden");
    std::fs::remove_file(&path).ok();

    // Die Vorwärtsreferenz 1→3 geht auf, das tote Ziel 99 fällt weg
    assert!(diagram.is_linked(1, 3));
    assert_eq!(diagram.link_count(), 1);
    assert_eq!(diagram.uid, "f3a1");
}

#[test]
fn test_laden_erhaelt_positivlisten_richtlinie() {
    let catalog = nodeflow_editor::ElementCatalog::standard();
    let path = temp_path("policy");
    let json = r#"{
        "uid": "p1",
        "elements": [
            {"type": "script", "id": 4, "name": "s", "x": 10, "y": 10,
             "linkConstraints": "filter,mapper", "links": null}
        ]
    }"#;
    std::fs::write(&path, json).expect("Testdatei schreiben");

    let diagram = load_from_path(&path, &catalog).expect("Laden");
    std::fs::remove_file(&path).ok();

    assert_eq!(
        diagram.node(4).map(|n| n.policy.clone()),
        Some(LinkPolicy::Tags(vec![
            "filter".to_string(),
            "mapper".to_string()
        ]))
    );
}

#[test]
fn test_fehlende_datei_liefert_fehler_mit_pfad() {
    let catalog = nodeflow_editor::ElementCatalog::standard();
    let path = PathBuf::from("/nonexistent/nodeflow/missing.json");
    let err = load_from_path(&path, &catalog).expect_err("Fehler erwartet");
    assert!(format!("{:#}", err).contains("missing.json"));
}

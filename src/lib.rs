//! NodeFlow Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod shared;
pub mod storage;
pub mod ui;

pub use app::{EditorController, EditorIntent, EditorState};
pub use core::{
    Diagram, DiagramEvent, DiagramObserver, ElementCatalog, EventKind, Link, LinkPolicy, Node,
    NodeShape, ROOT_ID,
};
pub use interaction::{ActiveGesture, InteractionManager, SelectionState};
pub use layout::LayoutManager;
pub use render::{layout_wires, Wire, WireLayout};
pub use shared::EditorOptions;
pub use storage::{load_from_path, save_to_path, DiagramDescriptor, ElementDescriptor};

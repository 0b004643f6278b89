//! Domänen-Kern: Geometrie, Elementmodell, Szenen-Container und Events.
//!
//! Dieses Modul ist UI-frei und vollständig headless testbar.

pub mod catalog;
pub mod diagram;
pub mod events;
pub mod geometry;
pub mod link;
pub mod node;

pub use catalog::{ElementCatalog, ElementSpec};
pub use diagram::{new_uid, Diagram, ROOT_ID};
pub use events::{DiagramEvent, DiagramObserver, EventKind};
pub use geometry::{Line, Rect, Triangle};
pub use link::Link;
pub use node::{LinkPolicy, Node, NodeShape};

//! Application-Layer: Zustand, Intents und Controller.

pub mod controller;
pub mod intent;
pub mod state;

pub use controller::EditorController;
pub use intent::EditorIntent;
pub use state::EditorState;

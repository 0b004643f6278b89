//! UI-Komponenten: Menü, Palette, Viewport, Status-Bar und Dialoge.

pub mod dialogs;
pub mod input;
pub mod menu;
pub mod status;
pub mod toolbar;
pub mod viewport;

pub use dialogs::handle_file_dialogs;
pub use input::InputState;
pub use menu::render_menu;
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
pub use viewport::render_viewport;

//! Zeichnen der Szene über den egui-Painter.
//!
//! [`wire`] berechnet die Leitungsgeometrie rein (testbar ohne UI),
//! [`LinkRenderer`] und [`NodeRenderer`] malen Raster, Leitungen und
//! Elemente in den Viewport.

pub mod link_renderer;
pub mod node_renderer;
pub mod wire;

pub use link_renderer::{FpsCounter, LinkRenderer};
pub use node_renderer::NodeRenderer;
pub use wire::{layout_wires, Wire, WireLayout, WirePath};

use glam::Vec2;

/// Szene-Koordinate in Bildschirm-Koordinate umrechnen.
pub(crate) fn to_screen(origin: egui::Pos2, p: Vec2) -> egui::Pos2 {
    egui::pos2(origin.x + p.x, origin.y + p.y)
}

/// Farbwert aus den Options-Arrays.
pub(crate) fn color32(c: [f32; 4]) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (c[0] * 255.0) as u8,
        (c[1] * 255.0) as u8,
        (c[2] * 255.0) as u8,
        (c[3] * 255.0) as u8,
    )
}

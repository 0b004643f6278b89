//! Leitungs- und Hintergrund-Rendering: Rasterpunkte, Drähte,
//! Pfeilspitzen, Marquee und die FPS-Anzeige.

use glam::Vec2;

use crate::core::geometry::Rect;
use crate::shared::EditorOptions;

use super::wire::{WireLayout, WirePath};
use super::{color32, to_screen};

/// Geglättete Bildrate aus `stable_dt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    value: f32,
}

impl FpsCounter {
    pub fn tick(&mut self, stable_dt: f32) {
        if stable_dt <= 0.0 {
            return;
        }
        let current = 1.0 / stable_dt;
        if self.value == 0.0 {
            self.value = current;
        } else {
            self.value = self.value * 0.9 + current * 0.1;
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Gecachte Rasterpunkte; werden nur bei geänderter Gesamtgröße oder
/// Rasterweite neu aufgebaut.
#[derive(Debug, Clone, Default)]
struct GridCache {
    bounds: Vec2,
    grid: Vec2,
    dots: Vec<Vec2>,
}

impl GridCache {
    fn refresh(&mut self, bounds: Vec2, grid: Vec2) {
        if self.bounds == bounds && self.grid == grid {
            return;
        }
        self.bounds = bounds;
        self.grid = grid;
        self.dots.clear();
        if grid.x <= 0.0 || grid.y <= 0.0 {
            return;
        }
        let mut y = grid.y;
        while y < bounds.y {
            let mut x = grid.x;
            while x < bounds.x {
                self.dots.push(Vec2::new(x, y));
                x += grid.x;
            }
            y += grid.y;
        }
    }
}

/// Malt Raster und Leitungen; hält den Animations-Zustand für die
/// Repaint-Steuerung während einer Link-Geste.
#[derive(Debug, Clone, Default)]
pub struct LinkRenderer {
    grid: GridCache,
    pub fps: FpsCounter,
    /// Während einer Link-Geste aktiv; der App-Loop fordert dann
    /// laufend Repaints an.
    pub animating: bool,
}

impl LinkRenderer {
    /// Rasterpunkte über den gesamten Szeneninhalt.
    pub fn paint_grid(
        &mut self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        bounds: Vec2,
        options: &EditorOptions,
    ) {
        self.grid.refresh(bounds, Vec2::from(options.grid_size));
        let color = color32(options.grid_dot_color);
        let shapes: Vec<egui::Shape> = self
            .grid
            .dots
            .iter()
            .map(|&dot| egui::Shape::circle_filled(to_screen(origin, dot), 1.0, color))
            .collect();
        painter.extend(shapes);
    }

    /// Drähte, Pfeilspitzen und Link-Löschknöpfe.
    pub fn paint_wires(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        wires: &WireLayout,
        options: &EditorOptions,
    ) {
        let color = color32(options.wire_color);
        let stroke = egui::Stroke::new(1.5, color);

        for wire in &wires.wires {
            match wire.path {
                WirePath::Straight { start, end } => {
                    painter.line_segment([to_screen(origin, start), to_screen(origin, end)], stroke);
                }
                WirePath::Loop { center, radius } => {
                    painter.add(egui::Shape::line(loop_arc(origin, center, radius), stroke));
                }
            }

            let arrow = [wire.arrow.a, wire.arrow.b, wire.arrow.c]
                .into_iter()
                .map(|p| to_screen(origin, p))
                .collect();
            painter.add(egui::Shape::convex_polygon(
                arrow,
                color,
                egui::Stroke::NONE,
            ));

            if let Some(button) = wire.button {
                paint_wire_button(painter, to_screen(origin, button), color);
            }
        }
    }

    /// Marquee-Rahmen, falls die Geste läuft.
    pub fn paint_marquee(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        rect: Option<Rect>,
        options: &EditorOptions,
    ) {
        let Some(rect) = rect else {
            return;
        };
        let screen =
            egui::Rect::from_min_max(to_screen(origin, rect.min), to_screen(origin, rect.max()));
        painter.rect_stroke(
            screen,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, color32(options.marquee_color)),
            egui::StrokeKind::Inside,
        );
    }
}

/// Kreisbogen der Selbstschleife, entgegen dem Uhrzeigersinn von der
/// Pfeilspitze weg aufgespannt.
fn loop_arc(origin: egui::Pos2, center: Vec2, radius: f32) -> Vec<egui::Pos2> {
    const SEGMENTS: usize = 32;
    let start = 60.0_f32.to_radians();
    let end = 215.0_f32.to_radians();
    (0..=SEGMENTS)
        .map(|i| {
            let t = start + (end - start) * i as f32 / SEGMENTS as f32;
            to_screen(origin, center + Vec2::new(t.cos(), t.sin()) * radius)
        })
        .collect()
}

/// Kleiner Löschknopf auf dem Draht: gefüllter Kreis mit Kreuz.
fn paint_wire_button(painter: &egui::Painter, center: egui::Pos2, color: egui::Color32) {
    use crate::shared::options::LINK_BUTTON_RADIUS;

    painter.circle_filled(center, LINK_BUTTON_RADIUS, egui::Color32::WHITE);
    painter.circle_stroke(center, LINK_BUTTON_RADIUS, egui::Stroke::new(1.0, color));
    let d = LINK_BUTTON_RADIUS * 0.45;
    let cross = egui::Stroke::new(1.2, color);
    painter.line_segment(
        [
            egui::pos2(center.x - d, center.y - d),
            egui::pos2(center.x + d, center.y + d),
        ],
        cross,
    );
    painter.line_segment(
        [
            egui::pos2(center.x - d, center.y + d),
            egui::pos2(center.x + d, center.y - d),
        ],
        cross,
    );
}

//! Reine Verbindungslinien-Geometrie, UI-frei.
//!
//! Berechnet pro Link die Linie zwischen den Element-Rändern
//! (Mittelpunkt-zu-Mittelpunkt, dann Rand-Schnittpunkt je Form), die
//! Pfeilspitze am Ziel, die Schleife für Selbst-Links und die Position
//! des Link-Löschknopfs.

use glam::Vec2;

use crate::core::geometry::{
    self, intersect_line_circle, intersect_line_polygon, Line, Rect, Triangle,
};
use crate::core::{Diagram, NodeShape};
use crate::shared::options::WIRE_BUTTON_DISTANCE_MAX;

/// Verlauf einer Verbindungslinie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WirePath {
    Straight { start: Vec2, end: Vec2 },
    /// Selbst-Link: Kreisbogen von 60° bis 215° um `center`.
    Loop { center: Vec2, radius: f32 },
}

/// Fertig berechnete Linie eines Links.
#[derive(Debug, Clone)]
pub struct Wire {
    pub from: u64,
    pub to: u64,
    pub path: WirePath,
    pub arrow: Triangle,
    /// Mittelpunkt des Link-Löschknopfs; `None` für provisorische Linien
    /// auf den Gesten-Pseudoknoten.
    pub button: Option<Vec2>,
}

/// Linien-Layout eines Frames; dient auch dem Hit-Test der Löschknöpfe.
#[derive(Debug, Clone, Default)]
pub struct WireLayout {
    pub wires: Vec<Wire>,
}

/// Erster Schnittpunkt der Mittellinie mit dem Rand eines Elements.
///
/// Ellipsen schneiden gegen den Kreis mit Radius `breite/2 + margin`,
/// Rechtecke gegen das um `margin` aufgeblasene Polygon.
pub fn boundary_point(rect: Rect, shape: NodeShape, margin: f32, line: &Line) -> Option<Vec2> {
    match shape {
        NodeShape::Ellipse => {
            intersect_line_circle(line, rect.center(), rect.size.x / 2.0 + margin)
                .into_iter()
                .next()
        }
        NodeShape::Rectangle => {
            intersect_line_polygon(*line, rect.inflate(margin, margin).edges()).next()
        }
    }
}

/// Pfeilspitze: Dreieck (0,0)/(0,5.5)/(3,3), Spitze in den Ursprung
/// verschoben, auf den Linienwinkel rotiert und an den Zielpunkt gesetzt.
pub fn arrow_head(tip: Vec2, angle_deg: f32) -> Triangle {
    Triangle::new(Vec2::ZERO, Vec2::new(0.0, 5.5), Vec2::new(3.0, 3.0))
        .translate(Vec2::new(-3.0, -3.0))
        .rotate_around(Vec2::ZERO, angle_deg)
        .translate(tip)
}

/// Linie zwischen zwei Element-Rändern; `None`, wenn einer der beiden
/// Rand-Schnittpunkte fehlt (z.B. überlappende Elemente).
pub fn wire_between(
    a_rect: Rect,
    a_shape: NodeShape,
    b_rect: Rect,
    b_shape: NodeShape,
    margin: f32,
) -> Option<(Vec2, Vec2)> {
    let center_line = Line::new(a_rect.center(), b_rect.center());
    let start = boundary_point(a_rect, a_shape, margin, &center_line)?;
    let end = boundary_point(b_rect, b_shape, margin, &center_line)?;
    Some((geometry::round_point(start), geometry::round_point(end)))
}

/// Schleifen-Geometrie eines Selbst-Links.
fn self_loop(rect: Rect) -> (Vec2, f32, Triangle) {
    let radius = rect.size.x / 3.0;
    let center = rect.center() + Vec2::new(radius, -radius);
    let arrow = arrow_head(Vec2::new(rect.center().x, rect.min.y), 130.0);
    (center, radius, arrow)
}

/// Berechnet das Linien-Layout für alle Links der Szene.
pub fn layout_wires(diagram: &Diagram, margin: f32) -> WireLayout {
    let mut wires = Vec::new();

    for node in diagram.elements() {
        let Some(from_rect) = diagram.absolute_rect(node.id) else {
            continue;
        };

        for link in node.links() {
            let Some(target) = diagram.node(link.to) else {
                continue;
            };

            if link.to == node.id {
                let (center, radius, arrow) = self_loop(from_rect);
                wires.push(Wire {
                    from: node.id,
                    to: link.to,
                    path: WirePath::Loop { center, radius },
                    arrow,
                    button: Some(center + Vec2::new(0.0, -radius)),
                });
                continue;
            }

            let Some(to_rect) = diagram.absolute_rect(link.to) else {
                continue;
            };
            let Some((start, end)) =
                wire_between(from_rect, node.shape, to_rect, target.shape, margin)
            else {
                continue;
            };

            let line = Line::new(start, end);
            let angle = line.angle_deg();
            let button = if target.transient {
                None
            } else {
                Some(geometry::point_at_distance(
                    start,
                    (line.length() / 2.0).min(WIRE_BUTTON_DISTANCE_MAX),
                    angle,
                ))
            };

            wires.push(Wire {
                from: node.id,
                to: link.to,
                path: WirePath::Straight { start, end },
                arrow: arrow_head(end, angle),
                button,
            });
        }
    }

    WireLayout { wires }
}

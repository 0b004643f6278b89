//! Element-Rendering: Gruppen, Knoten, Namen, Selektions-Affordanzen
//! und die Markierungen während Link- und Drag-Gesten.

use crate::core::{Diagram, NodeShape};
use crate::interaction::hit_test::{delete_button_center, handle_rect, link_handle_center};
use crate::interaction::resize::SizeHandle;
use crate::interaction::{InteractionManager, Marking, SelectionState};
use crate::shared::options::{DELETE_BUTTON_RADIUS, LINK_HANDLE_RADIUS};
use crate::shared::EditorOptions;

use super::{color32, to_screen};

#[derive(Debug, Clone, Copy, Default)]
pub struct NodeRenderer;

impl NodeRenderer {
    pub fn paint(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        diagram: &Diagram,
        selection: &SelectionState,
        interaction: &InteractionManager,
        options: &EditorOptions,
    ) {
        // Einfügereihenfolge: Gruppen liegen vor ihren Kindern, damit
        // Kinder über der Gruppenfläche gezeichnet werden.
        for node in diagram.elements() {
            if node.transient {
                continue;
            }
            let Some(rect) = diagram.absolute_rect(node.id) else {
                continue;
            };
            let screen = egui::Rect::from_min_max(
                to_screen(origin, rect.min),
                to_screen(origin, rect.max()),
            );

            let (fill, outline) = if node.is_group {
                (color32(options.group_fill), color32(options.group_outline))
            } else {
                (color32(options.node_fill), color32(options.node_outline))
            };
            let outline = self
                .outline_override(interaction, node.id, options)
                .unwrap_or(outline);
            let stroke = egui::Stroke::new(1.5, outline);

            match node.shape {
                NodeShape::Rectangle => {
                    painter.rect_filled(screen, egui::CornerRadius::same(2), fill);
                    painter.rect_stroke(
                        screen,
                        egui::CornerRadius::same(2),
                        stroke,
                        egui::StrokeKind::Inside,
                    );
                }
                NodeShape::Ellipse => {
                    let radius = rect.size.x / 2.0;
                    painter.circle_filled(screen.center(), radius, fill);
                    painter.circle_stroke(screen.center(), radius, stroke);
                }
            }

            if !node.name.is_empty() {
                painter.text(
                    screen.center(),
                    egui::Align2::CENTER_CENTER,
                    &node.name,
                    egui::FontId::proportional(13.0),
                    egui::Color32::from_gray(230),
                );
            }

            if selection.contains(node.id) {
                self.paint_affordances(painter, origin, diagram, node.id, options);
            }
        }
    }

    /// Umrissfarbe für Gesten-Markierungen: Link-Markierungen und das
    /// getroffene Drop-Ziel während eines Drags.
    fn outline_override(
        &self,
        interaction: &InteractionManager,
        id: u64,
        options: &EditorOptions,
    ) -> Option<egui::Color32> {
        if let Some(marking) = interaction.linking.marking(id) {
            return Some(match marking {
                Marking::NotAllowed => color32(options.mark_not_allowed),
                Marking::AlreadyLinked => color32(options.mark_already_linked),
            });
        }
        if interaction.drag.hit_target() == Some(id) {
            return Some(color32(options.mark_drop_hit));
        }
        None
    }

    /// Selektionsrahmen plus Griffe und Knöpfe; die Geometrie liefert
    /// der Hit-Test, damit Darstellung und Treffer übereinstimmen.
    fn paint_affordances(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        diagram: &Diagram,
        id: u64,
        options: &EditorOptions,
    ) {
        let Some(node) = diagram.node(id) else {
            return;
        };
        let Some(rect) = diagram.absolute_rect(id) else {
            return;
        };
        let screen =
            egui::Rect::from_min_max(to_screen(origin, rect.min), to_screen(origin, rect.max()));
        let accent = color32(options.selection_outline);

        painter.rect_stroke(
            screen,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, accent),
            egui::StrokeKind::Outside,
        );

        if node.sizable {
            for handle in SizeHandle::ALL {
                let hr = handle_rect(rect, handle);
                let hr =
                    egui::Rect::from_min_max(to_screen(origin, hr.min), to_screen(origin, hr.max()));
                painter.rect_filled(hr, egui::CornerRadius::ZERO, egui::Color32::WHITE);
                painter.rect_stroke(
                    hr,
                    egui::CornerRadius::ZERO,
                    egui::Stroke::new(1.0, accent),
                    egui::StrokeKind::Inside,
                );
            }
        }

        if node.linkable {
            let center = to_screen(origin, link_handle_center(rect));
            painter.circle_filled(center, LINK_HANDLE_RADIUS, accent);
            painter.circle_stroke(
                center,
                LINK_HANDLE_RADIUS,
                egui::Stroke::new(1.0, egui::Color32::WHITE),
            );
        }

        if node.deletable {
            let center = to_screen(origin, delete_button_center(rect));
            painter.circle_filled(center, DELETE_BUTTON_RADIUS, color32(options.mark_not_allowed));
            let d = DELETE_BUTTON_RADIUS * 0.45;
            let cross = egui::Stroke::new(1.4, egui::Color32::WHITE);
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
    }
}

//! Resize-Geste: acht Griffe, Min/Max-Grenzen und Raster-Rundung.
//!
//! Griffe mit `n`/`w`-Anteil ziehen die gegenüberliegende Kante fest und
//! ändern Position und Größe zugleich; verletzt das Ergebnis die
//! Grenzen, springt das Element auf Minimalgröße und Ankerposition
//! (bewusst nicht auf den nächstliegenden legalen Wert geklemmt).
//! Griffe mit `e`/`s`-Anteil sind eine reine Größenänderung mit
//! Raster-Rundung vor dem Commit.

use glam::Vec2;

use crate::core::Diagram;
use crate::shared::EditorOptions;

/// Die acht Griffe, benannt nach Himmelsrichtungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl SizeHandle {
    pub const ALL: [SizeHandle; 8] = [
        SizeHandle::N,
        SizeHandle::S,
        SizeHandle::E,
        SizeHandle::W,
        SizeHandle::Ne,
        SizeHandle::Nw,
        SizeHandle::Se,
        SizeHandle::Sw,
    ];

    fn has_n(self) -> bool {
        matches!(self, SizeHandle::N | SizeHandle::Ne | SizeHandle::Nw)
    }

    fn has_s(self) -> bool {
        matches!(self, SizeHandle::S | SizeHandle::Se | SizeHandle::Sw)
    }

    fn has_e(self) -> bool {
        matches!(self, SizeHandle::E | SizeHandle::Ne | SizeHandle::Se)
    }

    fn has_w(self) -> bool {
        matches!(self, SizeHandle::W | SizeHandle::Nw | SizeHandle::Sw)
    }
}

/// Beim Armen eingefrorene Grenzen und Ankerposition.
#[derive(Debug, Clone, Copy)]
struct SizeInfo {
    min: Vec2,
    max: Vec2,
    /// Position, auf die bei Grenzverletzung gesprungen wird:
    /// `position + (size - min)` pro Achse.
    anchor: Vec2,
}

/// Größenänderungs-Geste.
#[derive(Debug, Clone, Default)]
pub struct ResizeManager {
    active: Option<(u64, SizeHandle, SizeInfo)>,
}

impl ResizeManager {
    pub fn start(&mut self, diagram: &Diagram, id: u64, handle: SizeHandle) -> bool {
        let Some(node) = diagram.node(id) else {
            return false;
        };
        if !node.sizable {
            return false;
        }

        self.active = Some((
            id,
            handle,
            SizeInfo {
                min: node.min_size,
                max: node.max_size,
                anchor: node.position + (node.size - node.min_size),
            },
        ));
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Element, das gerade in Größenänderung ist (für die Darstellung).
    pub fn sizing_node(&self) -> Option<u64> {
        self.active.map(|(id, _, _)| id)
    }

    pub fn update(&mut self, diagram: &mut Diagram, pointer: Vec2, options: &EditorOptions) {
        let Some((id, handle, info)) = self.active else {
            return;
        };
        let Some(node) = diagram.node(id) else {
            return;
        };

        // Zeiger in Eltern-Koordinaten
        let parent_abs = node
            .parent
            .map(|p| diagram.absolute_position(p))
            .unwrap_or(Vec2::ZERO);
        let p = pointer - parent_abs;

        let grid = Vec2::from(options.grid_size);
        let snap = |v: f32, g: f32| {
            if options.snap_to_grid && g > 0.0 {
                (v / g).round() * g
            } else {
                v
            }
        };

        let mut position = node.position;
        let mut size = node.size;

        if handle.has_w() {
            let right = position.x + size.x;
            let new_x = snap(p.x, grid.x);
            let new_w = right - new_x;
            if new_w < info.min.x || new_w > info.max.x {
                position.x = info.anchor.x;
                size.x = info.min.x;
            } else {
                position.x = new_x;
                size.x = new_w;
            }
        } else if handle.has_e() {
            size.x = snap(p.x, grid.x) - position.x;
        }

        if handle.has_n() {
            let bottom = position.y + size.y;
            let new_y = snap(p.y, grid.y);
            let new_h = bottom - new_y;
            if new_h < info.min.y || new_h > info.max.y {
                position.y = info.anchor.y;
                size.y = info.min.y;
            } else {
                position.y = new_y;
                size.y = new_h;
            }
        } else if handle.has_s() {
            size.y = snap(p.y, grid.y) - position.y;
        }

        diagram.set_position(id, position);
        diagram.set_size(id, size);
    }

    pub fn finish(&mut self) {
        self.active = None;
    }
}

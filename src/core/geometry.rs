//! Geometrie-Kernel: Linien, Dreiecke, Rechtecke und Schnittpunkt-Berechnungen.
//!
//! Alle Winkel an der API-Grenze sind in Grad; intern wird in Radiant
//! gerechnet. Punkte und Vektoren sind `glam::Vec2`.

use glam::Vec2;

/// Rundet beide Komponenten auf ganze Zahlen.
pub fn round_point(p: Vec2) -> Vec2 {
    Vec2::new(p.x.round(), p.y.round())
}

/// Rotiert `p` um `origin` um den angegebenen Winkel (Grad, gegen den Uhrzeigersinn).
pub fn rotate_around(p: Vec2, origin: Vec2, angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    let d = p - origin;
    origin + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Punkt im Abstand `distance` von `p` in Richtung `angle_deg`.
pub fn point_at_distance(p: Vec2, distance: f32, angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    p + Vec2::new(rad.cos() * distance, rad.sin() * distance)
}

/// Winkel eines Vektors in Grad (`atan2`-Konvention, -180..180).
pub fn angle_deg(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

// ── Linie ───────────────────────────────────────────────────────────

/// Strecke zwischen zwei Punkten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
}

impl Line {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Mittelpunkt der Strecke.
    pub fn center(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Richtungsvektor (Ende minus Anfang).
    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }

    /// Winkel der Strecke in Grad.
    pub fn angle_deg(&self) -> f32 {
        angle_deg(self.vector())
    }
}

// ── Dreieck ─────────────────────────────────────────────────────────

/// Dreieck aus drei Eckpunkten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Schwerpunkt (Schnittpunkt der Seitenhalbierenden).
    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Kanten in der Reihenfolge a→b, b→c, c→a.
    pub fn edges(&self) -> [Line; 3] {
        [
            Line::new(self.a, self.b),
            Line::new(self.b, self.c),
            Line::new(self.c, self.a),
        ]
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            a: self.a + offset,
            b: self.b + offset,
            c: self.c + offset,
        }
    }

    pub fn rotate_around(&self, origin: Vec2, angle_deg: f32) -> Self {
        Self {
            a: rotate_around(self.a, origin, angle_deg),
            b: rotate_around(self.b, origin, angle_deg),
            c: rotate_around(self.c, origin, angle_deg),
        }
    }
}

// ── Rechteck ────────────────────────────────────────────────────────

/// Achsenparalleles Rechteck aus Ursprung (oben links) und Größe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rechteck aus zwei beliebigen Eckpunkten (normalisiert, erlaubt
    /// negatives Aufziehen).
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        Self {
            min,
            size: a.max(b) - min,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Punkt-im-Rechteck-Test mit strikten Ungleichungen: Punkte auf dem
    /// Rand zählen als außerhalb.
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        self.min.x < p.x && p.x < max.x && self.min.y < p.y && p.y < max.y
    }

    /// Kleinstes Rechteck, das beide umschließt.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_corners(self.min.min(other.min), self.max().max(other.max()))
    }

    /// Vergrößert das Rechteck in alle Richtungen um `dx`/`dy`.
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Self {
            min: self.min - Vec2::new(dx, dy),
            size: self.size + Vec2::new(dx * 2.0, dy * 2.0),
        }
    }

    /// Kanten in der Reihenfolge oben, rechts, unten, links.
    pub fn edges(&self) -> [Line; 4] {
        let max = self.max();
        let tr = Vec2::new(max.x, self.min.y);
        let bl = Vec2::new(self.min.x, max.y);
        [
            Line::new(self.min, tr),
            Line::new(tr, max),
            Line::new(max, bl),
            Line::new(bl, self.min),
        ]
    }
}

// ── Schnittpunkte ───────────────────────────────────────────────────

/// Schnittpunkt zweier Strecken (parametrische Form).
///
/// Beide Parameter müssen in `[0,1]` liegen; parallele Strecken liefern
/// `None`.
pub fn intersect_lines(a: &Line, b: &Line) -> Option<Vec2> {
    let va = a.vector();
    let vb = b.vector();

    let denom = vb.y * va.x - vb.x * va.y;
    if denom == 0.0 {
        return None;
    }

    let d = a.start - b.start;
    let ua = (vb.x * d.y - vb.y * d.x) / denom;
    let ub = (va.x * d.y - va.y * d.x) / denom;

    if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
        return None;
    }

    Some(a.start + va * ua)
}

/// Schnittpunkte einer Strecke mit einem Polygonzug, lazy pro Kante.
pub fn intersect_line_polygon(
    line: Line,
    edges: impl IntoIterator<Item = Line>,
) -> impl Iterator<Item = Vec2> {
    edges
        .into_iter()
        .filter_map(move |edge| intersect_lines(&line, &edge))
}

/// Schnittpunkte einer Strecke mit einem Kreis (maximal zwei).
///
/// Tangenten (Diskriminante null) liefern keinen Schnittpunkt; nur
/// Parameter in `[0,1]` zählen.
pub fn intersect_line_circle(line: &Line, center: Vec2, radius: f32) -> Vec<Vec2> {
    let v = line.vector();
    let a = v.length_squared();
    if a == 0.0 {
        return Vec::new();
    }

    let f = line.start - center;
    let b = 2.0 * v.dot(f);
    let c = f.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 {
        return Vec::new();
    }

    let e = discriminant.sqrt();
    [(-b + e) / (2.0 * a), (-b - e) / (2.0 * a)]
        .into_iter()
        .filter(|u| (0.0..=1.0).contains(u))
        .map(|u| line.start + v * u)
        .collect()
}

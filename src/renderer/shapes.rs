//! Draw-list primitives and polygon generation

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use crate::from_angle;
use crate::palette::{Rgb, Rgba};

/// A single paint command
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled disk
    Circle { center: Vec2, radius: f32, fill: Rgba },
    /// Radial gradient from `color` at the center to transparent at `radius`
    Glow { center: Vec2, radius: f32, color: Rgba },
    /// Stroked circle
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    /// Filled closed polygon (stars, crystals, asteroids)
    Polygon { points: Vec<Vec2>, fill: Rgba },
    /// Axis-aligned rectangle from `min` with optional fill and outline
    Rect {
        min: Vec2,
        size: Vec2,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
    },
}

/// Ordered paint commands for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    /// Background fill
    pub clear: Rgb,
    /// Whole-frame translation (screen shake)
    pub offset: Vec2,
    pub shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new(clear: Rgb) -> Self {
        Self {
            clear,
            offset: Vec2::ZERO,
            shapes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        if radius > 0.0 && fill.a > 0.0 {
            self.shapes.push(Shape::Circle {
                center,
                radius,
                fill,
            });
        }
    }

    pub fn glow(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius > 0.0 && color.a > 0.0 {
            self.shapes.push(Shape::Glow {
                center,
                radius,
                color,
            });
        }
    }

    pub fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        if radius > 0.0 && color.a > 0.0 {
            self.shapes.push(Shape::Ring {
                center,
                radius,
                width,
                color,
            });
        }
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        if color.a > 0.0 {
            self.shapes.push(Shape::Line {
                from,
                to,
                width,
                color,
            });
        }
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, fill: Rgba) {
        if points.len() >= 3 {
            self.shapes.push(Shape::Polygon { points, fill });
        }
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, fill: Option<Rgba>, stroke: Option<Rgba>) {
        self.shapes.push(Shape::Rect {
            min,
            size,
            fill,
            stroke,
        });
    }
}

/// Outline of a star with `points` spikes, first spike pointing up
pub fn star_points(center: Vec2, outer: f32, inner: f32, points: u32, rotation: f32) -> Vec<Vec2> {
    let n = points.max(2) * 2;
    (0..n)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let theta = rotation - PI / 2.0 + i as f32 * PI / points.max(2) as f32;
            center + from_angle(theta) * r
        })
        .collect()
}

/// Diamond (rhombus) with half-width `size * 0.7` and half-height `size`
pub fn diamond_points(center: Vec2, size: f32) -> Vec<Vec2> {
    vec![
        center + Vec2::new(0.0, -size),
        center + Vec2::new(size * 0.7, 0.0),
        center + Vec2::new(0.0, size),
        center + Vec2::new(-size * 0.7, 0.0),
    ]
}

/// Lumpy rock outline. The lumps are a fixed function of the vertex index so
/// a rock keeps its silhouette as it spins.
pub fn rock_points(center: Vec2, radius: f32, rotation: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let lump = 0.85 + 0.15 * ((i * 7 % 5) as f32 / 4.0);
            center + from_angle(rotation + t * TAU) * radius * lump
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::WHITE;

    #[test]
    fn test_star_points_alternate() {
        let pts = star_points(Vec2::ZERO, 10.0, 4.0, 5, 0.0);
        assert_eq!(pts.len(), 10);
        assert!((pts[0] - Vec2::new(0.0, -10.0)).length() < 1e-4);
        assert!((pts[1].length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_rock_stays_within_radius() {
        let pts = rock_points(Vec2::new(5.0, 5.0), 20.0, 1.3, 10);
        assert_eq!(pts.len(), 10);
        for p in pts {
            let d = p.distance(Vec2::new(5.0, 5.0));
            assert!((17.0 - 1e-3..=20.0 + 1e-3).contains(&d));
        }
    }

    #[test]
    fn test_invisible_shapes_skipped() {
        let mut list = DrawList::new(WHITE);
        list.circle(Vec2::ZERO, 0.0, WHITE.with_alpha(1.0));
        list.circle(Vec2::ZERO, 5.0, WHITE.with_alpha(0.0));
        list.polygon(vec![Vec2::ZERO, Vec2::X], WHITE.with_alpha(1.0));
        assert!(list.is_empty());
        list.ring(Vec2::ZERO, 5.0, 1.0, WHITE.with_alpha(0.5));
        assert_eq!(list.len(), 1);
    }
}

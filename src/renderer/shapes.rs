//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in logical screen coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Seven-segment masks for 0-9 (bit 0 = top, then clockwise, bit 6 = middle)
const DIGIT_SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Digit width as a fraction of its height
const DIGIT_ASPECT: f32 = 0.5;
/// Stroke thickness as a fraction of digit height
const DIGIT_STROKE: f32 = 0.12;
/// Gap between digits as a fraction of digit width
const DIGIT_GAP: f32 = 0.35;

/// Generate vertices for a filled rectangle
pub fn quad(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let min = rect.min;
    let max = rect.max();
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Segment rectangles of a seven-segment glyph with top-left `origin`
fn segment_rects(origin: Vec2, height: f32) -> [Rect; 7] {
    let w = height * DIGIT_ASPECT;
    let t = height * DIGIT_STROKE;
    let half = height / 2.0;
    let at = |x: f32, y: f32, sw: f32, sh: f32| {
        Rect::new(origin + Vec2::new(x, y), Vec2::new(sw, sh))
    };
    [
        at(0.0, 0.0, w, t),               // top
        at(w - t, 0.0, t, half),          // upper right
        at(w - t, half, t, half),         // lower right
        at(0.0, height - t, w, t),        // bottom
        at(0.0, half, t, half),           // lower left
        at(0.0, 0.0, t, half),            // upper left
        at(0.0, half - t / 2.0, w, t),    // middle
    ]
}

/// Generate vertices for one decimal digit
pub fn digit(value: u8, origin: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mask = DIGIT_SEGMENTS[(value % 10) as usize];
    segment_rects(origin, height)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| mask & (1u8 << *i) != 0)
        .flat_map(|(_, rect)| quad(&rect, color))
        .collect()
}

/// Width of a rendered number
pub fn number_width(value: u64, height: f32) -> f32 {
    let count = value.to_string().len() as f32;
    let w = height * DIGIT_ASPECT;
    count * w + (count - 1.0) * w * DIGIT_GAP
}

/// Generate vertices for a number centered on `center`
pub fn number(value: u64, center: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = height * DIGIT_ASPECT;
    let step = w * (1.0 + DIGIT_GAP);
    let start = center - Vec2::new(number_width(value, height) / 2.0, height / 2.0);

    value
        .to_string()
        .bytes()
        .enumerate()
        .flat_map(|(i, b)| digit(b - b'0', start + Vec2::new(i as f32 * step, 0.0), height, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_quad_is_two_triangles() {
        let v = quad(&Rect::new(Vec2::ZERO, Vec2::new(2.0, 3.0)), WHITE);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| v.position[0] <= 2.0 && v.position[1] <= 3.0));
    }

    #[test]
    fn test_digit_segment_counts() {
        // Triangles per digit = 2 * lit segments
        let lit = [6, 2, 5, 5, 4, 5, 6, 3, 7, 6];
        for (d, &segments) in lit.iter().enumerate() {
            assert_eq!(digit(d as u8, Vec2::ZERO, 10.0, WHITE).len(), segments * 6);
        }
    }

    #[test]
    fn test_number_centered() {
        let center = Vec2::new(100.0, 50.0);
        let v = number(20, center, 40.0, WHITE);
        let min_x = v.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!(((min_x + max_x) / 2.0 - center.x).abs() < 1e-3);
        assert!((max_x - min_x - number_width(20, 40.0)).abs() < 1e-3);
    }

    #[test]
    fn test_ring_vertex_count() {
        assert_eq!(ring(Vec2::ZERO, 55.0, 60.0, WHITE, 48).len(), 48 * 6);
    }
}

//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in logical pixel coordinates
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering a quad given in clockwise corner order
fn quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    let [a, b, c, d] = corners;
    vertices.push(Vertex::new(a.x, a.y, colors[0]));
    vertices.push(Vertex::new(b.x, b.y, colors[1]));
    vertices.push(Vertex::new(c.x, c.y, colors[2]));

    vertices.push(Vertex::new(a.x, a.y, colors[0]));
    vertices.push(Vertex::new(c.x, c.y, colors[2]));
    vertices.push(Vertex::new(d.x, d.y, colors[3]));
}

/// Generate vertices for a filled rectangle
pub fn rect(r: Rect, color: [f32; 4]) -> Vec<Vertex> {
    vertical_gradient(r, color, color)
}

/// Filled rectangle blending from `top` to `bottom`
pub fn vertical_gradient(r: Rect, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    if r.w <= 0.0 || r.h <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [
            Vec2::new(r.x, r.y),
            Vec2::new(r.right(), r.y),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.x, r.bottom()),
        ],
        [top, top, bottom, bottom],
    );
    vertices
}

/// Border of a rectangle, drawn inside its edges
pub fn rect_outline(r: Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.w / 2.0).min(r.h / 2.0);
    if t <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(Rect::new(r.x, r.y, r.w, t), color));
    vertices.extend(rect(Rect::new(r.x, r.bottom() - t, r.w, t), color));
    vertices.extend(rect(Rect::new(r.x, r.y + t, t, r.h - 2.0 * t), color));
    vertices.extend(rect(
        Rect::new(r.right() - t, r.y + t, t, r.h - 2.0 * t),
        color,
    ));
    vertices
}

/// Pie slice from `start` to `end` radians (y down, so positive angles turn clockwise)
pub fn fan(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    fan(center, radius, 0.0, TAU, color, segments)
}

/// Rectangle with rounded corners (radius clamped to half the shorter side)
pub fn rounded_rect(r: Rect, radius: f32, color: [f32; 4], corner_segments: u32) -> Vec<Vertex> {
    let rr = radius.min(r.w / 2.0).min(r.h / 2.0).max(0.0);
    if rr == 0.0 {
        return rect(r, color);
    }

    let mut vertices = Vec::new();
    // Center column plus the two side strips between the corners
    vertices.extend(rect(Rect::new(r.x + rr, r.y, r.w - 2.0 * rr, r.h), color));
    vertices.extend(rect(Rect::new(r.x, r.y + rr, rr, r.h - 2.0 * rr), color));
    vertices.extend(rect(
        Rect::new(r.right() - rr, r.y + rr, rr, r.h - 2.0 * rr),
        color,
    ));

    let corners = [
        (Vec2::new(r.x + rr, r.y + rr), PI),
        (Vec2::new(r.right() - rr, r.y + rr), PI + FRAC_PI_2),
        (Vec2::new(r.right() - rr, r.bottom() - rr), 0.0),
        (Vec2::new(r.x + rr, r.bottom() - rr), FRAC_PI_2),
    ];
    for (center, start) in corners {
        vertices.extend(fan(center, rr, start, start + FRAC_PI_2, color, corner_segments));
    }

    vertices
}

/// Filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Area between a polyline and a horizontal baseline below it
pub fn area_under(points: &[Vec2], baseline: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len().saturating_sub(1) * 6);
    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        quad(
            &mut vertices,
            [
                p1,
                p2,
                Vec2::new(p2.x, baseline),
                Vec2::new(p1.x, baseline),
            ],
            [color; 4],
        );
    }
    vertices
}

/// Rotate vertices by `angle` around the origin, then move them to `origin`
pub fn transform(vertices: &mut [Vertex], origin: Vec2, angle: f32) {
    let rot = Vec2::from_angle(angle);
    for v in vertices.iter_mut() {
        let p = origin + rot.rotate(Vec2::from(v.position));
        v.position = [p.x, p.y];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    fn within(vertices: &[Vertex], r: Rect) -> bool {
        const EPS: f32 = 1e-3;
        vertices.iter().all(|v| {
            v.position[0] >= r.x - EPS
                && v.position[0] <= r.right() + EPS
                && v.position[1] >= r.y - EPS
                && v.position[1] <= r.bottom() + EPS
        })
    }

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let v = rect(r, WHITE);
        assert_eq!(v.len(), 6);
        assert!(within(&v, r));
        assert!(v.iter().any(|v| v.position == [40.0, 60.0]));
    }

    #[test]
    fn test_empty_rect() {
        assert!(rect(Rect::new(0.0, 0.0, 0.0, 5.0), WHITE).is_empty());
        assert!(rect(Rect::new(0.0, 0.0, 5.0, -1.0), WHITE).is_empty());
    }

    #[test]
    fn test_gradient_colors() {
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        let v = vertical_gradient(Rect::new(0.0, 0.0, 10.0, 10.0), top, bottom);
        for vert in &v {
            let expected = if vert.position[1] == 0.0 { top } else { bottom };
            assert_eq!(vert.color, expected);
        }
    }

    #[test]
    fn test_circle_radius() {
        let center = Vec2::new(5.0, 5.0);
        let v = circle(center, 3.0, WHITE, 16);
        assert_eq!(v.len(), 48);
        for vert in &v {
            let d = Vec2::from(vert.position).distance(center);
            assert!(d < 3.0 + 1e-4);
        }
    }

    #[test]
    fn test_rounded_rect_inside_bounds() {
        let r = Rect::new(-17.0, -12.0, 34.0, 24.0);
        let v = rounded_rect(r, 6.0, WHITE, 4);
        assert!(!v.is_empty());
        assert!(within(&v, r));
        // Sharp corner point is cut off
        assert!(!v.iter().any(|v| v.position == [-17.0, -12.0]));
    }

    #[test]
    fn test_outline_stays_inside() {
        let r = Rect::new(0.0, 0.0, 45.0, 200.0);
        let v = rect_outline(r, 2.0, WHITE);
        assert_eq!(v.len(), 24);
        assert!(within(&v, r));
    }

    #[test]
    fn test_area_under() {
        let points = [Vec2::new(0.0, 10.0), Vec2::new(10.0, 12.0), Vec2::new(20.0, 8.0)];
        let v = area_under(&points, 50.0, WHITE);
        assert_eq!(v.len(), 12);
        assert!(within(&v, Rect::new(0.0, 8.0, 20.0, 42.0)));
    }

    #[test]
    fn test_transform_rotates_then_translates() {
        let mut v = vec![Vertex::new(10.0, 0.0, WHITE)];
        transform(&mut v, Vec2::new(100.0, 100.0), FRAC_PI_2);
        assert!((v[0].position[0] - 100.0).abs() < 1e-4);
        assert!((v[0].position[1] - 110.0).abs() < 1e-4);
    }
}

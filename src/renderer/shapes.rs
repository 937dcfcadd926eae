//! Shape generation for 2D primitives
//!
//! All builders append triangle-list vertices in pixel space (origin top-left,
//! y down). Gradients and glows come from per-vertex colors: the GPU
//! interpolates them for free.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Two triangles spanning corners `a b c d` in winding order
fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    let v = |i: usize| Vertex::new(corners[i].x, corners[i].y, colors[i]);
    out.extend_from_slice(&[v(0), v(1), v(2), v(2), v(3), v(0)]);
}

/// Solid axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    gradient_rect(out, min, max, color, color);
}

/// Rectangle blending from `top` color to `bottom` color
pub fn gradient_rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) {
    quad(
        out,
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ],
        [top, top, bottom, bottom],
    );
}

/// Horizontal line of `thickness` pixels centered on `y`
pub fn hline(out: &mut Vec<Vertex>, y: f32, x0: f32, x1: f32, thickness: f32, color: [f32; 4]) {
    let half = thickness / 2.0;
    rect(out, Vec2::new(x0, y - half), Vec2::new(x1, y + half), color);
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    ring(out, center, 0.0, radius, color, color, segments);
}

/// Annulus with colors interpolated from the inner to the outer edge
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        if inner_radius <= 0.0 {
            // Triangle fan from center
            out.push(Vertex::new(center.x, center.y, inner_color));
            let o1 = center + dir1 * outer_radius;
            let o2 = center + dir2 * outer_radius;
            out.push(Vertex::new(o1.x, o1.y, outer_color));
            out.push(Vertex::new(o2.x, o2.y, outer_color));
            continue;
        }

        quad(
            out,
            [
                center + dir1 * inner_radius,
                center + dir1 * outer_radius,
                center + dir2 * outer_radius,
                center + dir2 * inner_radius,
            ],
            [inner_color, outer_color, outer_color, inner_color],
        );
    }
}

/// Radial gradient disc. `stops` are `(t, color)` pairs with `t` in `[0, 1]`
/// along the radius, sorted ascending.
pub fn radial_gradient(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    stops: &[(f32, [f32; 4])],
    segments: u32,
) {
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        ring(out, center, radius * t0, radius * t1, c0, c1, segments);
    }
}

/// Soft halo of width `blur` around a convex outline, fading to transparent
pub fn halo(out: &mut Vec<Vertex>, outline: &[Vec2], blur: f32, color: [f32; 4]) {
    if outline.len() < 3 || blur <= 0.0 {
        return;
    }
    let centroid = outline.iter().copied().sum::<Vec2>() / outline.len() as f32;
    let faded = [color[0], color[1], color[2], 0.0];
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        let a_out = a + (a - centroid).normalize_or_zero() * blur;
        let b_out = b + (b - centroid).normalize_or_zero() * blur;
        quad(out, [a, a_out, b_out, b], [color, faded, faded, color]);
    }
}

/// Corners of an axis-aligned rectangle, clockwise from top-left
pub fn rect_outline(min: Vec2, max: Vec2) -> [Vec2; 4] {
    [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
}

/// Points of a diamond inscribed in the box `pos..pos+size`: top, right, bottom, left
pub fn diamond_outline(pos: Vec2, size: Vec2) -> [Vec2; 4] {
    let half = size / 2.0;
    [
        Vec2::new(pos.x + half.x, pos.y),
        Vec2::new(pos.x + size.x, pos.y + half.y),
        Vec2::new(pos.x + half.x, pos.y + size.y),
        Vec2::new(pos.x, pos.y + half.y),
    ]
}

/// Filled diamond inscribed in the box `pos..pos+size`
pub fn diamond(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    quad(out, diamond_outline(pos, size), [color; 4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_is_two_triangles() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::ZERO, Vec2::new(10.0, 5.0), RED);
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|v| v.position[0] >= 0.0 && v.position[0] <= 10.0));
    }

    #[test]
    fn test_gradient_rect_colors_top_and_bottom() {
        let top = [0.0, 0.0, 1.0, 1.0];
        let mut out = Vec::new();
        gradient_rect(&mut out, Vec2::ZERO, Vec2::new(10.0, 10.0), top, RED);
        for v in &out {
            let expected = if v.position[1] == 0.0 { top } else { RED };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 50.0);
        circle(&mut out, center, 10.0, RED, 16);
        assert_eq!(out.len(), 16 * 3);
        for v in &out {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_radial_gradient_rings() {
        let mut out = Vec::new();
        let stops = [(0.0, RED), (0.5, RED), (1.0, [1.0, 0.0, 0.0, 0.0])];
        radial_gradient(&mut out, Vec2::ZERO, 20.0, &stops, 12);
        // Inner fan (3 per segment) + outer annulus (6 per segment)
        assert_eq!(out.len(), 12 * 3 + 12 * 6);
    }

    #[test]
    fn test_halo_fades_outward() {
        let mut out = Vec::new();
        let outline = rect_outline(Vec2::ZERO, Vec2::new(10.0, 10.0));
        halo(&mut out, &outline, 5.0, RED);
        assert_eq!(out.len(), 4 * 6);
        assert!(out.iter().any(|v| v.color[3] == 0.0));

        let mut none = Vec::new();
        halo(&mut none, &outline, 0.0, RED);
        assert!(none.is_empty());
    }

    #[test]
    fn test_diamond_outline() {
        let pts = diamond_outline(Vec2::new(0.0, 0.0), Vec2::new(40.0, 40.0));
        assert_eq!(pts[0], Vec2::new(20.0, 0.0));
        assert_eq!(pts[1], Vec2::new(40.0, 20.0));
        assert_eq!(pts[2], Vec2::new(20.0, 40.0));
        assert_eq!(pts[3], Vec2::new(0.0, 20.0));
    }
}

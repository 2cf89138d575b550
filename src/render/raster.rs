//! Triangle scan conversion.
//!
//! One bounding-box walk serves every shaded render mode; the per-pixel
//! color computation is delegated to a [`FragmentShader`]. The walk keeps
//! the three edge values and barycentric weights as running sums, adding
//! each edge's `a` coefficient per x step and `b` per y step instead of
//! re-evaluating the equations at every pixel — this is what keeps the
//! emulator at interactive rates.

use super::edge::{signed_area, EdgeEquation};
use super::framebuffer::FrameBuffer;
use super::shader::FragmentShader;
use crate::math::vec3::Vec3;

/// Rasterize a screen-space triangle through `shader`.
///
/// Vertices carry pixel x/y and normalized depth in z. Only triangles wound
/// counter-clockwise (positive signed area) are rendered; clockwise and
/// zero-area triangles are skipped and the function returns `false`.
/// Covered pixels are depth tested against the frame buffer and written
/// with the shader's color when they pass.
pub fn fill_triangle<S: FragmentShader>(
    fb: &mut FrameBuffer,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    shader: &S,
) -> bool {
    // Back-facing or degenerate: skipping here also guards the division
    // by the signed area below.
    let area = signed_area(v0, v1, v2);
    if area <= 0.0 {
        return false;
    }
    let inv_area = 1.0 / area;

    // Edge i is opposite vertex i, so its evaluation is the unnormalized
    // barycentric weight of that vertex.
    let e0 = EdgeEquation::from_points(v1, v2);
    let e1 = EdgeEquation::from_points(v2, v0);
    let e2 = EdgeEquation::from_points(v0, v1);

    // Bounding box, clamped to the render target. Half-open per axis:
    // a pixel row at ceil(max) would have its center outside the triangle.
    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
    let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(fb.width() as i32);
    let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
    let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(fb.height() as i32);
    if min_x >= max_x || min_y >= max_y {
        return false;
    }

    let (z0, z1, z2) = (f64::from(v0.z), f64::from(v1.z), f64::from(v2.z));

    // Edge values at the first pixel center; everything after is additive.
    let start_x = f64::from(min_x) + 0.5;
    let start_y = f64::from(min_y) + 0.5;
    let mut row_eval = [
        e0.eval(start_x, start_y),
        e1.eval(start_x, start_y),
        e2.eval(start_x, start_y),
    ];
    let mut row_bary = [
        row_eval[0] * inv_area,
        row_eval[1] * inv_area,
        row_eval[2] * inv_area,
    ];

    let step_x = [e0.a, e1.a, e2.a];
    let step_y = [e0.b, e1.b, e2.b];
    let bary_step_x = [e0.a * inv_area, e1.a * inv_area, e2.a * inv_area];
    let bary_step_y = [e0.b * inv_area, e1.b * inv_area, e2.b * inv_area];

    for y in min_y..max_y {
        let mut eval = row_eval;
        let mut bary = row_bary;

        for x in min_x..max_x {
            if e0.covers(eval[0]) && e1.covers(eval[1]) && e2.covers(eval[2]) {
                let depth = bary[0] * z0 + bary[1] * z1 + bary[2] * z2;
                let color = shader.shade(bary, depth);
                fb.set_pixel_with_depth(x, y, depth, color);
            }

            for i in 0..3 {
                eval[i] += step_x[i];
                bary[i] += bary_step_x[i];
            }
        }

        for i in 0..3 {
            row_eval[i] += step_y[i];
            row_bary[i] += bary_step_y[i];
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{self, Color};
    use crate::render::shader::{DepthShader, FlatShader};
    use approx::assert_relative_eq;

    fn vec(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x, y, z)
    }

    /// Count pixels differing from the clear color.
    fn painted_pixels(fb: &FrameBuffer) -> Vec<(i32, i32)> {
        let mut painted = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.pixel_at(x, y) != Some(fb.clear_color()) {
                    painted.push((x, y));
                }
            }
        }
        painted
    }

    #[test]
    fn clockwise_triangle_is_culled() {
        let mut fb = FrameBuffer::new(8, 8);
        let shader = FlatShader::new(colors::WHITE);
        let rendered = fill_triangle(
            &mut fb,
            vec(0.0, 0.0, 0.5),
            vec(0.0, 8.0, 0.5),
            vec(8.0, 0.0, 0.5),
            &shader,
        );
        assert!(!rendered);
        assert!(painted_pixels(&fb).is_empty());
    }

    #[test]
    fn degenerate_triangle_is_skipped() {
        let mut fb = FrameBuffer::new(8, 8);
        let shader = FlatShader::new(colors::WHITE);
        let p = vec(2.0, 2.0, 0.5);
        assert!(!fill_triangle(&mut fb, p, p, p, &shader));
        // Collinear points also have zero area.
        assert!(!fill_triangle(
            &mut fb,
            vec(0.0, 0.0, 0.5),
            vec(2.0, 2.0, 0.5),
            vec(4.0, 4.0, 0.5),
            &shader,
        ));
        assert!(painted_pixels(&fb).is_empty());
    }

    #[test]
    fn covered_pixel_centers_satisfy_all_three_edges() {
        let mut fb = FrameBuffer::new(8, 8);
        let shader = FlatShader::new(colors::WHITE);
        let (v0, v1, v2) = (vec(0.0, 0.0, 0.5), vec(6.0, 0.0, 0.5), vec(0.0, 6.0, 0.5));
        assert!(fill_triangle(&mut fb, v0, v1, v2, &shader));

        let edges = [
            EdgeEquation::from_points(v1, v2),
            EdgeEquation::from_points(v2, v0),
            EdgeEquation::from_points(v0, v1),
        ];
        for y in 0..8 {
            for x in 0..8 {
                let (cx, cy) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
                let covered = edges.iter().all(|e| e.covers(e.eval(cx, cy)));
                let painted = fb.pixel_at(x, y) == Some(colors::WHITE);
                assert_eq!(covered, painted, "mismatch at ({x}, {y})");
            }
        }
    }

    #[test]
    fn adjacent_triangles_partition_shared_edge() {
        // A quad split along its diagonal; every interior pixel must be
        // painted exactly once across the two triangles. Each triangle is
        // rasterized into its own buffer so writes can be counted.
        let p00 = vec(0.0, 0.0, 0.5);
        let p10 = vec(6.0, 0.0, 0.5);
        let p11 = vec(6.0, 6.0, 0.5);
        let p01 = vec(0.0, 6.0, 0.5);

        let mut count = vec![0u32; 64];
        for tri in [[p00, p10, p11], [p00, p11, p01]] {
            let mut single = FrameBuffer::new(8, 8);
            let shader = FlatShader::new(Color::rgb(255, 0, 0));
            assert!(fill_triangle(&mut single, tri[0], tri[1], tri[2], &shader));
            for y in 0..8 {
                for x in 0..8 {
                    if single.pixel_at(x, y) != Some(single.clear_color()) {
                        count[(y * 8 + x) as usize] += 1;
                    }
                }
            }
        }

        // Interior of the quad: pixel centers 0.5..5.5 in both axes.
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(count[(y * 8 + x) as usize], 1, "pixel ({x}, {y})");
            }
        }
        // Outside the quad: untouched.
        for y in 0..8 {
            for x in 0..8 {
                if x >= 6 || y >= 6 {
                    assert_eq!(count[(y * 8 + x) as usize], 0, "pixel ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn incremental_stepping_matches_direct_evaluation() {
        // The incremental walk must land on exactly the same coverage the
        // direct evaluation produces; an accumulating drift would show up
        // as a different painted set for an awkwardly sloped triangle.
        let (v0, v1, v2) = (
            vec(0.3, 0.7, 0.5),
            vec(37.6, 3.1, 0.5),
            vec(11.9, 29.4, 0.5),
        );
        let mut fb = FrameBuffer::new(40, 32);
        let shader = FlatShader::new(colors::WHITE);
        assert!(fill_triangle(&mut fb, v0, v1, v2, &shader));

        let edges = [
            EdgeEquation::from_points(v1, v2),
            EdgeEquation::from_points(v2, v0),
            EdgeEquation::from_points(v0, v1),
        ];
        for y in 0..32 {
            for x in 0..40 {
                let (cx, cy) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
                let covered = edges.iter().all(|e| e.covers(e.eval(cx, cy)));
                let painted = fb.pixel_at(x, y) == Some(colors::WHITE);
                assert_eq!(covered, painted, "mismatch at ({x}, {y})");
            }
        }
    }

    #[test]
    fn depth_test_keeps_nearer_triangle() {
        let mut fb = FrameBuffer::new(8, 8);
        let near = FlatShader::new(Color::rgb(1, 1, 1));
        let far = FlatShader::new(Color::rgb(2, 2, 2));

        let tri = |z| (vec(0.0, 0.0, z), vec(6.0, 0.0, z), vec(0.0, 6.0, z));

        let (a, b, c) = tri(0.25);
        assert!(fill_triangle(&mut fb, a, b, c, &near));
        let (a, b, c) = tri(0.75);
        assert!(fill_triangle(&mut fb, a, b, c, &far));
        assert_eq!(fb.pixel_at(1, 1), Some(Color::rgb(1, 1, 1)));

        // Re-rasterizing at the same depth never steals the pixel.
        let (a, b, c) = tri(0.25);
        assert!(fill_triangle(&mut fb, a, b, c, &far));
        assert_eq!(fb.pixel_at(1, 1), Some(Color::rgb(1, 1, 1)));
    }

    #[test]
    fn depth_interpolates_across_surface() {
        let mut fb = FrameBuffer::new(8, 8);
        // Depth ramps from 0 at x=0 to 1 at x=8.
        let v0 = vec(0.0, 0.0, 0.0);
        let v1 = vec(8.0, 0.0, 1.0);
        let v2 = vec(0.0, 8.0, 0.0);
        assert!(fill_triangle(&mut fb, v0, v1, v2, &DepthShader));

        let d_left = fb.depth_at(0, 0).unwrap();
        let d_mid = fb.depth_at(3, 0).unwrap();
        assert!(d_left < d_mid);
        assert_relative_eq!(d_left, 0.5 / 8.0, epsilon = 1e-9);
        assert_relative_eq!(d_mid, 3.5 / 8.0, epsilon = 1e-9);
    }

    #[test]
    fn offscreen_triangle_clamps_to_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        let shader = FlatShader::new(colors::WHITE);
        // Much larger than the buffer; must neither panic nor write
        // out of range.
        assert!(fill_triangle(
            &mut fb,
            vec(-20.0, -20.0, 0.5),
            vec(40.0, -20.0, 0.5),
            vec(-20.0, 40.0, 0.5),
            &shader,
        ));
        assert_eq!(painted_pixels(&fb).len(), 16);
    }

    #[test]
    fn fully_offscreen_triangle_renders_nothing() {
        let mut fb = FrameBuffer::new(4, 4);
        let shader = FlatShader::new(colors::WHITE);
        assert!(!fill_triangle(
            &mut fb,
            vec(10.0, 10.0, 0.5),
            vec(14.0, 10.0, 0.5),
            vec(10.0, 14.0, 0.5),
            &shader,
        ));
        assert!(painted_pixels(&fb).is_empty());
    }
}

//! Bresenham line drawing for wireframe rendering.

use super::framebuffer::FrameBuffer;
use crate::colors::Color;

/// Draw a line between two pixel coordinates, both endpoints included.
///
/// Steps along the major axis (the one with the larger absolute delta) and
/// lets an integer decision variable trigger minor-axis steps, so no slope
/// division is ever needed. Horizontal and vertical lines take dedicated
/// paths. Out-of-range pixels are discarded by the frame buffer's write
/// primitive, not here.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let x_step = if x0 < x1 { 1 } else { -1 };
    let y_step = if y0 < y1 { 1 } else { -1 };

    if dy == 0 {
        let mut x = x0;
        loop {
            fb.set_pixel(x, y0, color);
            if x == x1 {
                break;
            }
            x += x_step;
        }
        return;
    }
    if dx == 0 {
        let mut y = y0;
        loop {
            fb.set_pixel(x0, y, color);
            if y == y1 {
                break;
            }
            y += y_step;
        }
        return;
    }

    let (mut x, mut y) = (x0, y0);
    if dx >= dy {
        // X-major: one pixel per column, d decides when y advances.
        let mut d = 2 * dy - dx;
        let d_same = 2 * dy;
        let d_step = 2 * (dy - dx);

        fb.set_pixel(x, y, color);
        for _ in 0..dx {
            if d > 0 {
                y += y_step;
                d += d_step;
            } else {
                d += d_same;
            }
            x += x_step;
            fb.set_pixel(x, y, color);
        }
    } else {
        // Y-major: one pixel per row.
        let mut d = 2 * dx - dy;
        let d_same = 2 * dx;
        let d_step = 2 * (dx - dy);

        fb.set_pixel(x, y, color);
        for _ in 0..dy {
            if d > 0 {
                x += x_step;
                d += d_step;
            } else {
                d += d_same;
            }
            y += y_step;
            fb.set_pixel(x, y, color);
        }
    }
}

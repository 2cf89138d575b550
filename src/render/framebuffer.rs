//! Color and depth buffer storage.
//!
//! [`FrameBuffer`] owns both per-pixel arrays for the active render-target
//! size. All color writes funnel through [`FrameBuffer::set_pixel`] or
//! [`FrameBuffer::set_pixel_with_depth`]; nothing else indexes the buffers,
//! which keeps the bounds policy in one place.
//!
//! # Depth buffer
//!
//! Depth values are normalized to [0, 1] with 0 at the near plane. The
//! buffer clears to 1.0 (far) and a write is accepted only when the
//! candidate depth is strictly nearer than the stored value.

use crate::colors::{self, Color};

pub struct FrameBuffer {
    color: Vec<Color>,
    depth: Vec<f64>,
    width: u32,
    height: u32,
    clear_color: Color,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color: vec![colors::BACKGROUND; size],
            depth: vec![1.0; size],
            width,
            height,
            clear_color: colors::BACKGROUND,
        }
    }

    /// Reallocate both buffers for a new render-target size.
    ///
    /// Only valid between frames; the new buffers start cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color = vec![self.clear_color; size];
        self.depth = vec![1.0; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Fill the color buffer with the clear color.
    pub fn clear_color_buffer(&mut self) {
        self.color.fill(self.clear_color);
    }

    /// Reset every depth entry to the far plane.
    pub fn clear_depth_buffer(&mut self) {
        self.depth.fill(1.0);
    }

    /// Write a pixel, ignoring coordinates outside the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.color[index] = color;
        }
    }

    /// Write a pixel if it passes the depth test.
    ///
    /// The write is accepted only when `depth` is strictly less than the
    /// stored value; the depth buffer is updated together with the color.
    /// Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f64, color: Color) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            if depth < self.depth[index] {
                self.depth[index] = depth;
                self.color[index] = color;
            }
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f64> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depth[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// The finished color buffer as raw RGBA bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        // Color is repr(C) with four u8 fields, so the buffer is already
        // a contiguous RGBA byte array.
        unsafe {
            std::slice::from_raw_parts(self.color.as_ptr() as *const u8, self.color.len() * 4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_round_trips_through_every_pixel() {
        let mut fb = FrameBuffer::new(4, 3);
        let clear = Color::rgb(12, 34, 56);
        fb.set_clear_color(clear);
        fb.clear_color_buffer();

        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(fb.pixel_at(x, y), Some(clear));
            }
        }
    }

    #[test]
    fn out_of_bounds_writes_are_discarded() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(-1, 0, colors::WHITE);
        fb.set_pixel(0, -1, colors::WHITE);
        fb.set_pixel(2, 0, colors::WHITE);
        fb.set_pixel(0, 2, colors::WHITE);
        fb.set_pixel_with_depth(5, 5, 0.0, colors::WHITE);

        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(fb.pixel_at(x, y), Some(colors::BACKGROUND));
            }
        }
    }

    #[test]
    fn depth_test_accepts_only_strictly_nearer() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel_with_depth(0, 0, 0.5, Color::rgb(1, 1, 1));
        assert_eq!(fb.pixel_at(0, 0), Some(Color::rgb(1, 1, 1)));
        assert_eq!(fb.depth_at(0, 0), Some(0.5));

        // Same depth does not overwrite.
        fb.set_pixel_with_depth(0, 0, 0.5, Color::rgb(2, 2, 2));
        assert_eq!(fb.pixel_at(0, 0), Some(Color::rgb(1, 1, 1)));

        // Farther does not overwrite.
        fb.set_pixel_with_depth(0, 0, 0.9, Color::rgb(3, 3, 3));
        assert_eq!(fb.pixel_at(0, 0), Some(Color::rgb(1, 1, 1)));

        // Nearer does.
        fb.set_pixel_with_depth(0, 0, 0.1, Color::rgb(4, 4, 4));
        assert_eq!(fb.pixel_at(0, 0), Some(Color::rgb(4, 4, 4)));
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel_with_depth(0, 0, 0.1, colors::WHITE);
        fb.resize(3, 5);

        assert_eq!(fb.width(), 3);
        assert_eq!(fb.height(), 5);
        assert_eq!(fb.pixel_at(0, 0), Some(colors::BACKGROUND));
        assert_eq!(fb.depth_at(0, 0), Some(1.0));
        assert_eq!(fb.as_bytes().len(), 3 * 5 * 4);
    }
}

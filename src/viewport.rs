//! Object space to screen space transformation.
//!
//! [`ViewVolume`] is the single source of truth for the camera parameters;
//! [`ViewportTransform`] composes view, orthographic projection and the
//! pixel-mapping viewport matrix once, then applies the chain to whole
//! vertex arrays each frame.

use crate::math::mat3::Mat3;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Orthographic camera parameters.
///
/// Left/right extents are derived from the render target's aspect ratio so
/// resizing the window never stretches the scene.
#[derive(Debug, Clone, Copy)]
pub struct ViewVolume {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewVolume {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            top: 1.5,
            bottom: -1.5,
            near: 8.0,
            far: 12.0,
        }
    }
}

/// Precomposed transform from object space to screen space.
pub struct ViewportTransform {
    matrix: Mat4,
    width: u32,
    height: u32,
}

impl ViewportTransform {
    pub fn new(volume: &ViewVolume, width: u32, height: u32) -> Self {
        let aspect_ratio = width as f32 / height as f32;
        let left = aspect_ratio * volume.bottom;
        let right = aspect_ratio * volume.top;

        let view = Mat4::look_at_rh(volume.eye, volume.target, volume.up);
        let ortho = Mat4::orthographic(
            left,
            right,
            volume.bottom,
            volume.top,
            volume.near,
            volume.far,
        );
        let matrix = Mat4::viewport(width, height) * ortho * view;

        Self {
            matrix,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Transform object-space positions into screen space.
    ///
    /// Each output vertex holds pixel x/y and depth remapped from the
    /// projection's [-1, 1] range to [0, 1], 0 being nearest. Results land
    /// in `out`, which is cleared first so the buffer can be reused across
    /// frames without reallocating.
    pub fn project(&self, model_matrix: Mat3, positions: &[Vec3], out: &mut Vec<Vec3>) {
        out.clear();
        out.reserve(positions.len());

        for &position in positions {
            let placed = model_matrix * position;
            let clip = self.matrix * Vec4::from(placed);
            out.push(Vec3::new(clip.x, clip.y, (clip.z + 1.0) * 0.5));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn origin_lands_in_screen_center_at_half_depth() {
        let transform = ViewportTransform::new(&ViewVolume::default(), 800, 600);
        let mut out = Vec::new();
        transform.project(Mat3::identity(), &[Vec3::ZERO], &mut out);

        assert_relative_eq!(out[0].x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(out[0].y, 300.0, epsilon = 1e-3);
        assert_relative_eq!(out[0].z, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn depth_remaps_view_volume_to_unit_range() {
        let volume = ViewVolume::default();
        let transform = ViewportTransform::new(&volume, 640, 480);
        let mut out = Vec::new();
        // Points on the near and far planes (camera on +z looking at origin).
        transform.project(
            Mat3::identity(),
            &[Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -2.0)],
            &mut out,
        );

        assert_relative_eq!(out[0].z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(out[1].z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn scale_enlarges_screen_footprint() {
        let transform = ViewportTransform::new(&ViewVolume::default(), 800, 600);
        let mut plain = Vec::new();
        let mut scaled = Vec::new();
        let p = [Vec3::new(1.0, 0.0, 0.0)];
        transform.project(Mat3::identity(), &p, &mut plain);
        transform.project(Mat3::scaling_uniform(1.5), &p, &mut scaled);

        let center = 400.0;
        assert!((scaled[0].x - center).abs() > (plain[0].x - center).abs());
    }
}

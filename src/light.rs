//! Lighting types for the renderer.

use crate::math::mat3::Mat3;
use crate::math::vec3::Vec3;

/// A point light positioned in world space.
///
/// Shading happens in model space, so the light is pulled through the
/// inverse of a model's rotation before any intensity is computed.
#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    /// RGB intensity, each channel in [0, 1].
    pub intensity: Vec3,
}

impl PointLight {
    /// Create a white light at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            intensity: Vec3::ONE,
        }
    }

    /// The light repositioned into a model's space.
    ///
    /// A rotation that cannot be inverted leaves the light where it is.
    pub fn in_model_space(&self, rotation: Mat3) -> Self {
        let inverse = rotation.inverse().unwrap_or_else(Mat3::identity);
        Self {
            position: inverse * self.position,
            intensity: self.intensity,
        }
    }

    /// Lambertian intensity for a whole face.
    ///
    /// Uses the face normal and the direction from the face centroid to the
    /// light; back-lit faces clamp to zero.
    pub fn face_intensity(&self, corners: [Vec3; 3]) -> f32 {
        let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
        let normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize();
        let to_light = (self.position - centroid).normalize();
        normal.dot(to_light).max(0.0)
    }

    /// Per-vertex RGB contribution for smooth shading.
    pub fn vertex_rgb(&self, position: Vec3, normal: Vec3) -> Vec3 {
        let to_light = (self.position - position).normalize();
        self.intensity * normal.dot(to_light).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_face() -> [Vec3; 3] {
        // CCW in the z=0 plane, normal +z.
        [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn head_on_light_gives_full_intensity() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        let intensity = light.face_intensity(unit_face());
        assert!(intensity > 0.99);
    }

    #[test]
    fn light_behind_face_clamps_to_zero() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(light.face_intensity(unit_face()), 0.0);
    }

    #[test]
    fn vertex_rgb_scales_with_angle() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        let head_on = light.vertex_rgb(Vec3::ZERO, Vec3::FORWARD);
        assert_relative_eq!(head_on.x, 1.0, epsilon = 1e-6);

        let grazing = light.vertex_rgb(Vec3::ZERO, Vec3::UP);
        assert_relative_eq!(grazing.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn model_space_rotation_round_trip() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        let rotation = Mat3::rotation_y(std::f32::consts::FRAC_PI_2);
        let rotated = light.in_model_space(rotation);
        // Inverse of a quarter turn about Y sends +z to -x.
        assert_relative_eq!(rotated.position.x, -10.0, epsilon = 1e-4);
        assert_relative_eq!(rotated.position.z, 0.0, epsilon = 1e-4);
    }
}

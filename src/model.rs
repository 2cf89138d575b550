//! Renderable model: a mesh plus its display state.
//!
//! Each [`Model`] carries its own [`RenderMode`], rotation angle, scale and
//! optional texture, so switching between models preserves how each one was
//! being viewed.

use std::path::Path;

use crate::math::mat3::Mat3;
use crate::mesh::{LoadError, Mesh};
use crate::texture::Texture;

/// How a model is rasterized.
///
/// Modes form a fixed cycle advanced one step per user event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Triangle edges only.
    #[default]
    Wireframe,
    /// Grayscale visualization of the depth buffer.
    Depth,
    /// One Lambertian color per face.
    Faceted,
    /// Per-vertex lighting interpolated across faces.
    Shaded,
    /// Nearest-texel texture mapping.
    Textured,
}

impl RenderMode {
    /// The next mode in the cycle, wrapping back to wireframe.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Wireframe => RenderMode::Depth,
            RenderMode::Depth => RenderMode::Faceted,
            RenderMode::Faceted => RenderMode::Shaded,
            RenderMode::Shaded => RenderMode::Textured,
            RenderMode::Textured => RenderMode::Wireframe,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Wireframe => "Wireframe",
            RenderMode::Depth => "Depth",
            RenderMode::Faceted => "Faceted",
            RenderMode::Shaded => "Shaded",
            RenderMode::Textured => "Textured",
        }
    }
}

/// Wrap an angle in degrees into (-360, 360), preserving sign.
pub fn normalize_degrees(degrees: f32) -> f32 {
    degrees % 360.0
}

/// A mesh with display state attached.
pub struct Model {
    mesh: Mesh,
    texture: Option<Texture>,
    mode: RenderMode,
    angle_degrees: f32,
    scale: f32,
    spinning: bool,
}

impl Model {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            texture: None,
            mode: RenderMode::default(),
            angle_degrees: 0.0,
            scale: 1.0,
            spinning: false,
        }
    }

    /// Load a model from an OBJ file.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Ok(Self::new(Mesh::from_obj(path)?))
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Advance the render mode one step.
    pub fn advance_mode(&mut self) {
        self.mode = self.mode.next();
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn set_angle_degrees(&mut self, degrees: f32) {
        self.angle_degrees = normalize_degrees(degrees);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn spinning(&self) -> bool {
        self.spinning
    }

    pub fn set_spinning(&mut self, spinning: bool) {
        self.spinning = spinning;
    }

    pub fn toggle_spinning(&mut self) {
        self.spinning = !self.spinning;
    }

    /// Advance the rotation by one degree if the model is spinning.
    pub fn spin_step(&mut self) {
        if self.spinning {
            self.set_angle_degrees(self.angle_degrees + 1.0);
        }
    }

    /// Rotation about the up axis from the current angle.
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::rotation_y(self.angle_degrees.to_radians())
    }

    /// Combined scale-then-rotate matrix applied to object-space vertices.
    pub fn model_matrix(&self) -> Mat3 {
        Mat3::scaling_uniform(self.scale) * self.rotation_matrix()
    }
}

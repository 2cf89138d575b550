//! Per-pixel shading for the triangle rasterizer.
//!
//! The scan-conversion loop handles coverage, barycentric weights and depth
//! testing exactly once; everything that differs between render modes is the
//! color computation, expressed as a [`FragmentShader`] implementation.
//!
//! # Barycentric weights
//!
//! `bary` holds three weights summing to 1.0 for any covered pixel, one per
//! triangle vertex. Any per-vertex attribute interpolates as
//! `attr = bary[0]*attr0 + bary[1]*attr1 + bary[2]*attr2`.

use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Computes the color of one covered pixel.
pub trait FragmentShader {
    /// `bary` are the pixel's barycentric weights, `depth` its interpolated
    /// normalized depth in [0, 1].
    fn shade(&self, bary: [f64; 3], depth: f64) -> Color;
}

/// Constant color for every covered pixel.
///
/// Used for faceted shading, where the whole face shares one Lambertian
/// color computed before rasterization starts.
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl FragmentShader for FlatShader {
    #[inline]
    fn shade(&self, _bary: [f64; 3], _depth: f64) -> Color {
        self.color
    }
}

/// Grayscale of the interpolated depth value.
///
/// Near surfaces render dark and the far plane renders white, making
/// depth-test behavior directly visible.
pub struct DepthShader;

impl FragmentShader for DepthShader {
    #[inline]
    fn shade(&self, _bary: [f64; 3], depth: f64) -> Color {
        Color::gray((depth * 255.0) as u8)
    }
}

/// Interpolates per-vertex lighting across the face.
pub struct GouraudShader {
    /// RGB contribution of each vertex, channels in [0, 1].
    colors: [[f64; 3]; 3],
}

impl GouraudShader {
    pub fn new(vertex_colors: [Vec3; 3]) -> Self {
        let unpack = |v: Vec3| [f64::from(v.x), f64::from(v.y), f64::from(v.z)];
        Self {
            colors: [
                unpack(vertex_colors[0]),
                unpack(vertex_colors[1]),
                unpack(vertex_colors[2]),
            ],
        }
    }
}

impl FragmentShader for GouraudShader {
    #[inline]
    fn shade(&self, bary: [f64; 3], _depth: f64) -> Color {
        let r = bary[0] * self.colors[0][0]
            + bary[1] * self.colors[1][0]
            + bary[2] * self.colors[2][0];
        let g = bary[0] * self.colors[0][1]
            + bary[1] * self.colors[1][1]
            + bary[2] * self.colors[2][1];
        let b = bary[0] * self.colors[0][2]
            + bary[1] * self.colors[1][2]
            + bary[2] * self.colors[2][2];
        Color::from_unit_rgb(r, g, b)
    }
}

/// Samples the nearest texel at interpolated texture coordinates.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3]) -> Self {
        Self { texture, uvs }
    }
}

impl FragmentShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, bary: [f64; 3], _depth: f64) -> Color {
        let u = bary[0] * f64::from(self.uvs[0].x)
            + bary[1] * f64::from(self.uvs[1].x)
            + bary[2] * f64::from(self.uvs[2].x);
        let v = bary[0] * f64::from(self.uvs[0].y)
            + bary[1] * f64::from(self.uvs[1].y)
            + bary[2] * f64::from(self.uvs[2].y);
        self.texture.sample(u as f32, v as f32)
    }
}

//! 2D textures for texture mapping.
//!
//! Two sources are supported: ordinary image files decoded by the `image`
//! crate, and the raw `.tex` stream format — a 12-byte header of
//! little-endian u32 width, height and bytes-per-texel, followed by
//! `width * height` row-major texels.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::colors::Color;

/// Errors produced while loading a texture.
#[derive(Debug)]
pub enum TextureError {
    Io(io::Error),
    Image(image::ImageError),
    /// The header declares a texel size the loader cannot interpret.
    UnsupportedTexelSize { bytes_per_texel: u32 },
    /// Width or height is zero.
    EmptyImage,
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io(e) => write!(f, "failed to read texture: {e}"),
            TextureError::Image(e) => write!(f, "failed to decode texture: {e}"),
            TextureError::UnsupportedTexelSize { bytes_per_texel } => {
                write!(f, "unsupported texel size: {bytes_per_texel} bytes")
            }
            TextureError::EmptyImage => write!(f, "texture has zero width or height"),
        }
    }
}

impl Error for TextureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TextureError::Io(e) => Some(e),
            TextureError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TextureError {
    fn from(e: io::Error) -> Self {
        TextureError::Io(e)
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}

/// A 2D texture sampled with nearest-neighbor filtering.
pub struct Texture {
    data: Vec<Color>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Build a texture from an in-memory texel array.
    pub fn new(data: Vec<Color>, width: u32, height: u32) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || data.len() != (width * height) as usize {
            return Err(TextureError::EmptyImage);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Load a texture from an image file (PNG, JPG, etc.).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<Color> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Color::new(r, g, b, a)
            })
            .collect();

        Self::new(data, width, height)
    }

    /// Load a texture from a raw `.tex` stream.
    ///
    /// The header is three little-endian u32 values: width, height and bytes
    /// per texel. Texels follow row-major; the first three bytes of each are
    /// R, G, B and any remainder is skipped.
    pub fn from_tex<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let mut reader = BufReader::new(File::open(path)?);

        let width = read_u32_le(&mut reader)?;
        let height = read_u32_le(&mut reader)?;
        let bytes_per_texel = read_u32_le(&mut reader)?;
        if bytes_per_texel < 3 {
            return Err(TextureError::UnsupportedTexelSize { bytes_per_texel });
        }

        let texel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(texel_count);
        let mut texel = vec![0u8; bytes_per_texel as usize];
        for _ in 0..texel_count {
            reader.read_exact(&mut texel)?;
            data.push(Color::rgb(texel[0], texel[1], texel[2]));
        }

        Self::new(data, width, height)
    }

    /// Sample the nearest texel at normalized coordinates.
    ///
    /// Coordinates are clamped to [0, 1]; there is no wrapping.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = (u * (self.width - 1) as f32) as u32;
        let y = (v * (self.height - 1) as f32) as u32;

        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

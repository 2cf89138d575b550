//! A CPU software rasterizer emulating a fixed-function 3D pipeline.
//!
//! Every pixel is produced on the CPU: vertices are transformed through an
//! orthographic view chain, triangles are scan-converted with edge
//! equations and a depth buffer, and the finished color buffer is streamed
//! to the display through an SDL2 texture. SDL2 is used only for window
//! management, input and presentation.
//!
//! # Quick Start
//!
//! ```ignore
//! use softpipe::prelude::*;
//!
//! let mut window = Window::new("Demo", 800, 600)?;
//! let mut engine = Engine::new(800, 600);
//! engine.add_model(Model::new(Mesh::cube()));
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod texture;
pub mod viewport;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use colors::Color;
pub use engine::{Engine, FrameInput, FrameStats};
pub use mesh::{LoadError, Mesh};
pub use model::{Model, RenderMode};
pub use texture::{Texture, TextureError};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softpipe::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, FrameInput, FrameStats};

    // Scene content
    pub use crate::light::PointLight;
    pub use crate::mesh::Mesh;
    pub use crate::model::{Model, RenderMode};
    pub use crate::texture::Texture;

    // Math
    pub use crate::math::mat3::Mat3;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Pixels
    pub use crate::colors::Color;

    // Window & Input
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        draw_line, fill_triangle, DepthShader, FlatShader, FrameBuffer, GouraudShader,
        TextureShader,
    };
}

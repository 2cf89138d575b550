//! Software rasterization: buffers, edge equations, scan conversion,
//! shading and line drawing.

pub mod edge;
pub mod framebuffer;
pub mod line;
pub mod raster;
pub mod shader;

pub use edge::{signed_area, EdgeEquation};
pub use framebuffer::FrameBuffer;
pub use line::draw_line;
pub use raster::fill_triangle;
pub use shader::{DepthShader, FlatShader, FragmentShader, GouraudShader, TextureShader};

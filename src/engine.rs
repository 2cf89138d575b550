//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns
//! the color/depth buffers, the model registry and the current selection,
//! and runs the full software pipeline — transform, cull, rasterize — once
//! per [`Engine::emulate`] call.
//!
//! # Frame discipline
//!
//! A frame is `begin_frame` (clear), `emulate` (state update + rasterize),
//! `end_frame` (hand the finished buffer to the display layer). The buffer
//! returned by `end_frame` must not be held across the next `begin_frame`,
//! and `resize` is only valid between frames.

use crate::colors::{self, Color};
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::mesh::LoadError;
use crate::model::{Model, RenderMode};
use crate::render::{
    draw_line, fill_triangle, signed_area, DepthShader, FlatShader, FrameBuffer, GouraudShader,
    TextureShader,
};
use crate::viewport::{ViewVolume, ViewportTransform};

/// Edge-triggered user events for one frame.
///
/// The event source reports key press edges, not key state, so a held key
/// produces exactly one `true` per press. Every flag is consumed by a
/// single [`Engine::emulate`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Switch to the next model in the registry.
    pub next_model: bool,
    /// Advance the active model's render mode.
    pub next_mode: bool,
    /// Toggle the active model's rotation.
    pub toggle_spin: bool,
}

impl FrameInput {
    pub const NONE: Self = Self {
        next_model: false,
        next_mode: false,
        toggle_spin: false,
    };
}

/// Per-frame counters for the display layer's status line.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub model_name: String,
    pub mode_name: &'static str,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub culled: usize,
}

pub struct Engine {
    framebuffer: FrameBuffer,
    volume: ViewVolume,
    viewport: ViewportTransform,
    light: PointLight,
    models: Vec<Model>,
    current: usize,
    /// Screen-space vertex scratch, overwritten every frame.
    screen: Vec<Vec3>,
    culled: usize,
    frame_open: bool,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        let volume = ViewVolume::default();
        Self {
            framebuffer: FrameBuffer::new(width, height),
            viewport: ViewportTransform::new(&volume, width, height),
            volume,
            light: PointLight::new(Vec3::new(0.0, 0.0, 10.0)),
            models: Vec::new(),
            current: 0,
            screen: Vec::new(),
            culled: 0,
            frame_open: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.framebuffer.set_clear_color(color);
    }

    pub fn set_light(&mut self, light: PointLight) {
        self.light = light;
    }

    pub fn light(&self) -> PointLight {
        self.light
    }

    /// Register a model. The first one added becomes the active model.
    pub fn add_model(&mut self, model: Model) {
        self.models.push(model);
    }

    /// Load an OBJ file and register it as a model.
    pub fn load_obj(&mut self, path: &str) -> Result<(), LoadError> {
        let model = Model::from_obj(path)?;
        self.add_model(model);
        Ok(())
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn current_model(&self) -> Option<&Model> {
        self.models.get(self.current)
    }

    pub fn current_model_mut(&mut self) -> Option<&mut Model> {
        self.models.get_mut(self.current)
    }

    /// Reallocate the render target between frames.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug_assert!(!self.frame_open, "resize during an active frame");
        self.framebuffer.resize(width, height);
        self.viewport = ViewportTransform::new(&self.volume, width, height);
    }

    /// Start a frame: clear the color buffer and reset every depth entry.
    pub fn begin_frame(&mut self) {
        self.framebuffer.clear_color_buffer();
        self.framebuffer.clear_depth_buffer();
        self.frame_open = true;
    }

    /// Finish the frame and expose the color buffer for upload.
    pub fn end_frame(&mut self) -> &[u8] {
        self.frame_open = false;
        self.framebuffer.as_bytes()
    }

    /// Counters describing the frame rendered by the last `emulate` call.
    pub fn stats(&self) -> FrameStats {
        match self.current_model() {
            Some(model) => FrameStats {
                model_name: model.mesh().name().to_string(),
                mode_name: model.mode().name(),
                vertex_count: model.mesh().vertex_count(),
                triangle_count: model.mesh().triangle_count(),
                culled: self.culled,
            },
            None => FrameStats::default(),
        }
    }

    /// Run one frame of the software pipeline.
    ///
    /// Consumes the frame's input events, advances rotation, transforms the
    /// active model's vertices and rasterizes every front-facing triangle
    /// in the model's current render mode.
    pub fn emulate(&mut self, input: FrameInput) {
        self.apply_input(input);
        self.culled = 0;

        if self.models.is_empty() {
            return;
        }

        let model = &mut self.models[self.current];
        model.spin_step();

        let model = &self.models[self.current];
        let mesh = model.mesh();
        self.viewport
            .project(model.model_matrix(), mesh.positions(), &mut self.screen);

        // Light in this model's space; shading happens on object-space
        // geometry so only the rotation has to be undone.
        let light = self.light.in_model_space(model.rotation_matrix());
        let fb = &mut self.framebuffer;

        for [i0, i1, i2] in mesh.triangles() {
            let (v0, v1, v2) = (self.screen[i0], self.screen[i1], self.screen[i2]);

            if signed_area(v0, v1, v2) <= 0.0 {
                self.culled += 1;
                continue;
            }

            match model.mode() {
                RenderMode::Wireframe => {
                    let (x0, y0) = (v0.x as i32, v0.y as i32);
                    let (x1, y1) = (v1.x as i32, v1.y as i32);
                    let (x2, y2) = (v2.x as i32, v2.y as i32);
                    draw_line(fb, x0, y0, x1, y1, colors::WIREFRAME);
                    draw_line(fb, x1, y1, x2, y2, colors::WIREFRAME);
                    draw_line(fb, x2, y2, x0, y0, colors::WIREFRAME);
                }
                RenderMode::Depth => {
                    fill_triangle(fb, v0, v1, v2, &DepthShader);
                }
                RenderMode::Faceted => {
                    let shader = FlatShader::new(faceted_color(
                        &light,
                        [mesh.positions()[i0], mesh.positions()[i1], mesh.positions()[i2]],
                    ));
                    fill_triangle(fb, v0, v1, v2, &shader);
                }
                RenderMode::Shaded => {
                    let shader = GouraudShader::new([
                        light.vertex_rgb(mesh.positions()[i0], mesh.normals()[i0]),
                        light.vertex_rgb(mesh.positions()[i1], mesh.normals()[i1]),
                        light.vertex_rgb(mesh.positions()[i2], mesh.normals()[i2]),
                    ]);
                    fill_triangle(fb, v0, v1, v2, &shader);
                }
                RenderMode::Textured => match (model.texture(), mesh.has_texcoords()) {
                    (Some(texture), true) => {
                        let shader = TextureShader::new(
                            texture,
                            [
                                mesh.texcoords()[i0],
                                mesh.texcoords()[i1],
                                mesh.texcoords()[i2],
                            ],
                        );
                        fill_triangle(fb, v0, v1, v2, &shader);
                    }
                    // No texture data: fall back to faceted so the mode
                    // still shows geometry instead of a blank frame.
                    _ => {
                        let shader = FlatShader::new(faceted_color(
                            &light,
                            [
                                mesh.positions()[i0],
                                mesh.positions()[i1],
                                mesh.positions()[i2],
                            ],
                        ));
                        fill_triangle(fb, v0, v1, v2, &shader);
                    }
                },
            }
        }
    }

    fn apply_input(&mut self, input: FrameInput) {
        if input.next_model && !self.models.is_empty() {
            self.current = (self.current + 1) % self.models.len();
            // A freshly selected model starts at rest.
            self.models[self.current].set_spinning(false);
        }
        if let Some(model) = self.models.get_mut(self.current) {
            if input.next_mode {
                model.advance_mode();
            }
            if input.toggle_spin {
                model.toggle_spinning();
            }
        }
    }

    /// Read a rendered pixel; test hook for pipeline-level assertions.
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<Color> {
        self.framebuffer.pixel_at(x, y)
    }
}

/// One Lambertian color for a whole face.
fn faceted_color(light: &PointLight, corners: [Vec3; 3]) -> Color {
    let intensity = light.face_intensity(corners);
    let rgb = light.intensity * intensity;
    Color::from_unit_rgb(f64::from(rgb.x), f64::from(rgb.y), f64::from(rgb.z))
}

//! Demo driver: loads models, runs the emulator and streams frames to SDL2.
//!
//! Usage: `softpipe [mesh.obj ...]`. With no arguments the built-in cube
//! and quad are shown. Keys: M next model, W next render mode, R toggle
//! rotation, Esc quit.

use softpipe::prelude::*;
use softpipe::window::{WINDOW_HEIGHT, WINDOW_WIDTH};

fn build_scene(engine: &mut Engine) -> Result<(), Box<dyn std::error::Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();

    if paths.is_empty() {
        engine.add_model(Model::new(Mesh::cube()).with_scale(1.5));
        engine.add_model(Model::new(Mesh::unit_quad()).with_scale(2.0));
        return Ok(());
    }

    for path in &paths {
        let mut model = Model::from_obj(path)?.with_scale(2.0);

        // A texture with the same stem as the mesh is picked up
        // automatically, trying the raw stream format first.
        let tex_path = std::path::Path::new(path).with_extension("tex");
        let png_path = std::path::Path::new(path).with_extension("png");
        if let Ok(texture) = Texture::from_tex(&tex_path) {
            model.set_texture(texture);
        } else if let Ok(texture) = Texture::from_file(&png_path) {
            model.set_texture(texture);
        }

        engine.add_model(model);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut window = Window::new("softpipe", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut engine = Engine::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    build_scene(&mut engine)?;

    let mut limiter = FrameLimiter::new(&window);

    loop {
        let event = window.poll_events();
        if event.quit {
            break;
        }
        if let Some((w, h)) = event.resize {
            engine.resize(w, h);
            window.resize(w, h)?;
        }

        engine.begin_frame();
        engine.emulate(event.input);
        window.present(engine.end_frame())?;

        let stats = engine.stats();
        window.set_title(&format!(
            "softpipe | Model: {} | Mode: {} | Vtx: {} | Tri: {} | Culled: {} | FPS: {:.0}",
            stats.model_name,
            stats.mode_name,
            stats.vertex_count,
            stats.triangle_count,
            stats.culled,
            limiter.fps(),
        ));

        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}

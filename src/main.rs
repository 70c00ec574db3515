// src/main.rs
use nannou::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use kinetype::{
    config::Config,
    effects::FrameInput,
    views::{KineticText, PixelCanvas},
    TileGridParams, TileParamsUpdate,
};

struct Model {
    // Core components:
    effect: KineticText,
    canvas: PixelCanvas,
    frame_count: u64,

    // Rendering components:
    texture: wgpu::Texture,

    // Output:
    output_dir: PathBuf,

    // FPS
    last_update: Instant,
    fps: f32,

    // Debug overlay
    debug_flag: bool,
}

fn main() {
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().expect("Failed to load config file");

    // Create window
    let window_id = app
        .new_window()
        .title("kinetype 0.2")
        .size(config.window.width, config.window.height)
        .msaa_samples(1)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .unwrap();
    let window = app.window(window_id).unwrap();

    // CPU canvas and the texture it is presented through
    let canvas = PixelCanvas::new(config.canvas.width, config.canvas.height);
    let texture = wgpu::TextureBuilder::new()
        .size([config.canvas.width, config.canvas.height])
        .usage(wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING)
        .sample_count(1)
        .format(wgpu::TextureFormat::Rgba8UnormSrgb)
        .build(window.device());

    let output_dir = config.resolve_output_dir();
    let effect = KineticText::from_config(&config).expect("Failed to build effect from config");

    Model {
        effect,
        canvas,
        frame_count: 0,

        texture,

        output_dir,

        last_update: Instant::now(),
        fps: 0.0,

        debug_flag: false,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // cycle words
        Key::T => {
            let word = model.effect.next_word();
            println!("Word: {word}");
        }
        Key::Y => {
            let word = model.effect.previous_word();
            println!("Word: {word}");
        }

        // cycle registered font families
        Key::F => {
            let families: Vec<String> = model
                .effect
                .available_fonts()
                .iter()
                .map(|s| s.to_string())
                .collect();
            if families.is_empty() {
                println!("No font families registered");
            } else {
                let current = model.effect.snapshot().font_family;
                let next = families
                    .iter()
                    .position(|f| *f == current)
                    .map(|i| (i + 1) % families.len())
                    .unwrap_or(0);
                model.effect.set_font_family(&families[next]);
            }
        }

        // effect parameter presets
        Key::Key1 => {
            match model.effect.set_tile_params(TileGridParams::default()) {
                Ok(()) => println!("Effect preset: stock"),
                Err(e) => eprintln!("{e}"),
            }
        }
        Key::Key2 => apply_preset(
            model,
            TileParamsUpdate {
                dispersion_x: Some(0.05),
                dispersion_y: Some(0.05),
                ..Default::default()
            },
            "both axes",
        ),
        Key::Key3 => apply_preset(
            model,
            TileParamsUpdate {
                dispersion_x: Some(0.0),
                dispersion_y: Some(0.05),
                ..Default::default()
            },
            "vertical",
        ),
        Key::Key4 => apply_preset(
            model,
            TileParamsUpdate {
                tiles_x: Some(8),
                tiles_y: Some(8),
                factor: Some(150.0),
                ..Default::default()
            },
            "coarse",
        ),
        Key::Key5 => apply_preset(
            model,
            TileParamsUpdate {
                tiles_x: Some(32),
                tiles_y: Some(32),
                factor: Some(60.0),
                ..Default::default()
            },
            "fine",
        ),

        Key::R => {
            if let Err(e) = model
                .effect
                .save_image(&model.canvas, &model.output_dir, None)
            {
                eprintln!("{e}");
            }
        }
        Key::X => model.effect.reset(),
        Key::P => {
            model.debug_flag = !model.debug_flag;
        }
        _ => (),
    }
}

fn apply_preset(model: &mut Model, update: TileParamsUpdate, label: &str) {
    match model.effect.update_tile_params(update) {
        Ok(()) => println!("Effect preset: {label}"),
        Err(e) => eprintln!("{e}"),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    let duration = now - model.last_update;
    model.last_update = now;
    model.fps = 1.0 / duration.as_secs_f32();

    // One explicit frame of input: frame counter plus the pointer mapped
    // onto canvas pixel coordinates (top-left origin).
    model.frame_count += 1;
    let input = FrameInput {
        frame_count: model.frame_count,
        pointer_x: pointer_to_canvas_x(app, model.canvas.width()),
        pointer_y: pointer_to_canvas_y(app, model.canvas.height()),
    };

    /******************  Main per-frame effect update  *******************/
    model.effect.render(&mut model.canvas, &input);
    /*********************************************************************/

    upload_canvas(app, model);
}

// Draw the presented texture into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);
    draw.texture(&model.texture).wh(app.window_rect().wh());

    if model.debug_flag {
        draw.text(&format!("FPS: {:.1}", model.fps))
            .x_y(app.window_rect().left() + 60.0, app.window_rect().top() - 20.0)
            .color(RED);
    }

    draw.to_frame(app, &frame).unwrap();
}

// ************************ Pointer mapping *****************************

fn pointer_to_canvas_x(app: &App, canvas_w: u32) -> f32 {
    let rect = app.window_rect();
    (app.mouse.x - rect.left()) * canvas_w as f32 / rect.w()
}

fn pointer_to_canvas_y(app: &App, canvas_h: u32) -> f32 {
    let rect = app.window_rect();
    (rect.top() - app.mouse.y) * canvas_h as f32 / rect.h()
}

// ************************ Canvas upload *******************************

fn upload_canvas(app: &App, model: &mut Model) {
    let window = app.main_window();
    let (width, height) = (model.canvas.width(), model.canvas.height());

    window.queue().write_texture(
        model.texture.as_image_copy(),
        model.canvas.raw(),
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

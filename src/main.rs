// src/main.rs
use log::{error, info, warn};
use nannou::prelude::*;

use pipevis::{
    animation::LogObserver,
    config::Config,
    controllers::{OscController, PipeCommand},
    models::PipeColor,
    render::{PauseOverlay, PipeCanvas},
    services::{build_sources, color_source::parse_hex_color, BlueprintRecipe, FetchWorker},
    views::PipeScene,
};

struct Model {
    // Core components:
    scene: PipeScene<PipeCanvas, FetchWorker>,

    // Comms components:
    osc_controller: Option<OscController>,

    // Style
    background: Rgb,
    overlay: PauseOverlay,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            std::process::exit(1);
        }
    };

    // Create window
    let window = app
        .new_window()
        .title(&config.window.title)
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .resized(resized)
        .build();
    if let Err(e) = window {
        error!("Failed to create window: {:?}", e);
        std::process::exit(1);
    }
    let rect = app.window_rect();

    // Wire the fetch pipeline
    let (directions, colors) = match build_sources(&config.sources, &config.pipes) {
        Ok(sources) => sources,
        Err(e) => {
            error!("Failed to set up sources: {}", e);
            std::process::exit(1);
        }
    };
    let recipe = BlueprintRecipe::new(&config.pipes, directions, colors);
    let mut scene = PipeScene::new(
        config.pipes.clone(),
        PipeCanvas::new(),
        FetchWorker::new(recipe),
        Box::new(LogObserver),
        rect.wh(),
    );
    if config.window.autoplay {
        scene.apply(PipeCommand::Play);
    }

    // Create OSC controller
    let osc_controller = if config.osc.enabled {
        match OscController::new(config.osc.rx_port) {
            Ok(controller) => {
                info!("Listening for OSC on port {}", config.osc.rx_port);
                Some(controller)
            }
            Err(e) => {
                warn!("OSC disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let background = parse_hex_color(&config.style.background).unwrap_or_else(|| {
        warn!("Bad background color {:?}, using white", config.style.background);
        PipeColor::new(255, 255, 255)
    });
    let background = to_rgb(background);

    Model {
        scene,
        osc_controller,
        background,
        overlay: PauseOverlay::new(background, config.style.pause_backdrop_opacity, rect),
    }
}

fn to_rgb(color: PipeColor) -> Rgb {
    rgb(
        color.red as f32 / 255.0,
        color.green as f32 / 255.0,
        color.blue as f32 / 255.0,
    )
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => model.scene.apply(PipeCommand::TogglePlaying),
        Key::C => model.scene.apply(PipeCommand::Clear),
        Key::K => model.scene.apply(PipeCommand::ToggleCollision),
        Key::Q => {
            model.scene.shutdown();
            app.quit();
        }
        _ => (),
    }
}

fn mouse_pressed(_app: &App, model: &mut Model, _button: MouseButton) {
    model.scene.apply(PipeCommand::TogglePlaying);
}

fn resized(app: &App, model: &mut Model, size: Vec2) {
    model.scene.on_resize(app.time, size);
}

fn update(app: &App, model: &mut Model, _update: Update) {
    // Process OSC messages
    if let Some(osc) = model.osc_controller.as_mut() {
        osc.process_messages();
        for command in osc.take_commands() {
            model.scene.apply(command);
        }
    }

    let events = model.scene.update(app.time);

    // Resizing settled: fit the overlay to the new window
    if events.debounce.is_some() {
        model.overlay.layout(app.window_rect());
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let rect = app.window_rect();

    draw.background().color(model.background);
    model.scene.surface().draw(&draw, rect);

    if !model.scene.is_playing() {
        model.overlay.draw(&draw);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!("Failed to render frame: {:?}", e);
    }
}

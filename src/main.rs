//! Flappy entry point
//!
//! Opens the window, wires the native platform into the game loop and steps it
//! once per displayed frame.

use std::sync::OnceLock;

use macroquad::prelude::{Conf, next_frame};

use flappy::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use flappy::platform::native::{NativeInput, NativeMedia, NativePresenter};
use flappy::{GameLoop, LoopControl, Settings};

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Logger and settings, set up on first use before the window opens
fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| {
        env_logger::init();
        Settings::load()
    })
}

fn window_conf() -> Conf {
    let scale = settings().window_scale as f32;
    Conf {
        window_title: "Flappy Bird".to_owned(),
        window_width: (SCREEN_WIDTH * scale) as i32,
        window_height: (SCREEN_HEIGHT * scale) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let settings = settings();
    log::info!("Flappy starting...");

    let seed = settings.seed.unwrap_or_else(rand::random);

    let mut game = GameLoop::new(
        NativeInput::new(),
        NativePresenter::new(),
        NativeMedia::new(settings),
        seed,
        settings.target_fps,
    );

    loop {
        match game.step() {
            Ok(LoopControl::Continue) => next_frame().await,
            Ok(LoopControl::Exit) => break,
            Err(e) => {
                log::error!("{e:#}");
                break;
            }
        }
    }
    log::info!("Flappy exiting");
}

//! Native backend: macroquad window and input, rodio audio

use std::path::PathBuf;
use std::time::{Duration, Instant};

use macroquad::prelude::{
    Color, DrawTextureParams, KeyCode, WHITE, clear_background, draw_texture_ex,
    get_keys_pressed, is_quit_requested, prevent_quit, screen_width, vec2,
};

use super::{InputSource, Key, MediaStore, Presenter, RawEvent};
use crate::assets::Assets;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::SCREEN_WIDTH;
use crate::renderer::{SpriteBatch, TextureCache};
use crate::settings::Settings;
use crate::sim::DrawCommand;

const CLEAR_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Keyboard and window-close events from macroquad
pub struct NativeInput;

impl NativeInput {
    /// Take over the window close button so it arrives as [`RawEvent::Quit`]
    pub fn new() -> Self {
        prevent_quit();
        Self
    }
}

impl Default for NativeInput {
    fn default() -> Self {
        Self::new()
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Space => Key::Space,
        KeyCode::Up => Key::Up,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

impl InputSource for NativeInput {
    fn poll_events(&mut self) -> Vec<RawEvent> {
        let mut events: Vec<RawEvent> = get_keys_pressed()
            .into_iter()
            .map(|code| RawEvent::KeyDown(map_key(code)))
            .collect();
        if is_quit_requested() {
            events.push(RawEvent::Quit);
        }
        events
    }
}

/// Draws sprite quads to the macroquad window, scaled to its width
pub struct NativePresenter {
    textures: TextureCache,
    batch: SpriteBatch,
    last_frame: Instant,
}

impl NativePresenter {
    pub fn new() -> Self {
        Self {
            textures: TextureCache::new(),
            batch: SpriteBatch::new(),
            last_frame: Instant::now(),
        }
    }
}

impl Default for NativePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for NativePresenter {
    fn draw(&mut self, assets: &Assets, command: &DrawCommand) {
        self.textures.get_or_upload(assets, command.sprite);
        self.batch.push(command, assets);
    }

    fn present(&mut self) {
        let scale = screen_width() / SCREEN_WIDTH;
        clear_background(CLEAR_COLOR);
        for quad in self.batch.take() {
            let Some(texture) = self.textures.get(quad.sprite) else {
                continue;
            };
            let quad = quad.scaled(scale);
            draw_texture_ex(
                texture,
                quad.pos.x,
                quad.pos.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(quad.size.x, quad.size.y)),
                    rotation: quad.rotation,
                    ..Default::default()
                },
            );
        }
    }

    /// Sleeps out whatever is left of the tick budget. `last_frame` is taken
    /// after the sleep, so the caller's `next_frame().await` vsync wait counts
    /// toward the following tick's budget instead of adding to it; the tick
    /// period is the budget rounded up to the display's refresh interval.
    fn wait_for_next_frame(&mut self, target_fps: u32) -> f32 {
        let left = frame_budget_left(self.last_frame.elapsed(), target_fps);
        if !left.is_zero() {
            std::thread::sleep(left);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }
}

/// Time still to wait before a tick at `target_fps` is due
fn frame_budget_left(elapsed: Duration, target_fps: u32) -> Duration {
    let budget = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
    budget.saturating_sub(elapsed)
}

/// Sprites from disk and sound through rodio
pub struct NativeMedia {
    asset_dir: PathBuf,
    settings: Settings,
    audio: Option<AudioManager>,
}

impl NativeMedia {
    pub fn new(settings: &Settings) -> Self {
        Self {
            asset_dir: settings.asset_dir.clone(),
            settings: settings.clone(),
            audio: None,
        }
    }
}

impl MediaStore for NativeMedia {
    fn acquire(&mut self) -> anyhow::Result<Assets> {
        log::info!("loading assets from {}", self.asset_dir.display());
        let assets = Assets::load(&self.asset_dir)?;
        self.audio = Some(AudioManager::new(&self.asset_dir, &self.settings));
        Ok(assets)
    }

    fn play(&mut self, effect: SoundEffect) {
        if let Some(audio) = &self.audio {
            audio.play(effect);
        }
    }

    fn release(&mut self) {
        if self.audio.take().is_some() {
            log::info!("audio released");
        }
    }
}

//! Platform abstraction layer
//!
//! The game loop only talks to the outside world through these traits:
//! - `InputSource`: raw key and window events
//! - `Presenter`: sprite drawing and frame pacing
//! - `MediaStore`: asset acquisition/release and sound playback
//!
//! `native` implements them on top of macroquad and rodio.

pub mod native;

use crate::assets::Assets;
use crate::audio::SoundEffect;
use crate::sim::{DrawCommand, GameInput};

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    Escape,
    Other,
}

/// Event as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// Window close requested
    Quit,
    KeyDown(Key),
}

/// Source of raw input events
pub trait InputSource {
    /// Events since the last poll; a failed poll returns none
    fn poll_events(&mut self) -> Vec<RawEvent>;
}

/// Sprite sink and frame clock
pub trait Presenter {
    /// Queue one sprite for the current frame
    fn draw(&mut self, assets: &Assets, command: &DrawCommand);
    /// Show everything drawn since the last present
    fn present(&mut self);
    /// Block until the next frame is due; returns seconds since the last call
    fn wait_for_next_frame(&mut self, target_fps: u32) -> f32;
}

/// Owner of images and sounds
pub trait MediaStore {
    fn acquire(&mut self) -> anyhow::Result<Assets>;
    fn play(&mut self, effect: SoundEffect);
    fn release(&mut self);
}

/// Collapse one poll's events into the tick input; exit wins over action
pub fn translate_events(events: &[RawEvent]) -> GameInput {
    let mut input = GameInput::Idle;
    for event in events {
        match event {
            RawEvent::Quit | RawEvent::KeyDown(Key::Escape) => return GameInput::Exit,
            RawEvent::KeyDown(Key::Space | Key::Up) => input = GameInput::Action,
            RawEvent::KeyDown(Key::Other) => {}
        }
    }
    input
}

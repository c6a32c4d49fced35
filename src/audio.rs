//! Audio system using rodio
//!
//! Sound effects are read from `<asset_dir>/audio/*.ogg`. A missing file falls
//! back to a short synthesized tone, and a missing output device disables audio.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, Sink};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player hit the ground
    Die,
    /// Player crashed into a pipe or the ground
    Hit,
    /// Pipe pair passed
    Point,
    /// Player flapped
    Wing,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [Self::Die, Self::Hit, Self::Point, Self::Wing];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Die => "die.ogg",
            SoundEffect::Hit => "hit.ogg",
            SoundEffect::Point => "point.ogg",
            SoundEffect::Wing => "wing.ogg",
        }
    }

    /// Fallback tone: (start frequency, end frequency, length in ms)
    fn tone(self) -> (f32, f32, u64) {
        match self {
            // Sad descending
            SoundEffect::Die => (400.0, 150.0, 300),
            // Solid thump
            SoundEffect::Hit => (150.0, 60.0, 100),
            // Happy ding
            SoundEffect::Point => (800.0, 1000.0, 120),
            // Whoosh up
            SoundEffect::Wing => (300.0, 600.0, 60),
        }
    }
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Flap => SoundEffect::Wing,
            GameEvent::Score => SoundEffect::Point,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::Die => SoundEffect::Die,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    stream: Option<OutputStream>,
    clips: HashMap<SoundEffect, Arc<[u8]>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// Open the default output device and read the effect files under `dir`
    pub fn new(dir: &Path, settings: &Settings) -> Self {
        let stream = match rodio::OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                log::warn!("Failed to open audio output ({e}) - audio disabled");
                None
            }
        };

        let audio_dir = dir.join("audio");
        let mut clips = HashMap::new();
        for effect in SoundEffect::ALL {
            let path = audio_dir.join(effect.file_name());
            match std::fs::read(&path) {
                Ok(bytes) => {
                    clips.insert(effect, Arc::from(bytes));
                }
                Err(e) => log::warn!("{}: {e}, using synthesized tone", path.display()),
            }
        }

        let mut audio = Self::silent();
        audio.stream = stream;
        audio.clips = clips;
        audio.apply_settings(settings);
        audio
    }

    /// Manager without an output device; `play` is a no-op
    pub fn silent() -> Self {
        Self {
            stream: None,
            clips: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect without waiting for it to finish
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(stream) = &self.stream else { return };

        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(vol);
        match self.clips.get(&effect) {
            Some(bytes) => match Decoder::new(Cursor::new(bytes.clone())) {
                Ok(source) => sink.append(source),
                Err(e) => {
                    log::warn!("Failed to decode {}: {e}", effect.file_name());
                    return;
                }
            },
            None => Self::append_tone(&sink, effect),
        }
        sink.detach();
    }

    /// Two-step tone from the effect's start to end frequency
    fn append_tone(sink: &Sink, effect: SoundEffect) {
        let (start, end, ms) = effect.tone();
        let half = Duration::from_millis(ms / 2);
        sink.append(SineWave::new(start).take_duration(half).amplify(0.3));
        sink.append(SineWave::new(end).take_duration(half).amplify(0.2));
    }
}

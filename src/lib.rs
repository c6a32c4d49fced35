//! Flappy - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scene state machine, physics, collisions)
//! - `game_loop`: Fixed-rate tick driver over the platform traits
//! - `platform`: Input/presentation/media abstraction and the native backend
//! - `renderer`: Sprite texture cache for the native presenter
//! - `assets`: Decoded sprite images and procedural placeholders
//! - `audio`: Sound effects
//! - `settings`: User configuration

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{Assets, SpriteImage};
pub use game_loop::{GameLoop, LoopControl};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target tick rate
    pub const TARGET_FPS: u32 = 30;
    /// Largest frame time fed into the obstacle velocity (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen dimensions (logical pixels)
    pub const SCREEN_WIDTH: f32 = 288.0;
    pub const SCREEN_HEIGHT: f32 = 512.0;
    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = SCREEN_HEIGHT * 0.79;

    /// Player column (fraction of screen width)
    pub const PLAYER_X_RATIO: f32 = 0.2;
    /// Welcome message top (fraction of screen height)
    pub const MESSAGE_Y_RATIO: f32 = 0.12;
    /// Score digits top (fraction of screen height)
    pub const SCORE_Y_RATIO: f32 = 0.1;
    /// Game over banner position
    pub const GAME_OVER_POS: (f32, f32) = (50.0, 180.0);

    /// Vertical gap between upper and lower pipe
    pub const PIPE_GAP: f32 = 100.0;
    /// First pipe pair spawns this far past the right edge at Fly entry
    pub const PIPE_FIRST_OFFSET: f32 = 200.0;
    /// Later pairs spawn this far past the right edge
    pub const PIPE_SPAWN_OFFSET: f32 = 10.0;
    /// Horizontal distance between pairs
    pub const PIPE_SPACING: f32 = SCREEN_WIDTH / 2.0;
    /// Pipe scroll speed (pixels/second)
    pub const PIPE_SPEED: f32 = 128.0;
    /// Never more than this many pairs on screen
    pub const MAX_LIVE_PIPES: usize = 3;
    /// Minimum width of the scoring band
    pub const SCORE_BAND: f32 = 4.0;

    /// Flight physics (pixels/tick, degrees/tick)
    pub const FLY_GRAVITY: f32 = 1.0;
    pub const MIN_VEL_Y: f32 = -8.0;
    pub const MAX_VEL_Y: f32 = 10.0;
    pub const FLAP_VEL_Y: f32 = -9.0;
    pub const FLY_ROT_RATE: f32 = 3.0;
    /// Rotation shown while flying never exceeds this
    pub const VISIBLE_ROT_THRESHOLD: f32 = 20.0;
    pub const FLAP_ROTATION: f32 = 45.0;
    pub const MIN_ROTATION: f32 = -90.0;
    pub const MAX_ROTATION: f32 = 90.0;

    /// Death fall physics
    pub const FALL_GRAVITY: f32 = 2.0;
    pub const FALL_ROT_RATE: f32 = 7.0;
    pub const FALL_MAX_VEL_Y: f32 = 15.0;

    /// Welcome bobbing amplitude (pixels); the period is twice this in ticks
    pub const BOB_AMPLITUDE: i64 = 8;
    /// Ticks between animation frames
    pub const WELCOME_ANIM_TICKS: u32 = 5;
    pub const FLY_ANIM_TICKS: u32 = 3;
    /// Wing animation loop counter wraps at this value
    pub const ANIM_LOOP: u32 = 30;
    /// Wing frame sequence (up, mid, down, mid)
    pub const PLAYER_FRAME_CYCLE: [usize; 4] = [0, 1, 2, 1];
    /// Ground scroll per tick
    pub const WELCOME_SCROLL: f32 = 4.0;
    pub const FLY_SCROLL: f32 = 100.0;
}

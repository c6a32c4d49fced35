//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per displayed frame
//! - Seeded RNG only
//! - Output is a [`Frame`] of draw commands and events, never direct I/O

pub mod collision;
pub mod frame;
pub mod mask;
pub mod pipes;
pub mod player;
pub mod scene;
pub mod state;
pub mod tick;

pub use collision::{Crash, PipeMasks, check_crash, pixel_collision};
pub use frame::{DrawCommand, Frame, GameEvent, SpriteId};
pub use mask::{HitMask, PixelRect};
pub use pipes::{PipePair, PipeStream, generate_pair, random_gap_top};
pub use player::{Player, PlayerPhysics};
pub use scene::{Scene, SceneEvent, transition};
pub use state::{GameState, Theme, bob_offset};
pub use tick::{GameInput, TickInput, tick};

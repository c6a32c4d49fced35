//! Per-tick simulation output: draw commands and game events
//!
//! Draw order matters: later commands paint over earlier ones.

use glam::Vec2;

/// A sprite in the asset set; skin indices come from the run's theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background(usize),
    Player { skin: usize, frame: usize },
    PipeUpper(usize),
    PipeLower(usize),
    Base,
    Message,
    GameOver,
    Digit(u8),
}

/// Draw one sprite with its top-left corner at `pos`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    pub pos: Vec2,
    /// Degrees, counter-clockwise positive, about the sprite center
    pub rotation: f32,
}

impl DrawCommand {
    pub fn new(sprite: SpriteId, pos: Vec2) -> Self {
        Self {
            sprite,
            pos,
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Side effects requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player flapped
    Flap,
    /// A pipe pair was passed
    Score,
    /// Player crashed
    Hit,
    /// Player died on the ground
    Die,
}

/// Everything one tick produced
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub draws: Vec<DrawCommand>,
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn draw(&mut self, sprite: SpriteId, pos: Vec2) {
        self.draws.push(DrawCommand::new(sprite, pos));
    }

    pub fn draw_rotated(&mut self, sprite: SpriteId, pos: Vec2, degrees: f32) {
        self.draws.push(DrawCommand::new(sprite, pos).rotated(degrees));
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

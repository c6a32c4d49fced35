//! Screen-space quads for one frame

use glam::Vec2;

use crate::assets::Assets;
use crate::sim::{DrawCommand, SpriteId};

/// One textured rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteQuad {
    pub sprite: SpriteId,
    /// Top-left corner before rotation
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, clockwise on screen, about the quad center
    pub rotation: f32,
}

impl SpriteQuad {
    pub fn from_command(command: &DrawCommand, assets: &Assets) -> Self {
        let image = assets.sprite(command.sprite);
        Self {
            sprite: command.sprite,
            pos: command.pos,
            size: Vec2::new(image.width as f32, image.height as f32),
            // Screen y points down, so counter-clockwise degrees flip sign
            rotation: -command.rotation.to_radians(),
        }
    }

    /// Same quad on a window `scale` times the playfield size
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            pos: self.pos * scale,
            size: self.size * scale,
            ..*self
        }
    }
}

/// Quads queued since the last present, in paint order
#[derive(Debug, Default)]
pub struct SpriteBatch {
    quads: Vec<SpriteQuad>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: &DrawCommand, assets: &Assets) {
        self.quads.push(SpriteQuad::from_command(command, assets));
    }

    /// Hand the queued quads over and start an empty batch
    pub fn take(&mut self) -> Vec<SpriteQuad> {
        std::mem::take(&mut self.quads)
    }
}

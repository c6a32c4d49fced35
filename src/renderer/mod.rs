//! Sprite rendering module
//!
//! Draw commands are resolved to screen-space quads in a [`SpriteBatch`], then
//! drawn with textures from the [`TextureCache`].

pub mod sprite_batch;
pub mod textures;

pub use sprite_batch::{SpriteBatch, SpriteQuad};
pub use textures::TextureCache;

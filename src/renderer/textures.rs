//! GPU textures for sprite images, uploaded on first use

use std::collections::HashMap;

use macroquad::prelude::{FilterMode, Texture2D};

use crate::assets::Assets;
use crate::sim::SpriteId;

#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<SpriteId, Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `id`, uploading it from `assets` if needed
    pub fn get_or_upload(&mut self, assets: &Assets, id: SpriteId) -> &Texture2D {
        self.textures
            .entry(id)
            .or_insert_with(|| {
                let image = assets.sprite(id);
                let texture =
                    Texture2D::from_rgba8(image.width as u16, image.height as u16, &image.rgba);
                texture.set_filter(FilterMode::Nearest);
                log::trace!("uploaded {:?} ({}x{})", id, image.width, image.height);
                texture
            })
    }

    pub fn get(&self, id: SpriteId) -> Option<&Texture2D> {
        self.textures.get(&id)
    }
}

//! Sprite images and the asset set
//!
//! Sprites are decoded once at startup into plain RGBA buffers. Any sprite file
//! that is missing is replaced by a procedurally drawn placeholder, so the game
//! runs without an asset directory.

use std::path::Path;

use anyhow::Context;

use crate::sim::SpriteId;

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(rgba.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Decode an image file
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("failed to decode sprite {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::new(width, height, img.into_raw()))
    }

    /// Build an image by evaluating `paint` for every pixel
    pub fn painted(width: u32, height: u32, paint: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&paint(x, y));
            }
        }
        Self::new(width, height, rgba)
    }

    /// Alpha of the pixel at (x, y); 0 outside the image
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.rgba[((y * self.width + x) * 4 + 3) as usize]
    }

    /// Upside-down copy
    pub fn flipped_vertically(&self) -> Self {
        let row = (self.width * 4) as usize;
        let rgba = self.rgba.chunks_exact(row).rev().flatten().copied().collect();
        Self::new(self.width, self.height, rgba)
    }
}

/// Upper (flipped) and lower pipe images of one skin
#[derive(Debug, Clone)]
pub struct PipeSkin {
    pub upper: SpriteImage,
    pub lower: SpriteImage,
}

impl PipeSkin {
    pub fn from_lower(lower: SpriteImage) -> Self {
        Self {
            upper: lower.flipped_vertically(),
            lower,
        }
    }
}

const DIGIT_COUNT: usize = 10;
const BACKGROUND_FILES: [&str; 2] = ["background-day.png", "background-night.png"];
const PLAYER_COLORS: [&str; 3] = ["red", "blue", "yellow"];
const WING_FRAMES: [&str; 3] = ["upflap", "midflap", "downflap"];
const PIPE_FILES: [&str; 2] = ["pipe-green.png", "pipe-red.png"];

/// Every image the game draws
///
/// Skin lists are never empty; the theme indexes into them.
#[derive(Debug, Clone)]
pub struct Assets {
    pub digits: Vec<SpriteImage>,
    pub message: SpriteImage,
    pub game_over: SpriteImage,
    pub base: SpriteImage,
    pub backgrounds: Vec<SpriteImage>,
    pub players: Vec<[SpriteImage; 3]>,
    pub pipes: Vec<PipeSkin>,
}

impl Assets {
    /// Load sprites from `<dir>/sprites`, falling back to placeholders for
    /// missing files. A file that exists but fails to decode is an error.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let sprites = dir.join("sprites");
        let load = |name: &str, fallback: &dyn Fn() -> SpriteImage| -> anyhow::Result<SpriteImage> {
            let path = sprites.join(name);
            if path.is_file() {
                SpriteImage::open(&path)
            } else {
                log::warn!("{} not found, using placeholder", path.display());
                Ok(fallback())
            }
        };

        let digits = (0..DIGIT_COUNT)
            .map(|d| load(&format!("{d}.png"), &|| placeholder::digit(d as u8)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let backgrounds = BACKGROUND_FILES
            .iter()
            .enumerate()
            .map(|(i, name)| load(name, &|| placeholder::background(i)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut players = Vec::with_capacity(PLAYER_COLORS.len());
        for (skin, color) in PLAYER_COLORS.iter().enumerate() {
            let [up, mid, down] = WING_FRAMES;
            players.push([
                load(&format!("{color}bird-{up}.png"), &|| placeholder::bird(skin, 0))?,
                load(&format!("{color}bird-{mid}.png"), &|| placeholder::bird(skin, 1))?,
                load(&format!("{color}bird-{down}.png"), &|| placeholder::bird(skin, 2))?,
            ]);
        }

        let pipes = PIPE_FILES
            .iter()
            .enumerate()
            .map(|(i, name)| load(name, &|| placeholder::pipe(i)).map(PipeSkin::from_lower))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let assets = Self {
            digits,
            message: load("message.png", &placeholder::message)?,
            game_over: load("gameover.png", &placeholder::game_over)?,
            base: load("base.png", &placeholder::base)?,
            backgrounds,
            players,
            pipes,
        };
        log::info!(
            "loaded {} backgrounds, {} player skins, {} pipe skins",
            assets.backgrounds.len(),
            assets.players.len(),
            assets.pipes.len()
        );
        Ok(assets)
    }

    /// Complete procedural asset set
    pub fn placeholder() -> Self {
        Self {
            digits: (0..DIGIT_COUNT as u8).map(placeholder::digit).collect(),
            message: placeholder::message(),
            game_over: placeholder::game_over(),
            base: placeholder::base(),
            backgrounds: (0..BACKGROUND_FILES.len()).map(placeholder::background).collect(),
            players: (0..PLAYER_COLORS.len())
                .map(|skin| [0, 1, 2].map(|frame| placeholder::bird(skin, frame)))
                .collect(),
            pipes: (0..PIPE_FILES.len())
                .map(|i| PipeSkin::from_lower(placeholder::pipe(i)))
                .collect(),
        }
    }

    pub fn background(&self, index: usize) -> &SpriteImage {
        &self.backgrounds[index % self.backgrounds.len()]
    }

    pub fn player_frames(&self, skin: usize) -> &[SpriteImage; 3] {
        &self.players[skin % self.players.len()]
    }

    pub fn pipe_skin(&self, skin: usize) -> &PipeSkin {
        &self.pipes[skin % self.pipes.len()]
    }

    pub fn digit(&self, digit: u8) -> &SpriteImage {
        &self.digits[digit as usize % self.digits.len()]
    }

    /// Image for a draw command's sprite
    pub fn sprite(&self, id: SpriteId) -> &SpriteImage {
        match id {
            SpriteId::Background(i) => self.background(i),
            SpriteId::Player { skin, frame } => &self.player_frames(skin)[frame.min(2)],
            SpriteId::PipeUpper(i) => &self.pipe_skin(i).upper,
            SpriteId::PipeLower(i) => &self.pipe_skin(i).lower,
            SpriteId::Base => &self.base,
            SpriteId::Message => &self.message,
            SpriteId::GameOver => &self.game_over,
            SpriteId::Digit(d) => self.digit(d),
        }
    }
}

/// Stand-in art drawn in code, sized like the classic sprite sheet
mod placeholder {
    use super::SpriteImage;

    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    pub fn background(variant: usize) -> SpriteImage {
        let (sky, city) = if variant % 2 == 0 {
            ([78, 192, 202, 255], [140, 214, 170, 255])
        } else {
            ([0, 135, 147, 255], [30, 90, 110, 255])
        };
        SpriteImage::painted(288, 512, |x, y| {
            // Skyline band above the ground line
            let roof = 330 + ((x / 16) * 7 % 30);
            if y >= roof { city } else { sky }
        })
    }

    pub fn bird(skin: usize, frame: usize) -> SpriteImage {
        let body = match skin % 3 {
            0 => [214, 60, 40, 255],
            1 => [60, 130, 214, 255],
            _ => [240, 200, 40, 255],
        };
        let wing_y = [6, 11, 16][frame % 3];
        SpriteImage::painted(34, 24, |x, y| {
            let dx = (x as f32 + 0.5 - 17.0) / 17.0;
            let dy = (y as f32 + 0.5 - 12.0) / 12.0;
            if dx * dx + dy * dy > 1.0 {
                return CLEAR;
            }
            if (22..26).contains(&x) && (6..10).contains(&y) {
                [255, 255, 255, 255]
            } else if (5..15).contains(&x) && (wing_y..wing_y + 4).contains(&y) {
                [250, 240, 220, 255]
            } else if x >= 28 && (12..16).contains(&y) {
                [250, 120, 30, 255]
            } else {
                body
            }
        })
    }

    pub fn pipe(variant: usize) -> SpriteImage {
        let (fill, edge) = if variant % 2 == 0 {
            ([116, 191, 46, 255], [84, 56, 71, 255])
        } else {
            ([220, 80, 40, 255], [84, 56, 71, 255])
        };
        SpriteImage::painted(52, 320, |x, y| {
            let lip = y < 24;
            let border = x < 4 || x >= 48 || y < 2 || y == 22 || y == 23;
            if !lip && (x < 2 || x >= 50) {
                // Shaft is narrower than the lip
                CLEAR
            } else if border {
                edge
            } else {
                fill
            }
        })
    }

    pub fn base() -> SpriteImage {
        SpriteImage::painted(336, 112, |x, y| {
            if y < 4 {
                [84, 56, 71, 255]
            } else if y < 16 {
                // Diagonal stripes make the scroll visible
                if (x + y) / 8 % 2 == 0 { [156, 230, 89, 255] } else { [115, 191, 46, 255] }
            } else {
                [222, 216, 149, 255]
            }
        })
    }

    pub fn message() -> SpriteImage {
        SpriteImage::painted(184, 267, |x, y| {
            let border = x < 3 || x >= 181 || y < 3 || y >= 264;
            if border { [84, 56, 71, 220] } else { [250, 250, 240, 160] }
        })
    }

    pub fn game_over() -> SpriteImage {
        SpriteImage::painted(192, 42, |x, y| {
            let border = x < 3 || x >= 189 || y < 3 || y >= 39;
            if border { [255, 255, 255, 255] } else { [232, 97, 1, 255] }
        })
    }

    /// Seven-segment glyph
    pub fn digit(d: u8) -> SpriteImage {
        const SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];
        let lit = SEGMENTS[d as usize % 10];
        SpriteImage::painted(24, 36, |x, y| {
            let horizontal = (4..20).contains(&x);
            let left = (2..6).contains(&x);
            let right = (18..22).contains(&x);
            let upper = (4..18).contains(&y);
            let lower = (18..32).contains(&y);
            let on = [
                horizontal && (2..6).contains(&y),   // a
                right && upper,                      // b
                right && lower,                      // c
                horizontal && (30..34).contains(&y), // d
                left && lower,                       // e
                left && upper,                       // f
                horizontal && (16..20).contains(&y), // g
            ];
            let solid = on.iter().enumerate().any(|(bit, &hit)| hit && lit & (1 << bit) != 0);
            if solid { [255, 255, 255, 255] } else { CLEAR }
        })
    }
}

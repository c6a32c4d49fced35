//! Pixel rectangles and per-pixel opacity masks
//!
//! A hit mask is the alpha channel of a sprite reduced to booleans. It is
//! computed once per chosen skin and reused for every collision query.

use glam::Vec2;

use crate::assets::SpriteImage;

/// Integer axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect for a sprite drawn at a float position (truncates toward zero)
    pub fn at(pos: Vec2, width: u32, height: u32) -> Self {
        Self::new(pos.x as i32, pos.y as i32, width as i32, height as i32)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when the rect covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Intersection with another rect; zero-sized when they do not overlap
    pub fn clip(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return PixelRect::new(x, y, 0, 0);
        }
        PixelRect::new(x, y, right - x, bottom - y)
    }
}

/// Opacity table indexed `[x][y]`, stored column by column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMask {
    width: u32,
    height: u32,
    opaque: Vec<bool>,
}

impl HitMask {
    /// Build a mask from an alpha lookup; a pixel is solid when alpha is non-zero
    pub fn from_alpha(width: u32, height: u32, alpha: impl Fn(u32, u32) -> u8) -> Self {
        let mut opaque = Vec::with_capacity((width * height) as usize);
        for x in 0..width {
            for y in 0..height {
                opaque.push(alpha(x, y) != 0);
            }
        }
        Self {
            width,
            height,
            opaque,
        }
    }

    pub fn from_sprite(image: &SpriteImage) -> Self {
        Self::from_alpha(image.width, image.height, |x, y| image.alpha_at(x, y))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at a local coordinate; outside the mask is transparent
    #[inline]
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        self.opaque[(x as u32 * self.height + y as u32) as usize]
    }

    /// Rect covered by this mask when drawn at `pos`
    pub fn rect_at(&self, pos: Vec2) -> PixelRect {
        PixelRect::at(pos, self.width, self.height)
    }
}

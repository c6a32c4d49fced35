//! Pixel-exact collision between the player and the pipes
//!
//! Rects are clipped against each other first, so the per-pixel scan never
//! reads outside either mask and disjoint sprites cost a single comparison.

use glam::Vec2;

use super::mask::{HitMask, PixelRect};
use super::pipes::PipePair;

/// Outcome of a crash test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crash {
    #[default]
    None,
    /// Lower edge reached the ground line
    Ground,
    /// Overlapping opaque pixels with a pipe
    Pipe,
}

impl Crash {
    #[inline]
    pub fn is_crash(self) -> bool {
        self != Crash::None
    }
}

/// Masks for the two pipe orientations of the current skin
#[derive(Debug, Clone, Default)]
pub struct PipeMasks {
    pub upper: HitMask,
    pub lower: HitMask,
}

/// True if any pixel is opaque in both masks where the rects overlap
pub fn pixel_collision(rect1: PixelRect, rect2: PixelRect, mask1: &HitMask, mask2: &HitMask) -> bool {
    let overlap = rect1.clip(&rect2);
    if overlap.is_empty() {
        return false;
    }

    let (x1, y1) = (overlap.x - rect1.x, overlap.y - rect1.y);
    let (x2, y2) = (overlap.x - rect2.x, overlap.y - rect2.y);

    for x in 0..overlap.w {
        for y in 0..overlap.h {
            if mask1.is_opaque(x1 + x, y1 + y) && mask2.is_opaque(x2 + x, y2 + y) {
                return true;
            }
        }
    }
    false
}

/// Test the player against the ground line and every live pipe pair
///
/// The ground test runs first and needs no mask. Pipe tests stop at the first
/// overlapping pixel.
pub fn check_crash(
    body_pos: Vec2,
    body_mask: &HitMask,
    pipes: &[PipePair],
    pipe_masks: &PipeMasks,
    ground_y: f32,
) -> Crash {
    if body_pos.y + body_mask.height() as f32 >= ground_y - 1.0 {
        return Crash::Ground;
    }

    let body = body_mask.rect_at(body_pos);
    let (pipe_w, pipe_h) = (pipe_masks.lower.width(), pipe_masks.lower.height());

    let hit = pipes.iter().any(|pair| {
        pixel_collision(body, pair.upper_rect(pipe_w, pipe_h), body_mask, &pipe_masks.upper)
            || pixel_collision(body, pair.lower_rect(pipe_w, pipe_h), body_mask, &pipe_masks.lower)
    });

    if hit { Crash::Pipe } else { Crash::None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_Y;

    fn solid(w: u32, h: u32) -> HitMask {
        HitMask::from_alpha(w, h, |_, _| 255)
    }

    /// Checkerboard: opaque where x + y is even
    fn checker(w: u32, h: u32, phase: u32) -> HitMask {
        HitMask::from_alpha(w, h, |x, y| if (x + y + phase) % 2 == 0 { 255 } else { 0 })
    }

    fn pipe_masks() -> PipeMasks {
        PipeMasks {
            upper: solid(52, 320),
            lower: solid(52, 320),
        }
    }

    #[test]
    fn test_pixel_collision_disjoint_rects() {
        let m = solid(10, 10);
        let a = PixelRect::new(0, 0, 10, 10);
        let b = PixelRect::new(10, 0, 10, 10);
        assert!(!pixel_collision(a, b, &m, &m));
    }

    #[test]
    fn test_pixel_collision_overlap_without_shared_pixels() {
        // Same position, opposite checker phases: rects overlap fully but no
        // pixel is solid in both
        let a = checker(8, 8, 0);
        let b = checker(8, 8, 1);
        let r = PixelRect::new(5, 5, 8, 8);
        assert!(!pixel_collision(r, r, &a, &b));
        assert!(pixel_collision(r, r, &a, &a));
    }

    #[test]
    fn test_pixel_collision_single_shared_pixel() {
        // Only the bottom-right corner of `a` and the top-left of `b` are solid
        let a = HitMask::from_alpha(4, 4, |x, y| if x == 3 && y == 3 { 1 } else { 0 });
        let b = HitMask::from_alpha(4, 4, |x, y| if x == 0 && y == 0 { 1 } else { 0 });
        let ra = PixelRect::new(0, 0, 4, 4);
        assert!(pixel_collision(ra, PixelRect::new(3, 3, 4, 4), &a, &b));
        assert!(!pixel_collision(ra, PixelRect::new(2, 3, 4, 4), &a, &b));
    }

    #[test]
    fn test_ground_crash_without_pipes() {
        let body = solid(34, 24);
        let pos = Vec2::new(57.0, GROUND_Y - 24.0 - 1.0);
        assert_eq!(check_crash(pos, &body, &[], &pipe_masks(), GROUND_Y), Crash::Ground);
        let pos = Vec2::new(57.0, GROUND_Y - 24.0 - 2.0);
        assert_eq!(check_crash(pos, &body, &[], &pipe_masks(), GROUND_Y), Crash::None);
    }

    #[test]
    fn test_ground_wins_over_pipe() {
        let body = solid(34, 24);
        let pair = PipePair::new(57.0, 100.0);
        let pos = Vec2::new(57.0, GROUND_Y - 10.0);
        assert_eq!(check_crash(pos, &body, &[pair], &pipe_masks(), GROUND_Y), Crash::Ground);
    }

    #[test]
    fn test_pipe_crash_upper_and_lower() {
        let body = solid(34, 24);
        let pair = PipePair::new(60.0, 150.0);
        let masks = pipe_masks();

        // Inside the gap
        let pos = Vec2::new(57.0, 180.0);
        assert_eq!(check_crash(pos, &body, &[pair], &masks, GROUND_Y), Crash::None);
        // Poking into the upper pipe
        let pos = Vec2::new(57.0, 140.0);
        assert_eq!(check_crash(pos, &body, &[pair], &masks, GROUND_Y), Crash::Pipe);
        // Poking into the lower pipe
        let pos = Vec2::new(57.0, 230.0);
        assert_eq!(check_crash(pos, &body, &[pair], &masks, GROUND_Y), Crash::Pipe);
    }

    #[test]
    fn test_transparent_corner_near_pipe() {
        // Body whose left half is transparent: its rect overlaps the pipe, its
        // pixels do not
        let body = HitMask::from_alpha(34, 24, |x, _| if x >= 17 { 255 } else { 0 });
        let pair = PipePair::new(0.0, 150.0);
        let pos = Vec2::new(40.0, 140.0);
        assert_eq!(check_crash(pos, &body, &[pair], &pipe_masks(), GROUND_Y), Crash::None);
        let pos = Vec2::new(30.0, 140.0);
        assert_eq!(check_crash(pos, &body, &[pair], &pipe_masks(), GROUND_Y), Crash::Pipe);
    }
}

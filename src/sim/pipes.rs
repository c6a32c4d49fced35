//! Obstacle stream: paired upper/lower pipes with a random gap
//!
//! Pairs are kept in ascending `x`. The stream only generates a new pair when
//! the lead pair reaches the left edge, which is what keeps pairs spaced.

use glam::Vec2;
use rand::Rng;

use super::mask::PixelRect;
use crate::consts::*;

/// One upper/lower pipe pair sharing a gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    /// Left edge of both pipes
    pub x: f32,
    /// Bottom edge of the upper pipe
    pub gap_top: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl PipePair {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            scored: false,
        }
    }

    /// Top edge of the lower pipe
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + PIPE_GAP
    }

    /// Draw position of the upper pipe sprite
    pub fn upper_pos(&self, pipe_height: u32) -> Vec2 {
        Vec2::new(self.x, self.gap_top - pipe_height as f32)
    }

    /// Draw position of the lower pipe sprite
    pub fn lower_pos(&self) -> Vec2 {
        Vec2::new(self.x, self.gap_bottom())
    }

    pub fn upper_rect(&self, width: u32, height: u32) -> PixelRect {
        PixelRect::at(self.upper_pos(height), width, height)
    }

    pub fn lower_rect(&self, width: u32, height: u32) -> PixelRect {
        PixelRect::at(self.lower_pos(), width, height)
    }

    /// Horizontal midpoint
    #[inline]
    pub fn mid_x(&self, width: u32) -> f32 {
        self.x + width as f32 / 2.0
    }
}

/// Draw a gap top uniformly over the band that leaves room above and below
pub fn random_gap_top<R: Rng>(rng: &mut R, ground_y: f32) -> f32 {
    let base = (ground_y * 0.2) as i32;
    let span = ((ground_y * 0.6 - PIPE_GAP) as i32).max(1);
    (base + rng.random_range(0..span)) as f32
}

/// Generate a pair at `x` with a random gap
pub fn generate_pair<R: Rng>(rng: &mut R, ground_y: f32, x: f32) -> PipePair {
    PipePair::new(x, random_gap_top(rng, ground_y))
}

/// Lead pair x below which the next pair spawns
const SPAWN_WINDOW: f32 = 5.0;

/// Live pipe pairs plus their scroll velocity for the current run
#[derive(Debug, Clone, Default)]
pub struct PipeStream {
    pub pairs: Vec<PipePair>,
    /// Horizontal velocity (pixels/tick, negative)
    pub vel_x: f32,
}

impl PipeStream {
    /// Fresh stream with two pairs ahead of the screen
    ///
    /// `frame_dt` is the wall time of the previous tick; it fixes the scroll
    /// speed for the whole run.
    pub fn seeded<R: Rng>(rng: &mut R, ground_y: f32, frame_dt: f32) -> Self {
        let first_x = SCREEN_WIDTH + PIPE_FIRST_OFFSET;
        Self {
            pairs: vec![
                generate_pair(rng, ground_y, first_x),
                generate_pair(rng, ground_y, first_x + PIPE_SPACING),
            ],
            vel_x: -PIPE_SPEED * frame_dt.clamp(0.0, MAX_FRAME_DT),
        }
    }

    /// Count pairs whose midpoint just crossed the player's midpoint
    ///
    /// The band is at least as wide as one tick of scrolling so a pair cannot
    /// jump over it; the `scored` flag keeps a pair from counting twice.
    pub fn award(&mut self, player_mid: f32, pipe_width: u32) -> u32 {
        let band = SCORE_BAND.max(self.vel_x.abs());
        let mut points = 0;
        for pair in self.pairs.iter_mut().filter(|p| !p.scored) {
            let mid = pair.mid_x(pipe_width);
            if mid <= player_mid && player_mid < mid + band {
                pair.scored = true;
                points += 1;
            }
        }
        points
    }

    /// Scroll all pairs, spawn a new one when the lead pair reaches the left
    /// edge, and evict the lead pair once it is fully off-screen
    ///
    /// A lead pair that jumps over the spawn window in one tick still
    /// triggers the spawn, so fast streams never run dry.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, ground_y: f32, pipe_width: u32) {
        let prev_lead_x = self.pairs.first().map(|lead| lead.x);
        for pair in &mut self.pairs {
            pair.x += self.vel_x;
        }

        if let (Some(lead), Some(prev_x)) = (self.pairs.first(), prev_lead_x) {
            let in_window = lead.x > 0.0 && lead.x < SPAWN_WINDOW;
            let crossed =
                prev_x >= SPAWN_WINDOW && lead.x <= 0.0 && lead.x > -(pipe_width as f32);
            if self.pairs.len() < MAX_LIVE_PIPES && (in_window || crossed) {
                let pair = generate_pair(rng, ground_y, SCREEN_WIDTH + PIPE_SPAWN_OFFSET);
                log::trace!("spawn pipe pair gap_top={}", pair.gap_top);
                self.pairs.push(pair);
            }
        }

        if self
            .pairs
            .first()
            .is_some_and(|lead| lead.x < -(pipe_width as f32))
        {
            self.pairs.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const PIPE_W: u32 = 52;

    #[test]
    fn test_gap_top_stays_in_band() {
        let mut rng = Pcg32::seed_from_u64(7);
        let low = (GROUND_Y * 0.2) as i32 as f32;
        let high = low + (GROUND_Y * 0.6 - PIPE_GAP) as i32 as f32;
        for _ in 0..1000 {
            let top = random_gap_top(&mut rng, GROUND_Y);
            assert!(top >= low && top < high, "gap top {top} outside [{low}, {high})");
            assert!(top + PIPE_GAP < GROUND_Y);
        }
    }

    #[test]
    fn test_seeded_stream_spacing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let stream = PipeStream::seeded(&mut rng, GROUND_Y, 1.0 / 30.0);
        assert_eq!(stream.pairs.len(), 2);
        assert_eq!(stream.pairs[0].x, SCREEN_WIDTH + PIPE_FIRST_OFFSET);
        assert_eq!(stream.pairs[1].x - stream.pairs[0].x, SCREEN_WIDTH / 2.0);
        assert!((stream.vel_x - (-128.0 / 30.0)).abs() < 1e-4);
    }

    #[test]
    fn test_seeded_caps_frame_dt() {
        let mut rng = Pcg32::seed_from_u64(1);
        let stream = PipeStream::seeded(&mut rng, GROUND_Y, 5.0);
        assert_eq!(stream.vel_x, -PIPE_SPEED * MAX_FRAME_DT);
    }

    #[test]
    fn test_pair_geometry() {
        let pair = PipePair::new(10.0, 150.0);
        assert_eq!(pair.upper_pos(320), Vec2::new(10.0, -170.0));
        assert_eq!(pair.lower_pos(), Vec2::new(10.0, 250.0));
        assert_eq!(pair.upper_rect(PIPE_W, 320).bottom(), 150);
        assert_eq!(pair.lower_rect(PIPE_W, 320).y, 250);
    }

    #[test]
    fn test_spawn_and_evict() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut stream = PipeStream {
            pairs: vec![PipePair::new(6.0, 100.0), PipePair::new(150.0, 120.0)],
            vel_x: -4.0,
        };
        // Lead pair moves to x=2, inside (0, 5): a third pair appears
        stream.advance(&mut rng, GROUND_Y, PIPE_W);
        assert_eq!(stream.pairs.len(), 3);
        assert_eq!(stream.pairs[2].x, SCREEN_WIDTH + PIPE_SPAWN_OFFSET);

        // Never more than three live pairs
        stream.pairs[0].x = 3.0;
        stream.advance(&mut rng, GROUND_Y, PIPE_W);
        assert_eq!(stream.pairs.len(), 3);

        // Lead pair leaves the screen and is evicted
        stream.pairs[0].x = -(PIPE_W as f32) + 1.0;
        stream.advance(&mut rng, GROUND_Y, PIPE_W);
        assert_eq!(stream.pairs.len(), 2);
        assert_eq!(stream.pairs[0].gap_top, 120.0);
    }

    #[test]
    fn test_spawn_when_lead_jumps_window() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut stream = PipeStream {
            pairs: vec![PipePair::new(6.0, 100.0), PipePair::new(150.0, 120.0)],
            vel_x: -8.0,
        };
        // 6 -> -2 skips (0, 5) entirely
        stream.advance(&mut rng, GROUND_Y, PIPE_W);
        assert_eq!(stream.pairs.len(), 3);
        assert_eq!(stream.pairs[2].x, SCREEN_WIDTH + PIPE_SPAWN_OFFSET);
    }

    #[test]
    fn test_fast_stream_never_runs_dry() {
        for frame_dt in [1.0 / 16.0, 1.0 / 20.0, MAX_FRAME_DT] {
            let mut rng = Pcg32::seed_from_u64(9);
            let mut stream = PipeStream::seeded(&mut rng, GROUND_Y, frame_dt);
            for _ in 0..400 {
                stream.advance(&mut rng, GROUND_Y, PIPE_W);
                assert!(!stream.pairs.is_empty(), "no pairs left at dt {frame_dt}");
                assert!(stream.pairs.len() <= MAX_LIVE_PIPES);
            }
        }
    }

    #[test]
    fn test_award_once_per_pair() {
        let player_mid = 57.0 + 17.0;
        let mut stream = PipeStream {
            pairs: vec![PipePair::new(player_mid - 26.0 + 2.0, 100.0)],
            vel_x: -1.5,
        };
        let mut total = 0;
        for _ in 0..20 {
            total += stream.award(player_mid, PIPE_W);
            for pair in &mut stream.pairs {
                pair.x += stream.vel_x;
            }
        }
        assert_eq!(total, 1);
        assert!(stream.pairs[0].scored);
    }

    #[test]
    fn test_award_fast_stream_not_skipped() {
        let player_mid = 74.0;
        let mut stream = PipeStream {
            pairs: vec![PipePair::new(player_mid - 26.0 + 3.0, 100.0)],
            vel_x: -7.0,
        };
        let mut total = 0;
        for _ in 0..5 {
            total += stream.award(player_mid, PIPE_W);
            for pair in &mut stream.pairs {
                pair.x += stream.vel_x;
            }
        }
        assert_eq!(total, 1);
    }
}

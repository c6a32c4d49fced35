//! Game state and core simulation types
//!
//! Everything that changes during a run lives in [`GameState`]; scenes get it
//! by `&mut` from `tick` and nothing is kept in statics.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Crash, PipeMasks};
use super::mask::HitMask;
use super::pipes::PipeStream;
use super::player::Player;
use super::scene::{Scene, SceneEvent, transition};
use crate::assets::Assets;
use crate::consts::*;

/// Skins chosen for one run, each picked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub background: usize,
    pub player: usize,
    pub pipe: usize,
}

impl Theme {
    /// Draw a random theme from the available skins
    pub fn random<R: Rng>(rng: &mut R, assets: &Assets) -> Self {
        Self {
            background: rng.random_range(0..assets.backgrounds.len().max(1)),
            player: rng.random_range(0..assets.players.len().max(1)),
            pipe: rng.random_range(0..assets.pipes.len().max(1)),
        }
    }
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) rng: Pcg32,
    /// Current scene
    pub scene: Scene,
    /// Ticks since the current scene began (1 on the first tick)
    pub scene_tick: u64,
    pub theme: Theme,
    /// Hit masks for the three wing frames of the current player skin
    pub player_masks: [HitMask; 3],
    pub pipe_masks: PipeMasks,
    pub player: Player,
    pub pipes: PipeStream,
    pub score: u32,
    /// Verdict that ended the last flight
    pub crash: Crash,
    /// Ground strip offset (0 or negative)
    pub base_x: f32,
    /// How far the ground strip can shift before wrapping
    pub base_shift: f32,
    /// Welcome bobbing offset of the last tick
    pub bob_offset: f32,
    pub message_pos: Vec2,
    loop_iter: u32,
    anim_step: usize,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            scene: Scene::Init,
            scene_tick: 0,
            theme: Theme::default(),
            player_masks: Default::default(),
            pipe_masks: PipeMasks::default(),
            player: Player::default(),
            pipes: PipeStream::default(),
            score: 0,
            crash: Crash::None,
            base_x: 0.0,
            base_shift: 0.0,
            bob_offset: 0.0,
            message_pos: Vec2::ZERO,
            loop_iter: 0,
            anim_step: 0,
        }
    }

    /// First tick of the current scene
    #[inline]
    pub fn is_scene_start(&self) -> bool {
        self.scene_tick == 1
    }

    /// Feed an event to the transition table; on a transition the scene tick
    /// resets so the next tick reads 1
    pub fn apply(&mut self, event: SceneEvent) -> bool {
        match transition(self.scene, event) {
            Some(next) => {
                log::debug!("scene {:?} -> {:?} on {:?}", self.scene, next, event);
                self.scene = next;
                self.scene_tick = 0;
                true
            }
            None => false,
        }
    }

    /// Pick a new theme and rebuild the hit masks for it
    pub fn prepare_theme(&mut self, assets: &Assets) {
        self.theme = Theme::random(&mut self.rng, assets);
        let frames = assets.player_frames(self.theme.player);
        self.player_masks = [
            HitMask::from_sprite(&frames[0]),
            HitMask::from_sprite(&frames[1]),
            HitMask::from_sprite(&frames[2]),
        ];
        let pipe = assets.pipe_skin(self.theme.pipe);
        self.pipe_masks = PipeMasks {
            upper: HitMask::from_sprite(&pipe.upper),
            lower: HitMask::from_sprite(&pipe.lower),
        };
        log::debug!("theme {:?}", self.theme);
    }

    /// Restart the wing animation at the first frame
    pub fn reset_animation(&mut self) {
        self.player.frame = 0;
        self.loop_iter = 0;
        self.anim_step = 0;
    }

    /// Advance the wing animation loop; the frame changes every `period` ticks
    pub fn advance_animation(&mut self, period: u32) {
        if (self.loop_iter + 1) % period == 0 {
            self.player.frame = PLAYER_FRAME_CYCLE[self.anim_step];
            self.anim_step = (self.anim_step + 1) % PLAYER_FRAME_CYCLE.len();
        }
        self.loop_iter = (self.loop_iter + 1) % ANIM_LOOP;
    }

    /// Scroll the ground strip left by `step`, wrapping at `base_shift`
    pub fn scroll_base(&mut self, step: f32) {
        self.base_x = if self.base_shift > 0.0 {
            -((-self.base_x + step) % self.base_shift)
        } else {
            0.0
        };
    }

    /// Mask for the player's current wing frame
    pub fn player_mask(&self) -> &HitMask {
        &self.player_masks[self.player.frame.min(2)]
    }
}

/// Triangle-wave bobbing offset for a scene tick (period 16, amplitude 8)
pub fn bob_offset(tick: u64) -> f32 {
    let t = tick as i64;
    let period = 2 * BOB_AMPLITUDE;
    let direction = 1 - 2 * ((t / period) % 2);
    ((t % period - BOB_AMPLITUDE) * direction) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_resets_scene_tick() {
        let mut state = GameState::new(1);
        state.scene_tick = 5;
        assert!(state.apply(SceneEvent::Ready));
        assert_eq!(state.scene, Scene::Prepare);
        assert_eq!(state.scene_tick, 0);

        // Ignored events keep the counter
        state.scene_tick = 3;
        assert!(!state.apply(SceneEvent::Crash));
        assert_eq!(state.scene_tick, 3);
    }

    #[test]
    fn test_animation_cycle() {
        let mut state = GameState::new(1);
        state.reset_animation();
        let mut frames = Vec::new();
        for _ in 0..15 {
            state.advance_animation(3);
            frames.push(state.player.frame);
        }
        // Changes land on ticks 3, 6, 9, 12, 15 and follow 0, 1, 2, 1, 0
        assert_eq!(frames, vec![0, 0, 0, 0, 0, 1, 1, 1, 2, 2, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_bob_offset_triangle() {
        assert_eq!(bob_offset(0), -8.0);
        assert_eq!(bob_offset(8), 0.0);
        assert_eq!(bob_offset(15), 7.0);
        // Second half period runs the other way
        assert_eq!(bob_offset(16), 8.0);
        assert_eq!(bob_offset(24), 0.0);
        assert_eq!(bob_offset(31), -7.0);
        assert_eq!(bob_offset(32), -8.0);
        for t in 0..100 {
            assert!(bob_offset(t).abs() <= 8.0);
        }
    }

    #[test]
    fn test_scroll_base_wraps() {
        let mut state = GameState::new(1);
        state.base_shift = 48.0;
        state.base_x = 0.0;
        for _ in 0..11 {
            state.scroll_base(WELCOME_SCROLL);
        }
        assert_eq!(state.base_x, -44.0);
        state.scroll_base(WELCOME_SCROLL);
        assert_eq!(state.base_x, 0.0);
        // Large steps wrap the same way
        state.scroll_base(FLY_SCROLL);
        assert_eq!(state.base_x, -4.0);
    }

    #[test]
    fn test_scroll_base_without_room() {
        let mut state = GameState::new(1);
        state.base_shift = 0.0;
        state.scroll_base(WELCOME_SCROLL);
        assert_eq!(state.base_x, 0.0);
    }
}

//! Fixed timestep simulation tick
//!
//! One call per frame: apply exit, bump the scene tick, run the current
//! scene's handler, and return what to draw and which events fired.

use glam::Vec2;

use super::collision::{Crash, check_crash};
use super::frame::{Frame, GameEvent, SpriteId};
use super::pipes::PipeStream;
use super::player::PlayerPhysics;
use super::scene::{Scene, SceneEvent};
use super::state::{GameState, bob_offset};
use crate::assets::Assets;
use crate::consts::*;

/// Translated input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameInput {
    #[default]
    Idle,
    Action,
    Exit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub action: GameInput,
    /// Wall time of the previous tick in seconds
    pub frame_dt: f32,
}

impl TickInput {
    pub fn new(action: GameInput, frame_dt: f32) -> Self {
        Self { action, frame_dt }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, assets: &Assets) -> Frame {
    if input.action == GameInput::Exit {
        state.apply(SceneEvent::Exit);
    }

    state.scene_tick += 1;
    let mut frame = Frame::default();

    match state.scene {
        Scene::Init => init(state),
        Scene::Prepare => prepare(state, assets),
        Scene::Welcome => welcome(state, input, assets, &mut frame),
        Scene::Fly => fly(state, input, assets, &mut frame),
        Scene::GameOver => game_over(state, input, assets, &mut frame),
        Scene::Exit => {
            if state.is_scene_start() {
                log::info!("game exit");
            }
        }
    }

    frame
}

fn init(state: &mut GameState) {
    log::info!("game init");
    state.apply(SceneEvent::Ready);
}

fn prepare(state: &mut GameState, assets: &Assets) {
    log::info!("game prepare");
    state.prepare_theme(assets);
    state.apply(SceneEvent::Ready);
}

fn welcome(state: &mut GameState, input: &TickInput, assets: &Assets, frame: &mut Frame) {
    if state.is_scene_start() {
        log::info!("game welcome");
        let player_h = assets.player_frames(state.theme.player)[0].height as f32;
        state.reset_animation();
        state.player.x = (SCREEN_WIDTH * PLAYER_X_RATIO).trunc();
        state.player.y = ((SCREEN_HEIGHT - player_h) / 2.0).trunc();
        state.message_pos = Vec2::new(
            ((SCREEN_WIDTH - assets.message.width as f32) / 2.0).trunc(),
            (SCREEN_HEIGHT * MESSAGE_Y_RATIO).trunc(),
        );
        state.base_x = 0.0;
        state.base_shift = base_shift(state, assets);
    }

    if input.action == GameInput::Action {
        state.apply(SceneEvent::Action { grounded: false });
    }

    state.advance_animation(WELCOME_ANIM_TICKS);
    state.scroll_base(WELCOME_SCROLL);
    state.bob_offset = bob_offset(state.scene_tick);

    let theme = state.theme;
    frame.draw(SpriteId::Background(theme.background), Vec2::ZERO);
    frame.draw(
        SpriteId::Player {
            skin: theme.player,
            frame: state.player.frame,
        },
        state.player.pos() + Vec2::new(0.0, state.bob_offset),
    );
    frame.draw(SpriteId::Message, state.message_pos);
    frame.draw(SpriteId::Base, Vec2::new(state.base_x, GROUND_Y));
}

fn fly(state: &mut GameState, input: &TickInput, assets: &Assets, frame: &mut Frame) {
    let player_frames = assets.player_frames(state.theme.player);
    let (player_w, player_h) = (player_frames[0].width, player_frames[0].height as f32);
    let pipe_w = assets.pipe_skin(state.theme.pipe).lower.width;

    if state.is_scene_start() {
        log::info!("game fly");
        state.score = 0;
        state.crash = Crash::None;
        state.reset_animation();
        state.player.x = (SCREEN_WIDTH * PLAYER_X_RATIO).trunc();
        state.player.y += state.bob_offset;
        state.base_shift = base_shift(state, assets);
        state.pipes = PipeStream::seeded(&mut state.rng, GROUND_Y, input.frame_dt);
        log::debug!("pipe velocity {} px/tick", state.pipes.vel_x);

        state.player.physics = PlayerPhysics::FLY;
        state.player.vel_y = FLAP_VEL_Y;
        state.player.rotation = FLAP_ROTATION;
        state.player.flapped = false;
    }

    if input.action == GameInput::Action && state.player.can_flap(player_h) {
        state.player.flap();
        frame.emit(GameEvent::Flap);
    }

    let crash = check_crash(
        state.player.pos(),
        state.player_mask(),
        &state.pipes.pairs,
        &state.pipe_masks,
        GROUND_Y,
    );
    if crash.is_crash() {
        log::debug!("crash {:?} at y={} score={}", crash, state.player.y, state.score);
        state.crash = crash;
        state.apply(SceneEvent::Crash);
        return;
    }

    let player_mid = state.player.x + player_w as f32 / 2.0;
    for _ in 0..state.pipes.award(player_mid, pipe_w) {
        state.score += 1;
        frame.emit(GameEvent::Score);
    }

    state.advance_animation(FLY_ANIM_TICKS);
    state.scroll_base(FLY_SCROLL);

    state.player.step(GROUND_Y, player_h);
    state.pipes.advance(&mut state.rng, GROUND_Y, pipe_w);

    draw_world(state, frame);
    draw_score(state.score, assets, frame);
    frame.draw_rotated(
        SpriteId::Player {
            skin: state.theme.player,
            frame: state.player.frame,
        },
        state.player.pos(),
        state.player.visible_rotation(),
    );
}

fn game_over(state: &mut GameState, input: &TickInput, assets: &Assets, frame: &mut Frame) {
    let player_h = assets.player_frames(state.theme.player)[0].height as f32;

    if state.is_scene_start() {
        log::info!("game over (score {})", state.score);
        state.player.x = (SCREEN_WIDTH * PLAYER_X_RATIO).trunc();
        state.player.physics = PlayerPhysics::FALL;
        frame.emit(GameEvent::Hit);
        if state.crash == Crash::Ground {
            frame.emit(GameEvent::Die);
        }
    }

    if input.action == GameInput::Action {
        let grounded = state.player.is_grounded(GROUND_Y, player_h);
        if state.apply(SceneEvent::Action { grounded }) {
            return;
        }
        log::trace!("restart ignored, still falling");
    }

    state.player.tumble(GROUND_Y, player_h, state.crash == Crash::Pipe);

    draw_world(state, frame);
    draw_score(state.score, assets, frame);
    frame.draw_rotated(
        SpriteId::Player {
            skin: state.theme.player,
            frame: 1,
        },
        state.player.pos(),
        state.player.rotation,
    );
    frame.draw(SpriteId::GameOver, Vec2::from(GAME_OVER_POS));
}

/// Ground strip travel before it wraps
fn base_shift(state: &GameState, assets: &Assets) -> f32 {
    let background = assets.background(state.theme.background);
    assets.base.width as f32 - background.width as f32
}

/// Background, pipes and ground, in paint order
fn draw_world(state: &GameState, frame: &mut Frame) {
    let theme = state.theme;
    frame.draw(SpriteId::Background(theme.background), Vec2::ZERO);
    let pipe_h = state.pipe_masks.upper.height();
    for pair in &state.pipes.pairs {
        frame.draw(SpriteId::PipeUpper(theme.pipe), pair.upper_pos(pipe_h));
        frame.draw(SpriteId::PipeLower(theme.pipe), pair.lower_pos());
    }
    frame.draw(SpriteId::Base, Vec2::new(state.base_x, GROUND_Y));
}

/// Score digits centered horizontally near the top of the screen
fn draw_score(score: u32, assets: &Assets, frame: &mut Frame) {
    let digits: Vec<u8> = score.to_string().bytes().map(|b| b - b'0').collect();
    let total_width: u32 = digits.iter().map(|&d| assets.digit(d).width).sum();
    let mut x = (SCREEN_WIDTH - total_width as f32) / 2.0;
    for d in digits {
        frame.draw(SpriteId::Digit(d), Vec2::new(x, SCREEN_HEIGHT * SCORE_Y_RATIO));
        x += assets.digit(d).width as f32;
    }
}

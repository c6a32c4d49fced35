//! Tick driver
//!
//! One `step` is one displayed frame: poll input, run one simulation tick,
//! hand draws and sounds to the platform, then wait out the frame budget.

use crate::assets::Assets;
use crate::audio::SoundEffect;
use crate::platform::{InputSource, MediaStore, Presenter, translate_events};
use crate::sim::{DrawCommand, GameState, Scene, TickInput, tick};

/// Whether the caller should keep stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct GameLoop<I, P, M> {
    input: I,
    presenter: P,
    media: M,
    state: GameState,
    /// Held between ticks; `None` before the first tick and after exit
    assets: Option<Assets>,
    /// Last non-empty draw list, shown again on ticks that draw nothing
    last_draws: Vec<DrawCommand>,
    target_fps: u32,
    last_dt: f32,
}

impl<I: InputSource, P: Presenter, M: MediaStore> GameLoop<I, P, M> {
    pub fn new(input: I, presenter: P, media: M, seed: u64, target_fps: u32) -> Self {
        log::info!("seed {seed}, {target_fps} fps");
        Self {
            input,
            presenter,
            media,
            state: GameState::new(seed),
            assets: None,
            last_draws: Vec::new(),
            target_fps,
            last_dt: 1.0 / target_fps.max(1) as f32,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn is_finished(&self) -> bool {
        self.state.scene == Scene::Exit
    }

    /// Run one tick
    pub fn step(&mut self) -> anyhow::Result<LoopControl> {
        if self.is_finished() {
            return Ok(LoopControl::Exit);
        }

        let assets = match self.assets.take() {
            Some(assets) => assets,
            None => self.media.acquire()?,
        };

        let action = translate_events(&self.input.poll_events());
        let frame = tick(&mut self.state, &TickInput::new(action, self.last_dt), &assets);

        for event in &frame.events {
            self.media.play(SoundEffect::from(*event));
        }

        if self.is_finished() {
            self.media.release();
            log::info!("final score {}", self.state.score);
            return Ok(LoopControl::Exit);
        }

        if !frame.draws.is_empty() {
            self.last_draws = frame.draws;
        }
        for command in &self.last_draws {
            self.presenter.draw(&assets, command);
        }
        self.presenter.present();

        self.assets = Some(assets);
        self.last_dt = self.presenter.wait_for_next_frame(self.target_fps);
        log::trace!("tick {:?}#{} dt {:.4}", self.state.scene, self.state.scene_tick, self.last_dt);
        Ok(LoopControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Key, RawEvent};
    use crate::sim::{Crash, GameInput};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedInput {
        script: VecDeque<Vec<RawEvent>>,
    }

    impl ScriptedInput {
        fn push(&mut self, events: Vec<RawEvent>) {
            self.script.push_back(events);
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_events(&mut self) -> Vec<RawEvent> {
            self.script.pop_front().unwrap_or_default()
        }
    }

    struct RecordingPresenter {
        frames: Vec<Vec<DrawCommand>>,
        current: Vec<DrawCommand>,
        dt: f32,
    }

    impl RecordingPresenter {
        fn new(dt: f32) -> Self {
            Self {
                frames: Vec::new(),
                current: Vec::new(),
                dt,
            }
        }
    }

    impl Presenter for RecordingPresenter {
        fn draw(&mut self, _assets: &Assets, command: &DrawCommand) {
            self.current.push(*command);
        }

        fn present(&mut self) {
            self.frames.push(std::mem::take(&mut self.current));
        }

        fn wait_for_next_frame(&mut self, _target_fps: u32) -> f32 {
            self.dt
        }
    }

    #[derive(Default)]
    struct RecordingMedia {
        acquired: u32,
        released: u32,
        played: Vec<SoundEffect>,
        fail: bool,
    }

    impl MediaStore for RecordingMedia {
        fn acquire(&mut self) -> anyhow::Result<Assets> {
            if self.fail {
                anyhow::bail!("no assets");
            }
            self.acquired += 1;
            Ok(Assets::placeholder())
        }

        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }

        fn release(&mut self) {
            self.released += 1;
        }
    }

    type TestLoop = GameLoop<ScriptedInput, RecordingPresenter, RecordingMedia>;

    fn new_loop(dt: f32) -> TestLoop {
        GameLoop::new(
            ScriptedInput::default(),
            RecordingPresenter::new(dt),
            RecordingMedia::default(),
            42,
            30,
        )
    }

    fn step_with(game: &mut TestLoop, events: Vec<RawEvent>) -> LoopControl {
        game.input.push(events);
        game.step().unwrap()
    }

    /// Init, Prepare, Welcome
    fn to_welcome(game: &mut TestLoop) {
        for _ in 0..3 {
            assert_eq!(step_with(game, vec![]), LoopControl::Continue);
        }
        assert_eq!(game.state().scene, Scene::Welcome);
    }

    #[test]
    fn test_assets_acquired_once_and_released_on_exit() {
        let mut game = new_loop(1.0 / 30.0);
        to_welcome(&mut game);
        assert_eq!(game.media().acquired, 1);
        assert_eq!(game.media().released, 0);

        assert_eq!(step_with(&mut game, vec![RawEvent::KeyDown(Key::Escape)]), LoopControl::Exit);
        assert!(game.is_finished());
        assert_eq!(game.media().released, 1);

        // Further steps do nothing
        assert_eq!(game.step().unwrap(), LoopControl::Exit);
        assert_eq!(game.media().acquired, 1);
        assert_eq!(game.media().released, 1);
    }

    #[test]
    fn test_quit_on_first_tick_still_releases() {
        let mut game = new_loop(1.0 / 30.0);
        assert_eq!(step_with(&mut game, vec![RawEvent::Quit]), LoopControl::Exit);
        assert_eq!(game.media().acquired, 1);
        assert_eq!(game.media().released, 1);
        assert!(game.presenter().frames.is_empty());
    }

    #[test]
    fn test_acquire_failure_propagates() {
        let mut game = new_loop(1.0 / 30.0);
        game.media.fail = true;
        assert!(game.step().is_err());
        assert_eq!(game.state().scene, Scene::Init);
    }

    #[test]
    fn test_empty_ticks_show_previous_frame() {
        let mut game = new_loop(1.0 / 30.0);
        to_welcome(&mut game);
        let frames = &game.presenter().frames;
        // Init and Prepare draw nothing and there is nothing to repeat yet
        assert!(frames[0].is_empty());
        assert!(frames[1].is_empty());
        assert_eq!(frames[2].len(), 4);

        step_with(&mut game, vec![RawEvent::KeyDown(Key::Space)]);
        assert_eq!(game.state().scene, Scene::Fly);

        // Fall without flapping until the crash tick
        let mut ticks = 0;
        while game.state().scene == Scene::Fly {
            step_with(&mut game, vec![]);
            ticks += 1;
            assert!(ticks < 200, "never crashed");
        }
        assert_eq!(game.state().crash, Crash::Ground);
        let frames = &game.presenter().frames;
        let n = frames.len();
        assert!(!frames[n - 1].is_empty());
        assert_eq!(frames[n - 1], frames[n - 2]);
    }

    #[test]
    fn test_events_routed_to_media() {
        let mut game = new_loop(1.0 / 30.0);
        to_welcome(&mut game);
        step_with(&mut game, vec![RawEvent::KeyDown(Key::Space)]);
        step_with(&mut game, vec![RawEvent::KeyDown(Key::Up)]);
        assert_eq!(game.media().played, vec![SoundEffect::Wing]);

        while game.state().scene != Scene::GameOver {
            step_with(&mut game, vec![]);
        }
        step_with(&mut game, vec![]);
        assert_eq!(
            game.media().played,
            vec![SoundEffect::Wing, SoundEffect::Hit, SoundEffect::Die]
        );
    }

    #[test]
    fn test_frame_time_feeds_pipe_velocity() {
        let mut game = new_loop(0.05);
        to_welcome(&mut game);
        step_with(&mut game, vec![RawEvent::KeyDown(Key::Space)]);
        step_with(&mut game, vec![]);
        assert_eq!(game.state().scene, Scene::Fly);
        assert!((game.state().pipes.vel_x + 6.4).abs() < 1e-4);
    }

    #[test]
    fn test_frame_time_capped() {
        let mut game = new_loop(0.5);
        to_welcome(&mut game);
        step_with(&mut game, vec![RawEvent::KeyDown(Key::Space)]);
        step_with(&mut game, vec![]);
        assert!((game.state().pipes.vel_x + 12.8).abs() < 1e-4);
    }

    #[test]
    fn test_action_and_exit_in_one_poll_exits() {
        let mut game = new_loop(1.0 / 30.0);
        to_welcome(&mut game);
        let events = vec![RawEvent::KeyDown(Key::Space), RawEvent::KeyDown(Key::Escape)];
        assert_eq!(translate_events(&events), GameInput::Exit);
        assert_eq!(step_with(&mut game, events), LoopControl::Exit);
    }
}

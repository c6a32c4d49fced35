//! Scene tags and the transition table
//!
//! `transition` is pure so the table can be tested without any assets or
//! rendering; `tick` decides which events happened and applies the result.

/// Top-level scene of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    /// One-time resource acquisition
    #[default]
    Init,
    /// Pick a theme and build hit masks for a new run
    Prepare,
    /// Idle title screen
    Welcome,
    /// Active gameplay
    Fly,
    /// Player crashed, falling to the ground
    GameOver,
    /// Resources released, loop ends
    Exit,
}

/// Something that may move the machine to another scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The current scene finished its one-shot work
    Ready,
    /// Action input; `grounded` says whether the player rests on the ground
    Action { grounded: bool },
    /// Collision reported
    Crash,
    /// Exit input
    Exit,
}

/// Next scene for an event, or `None` when the event is ignored
pub fn transition(scene: Scene, event: SceneEvent) -> Option<Scene> {
    use Scene::*;
    match (scene, event) {
        (Exit, _) => None,
        (_, SceneEvent::Exit) => Some(Exit),
        (Init, SceneEvent::Ready) => Some(Prepare),
        (Prepare, SceneEvent::Ready) => Some(Welcome),
        (Welcome, SceneEvent::Action { .. }) => Some(Fly),
        (Fly, SceneEvent::Crash) => Some(GameOver),
        (GameOver, SceneEvent::Action { grounded: true }) => Some(Prepare),
        _ => None,
    }
}

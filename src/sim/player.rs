//! Player body and its fixed-step integrator
//!
//! Units are pixels and degrees per tick. One call to [`Player::step`] or
//! [`Player::tumble`] per tick; constants are swapped only at scene entry.

use glam::Vec2;

use crate::consts::*;

/// Physics constants for one scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPhysics {
    /// Downward acceleration
    pub gravity: f32,
    pub min_vel_y: f32,
    pub max_vel_y: f32,
    /// Velocity set by a flap
    pub flap_vel_y: f32,
    /// Rotation decay per tick
    pub rot_rate: f32,
}

impl PlayerPhysics {
    /// Constants while the player is in control
    pub const FLY: Self = Self {
        gravity: FLY_GRAVITY,
        min_vel_y: MIN_VEL_Y,
        max_vel_y: MAX_VEL_Y,
        flap_vel_y: FLAP_VEL_Y,
        rot_rate: FLY_ROT_RATE,
    };

    /// Constants for the death fall
    pub const FALL: Self = Self {
        gravity: FALL_GRAVITY,
        min_vel_y: MIN_VEL_Y,
        max_vel_y: FALL_MAX_VEL_Y,
        flap_vel_y: FLAP_VEL_Y,
        rot_rate: FALL_ROT_RATE,
    };
}

impl Default for PlayerPhysics {
    fn default() -> Self {
        Self::FLY
    }
}

/// The bird
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vel_y: f32,
    /// Degrees, counter-clockwise positive
    pub rotation: f32,
    /// Index into the three wing frames
    pub frame: usize,
    /// Set by a flap, consumed by the next integration step
    pub flapped: bool,
    pub physics: PlayerPhysics,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vel_y: FLAP_VEL_Y,
            rotation: FLAP_ROTATION,
            frame: 0,
            flapped: false,
            physics: PlayerPhysics::FLY,
        }
    }
}

impl Player {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// A flap is refused once the body is far above the top of the screen
    pub fn can_flap(&self, height: f32) -> bool {
        self.y > -2.0 * height
    }

    /// Upward impulse; takes effect on the next [`Player::step`]
    pub fn flap(&mut self) {
        self.vel_y = self.physics.flap_vel_y;
        self.flapped = true;
    }

    /// Lower edge has reached the ground line
    pub fn is_grounded(&self, ground_y: f32, height: f32) -> bool {
        self.y + height >= ground_y - 1.0
    }

    /// One flight tick: rotation, velocity, then position
    pub fn step(&mut self, ground_y: f32, height: f32) {
        let p = self.physics;
        if self.flapped {
            self.rotation = FLAP_ROTATION;
        } else {
            self.decay_rotation();
        }

        // A flap overrides the clamp for its own tick
        self.vel_y = if self.flapped {
            p.flap_vel_y
        } else {
            (self.vel_y + p.gravity).clamp(p.min_vel_y, p.max_vel_y)
        };
        self.flapped = false;

        self.fall(ground_y, height);
    }

    /// One death-fall tick: position until grounded, then velocity; the body
    /// keeps spinning only when `spin` is set
    pub fn tumble(&mut self, ground_y: f32, height: f32, spin: bool) {
        if !self.is_grounded(ground_y, height) {
            self.fall(ground_y, height);
        }
        self.vel_y = (self.vel_y + self.physics.gravity).min(self.physics.max_vel_y);
        if spin {
            self.decay_rotation();
        }
    }

    /// Move by the current velocity without passing through the ground
    ///
    /// Same as `y += min(vel, ground_y - y - height)`, written so the resting
    /// position is exactly `ground_y - height`.
    fn fall(&mut self, ground_y: f32, height: f32) {
        self.y = (self.y + self.vel_y).min(ground_y - height);
    }

    fn decay_rotation(&mut self) {
        self.rotation = (self.rotation - self.physics.rot_rate).clamp(MIN_ROTATION, MAX_ROTATION);
    }

    /// Rotation actually drawn while flying
    pub fn visible_rotation(&self) -> f32 {
        self.rotation.min(VISIBLE_ROT_THRESHOLD)
    }
}

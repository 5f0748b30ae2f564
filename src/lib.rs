//! Stunt Cat - a unicycle cat balancing on a wire
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rig physics, hazards, collectibles, round state)
//! - `config`: Round geometry and seed
//! - `effects`: Sound/visual cue intents and the sinks that consume them
//! - `error`: Configuration errors

pub mod config;
pub mod effects;
pub mod error;
pub mod sim;

pub use config::RoundConfig;
pub use effects::{Cue, EffectCommand, EffectSink, LogSink, NullSink, RecordingSink};
pub use error::ConfigError;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Milliseconds per normalised tick unit (~60 fps baseline)
    pub const TICK_MS: f32 = 17.0;

    /// Default screen size (half of 1080p)
    pub const DEFAULT_WIDTH: f32 = 960.0;
    pub const DEFAULT_HEIGHT: f32 = 540.0;

    /// Wire sits this far above the bottom of the screen
    pub const WIRE_OFFSET: f32 = 100.0;
    /// Laser beam sits this far above the bottom of the screen
    pub const LASER_OFFSET: f32 = 150.0;

    /// Rig geometry
    pub const HEAD_LENGTH: f32 = 100.0;

    /// Rig physics
    pub const MAX_SPEED: f32 = 8.0;
    pub const MAX_FALL_SPEED: f32 = 16.0;
    pub const GRAVITY: f32 = 1.0;
    pub const RIDE_ACCEL: f32 = 0.3;
    pub const RIDE_TILT: f32 = 0.003;
    pub const ANGULAR_DECAY: f32 = 0.9;
    /// Tilt accelerates away from upright
    pub const TOPPLE_BIAS: f32 = 0.0002;
    /// Toppling past horizontal only kills within this many px of the bottom
    pub const TOPPLE_BAND: f32 = 160.0;
    /// Fraction of the width where the wire starts supporting the rig
    pub const WIRE_START: f32 = 0.25;

    /// Right edge
    pub const EDGE_BUMP_ZONE: f32 = 0.98;
    pub const EDGE_BUMP_HEIGHT: f32 = 30.0;
    pub const EDGE_DAMPING: f32 = 0.7;
    pub const BUMP_SPIN: f32 = 0.01;
    pub const BUMP_VX: f32 = -5.0;
    pub const BUMP_VY: f32 = -20.0;

    /// Discrete inputs
    pub const JUMP_IMPULSE: f32 = 25.0;
    pub const JUMP_WINDOW: f32 = 1.0;
    pub const NUDGE_MIN: f32 = 0.01 * std::f32::consts::PI;
    pub const NUDGE_MAX: f32 = 0.03 * std::f32::consts::PI;
    /// Chance of a wheel squeak when the rig changes direction
    pub const WHEEL_SQUEAK_CHANCE: f64 = 0.1;

    /// Collectibles
    pub const ITEM_GRAVITY: f32 = 0.2;
    pub const CATCH_RADIUS: f32 = 100.0;
    pub const DECOY_RADIUS: f32 = 50.0;
    pub const DECOY_KICK_MIN: f32 = 0.08;
    pub const DECOY_KICK_MAX: f32 = 0.15;
    pub const THROW_SPEED_MIN: i32 = 3;
    pub const THROW_SPEED_MAX: i32 = 7;
    pub const THROW_LIFT_MIN: i32 = 5;
    pub const THROW_LIFT_MAX: i32 = 12;
    /// First fish of a round
    pub const OPENING_THROW: (f32, f32) = (10.0, -5.0);

    /// Stomp hazard (ms)
    pub const STOMP_GAP_MS: f64 = 1500.0;
    pub const STOMP_POISE_MS: f64 = 1500.0;
    pub const STOMP_STRIKE_MS: f64 = 1500.0;
    /// Visible sliver of the foot while poised
    pub const STOMP_POISE_REACH: f32 = 100.0;
    pub const STOMP_UNLOCK_SCORE: u32 = 20;

    /// Laser hazard (ms)
    pub const LASER_GAP_MS: f64 = 5000.0;
    pub const LASER_APPROACH_MS: f64 = 1000.0;
    pub const LASER_POISE_MS: f64 = 1000.0;
    pub const LASER_FIRE_MS: f64 = 300.0;
    pub const LASER_LEAVE_MS: f64 = 1000.0;
    pub const LASER_ATTACKER_HEIGHT: f32 = 144.0;
    /// Rise/fall rate of the attacker (px per ms)
    pub const LASER_RISE_RATE: f32 = 0.2;
    pub const LASER_POISED_X: f32 = -30.0;
    pub const BEAM_X: f32 = 150.0;
    pub const BEAM_THICKNESS: f32 = 10.0;
    /// Rig counts as grounded within this many px of the wire
    pub const ARM_TOLERANCE: f32 = 3.0;
    pub const LASER_UNLOCK_SCORE: u32 = 10;

    /// Where hidden actors are parked
    pub const PARKED: (f32, f32) = (-1000.0, -1000.0);
}

/// Head position of a rig standing at `base` with the given tilt
#[inline]
pub fn head_position(base: Vec2, tilt: f32) -> Vec2 {
    let a = tilt - std::f32::consts::FRAC_PI_2;
    base + consts::HEAD_LENGTH * Vec2::new(a.cos(), a.sin())
}

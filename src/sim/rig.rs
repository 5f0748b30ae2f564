//! The cat on its unicycle
//!
//! An inverted pendulum: tilt accelerates away from upright, the rider
//! fights it by riding. Units are px and radians per normalised tick
//! (`dt = elapsed_ms / 17`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::RoundConfig;
use crate::consts::*;
use crate::head_position;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Tipped past horizontal near the ground
    Toppled,
    /// Dropped below the bottom of the screen
    FellOffBottom,
    Stomped,
    Lasered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRig {
    /// Wheel contact point
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians, 0 = upright, positive leans right
    pub tilt: f32,
    pub angular_velocity: f32,
    pub wire_height: f32,
}

impl PlayerRig {
    /// Standing still in the middle of the wire
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            position: Vec2::new(config.width / 2.0, config.wire_height()),
            velocity: Vec2::ZERO,
            tilt: 0.0,
            angular_velocity: 0.0,
            wire_height: config.wire_height(),
        }
    }

    /// Always derived from position and tilt
    #[inline]
    pub fn head(&self) -> Vec2 {
        head_position(self.position, self.tilt)
    }

    /// Close enough to the wire to push off it
    #[inline]
    pub fn on_wire(&self) -> bool {
        self.position.y > self.wire_height - JUMP_WINDOW
    }

    /// Travelling right (used for wheel squeaks)
    #[inline]
    pub fn heading_right(&self) -> bool {
        self.velocity.x > 0.0
    }

    /// Push off the wire. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.on_wire() {
            self.velocity.y -= JUMP_IMPULSE;
            true
        } else {
            false
        }
    }

    /// Letting go of jump cuts the rise short
    pub fn release_jump(&mut self) {
        if self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }
    }

    /// Add spin (rotate keys, decoy hits)
    pub fn spin(&mut self, amount: f32) {
        self.angular_velocity += amount;
    }

    /// One physics step. Returns the cause if the rig died; integration
    /// stops at the point of death.
    pub fn integrate(
        &mut self,
        dt: f32,
        left_held: bool,
        right_held: bool,
        config: &RoundConfig,
    ) -> Option<DeathCause> {
        let width = config.width;
        let height = config.height;

        self.angular_velocity *= ANGULAR_DECAY.powf(dt);
        self.velocity.y = (self.velocity.y + GRAVITY * dt).min(MAX_FALL_SPEED);

        if right_held {
            self.velocity.x = (self.velocity.x + RIDE_ACCEL * dt).min(MAX_SPEED);
            self.tilt -= RIDE_TILT * dt;
        }
        if left_held {
            self.velocity.x = (self.velocity.x - RIDE_ACCEL * dt).max(-MAX_SPEED);
            self.tilt += RIDE_TILT * dt;
        }

        // Upright is unstable; exactly 0 falls left
        let lean = if self.tilt > 0.0 { 1.0 } else { -1.0 };
        self.angular_velocity += TOPPLE_BIAS * lean * dt;
        self.tilt += self.angular_velocity * dt;

        if self.tilt.abs() > std::f32::consts::FRAC_PI_2 && self.position.y > height - TOPPLE_BAND {
            return Some(DeathCause::Toppled);
        }

        self.position += self.velocity * dt;

        // The wire only holds past the first quarter of the screen
        if self.position.y > self.wire_height && self.position.x > WIRE_START * width {
            self.position.y = self.wire_height;
            self.velocity.y = 0.0;
        }

        if self.position.y > height {
            return Some(DeathCause::FellOffBottom);
        }

        if self.position.x > width {
            self.position.x = width;
            if self.tilt > 0.0 {
                self.tilt *= EDGE_DAMPING;
            }
        }

        // Bounce back off the right end of the wire. The left end has no
        // equivalent: past the wire start there is nothing to stand on.
        if self.position.x > EDGE_BUMP_ZONE * width
            && self.position.y > self.wire_height - EDGE_BUMP_HEIGHT
        {
            self.angular_velocity -= BUMP_SPIN * dt;
            self.velocity.x = BUMP_VX;
            self.velocity.y = BUMP_VY;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RoundConfig {
        RoundConfig::default()
    }

    #[test]
    fn test_head_tracks_tilt() {
        let mut rig = PlayerRig::new(&config());
        assert!(rig.head().abs_diff_eq(Vec2::new(480.0, 340.0), 1e-3));
        rig.tilt = 0.3;
        assert_eq!(rig.head(), head_position(rig.position, 0.3));
    }

    #[test]
    fn test_wire_snaps_rig_back() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.position.y = cfg.wire_height() + 1.0;
        assert_eq!(rig.integrate(1.0, false, false, &cfg), None);
        assert_eq!(rig.position.y, cfg.wire_height());
        assert_eq!(rig.velocity.y, 0.0);
    }

    #[test]
    fn test_no_wire_before_first_quarter() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.position.x = 0.2 * cfg.width;
        rig.integrate(1.0, false, false, &cfg);
        assert!(rig.position.y > cfg.wire_height());
    }

    #[test]
    fn test_falling_through_bottom_kills() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.position = Vec2::new(0.1 * cfg.width, cfg.height - 5.0);
        rig.velocity.y = 10.0;
        assert_eq!(
            rig.integrate(1.0, false, false, &cfg),
            Some(DeathCause::FellOffBottom)
        );
    }

    #[test]
    fn test_toppling_only_kills_near_ground() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.tilt = 1.6;
        assert_eq!(rig.integrate(1.0, false, false, &cfg), Some(DeathCause::Toppled));

        let mut airborne = PlayerRig::new(&cfg);
        airborne.position.y = 100.0;
        airborne.tilt = 1.6;
        assert_eq!(airborne.integrate(1.0, false, false, &cfg), None);
    }

    #[test]
    fn test_riding_right_accelerates_and_leans_left() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.integrate(1.0, false, true, &cfg);
        assert!((rig.velocity.x - 0.3).abs() < 1e-6);
        assert!(rig.tilt < 0.0);
        for _ in 0..100 {
            rig.integrate(1.0, false, true, &cfg);
            rig.tilt = 0.0;
            rig.angular_velocity = 0.0;
            rig.position.x = cfg.width / 2.0;
        }
        assert_eq!(rig.velocity.x, MAX_SPEED);
    }

    #[test]
    fn test_riding_left_is_symmetric() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.integrate(1.0, true, false, &cfg);
        assert!((rig.velocity.x + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_tilt_runs_away_from_upright() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.tilt = 0.01;
        let before = rig.tilt;
        rig.integrate(1.0, false, false, &cfg);
        assert!(rig.tilt > before);
        assert!(rig.angular_velocity > 0.0);
    }

    #[test]
    fn test_gravity_caps_at_max_fall_speed() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.position = Vec2::new(600.0, -10_000.0);
        for _ in 0..40 {
            rig.integrate(1.0, false, false, &cfg);
            rig.tilt = 0.0;
            rig.angular_velocity = 0.0;
        }
        assert_eq!(rig.velocity.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_right_edge_bumps_back() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        rig.position.x = cfg.width - 2.0;
        rig.velocity.x = 8.0;
        rig.tilt = 0.2;
        assert_eq!(rig.integrate(1.0, false, false, &cfg), None);
        assert_eq!(rig.position.x, cfg.width);
        assert_eq!(rig.velocity, Vec2::new(BUMP_VX, BUMP_VY));
        assert!(rig.tilt < 0.2);
    }

    #[test]
    fn test_jump_needs_the_wire() {
        let cfg = config();
        let mut rig = PlayerRig::new(&cfg);
        assert!(rig.jump());
        assert_eq!(rig.velocity.y, -JUMP_IMPULSE);
        rig.position.y -= 50.0;
        assert!(!rig.jump());
        rig.release_jump();
        assert_eq!(rig.velocity.y, 0.0);
    }
}

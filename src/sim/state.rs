//! Round state and the render snapshot
//!
//! `GameRound` owns every entity for the lifetime of a round. Nothing else
//! holds a reference into it; hazards get read-only rig data per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collectibles::{Collectible, CollectibleField, unwanted_target};
use super::collision::Rect;
use super::laser::{LaserBeam, LaserHazard, LaserPhase};
use super::rig::{DeathCause, PlayerRig};
use super::stomp::{StompHazard, StompPhase};
use crate::config::RoundConfig;
use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Stomp,
    Laser,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fish was caught; carries the new score
    FishCaught { score: u32 },
    /// A decoy hit the head and added this much spin
    DecoyStruck { kick: f32 },
    /// Hazard unlocked by score
    HazardActivated(HazardKind),
    StompEntered(StompPhase),
    LaserEntered(LaserPhase),
    Died(DeathCause),
}

/// Complete round state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameRound {
    pub config: RoundConfig,
    pub rig: PlayerRig,
    pub stomp: StompHazard,
    pub laser: LaserHazard,
    pub field: CollectibleField,
    pub score: u32,
    /// ms since the round (or the last death) began
    pub elapsed: f64,
    /// Decoys kept in play
    pub difficulty: usize,
    pub stomp_active: bool,
    pub laser_active: bool,
    /// Direction of travel last tick, for wheel squeaks
    pub(crate) heading_right: bool,
    pub(crate) rng: Pcg32,
}

impl GameRound {
    /// Start a round; rejects geometry the simulation cannot run in
    pub fn new(config: RoundConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "New round {}x{} seed {}",
            config.width,
            config.height,
            config.seed
        );
        Ok(Self {
            config,
            rig: PlayerRig::new(&config),
            stomp: StompHazard::new(&config),
            laser: LaserHazard::new(&config),
            field: CollectibleField::new(&config),
            score: 0,
            elapsed: 0.0,
            difficulty: 0,
            stomp_active: false,
            laser_active: false,
            heading_right: false,
            rng: Pcg32::seed_from_u64(config.seed),
        })
    }

    /// Recompute score-driven difficulty. Returns hazards that just unlocked.
    pub fn update_difficulty(&mut self) -> Vec<HazardKind> {
        let mut unlocked = Vec::new();
        self.difficulty = unwanted_target(self.score);

        if self.score >= LASER_UNLOCK_SCORE && !self.laser_active {
            self.laser_active = true;
            unlocked.push(HazardKind::Laser);
        }
        if self.score >= STOMP_UNLOCK_SCORE && !self.stomp_active {
            self.stomp_active = true;
            unlocked.push(HazardKind::Stomp);
        }
        for hazard in &unlocked {
            log::info!("{:?} hazard active at score {}", hazard, self.score);
        }
        unlocked
    }

    /// Roll back everything a death costs. Collectibles in flight and the
    /// RNG stream are kept. Calling it twice is the same as calling it once.
    pub fn death_reset(&mut self) {
        self.rig = PlayerRig::new(&self.config);
        self.score = 0;
        self.elapsed = 0.0;
        self.difficulty = 0;
        self.heading_right = false;

        self.stomp.reset();
        self.stomp_active = false;
        self.laser.reset(&self.config);
        self.laser_active = false;
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            score: self.score,
            elapsed: self.elapsed,
            difficulty: self.difficulty,
            rig: RigSnapshot {
                position: self.rig.position,
                velocity: self.rig.velocity,
                tilt: self.rig.tilt,
                angular_velocity: self.rig.angular_velocity,
                head: self.rig.head(),
            },
            stomp: StompSnapshot {
                active: self.stomp_active,
                phase: self.stomp.phase(),
                phase_start: self.stomp.timer.phase_start(),
                footprint: self.stomp.footprint,
            },
            laser: LaserSnapshot {
                active: self.laser_active,
                phase: self.laser.phase(),
                phase_start: self.laser.timer.phase_start(),
                position: self.laser.position,
                beam: self.laser.beam,
            },
            collectibles: self.field.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub tilt: f32,
    pub angular_velocity: f32,
    pub head: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StompSnapshot {
    pub active: bool,
    pub phase: StompPhase,
    pub phase_start: f64,
    pub footprint: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserSnapshot {
    pub active: bool,
    pub phase: LaserPhase,
    pub phase_start: f64,
    pub position: Vec2,
    pub beam: Option<LaserBeam>,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub score: u32,
    pub elapsed: f64,
    pub difficulty: usize,
    pub rig: RigSnapshot,
    pub stomp: StompSnapshot,
    pub laser: LaserSnapshot,
    pub collectibles: Vec<Collectible>,
}

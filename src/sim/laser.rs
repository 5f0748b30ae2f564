//! Laser shark hazard
//!
//! Surfaces from the bottom-left, fires a beam along the wire and dives
//! away again. Whether the beam hits is settled when it fires: a cat
//! standing on the wire is hit, a cat in the air is not. The hit lands
//! when the shark leaves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::timer::{HazardStep, Phase, TimedPhaseActor};
use crate::config::RoundConfig;
use crate::consts::*;
use crate::effects::{Cue, EffectCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserPhase {
    Offscreen,
    Approaching,
    Poised,
    Firing,
    Leaving,
}

impl Phase for LaserPhase {
    const CYCLE: &'static [Self] = &[
        LaserPhase::Offscreen,
        LaserPhase::Approaching,
        LaserPhase::Poised,
        LaserPhase::Firing,
        LaserPhase::Leaving,
    ];

    fn duration_ms(self) -> f64 {
        match self {
            LaserPhase::Offscreen => LASER_GAP_MS,
            LaserPhase::Approaching => LASER_APPROACH_MS,
            LaserPhase::Poised => LASER_POISE_MS,
            LaserPhase::Firing => LASER_FIRE_MS,
            LaserPhase::Leaving => LASER_LEAVE_MS,
        }
    }
}

/// The beam, alive from Firing until Leaving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserBeam {
    pub rect: Rect,
    /// Decided at fire time: the beam will count as a hit
    pub armed: bool,
}

impl LaserBeam {
    /// Fire along the beam line; armed unless the rig is clear of the wire
    pub fn fire(config: &RoundConfig, rig_position: Vec2) -> Self {
        Self {
            rect: Rect::new(
                BEAM_X,
                config.laser_height() - BEAM_THICKNESS / 2.0,
                config.width,
                BEAM_THICKNESS,
            ),
            armed: rig_position.y > config.wire_height() - ARM_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaserHazard {
    pub timer: TimedPhaseActor<LaserPhase>,
    /// Top-left of the shark sprite
    pub position: Vec2,
    pub beam: Option<LaserBeam>,
}

impl LaserHazard {
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            timer: TimedPhaseActor::new(0.0),
            position: Vec2::new(PARKED.0, rest_height(config)),
            beam: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> LaserPhase {
        self.timer.phase()
    }

    /// Advance the timer, animate the rise/fall and run entry effects.
    /// Fatal when the shark leaves after an armed shot.
    pub fn update(
        &mut self,
        now: f64,
        config: &RoundConfig,
        rig_position: Vec2,
        effects: &mut Vec<EffectCommand>,
    ) -> HazardStep<LaserPhase> {
        let entered = self.timer.advance(now);
        let mut fatal = false;

        if let Some(phase) = entered {
            log::debug!("laser -> {:?}", phase);
            match phase {
                LaserPhase::Offscreen => {
                    effects.push(EffectCommand::Stop(Cue::SharkGone));
                    effects.push(EffectCommand::Play(Cue::Zirkus));
                    self.position.x = PARKED.0;
                }
                LaserPhase::Approaching => {
                    effects.push(EffectCommand::StopMusic);
                    effects.push(EffectCommand::Play(Cue::SharkAppear));
                    effects.push(EffectCommand::Stop(Cue::Zirkus));
                }
                LaserPhase::Poised => {
                    effects.push(EffectCommand::Stop(Cue::SharkAppear));
                    effects.push(EffectCommand::Play(Cue::SharkAttacks));
                    self.position.x = LASER_POISED_X;
                }
                LaserPhase::Firing => {
                    let beam = LaserBeam::fire(config, rig_position);
                    let cue = if beam.armed { Cue::CatLaser } else { Cue::SharkLaser };
                    effects.push(EffectCommand::Play(cue));
                    self.beam = Some(beam);
                }
                LaserPhase::Leaving => {
                    effects.push(EffectCommand::Stop(Cue::SharkAttacks));
                    effects.push(EffectCommand::Play(Cue::SharkGone));
                    fatal = self.beam.take().is_some_and(|beam| beam.armed);
                }
            }
        }

        self.animate(now, config);
        fatal |= self.collide(rig_position);

        HazardStep { entered, fatal }
    }

    /// Direct contact with the shark never hurts; only the beam does
    pub fn collide(&self, _rig_position: Vec2) -> bool {
        false
    }

    /// Vertical glide while rising into position and while diving away
    fn animate(&mut self, now: f64, config: &RoundConfig) {
        let rest = rest_height(config);
        match self.phase() {
            LaserPhase::Poised => {
                self.position.y = rest + LASER_RISE_RATE * self.timer.remaining(now) as f32;
            }
            LaserPhase::Leaving => {
                self.position.y = rest + LASER_RISE_RATE * self.timer.elapsed(now) as f32;
            }
            _ => {}
        }
    }

    pub fn reset(&mut self, config: &RoundConfig) {
        self.timer.reset(0.0);
        self.position = Vec2::new(PARKED.0, rest_height(config));
        self.beam = None;
    }
}

/// Shark's y when fully surfaced
#[inline]
fn rest_height(config: &RoundConfig) -> f32 {
    config.height - LASER_ATTACKER_HEIGHT
}

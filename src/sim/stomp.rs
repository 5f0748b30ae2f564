//! Stomping foot hazard
//!
//! Hovers over one half of the wire, then slams down on it. Any head in
//! that half while the foot is down ends the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, Side};
use super::timer::{HazardStep, Phase, TimedPhaseActor};
use crate::config::RoundConfig;
use crate::consts::*;
use crate::effects::{Cue, EffectCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StompPhase {
    Offscreen,
    PoiseLeft,
    StompLeft,
    PoiseRight,
    StompRight,
}

impl Phase for StompPhase {
    const CYCLE: &'static [Self] = &[
        StompPhase::Offscreen,
        StompPhase::PoiseLeft,
        StompPhase::StompLeft,
        StompPhase::Offscreen,
        StompPhase::PoiseRight,
        StompPhase::StompRight,
    ];

    fn duration_ms(self) -> f64 {
        match self {
            StompPhase::Offscreen => STOMP_GAP_MS,
            StompPhase::PoiseLeft | StompPhase::PoiseRight => STOMP_POISE_MS,
            StompPhase::StompLeft | StompPhase::StompRight => STOMP_STRIKE_MS,
        }
    }
}

impl StompPhase {
    /// Half of the screen this phase threatens
    pub fn side(self) -> Option<Side> {
        match self {
            StompPhase::PoiseLeft | StompPhase::StompLeft => Some(Side::Left),
            StompPhase::PoiseRight | StompPhase::StompRight => Some(Side::Right),
            StompPhase::Offscreen => None,
        }
    }

    /// Whether the foot is down
    pub fn is_striking(self) -> bool {
        matches!(self, StompPhase::StompLeft | StompPhase::StompRight)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StompHazard {
    pub timer: TimedPhaseActor<StompPhase>,
    /// Foot footprint, half a screen wide and a full screen tall
    pub footprint: Rect,
}

impl StompHazard {
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            timer: TimedPhaseActor::new(0.0),
            footprint: Rect::new(PARKED.0, PARKED.1, config.width / 2.0, config.height),
        }
    }

    #[inline]
    pub fn phase(&self) -> StompPhase {
        self.timer.phase()
    }

    /// Advance the timer and place the foot for a newly entered phase
    pub fn advance(
        &mut self,
        now: f64,
        config: &RoundConfig,
        effects: &mut Vec<EffectCommand>,
    ) -> Option<StompPhase> {
        let entered = self.timer.advance(now)?;
        let half = config.width / 2.0;

        match entered {
            StompPhase::Offscreen => {
                self.park();
                effects.push(EffectCommand::Stop(Cue::FootStomp));
            }
            StompPhase::PoiseLeft | StompPhase::PoiseRight => {
                self.footprint.x = if entered == StompPhase::PoiseLeft { 0.0 } else { half };
                self.footprint.y = STOMP_POISE_REACH - config.height;
                effects.push(EffectCommand::Play(Cue::FootStomp));
            }
            StompPhase::StompLeft | StompPhase::StompRight => {
                self.footprint.x = if entered == StompPhase::StompLeft { 0.0 } else { half };
                self.footprint.y = config.wire_height() - config.height;
            }
        }

        log::debug!("stomp -> {:?}", entered);
        Some(entered)
    }

    /// Whether the foot is down on the half holding `head`
    pub fn collide(&self, head: Vec2, width: f32) -> bool {
        let phase = self.phase();
        phase.is_striking() && Side::of(head.x, width) == phase.side()
    }

    /// Advance then check the strike
    pub fn update(
        &mut self,
        now: f64,
        config: &RoundConfig,
        head: Vec2,
        effects: &mut Vec<EffectCommand>,
    ) -> HazardStep<StompPhase> {
        let entered = self.advance(now, config, effects);
        HazardStep {
            entered,
            fatal: self.collide(head, config.width),
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset(0.0);
        self.park();
    }

    fn park(&mut self) {
        self.footprint.x = PARKED.0;
        self.footprint.y = PARKED.1;
    }
}

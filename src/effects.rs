//! Sound/visual cue intents
//!
//! The simulation never plays anything itself. Each tick collects
//! `EffectCommand`s in order and hands them to an `EffectSink` once the
//! tick's state is committed.

use serde::{Deserialize, Serialize};

/// Named cues the simulation can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Foot hovering above the wire
    FootStomp,
    /// Circus music between shark visits
    Zirkus,
    /// Shark about to surface
    SharkAppear,
    /// Shark poised to fire
    SharkAttacks,
    /// Shark diving away
    SharkGone,
    /// Beam fired and missed
    SharkLaser,
    /// Beam fired and will hit the cat
    CatLaser,
    CatJump,
    /// Wheel squeak on direction change
    CatWheel,
    /// Fish caught
    EatFish,
}

impl Cue {
    /// Asset-style name for the cue
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::FootStomp => "foot_elephant",
            Cue::Zirkus => "zirkus",
            Cue::SharkAppear => "shark_appear",
            Cue::SharkAttacks => "shark_attacks",
            Cue::SharkGone => "shark_gone",
            Cue::SharkLaser => "shark_lazer",
            Cue::CatLaser => "cat_laser_2",
            Cue::CatJump => "cat_jump",
            Cue::CatWheel => "cat_wheel",
            Cue::EatFish => "eatfish",
        }
    }
}

/// A fire-and-forget request to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectCommand {
    Play(Cue),
    Stop(Cue),
    StopMusic,
}

/// Consumer of effect intents. Must not block.
pub trait EffectSink {
    fn play(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
    fn stop_music(&mut self);

    /// Dispatch one command
    fn apply(&mut self, command: EffectCommand) {
        match command {
            EffectCommand::Play(cue) => self.play(cue),
            EffectCommand::Stop(cue) => self.stop(cue),
            EffectCommand::StopMusic => self.stop_music(),
        }
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn play(&mut self, _cue: Cue) {}
    fn stop(&mut self, _cue: Cue) {}
    fn stop_music(&mut self) {}
}

/// Writes every command to the `log` facade at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EffectSink for LogSink {
    fn play(&mut self, cue: Cue) {
        log::trace!("play {}", cue.as_str());
    }

    fn stop(&mut self, cue: Cue) {
        log::trace!("stop {}", cue.as_str());
    }

    fn stop_music(&mut self) {
        log::trace!("stop music");
    }
}

/// Keeps every command it receives, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub commands: Vec<EffectCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `Play(cue)` was ever received
    pub fn played(&self, cue: Cue) -> bool {
        self.commands.contains(&EffectCommand::Play(cue))
    }
}

impl EffectSink for RecordingSink {
    fn play(&mut self, cue: Cue) {
        self.commands.push(EffectCommand::Play(cue));
    }

    fn stop(&mut self, cue: Cue) {
        self.commands.push(EffectCommand::Stop(cue));
    }

    fn stop_music(&mut self) {
        self.commands.push(EffectCommand::StopMusic);
    }
}

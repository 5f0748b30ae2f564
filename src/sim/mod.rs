//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Effects are returned as intents, never played directly
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collectibles;
pub mod collision;
pub mod laser;
pub mod rig;
pub mod state;
pub mod stomp;
pub mod tick;
pub mod timer;

pub use collectibles::{Collectible, CollectibleField, CollectibleKind, Contacts, unwanted_target};
pub use collision::{Rect, Side, within_radius};
pub use laser::{LaserBeam, LaserHazard, LaserPhase};
pub use rig::{DeathCause, PlayerRig};
pub use state::{
    GameEvent, GameRound, HazardKind, LaserSnapshot, RigSnapshot, RoundSnapshot, StompSnapshot,
};
pub use stomp::{StompHazard, StompPhase};
pub use tick::{TickInput, TickReport, tick};
pub use timer::{HazardStep, Phase, TimedPhaseActor};

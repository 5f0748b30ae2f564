//! Thrown fish and decoy rings
//!
//! Fish (wanted) score when they come within reach of the cat's head.
//! Rings (unwanted) knock the cat off balance instead. Both are thrown in
//! from the sides and fall under gravity.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::within_radius;
use crate::config::RoundConfig;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Wanted,
    Unwanted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Number of decoys kept in play for a score.
///
/// The dip back to one decoy at 20..=25 is intentional: that is where the
/// stomping foot joins in.
pub fn unwanted_target(score: u32) -> usize {
    match score {
        0..=3 => 0,
        4..=15 => 1,
        16..=19 => 2,
        20..=25 => 1,
        26..=35 => 2,
        36..=49 => 3,
        _ => ((score - 20) / 10) as usize,
    }
}

/// What touched the head this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    /// Fish caught
    pub caught: u32,
    /// Spin kicks from decoys, in hit order
    pub kicks: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectibleField {
    pub wanted: Vec<Collectible>,
    pub unwanted: Vec<Collectible>,
}

impl CollectibleField {
    /// A round opens with one fish already in the air
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            wanted: vec![Collectible {
                kind: CollectibleKind::Wanted,
                position: Vec2::new(0.0, config.height / 2.0),
                velocity: Vec2::new(OPENING_THROW.0, OPENING_THROW.1),
            }],
            unwanted: Vec::new(),
        }
    }

    pub fn count(&self, kind: CollectibleKind) -> usize {
        match kind {
            CollectibleKind::Wanted => self.wanted.len(),
            CollectibleKind::Unwanted => self.unwanted.len(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collectible> {
        self.wanted.iter().chain(self.unwanted.iter())
    }

    /// Fly everything and drop whatever fell off the bottom
    pub fn advance(&mut self, dt: f32, height: f32) {
        for list in [&mut self.wanted, &mut self.unwanted] {
            for item in list.iter_mut() {
                item.position.x += item.velocity.x * dt;
                item.velocity.y += ITEM_GRAVITY * dt;
                item.position.y += item.velocity.y * dt;
            }
            list.retain(|item| item.position.y <= height);
        }
    }

    /// Remove everything touching the head and report what happened
    pub fn collide(&mut self, head: Vec2, rng: &mut impl Rng) -> Contacts {
        let mut contacts = Contacts::default();

        let before = self.wanted.len();
        self.wanted
            .retain(|item| !within_radius(head, item.position, CATCH_RADIUS));
        contacts.caught = (before - self.wanted.len()) as u32;

        let mut kept = Vec::with_capacity(self.unwanted.len());
        for item in self.unwanted.drain(..) {
            if within_radius(head, item.position, DECOY_RADIUS) {
                contacts.kicks.push(decoy_kick(head, item.position, rng));
            } else {
                kept.push(item);
            }
        }
        self.unwanted = kept;

        contacts
    }

    /// Throw in new items until both populations reach their targets
    pub fn refill(&mut self, unwanted_target: usize, config: &RoundConfig, rng: &mut impl Rng) {
        if self.wanted.is_empty() {
            self.wanted.push(throw(CollectibleKind::Wanted, config, rng));
        }
        while self.unwanted.len() < unwanted_target {
            self.unwanted.push(throw(CollectibleKind::Unwanted, config, rng));
        }
    }
}

/// Spin imparted by a decoy hitting the head; the head is pushed away from
/// the side it was struck on
fn decoy_kick(head: Vec2, decoy: Vec2, rng: &mut impl Rng) -> f32 {
    let to_head = head - decoy;
    let angle = to_head.y.atan2(to_head.x) - std::f32::consts::FRAC_PI_2;
    let side = if angle < 0.0 { 1.0 } else { -1.0 };
    side * rng.random_range(DECOY_KICK_MIN..DECOY_KICK_MAX)
}

/// Lob an item in from a random side at mid-height, toward the middle
fn throw(kind: CollectibleKind, config: &RoundConfig, rng: &mut impl Rng) -> Collectible {
    let from_left = rng.random_bool(0.5);
    let speed = rng.random_range(THROW_SPEED_MIN..=THROW_SPEED_MAX) as f32;
    let lift = rng.random_range(THROW_LIFT_MIN..=THROW_LIFT_MAX) as f32;
    let (x, vx) = if from_left {
        (0.0, speed)
    } else {
        (config.width, -speed)
    };
    Collectible {
        kind,
        position: Vec2::new(x, config.height / 2.0),
        velocity: Vec2::new(vx, -lift),
    }
}

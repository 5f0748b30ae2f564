//! Demo-mode rider
//!
//! Produces a `TickInput` from the current round. Keeps the cat upright
//! first, then chases the nearest fish, stays out from under the foot and
//! hops the laser.

use super::collectibles::CollectibleKind;
use super::collision::Side;
use super::laser::LaserPhase;
use super::state::GameRound;
use super::tick::TickInput;
use crate::consts::WIRE_START;

/// Lean (radians, a few ticks ahead) the rider corrects before anything else
const BALANCE_BAND: f32 = 0.05;
/// Lean at which the rider also throws its weight
const SPIN_BAND: f32 = 0.35;
/// Ticks of angular velocity folded into the lean estimate
const LOOKAHEAD: f32 = 8.0;
/// Close enough to the target x to stop riding
const ARRIVE: f32 = 20.0;
/// Jump this long before the beam fires
const JUMP_LEAD_MS: f64 = 120.0;

pub fn steer(round: &GameRound) -> TickInput {
    let mut input = TickInput::default();
    let rig = &round.rig;
    let width = round.config.width;

    if round.laser_active
        && round.laser.phase() == LaserPhase::Poised
        && round.laser.timer.remaining(round.elapsed) < JUMP_LEAD_MS
        && rig.on_wire()
    {
        input.jump_pressed = true;
    }

    let lean = rig.tilt + rig.angular_velocity * LOOKAHEAD;
    if lean > BALANCE_BAND {
        input.right_held = true;
    } else if lean < -BALANCE_BAND {
        input.left_held = true;
    }
    if lean > SPIN_BAND && rig.angular_velocity > 0.0 {
        input.rotate_left = true;
    } else if lean < -SPIN_BAND && rig.angular_velocity < 0.0 {
        input.rotate_right = true;
    }
    if input.left_held || input.right_held {
        return input;
    }

    let target = target_x(round).clamp((WIRE_START + 0.05) * width, 0.95 * width);
    let x = rig.position.x;
    if x < target - ARRIVE {
        input.right_held = true;
    } else if x > target + ARRIVE {
        input.left_held = true;
    }
    input
}

/// Where the rider wants to be: away from the foot, else under a fish
fn target_x(round: &GameRound) -> f32 {
    let width = round.config.width;
    let head = round.rig.head();

    if round.stomp_active {
        let threatened = round.stomp.phase().side();
        if threatened.is_some() && threatened == Side::of(head.x, width) {
            return match threatened {
                Some(Side::Left) => 0.75 * width,
                _ => 0.4 * width,
            };
        }
    }

    round
        .field
        .iter()
        .filter(|c| c.kind == CollectibleKind::Wanted)
        .min_by(|a, b| {
            a.position
                .distance(head)
                .partial_cmp(&b.position.distance(head))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map_or(width / 2.0, |fish| fish.position.x)
}

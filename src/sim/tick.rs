//! Per-frame simulation tick
//!
//! Order within a tick is fixed: difficulty, inputs, rig physics, hazards,
//! collectibles. Later stages read what earlier ones produced (head
//! position, active flags).

use rand::Rng;

use super::collectibles::unwanted_target;
use super::rig::DeathCause;
use super::state::{GameEvent, GameRound};
use crate::consts::*;
use crate::effects::{Cue, EffectCommand, EffectSink};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Ride left (held)
    pub left_held: bool,
    /// Ride right (held)
    pub right_held: bool,
    /// Jump key went down this tick
    pub jump_pressed: bool,
    /// Jump key came up this tick
    pub jump_released: bool,
    /// Spin counter-clockwise (pressed this tick)
    pub rotate_left: bool,
    /// Spin clockwise (pressed this tick)
    pub rotate_right: bool,
}

/// What a tick produced besides the new state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// Effect intents in emission order, not yet applied
    pub effects: Vec<EffectCommand>,
}

impl TickReport {
    /// First death this tick, if any
    pub fn died(&self) -> Option<DeathCause> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Died(cause) => Some(*cause),
            _ => None,
        })
    }

    /// Hand every effect to `sink`, in order
    pub fn dispatch(&self, sink: &mut impl EffectSink) {
        for command in &self.effects {
            sink.apply(*command);
        }
    }
}

/// Advance the round by `elapsed_ms`
pub fn tick(round: &mut GameRound, input: &TickInput, elapsed_ms: f32) -> TickReport {
    let mut report = TickReport::default();
    let elapsed_ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0)
    } else {
        0.0
    };
    let config = round.config;

    for hazard in round.update_difficulty() {
        report.events.push(GameEvent::HazardActivated(hazard));
    }

    round.elapsed += f64::from(elapsed_ms);
    let dt = elapsed_ms / TICK_MS;

    apply_buttons(round, input, &mut report);

    // --- RIG ---
    if let Some(cause) = round
        .rig
        .integrate(dt, input.left_held, input.right_held, &config)
    {
        die(round, cause, &mut report);
    }

    let heading_right = round.rig.heading_right();
    if heading_right != round.heading_right {
        if round.rng.random_bool(WHEEL_SQUEAK_CHANCE) {
            report.effects.push(EffectCommand::Play(Cue::CatWheel));
        }
        round.heading_right = heading_right;
    }

    // --- HAZARDS ---
    if round.stomp_active {
        let head = round.rig.head();
        let step = round
            .stomp
            .update(round.elapsed, &config, head, &mut report.effects);
        if let Some(phase) = step.entered {
            report.events.push(GameEvent::StompEntered(phase));
        }
        if step.fatal {
            die(round, DeathCause::Stomped, &mut report);
        }
    }

    if round.laser_active {
        let step = round.laser.update(
            round.elapsed,
            &config,
            round.rig.position,
            &mut report.effects,
        );
        if let Some(phase) = step.entered {
            report.events.push(GameEvent::LaserEntered(phase));
        }
        if step.fatal {
            die(round, DeathCause::Lasered, &mut report);
        }
    }

    // --- COLLECTIBLES ---
    round.field.advance(dt, config.height);

    let contacts = round.field.collide(round.rig.head(), &mut round.rng);
    for _ in 0..contacts.caught {
        round.score += 1;
        report.events.push(GameEvent::FishCaught { score: round.score });
        report.effects.push(EffectCommand::Play(Cue::EatFish));
        log::debug!("fish caught, score {}", round.score);
    }
    for kick in contacts.kicks {
        round.rig.spin(kick);
        report.events.push(GameEvent::DecoyStruck { kick });
    }

    // Catches this tick count toward the decoy target straight away
    round.difficulty = unwanted_target(round.score);
    round.field.refill(round.difficulty, &config, &mut round.rng);

    report
}

impl GameRound {
    /// Tick, then apply the tick's effects to `sink`
    pub fn step(
        &mut self,
        input: &TickInput,
        elapsed_ms: f32,
        sink: &mut impl EffectSink,
    ) -> TickReport {
        let report = tick(self, input, elapsed_ms);
        report.dispatch(sink);
        report
    }
}

/// Jump and spin buttons act before physics
fn apply_buttons(round: &mut GameRound, input: &TickInput, report: &mut TickReport) {
    if input.jump_pressed && round.rig.jump() {
        report.effects.push(EffectCommand::Play(Cue::CatJump));
    }
    if input.jump_released {
        round.rig.release_jump();
    }
    if input.rotate_left {
        let nudge = round.rng.random_range(NUDGE_MIN..NUDGE_MAX);
        round.rig.spin(-nudge);
    }
    if input.rotate_right {
        let nudge = round.rng.random_range(NUDGE_MIN..NUDGE_MAX);
        round.rig.spin(nudge);
    }
}

fn die(round: &mut GameRound, cause: DeathCause, report: &mut TickReport) {
    log::info!("Died ({:?}) at score {}", cause, round.score);
    round.death_reset();
    report.events.push(GameEvent::Died(cause));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundConfig;
    use crate::effects::RecordingSink;
    use crate::head_position;
    use crate::sim::collectibles::{Collectible, CollectibleKind};
    use crate::sim::laser::LaserPhase;
    use crate::sim::state::HazardKind;
    use crate::sim::stomp::StompPhase;
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME: f32 = 17.0;

    fn round() -> GameRound {
        GameRound::new(RoundConfig::default()).unwrap()
    }

    /// Keep the rig upright so long runs only test what they mean to
    fn steady(round: &mut GameRound) {
        round.rig.tilt = 0.0;
        round.rig.angular_velocity = 0.0;
    }

    fn input_from_bits(bits: u8) -> TickInput {
        TickInput {
            left_held: bits & 1 != 0,
            right_held: bits & 2 != 0,
            jump_pressed: bits & 4 != 0,
            jump_released: bits & 8 != 0,
            rotate_left: bits & 16 != 0,
            rotate_right: bits & 32 != 0,
        }
    }

    #[test]
    fn test_wire_snaps_rig_back_after_one_tick() {
        let mut round = round();
        let wire = round.config.wire_height();
        round.rig.position = Vec2::new(0.5 * round.config.width, wire + 1.0);
        let report = tick(&mut round, &TickInput::default(), FRAME);
        assert_eq!(report.died(), None);
        assert_eq!(round.rig.position.y, wire);
        assert_eq!(round.rig.velocity.y, 0.0);
    }

    #[test]
    fn test_stomp_on_left_half_kills_this_tick() {
        let mut round = round();
        let config = round.config;
        round.stomp_active = true;
        let mut fx = Vec::new();
        let mut now = 0.0;
        while round.stomp.phase() != StompPhase::StompLeft {
            now += f64::from(FRAME);
            round.stomp.advance(now, &config, &mut fx);
        }
        round.elapsed = now;
        round.rig.position.x = 10.0;
        assert!(round.rig.head().x < config.width / 2.0);

        let report = tick(&mut round, &TickInput::default(), 1.0);
        assert_eq!(report.died(), Some(DeathCause::Stomped));
        assert_eq!(round.score, 0);
        assert_eq!(round.elapsed, 0.0);
        assert!(!round.stomp_active);
        assert_eq!(round.stomp.phase(), StompPhase::Offscreen);
    }

    #[test]
    fn test_stomp_on_other_half_is_survived() {
        let mut round = round();
        let config = round.config;
        round.stomp_active = true;
        let mut fx = Vec::new();
        let mut now = 0.0;
        while round.stomp.phase() != StompPhase::StompLeft {
            now += f64::from(FRAME);
            round.stomp.advance(now, &config, &mut fx);
        }
        round.elapsed = now;
        round.rig.position.x = 0.75 * config.width;
        let report = tick(&mut round, &TickInput::default(), 1.0);
        assert_eq!(report.died(), None);
    }

    #[test]
    fn test_stomp_on_right_half_kills_this_tick() {
        let mut round = round();
        let config = round.config;
        round.stomp_active = true;
        let mut fx = Vec::new();
        let mut now = 0.0;
        while round.stomp.phase() != StompPhase::StompRight {
            now += f64::from(FRAME);
            round.stomp.advance(now, &config, &mut fx);
        }
        round.elapsed = now;

        // Left half is safe while the foot is down on the right
        let mut survivor = round.clone();
        survivor.rig.position.x = 0.3 * config.width;
        let report = tick(&mut survivor, &TickInput::default(), 1.0);
        assert_eq!(report.died(), None);
        assert_eq!(survivor.stomp.phase(), StompPhase::StompRight);

        round.rig.position.x = 0.75 * config.width;
        assert!(round.rig.head().x > config.width / 2.0);
        let report = tick(&mut round, &TickInput::default(), 1.0);
        assert_eq!(report.died(), Some(DeathCause::Stomped));
        assert!(!round.stomp_active);
        assert_eq!(round.stomp.phase(), StompPhase::Offscreen);
    }

    #[test]
    fn test_inactive_hazards_stay_frozen() {
        let mut round = round();
        for _ in 0..1000 {
            steady(&mut round);
            // No catches, so the score cannot unlock anything
            round.field.wanted.clear();
            let report = tick(&mut round, &TickInput::default(), FRAME);
            assert_eq!(report.died(), None);
        }
        assert_eq!(round.score, 0);
        assert_eq!(round.elapsed, 17_000.0);
        assert_eq!(round.stomp.phase(), StompPhase::Offscreen);
        assert_eq!(round.stomp.timer.phase_start(), 0.0);
        assert_eq!(round.laser.phase(), LaserPhase::Offscreen);
        assert_eq!(round.laser.timer.phase_start(), 0.0);

        // The laser's gap has long run out, so it surfaces on the unlock tick
        round.score = 10;
        let report = tick(&mut round, &TickInput::default(), FRAME);
        assert!(report.events.contains(&GameEvent::HazardActivated(HazardKind::Laser)));
        assert!(report.events.contains(&GameEvent::LaserEntered(LaserPhase::Approaching)));
        assert_eq!(round.laser.timer.phase_start(), 17_017.0);
        assert!(!round.stomp_active);
        assert_eq!(round.stomp.phase(), StompPhase::Offscreen);
    }

    #[test]
    fn test_hazards_unlock_independently() {
        let mut round = round();
        round.score = 9;
        let report = tick(&mut round, &TickInput::default(), FRAME);
        assert!(!round.laser_active && !round.stomp_active);
        assert!(!report.events.contains(&GameEvent::HazardActivated(HazardKind::Laser)));

        round.score = 10;
        let report = tick(&mut round, &TickInput::default(), FRAME);
        assert!(round.laser_active);
        assert!(!round.stomp_active);
        assert!(report.events.contains(&GameEvent::HazardActivated(HazardKind::Laser)));

        round.score = 20;
        let report = tick(&mut round, &TickInput::default(), FRAME);
        assert!(round.stomp_active);
        assert!(report.events.contains(&GameEvent::HazardActivated(HazardKind::Stomp)));
    }

    #[test]
    fn test_grounded_rig_is_lasered() {
        let mut round = round();
        round.laser_active = true;
        let mut armed_seen = false;

        for _ in 0..1000 {
            steady(&mut round);
            let report = tick(&mut round, &TickInput::default(), FRAME);
            if report.events.contains(&GameEvent::LaserEntered(LaserPhase::Firing)) {
                assert!(round.laser.beam.expect("beam on firing").armed);
                armed_seen = true;
            }
            if let Some(cause) = report.died() {
                assert_eq!(cause, DeathCause::Lasered);
                assert!(report.events.contains(&GameEvent::LaserEntered(LaserPhase::Leaving)));
                assert!(armed_seen);
                assert!(round.laser.beam.is_none());
                assert!(!round.laser_active);
                return;
            }
        }
        panic!("laser never resolved");
    }

    #[test]
    fn test_jumping_dodges_the_laser() {
        let mut round = round();
        round.laser_active = true;
        let mut jumped = false;
        let mut fired = false;

        for _ in 0..1000 {
            steady(&mut round);
            let mut input = TickInput::default();
            if !jumped
                && round.laser.phase() == LaserPhase::Poised
                && round.laser.timer.remaining(round.elapsed) < 100.0
            {
                input.jump_pressed = true;
                jumped = true;
            }
            let report = tick(&mut round, &input, FRAME);
            if jumped && report.effects.contains(&EffectCommand::Play(Cue::CatJump)) {
                assert!(round.rig.position.y < round.config.wire_height() - 3.0);
            }
            if report.events.contains(&GameEvent::LaserEntered(LaserPhase::Firing)) {
                assert!(!round.laser.beam.unwrap().armed);
                assert!(report.effects.contains(&EffectCommand::Play(Cue::SharkLaser)));
                fired = true;
            }
            assert_eq!(report.died(), None);
            if fired && report.events.contains(&GameEvent::LaserEntered(LaserPhase::Leaving)) {
                return;
            }
        }
        panic!("laser never left");
    }

    #[test]
    fn test_catching_a_fish_scores() {
        let mut round = round();
        let head = round.rig.head();
        round.field.wanted = vec![Collectible {
            kind: CollectibleKind::Wanted,
            position: head,
            velocity: Vec2::ZERO,
        }];
        let report = tick(&mut round, &TickInput::default(), FRAME);
        assert_eq!(round.score, 1);
        assert!(report.events.contains(&GameEvent::FishCaught { score: 1 }));
        assert!(report.effects.contains(&EffectCommand::Play(Cue::EatFish)));
        // Refilled straight away
        assert_eq!(round.field.wanted.len(), 1);
    }

    #[test]
    fn test_decoy_knocks_balance() {
        let mut round = round();
        let head = round.rig.head();
        round.field.unwanted = vec![Collectible {
            kind: CollectibleKind::Unwanted,
            position: head - Vec2::new(20.0, 0.0),
            velocity: Vec2::ZERO,
        }];
        let report = tick(&mut round, &TickInput::default(), FRAME);
        let kick = report
            .events
            .iter()
            .find_map(|e| match e {
                GameEvent::DecoyStruck { kick } => Some(*kick),
                _ => None,
            })
            .expect("decoy should hit");
        assert!(kick > 0.0);
        assert!(round.rig.angular_velocity > 0.05);
        assert_eq!(round.score, 0);
        assert!(round.field.unwanted.is_empty());
    }

    #[test]
    fn test_left_edge_has_no_bump() {
        let mut round = round();
        round.rig.position.x = 100.0;
        round.rig.velocity.x = -MAX_SPEED;
        let mut went_past_edge = false;
        for _ in 0..200 {
            steady(&mut round);
            let input = TickInput {
                left_held: true,
                ..Default::default()
            };
            let report = tick(&mut round, &input, FRAME);
            if let Some(cause) = report.died() {
                assert_eq!(cause, DeathCause::FellOffBottom);
                assert!(went_past_edge);
                return;
            }
            went_past_edge |= round.rig.position.x < 0.0;
        }
        panic!("rig never fell");
    }

    #[test]
    fn test_jump_only_from_wire() {
        let mut round = round();
        let input = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        let report = tick(&mut round, &input, FRAME);
        assert!(report.effects.contains(&EffectCommand::Play(Cue::CatJump)));
        assert!(round.rig.velocity.y < 0.0);

        let report = tick(&mut round, &input, FRAME);
        assert!(!report.effects.contains(&EffectCommand::Play(Cue::CatJump)));

        let release = TickInput {
            jump_released: true,
            ..Default::default()
        };
        tick(&mut round, &release, FRAME);
        // Released mid-rise: upward speed cut, gravity applied once
        assert_eq!(round.rig.velocity.y, GRAVITY);
    }

    #[test]
    fn test_rotate_buttons_spin_the_rig() {
        let mut round = round();
        let input = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        tick(&mut round, &input, FRAME);
        assert!(round.rig.angular_velocity > NUDGE_MIN * 0.8);

        let mut round = self::round();
        let input = TickInput {
            rotate_left: true,
            ..Default::default()
        };
        tick(&mut round, &input, FRAME);
        assert!(round.rig.angular_velocity < -NUDGE_MIN * 0.8);
    }

    #[test]
    fn test_bad_elapsed_is_ignored() {
        let mut round = round();
        tick(&mut round, &TickInput::default(), -50.0);
        tick(&mut round, &TickInput::default(), f32::NAN);
        assert_eq!(round.elapsed, 0.0);
    }

    #[test]
    fn test_step_dispatches_after_commit() {
        let mut round = round();
        let mut sink = RecordingSink::new();
        let input = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        let report = round.step(&input, FRAME, &mut sink);
        assert_eq!(sink.commands, report.effects);
        assert!(sink.played(Cue::CatJump));
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = RoundConfig {
            seed: 99,
            ..Default::default()
        };
        let mut a = GameRound::new(config).unwrap();
        let mut b = GameRound::new(config).unwrap();
        for i in 0..600u32 {
            let input = input_from_bits((i.wrapping_mul(2654435761) >> 24) as u8);
            let ra = tick(&mut a, &input, FRAME);
            let rb = tick(&mut b, &input, FRAME);
            assert_eq!(ra, rb);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    proptest! {
        #[test]
        fn test_invariants_hold_every_tick(
            seed in any::<u64>(),
            frames in proptest::collection::vec((any::<u8>(), 0.0f32..60.0), 1..300),
        ) {
            let config = RoundConfig { seed, ..Default::default() };
            let mut round = GameRound::new(config).unwrap();
            for (bits, ms) in frames {
                tick(&mut round, &input_from_bits(bits), ms);
                let snap = round.snapshot();
                prop_assert_eq!(snap.rig.head, head_position(snap.rig.position, snap.rig.tilt));
                prop_assert!(round.field.count(CollectibleKind::Wanted) >= 1);
                prop_assert!(round.field.count(CollectibleKind::Unwanted) >= unwanted_target(round.score));
                prop_assert!(round.elapsed >= 0.0);
            }
        }

        #[test]
        fn test_death_reset_idempotent_mid_run(
            seed in any::<u64>(),
            frames in proptest::collection::vec(any::<u8>(), 0..200),
        ) {
            let config = RoundConfig { seed, ..Default::default() };
            let mut round = GameRound::new(config).unwrap();
            for bits in frames {
                tick(&mut round, &input_from_bits(bits), FRAME);
            }
            round.death_reset();
            let once = round.snapshot();
            round.death_reset();
            prop_assert_eq!(round.snapshot(), once);
        }
    }
}

//! Cyclic timed phase machine shared by the hazards
//!
//! A hazard describes its phases as an enum implementing [`Phase`]; the
//! actor only tracks which phase is current and when it began.

use std::marker::PhantomData;

/// A phase table: the cycle order and how long each phase lasts
pub trait Phase: Copy + Eq + std::fmt::Debug + 'static {
    /// Phases in cycle order. Must be non-empty.
    const CYCLE: &'static [Self];

    /// Duration of this phase in ms
    fn duration_ms(self) -> f64;
}

/// Outcome of one hazard update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardStep<P> {
    /// Phase entered this tick, if any
    pub entered: Option<P>,
    /// The rig was hit
    pub fatal: bool,
}

/// Edge-triggered cyclic timer over the phases of `P`.
///
/// Timestamps are round time in ms as `f64`; rounds can run for hours.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedPhaseActor<P: Phase> {
    index: usize,
    phase_start: f64,
    _phases: PhantomData<P>,
}

impl<P: Phase> Default for TimedPhaseActor<P> {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<P: Phase> TimedPhaseActor<P> {
    /// Start at the first phase at time `now`
    pub fn new(now: f64) -> Self {
        debug_assert!(!P::CYCLE.is_empty());
        Self {
            index: 0,
            phase_start: now,
            _phases: PhantomData,
        }
    }

    /// Current phase
    #[inline]
    pub fn phase(&self) -> P {
        P::CYCLE[self.index]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Timestamp the current phase began
    #[inline]
    pub fn phase_start(&self) -> f64 {
        self.phase_start
    }

    /// Time left in the current phase (negative once overdue)
    #[inline]
    pub fn remaining(&self, now: f64) -> f64 {
        self.phase_start + self.phase().duration_ms() - now
    }

    /// Time spent in the current phase
    #[inline]
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.phase_start
    }

    /// Advance to `now`. Returns the phase just entered, only on the call
    /// where the phase changed.
    pub fn advance(&mut self, now: f64) -> Option<P> {
        if now - self.phase_start <= self.phase().duration_ms() {
            return None;
        }
        self.index = (self.index + 1) % P::CYCLE.len();
        self.phase_start = now;
        Some(self.phase())
    }

    /// Back to the first phase. No entry event fires for it.
    pub fn reset(&mut self, now: f64) {
        self.index = 0;
        self.phase_start = now;
    }
}

//! Reel — one independently animated digit slot
//!
//! State machine: `Idle → Spinning → Idle`.
//!
//! Entering `Spinning` arms two timers on the shared queue: a repeating
//! display tick that shows random digits, and a one-shot settle timer at the
//! reel's stagger delay. Settling cancels the tick, freezes the display on the
//! target digit and reports completion exactly once.

use rand::Rng;

use l9_core::{Digit, Millis};

use crate::timer::{TimerId, TimerQueue};

/// What a reel timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReelTimerKind {
    /// Show a new random digit
    Tick,
    /// Stop on the target digit
    Settle,
}

/// Timer payload routed back to the owning reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReelTimer {
    pub reel_index: usize,
    pub kind: ReelTimerKind,
}

/// Reel lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReelPhase {
    #[default]
    Idle,
    Spinning,
}

/// Completion signal of a settled reel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReelSettled {
    pub reel_index: usize,
    pub digit: Digit,
}

/// A single digit reel
#[derive(Debug, Clone, Default)]
pub struct Reel {
    index: usize,
    /// Shown digit; `None` renders as "?"
    display: Option<Digit>,
    phase: ReelPhase,
    target: Option<Digit>,
    delay_ms: Millis,
    tick_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    ticks: u64,
}

impl Reel {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Start spinning toward `target`, settling after `delay_ms`
    ///
    /// Any timers left from a previous spin are cancelled first, so a
    /// re-triggered reel can never settle on stale parameters.
    pub fn start(
        &mut self,
        timers: &mut TimerQueue<ReelTimer>,
        target: Digit,
        delay_ms: Millis,
        tick_interval_ms: Millis,
    ) {
        self.cancel_timers(timers);

        self.target = Some(target);
        self.delay_ms = delay_ms;
        self.phase = ReelPhase::Spinning;
        self.ticks = 0;

        self.tick_timer = Some(timers.schedule_every(
            tick_interval_ms,
            ReelTimer {
                reel_index: self.index,
                kind: ReelTimerKind::Tick,
            },
        ));
        self.settle_timer = Some(timers.schedule_once(
            delay_ms,
            ReelTimer {
                reel_index: self.index,
                kind: ReelTimerKind::Settle,
            },
        ));

        log::debug!(
            "Reel {} spinning, settles in {}ms",
            self.index,
            delay_ms
        );
    }

    /// Handle a fired timer
    ///
    /// Returns the completion signal when this timer settled the reel. Ids
    /// that are not this reel's current handles are ignored.
    pub fn on_timer<R: Rng + ?Sized>(
        &mut self,
        timers: &mut TimerQueue<ReelTimer>,
        id: TimerId,
        kind: ReelTimerKind,
        rng: &mut R,
    ) -> Option<ReelSettled> {
        match kind {
            ReelTimerKind::Tick => {
                if self.tick_timer != Some(id) {
                    log::warn!("Reel {}: ignoring stale tick {:?}", self.index, id);
                    return None;
                }
                self.ticks += 1;
                self.display = Some(Digit::random(rng));
                log::trace!("Reel {} tick {} -> {:?}", self.index, self.ticks, self.display);
                None
            }
            ReelTimerKind::Settle => {
                if self.settle_timer != Some(id) {
                    log::warn!("Reel {}: ignoring stale settle {:?}", self.index, id);
                    return None;
                }
                self.settle_timer = None;
                if let Some(tick) = self.tick_timer.take() {
                    timers.cancel(tick);
                }

                self.phase = ReelPhase::Idle;
                let digit = self.target?;
                self.display = Some(digit);

                log::debug!("Reel {} settled on {}", self.index, digit);
                Some(ReelSettled {
                    reel_index: self.index,
                    digit,
                })
            }
        }
    }

    /// Cancel pending timers and stop without reporting completion
    ///
    /// Returns whether the reel was mid-spin.
    pub fn teardown(&mut self, timers: &mut TimerQueue<ReelTimer>) -> bool {
        let was_spinning = self.is_spinning();
        self.cancel_timers(timers);
        self.phase = ReelPhase::Idle;
        if was_spinning {
            log::debug!("Reel {} torn down mid-spin", self.index);
        }
        was_spinning
    }

    /// Teardown plus clear the display back to "?"
    pub fn reset(&mut self, timers: &mut TimerQueue<ReelTimer>) {
        self.teardown(timers);
        self.display = None;
        self.target = None;
        self.delay_ms = 0;
        self.ticks = 0;
    }

    fn cancel_timers(&mut self, timers: &mut TimerQueue<ReelTimer>) {
        for id in [self.tick_timer.take(), self.settle_timer.take()]
            .into_iter()
            .flatten()
        {
            timers.cancel(id);
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn display(&self) -> Option<Digit> {
        self.display
    }

    #[inline]
    pub fn phase(&self) -> ReelPhase {
        self.phase
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.phase == ReelPhase::Spinning
    }

    /// Digit this reel settles (or settled) on
    pub fn target(&self) -> Option<Digit> {
        self.target
    }

    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Display updates shown during the current spin
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Whether any timer of this reel is still scheduled
    pub fn has_pending_timers(&self, timers: &TimerQueue<ReelTimer>) -> bool {
        [self.tick_timer, self.settle_timer]
            .into_iter()
            .flatten()
            .any(|id| timers.is_pending(id))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    /// Fire everything due up to `until`, returning completion signals
    fn run(
        reel: &mut Reel,
        timers: &mut TimerQueue<ReelTimer>,
        rng: &mut StdRng,
        until: Millis,
    ) -> Vec<ReelSettled> {
        let mut settled = Vec::new();
        while let Some(fired) = timers.pop_due(until) {
            if let Some(done) = reel.on_timer(timers, fired.id, fired.payload.kind, rng) {
                settled.push(done);
            }
        }
        timers.advance_clock(until);
        settled
    }

    #[test]
    fn test_spin_then_settle() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut reel = Reel::new(0);
        let target = Digit::new(7).unwrap();

        assert_eq!(reel.display(), None);
        reel.start(&mut timers, target, 1000, 50);
        assert!(reel.is_spinning());

        assert!(run(&mut reel, &mut timers, &mut rng, 999).is_empty());
        assert!(reel.is_spinning());
        assert!(reel.tick_count() >= 19);
        assert!(reel.display().is_some());

        let settled = run(&mut reel, &mut timers, &mut rng, 1000);
        assert_eq!(
            settled,
            vec![ReelSettled {
                reel_index: 0,
                digit: target
            }]
        );
        assert!(!reel.is_spinning());
        assert_eq!(reel.display(), Some(target));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_display_stable_after_settle() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut reel = Reel::new(1);
        let target = Digit::new(3).unwrap();

        reel.start(&mut timers, target, 200, 50);
        run(&mut reel, &mut timers, &mut rng, 200);
        let ticks = reel.tick_count();

        assert!(run(&mut reel, &mut timers, &mut rng, 10_000).is_empty());
        assert_eq!(reel.display(), Some(target));
        assert_eq!(reel.tick_count(), ticks);
    }

    #[test]
    fn test_restart_cancels_previous_timers() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut reel = Reel::new(0);
        let first = Digit::new(1).unwrap();
        let second = Digit::new(8).unwrap();

        reel.start(&mut timers, first, 100, 50);
        reel.start(&mut timers, second, 300, 50);
        assert_eq!(timers.len(), 2);

        let settled = run(&mut reel, &mut timers, &mut rng, 1000);
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].digit, second);
        assert_eq!(reel.display(), Some(second));
    }

    #[test]
    fn test_teardown_never_reports_completion() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut reel = Reel::new(2);

        reel.start(&mut timers, Digit::new(5).unwrap(), 500, 50);
        run(&mut reel, &mut timers, &mut rng, 120);

        assert!(reel.teardown(&mut timers));
        assert!(!reel.has_pending_timers(&timers));
        assert!(run(&mut reel, &mut timers, &mut rng, 5000).is_empty());
        assert!(!reel.is_spinning());
    }

    #[test]
    fn test_stale_timer_id_is_ignored() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut reel = Reel::new(0);
        let foreign = timers.schedule_once(
            10,
            ReelTimer {
                reel_index: 0,
                kind: ReelTimerKind::Settle,
            },
        );

        reel.start(&mut timers, Digit::new(2).unwrap(), 500, 50);
        let outcome = reel.on_timer(&mut timers, foreign, ReelTimerKind::Settle, &mut rng);

        assert!(outcome.is_none());
        assert!(reel.is_spinning());
    }

    #[test]
    fn test_reset_clears_display() {
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(6);
        let mut reel = Reel::new(0);

        reel.start(&mut timers, Digit::new(9).unwrap(), 100, 50);
        run(&mut reel, &mut timers, &mut rng, 100);
        reel.reset(&mut timers);

        assert_eq!(reel.display(), None);
        assert_eq!(reel.target(), None);
        assert!(timers.is_empty());
    }
}

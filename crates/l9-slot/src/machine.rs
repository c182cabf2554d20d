//! SlotMachine — the controller
//!
//! Owns mode selection, starts spin sessions, routes fired timers to their
//! reels and counts completion signals. The global spinning flag clears the
//! moment the last active reel settles.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use l9_core::{Digit, Millis, ReelCount};

use crate::config::SlotConfig;
use crate::reel::{Reel, ReelSettled, ReelTimer};
use crate::stage::{Stage, StageEvent, StageTrace};
use crate::timer::TimerQueue;

/// Number of reels on the machine
pub const REEL_SLOTS: usize = ReelCount::MAX;

/// Label shown on the active mode's button while it spins
pub const SPINNING_LABEL: &str = "SPINNING...";

/// One spin, from trigger until replaced by the next trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinSession {
    pub id: u64,
    pub reel_count: ReelCount,
    /// Target digit per active reel
    pub targets: Vec<Digit>,
    /// Settle delay per active reel
    pub delays_ms: Vec<Millis>,
    pub started_at_ms: Millis,
    /// Reels that reported completion
    pub completed: usize,
}

impl SpinSession {
    pub fn is_complete(&self) -> bool {
        self.completed >= self.reel_count.count()
    }

    pub fn remaining(&self) -> usize {
        self.reel_count.count().saturating_sub(self.completed)
    }
}

/// Observable machine state, for comparisons and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub now_ms: Millis,
    pub spinning: bool,
    pub mode: ReelCount,
    pub session_id: Option<u64>,
    pub completed: usize,
    pub results: [Option<Digit>; REEL_SLOTS],
    pub displays: [Option<Digit>; REEL_SLOTS],
    pub reels_spinning: [bool; REEL_SLOTS],
    pub pending_timers: usize,
}

/// Lucky 9 slot machine
pub struct SlotMachine {
    /// Configuration
    config: SlotConfig,
    /// Shared timer queue for every reel
    timers: TimerQueue<ReelTimer>,
    reels: [Reel; REEL_SLOTS],
    /// Random number generator
    rng: StdRng,
    /// Selected mode
    mode: ReelCount,
    /// Current or last session
    session: Option<SpinSession>,
    results: [Option<Digit>; REEL_SLOTS],
    spinning: bool,
    /// Sessions started so far
    spin_count: u64,
    /// Stage trace of the current or last session
    trace: StageTrace,
}

impl SlotMachine {
    /// Create an idle machine
    pub fn new(config: SlotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            timers: TimerQueue::new(),
            reels: std::array::from_fn(Reel::new),
            rng,
            mode: ReelCount::default(),
            session: None,
            results: [None; REEL_SLOTS],
            spinning: false,
            spin_count: 0,
            trace: StageTrace::default(),
        }
    }

    /// Create with a fixed seed
    pub fn with_seed(config: SlotConfig, seed: u64) -> Self {
        Self::new(config.seeded(seed))
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONTROLS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Select how many reels the next spin drives. Ignored while spinning.
    pub fn select_mode(&mut self, mode: ReelCount) -> bool {
        if self.spinning {
            log::debug!("Mode change to {} ignored while spinning", mode);
            return false;
        }
        self.mode = mode;
        true
    }

    /// Start a spin with the selected mode
    ///
    /// Returns `false`, leaving every piece of state untouched, if a spin is
    /// already in progress.
    pub fn spin(&mut self) -> bool {
        if self.spinning {
            log::debug!("Spin ignored: session still in progress");
            return false;
        }

        let mode = self.mode;
        let now = self.timers.now();
        let tick_interval = self.config.timing.tick_interval_ms;

        self.spin_count += 1;
        let session_id = self.spin_count;
        self.results = [None; REEL_SLOTS];
        self.trace = StageTrace::new(session_id);
        self.trace.push(StageEvent::new(
            Stage::SpinStart {
                session: session_id,
                reel_count: mode,
            },
            now,
        ));

        let mut targets = Vec::with_capacity(mode.count());
        let mut delays_ms = Vec::with_capacity(mode.count());

        for (index, reel) in self.reels.iter_mut().enumerate() {
            if !mode.includes(index) {
                reel.reset(&mut self.timers);
                continue;
            }

            let target = Digit::random(&mut self.rng);
            let delay = self.config.timing.reel_delay(index);
            reel.start(&mut self.timers, target, delay, tick_interval);

            self.results[index] = Some(target);
            targets.push(target);
            delays_ms.push(delay);
            self.trace.push(StageEvent::new(
                Stage::ReelSpinning {
                    reel_index: index,
                    delay_ms: delay,
                },
                now,
            ));
        }

        self.session = Some(SpinSession {
            id: session_id,
            reel_count: mode,
            targets,
            delays_ms,
            started_at_ms: now,
            completed: 0,
        });
        self.spinning = true;

        log::info!("Spin #{} started: {} ({} reels)", session_id, mode.label(), mode.count());
        true
    }

    /// Select `mode` and spin, as one action. No-op while spinning.
    pub fn spin_with(&mut self, mode: ReelCount) -> bool {
        if self.spinning {
            log::debug!("Spin {} ignored: session still in progress", mode);
            return false;
        }
        self.select_mode(mode);
        self.spin()
    }

    /// Cancel every reel's timers and end the session without completion
    ///
    /// Reels that had not settled go back to "?" and drop their result, so
    /// the readout only ever shows digits a reel actually stopped on.
    pub fn shutdown(&mut self) {
        let interrupted = self
            .session
            .as_ref()
            .filter(|_| self.spinning)
            .map(|session| (session.id, session.remaining()));

        for (index, reel) in self.reels.iter_mut().enumerate() {
            if reel.is_spinning() {
                reel.reset(&mut self.timers);
                self.results[index] = None;
            }
        }
        self.timers.clear();

        if let Some((session_id, remaining)) = interrupted {
            log::info!(
                "Spin #{} interrupted with {} reels still spinning",
                session_id,
                remaining
            );
        }
        self.spinning = false;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TIME
    // ═══════════════════════════════════════════════════════════════════════════

    /// Advance virtual time to `now`, firing due timers in deadline order
    ///
    /// Returns the stage events emitted while advancing.
    pub fn advance_to(&mut self, now: Millis) -> Vec<StageEvent> {
        let mut events = Vec::new();

        while let Some(fired) = self.timers.pop_due(now) {
            let ReelTimer { reel_index, kind } = fired.payload;
            let Some(reel) = self.reels.get_mut(reel_index) else {
                log::warn!("Timer {:?} for unknown reel {}", fired.id, reel_index);
                continue;
            };

            if let Some(settled) = reel.on_timer(&mut self.timers, fired.id, kind, &mut self.rng)
            {
                self.on_reel_complete(settled, fired.deadline, &mut events);
            }
        }
        self.timers.advance_clock(now);

        events
    }

    /// Advance virtual time by `delta`
    pub fn advance_by(&mut self, delta: Millis) -> Vec<StageEvent> {
        let target = self.timers.now() + delta;
        self.advance_to(target)
    }

    /// Jump from deadline to deadline until the current spin finishes
    pub fn run_until_idle(&mut self) -> Vec<StageEvent> {
        let mut events = Vec::new();
        while self.spinning {
            let Some(deadline) = self.timers.next_deadline() else {
                log::warn!("Spin stalled with no pending timers");
                break;
            };
            events.extend(self.advance_to(deadline));
        }
        events
    }

    fn on_reel_complete(
        &mut self,
        settled: ReelSettled,
        at: Millis,
        events: &mut Vec<StageEvent>,
    ) {
        let Some(session) = self.session.as_mut() else {
            log::warn!("Reel {} settled with no session", settled.reel_index);
            return;
        };
        if session.is_complete() {
            log::warn!(
                "Surplus completion from reel {} ignored (session #{})",
                settled.reel_index,
                session.id
            );
            return;
        }

        session.completed += 1;
        let session_id = session.id;
        let started_at = session.started_at_ms;
        let final_results = session.is_complete().then(|| session.targets.clone());

        let stop = StageEvent::new(
            Stage::ReelStop {
                reel_index: settled.reel_index,
                digit: settled.digit,
            },
            at,
        );
        self.trace.push(stop.clone());
        events.push(stop);

        let Some(results) = final_results else {
            return;
        };

        let end = StageEvent::new(
            Stage::SpinEnd {
                session: session_id,
                results,
            },
            at,
        );
        self.spinning = false;
        self.trace.push(end.clone());
        events.push(end);

        log::info!(
            "Spin #{} finished after {}ms: {}",
            session_id,
            at.saturating_sub(started_at),
            self.readout().unwrap_or_default()
        );
        if self.config.trace {
            match self.trace.to_json() {
                Ok(json) => log::info!("Stage trace:\n{}", json),
                Err(e) => log::warn!("Failed to serialize stage trace: {}", e),
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Selected mode
    pub fn mode(&self) -> ReelCount {
        self.mode
    }

    /// Mode of the current or last session
    pub fn active_mode(&self) -> Option<ReelCount> {
        self.session.as_ref().map(|session| session.reel_count)
    }

    /// Whether reel `index` belongs to the spin in progress
    pub fn is_reel_active(&self, index: usize) -> bool {
        self.spinning && self.active_mode().is_some_and(|mode| mode.includes(index))
    }

    /// Completion signals counted for the current session
    pub fn completed_reels(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.completed)
    }

    pub fn reels(&self) -> &[Reel; REEL_SLOTS] {
        &self.reels
    }

    pub fn reel(&self, index: usize) -> Option<&Reel> {
        self.reels.get(index)
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    /// Stage trace of the current or last session
    pub fn trace(&self) -> &StageTrace {
        &self.trace
    }

    /// Result digits; `None` for reels outside the last spin
    pub fn results(&self) -> &[Option<Digit>; REEL_SLOTS] {
        &self.results
    }

    /// Results joined for the readout, e.g. `"4 - 9 - 0"`
    ///
    /// `None` while spinning and before the first spin.
    pub fn readout(&self) -> Option<String> {
        if self.spinning {
            return None;
        }
        let present: Vec<String> = self
            .results
            .iter()
            .flatten()
            .map(|digit| digit.to_string())
            .collect();
        if present.is_empty() {
            None
        } else {
            Some(present.join(" - "))
        }
    }

    /// Settle delays for every reel slot
    pub fn delays(&self) -> [Millis; REEL_SLOTS] {
        std::array::from_fn(|index| self.config.timing.reel_delay(index))
    }

    /// Button label for `mode`
    pub fn button_label(&self, mode: ReelCount) -> &'static str {
        if self.spinning && self.active_mode() == Some(mode) {
            SPINNING_LABEL
        } else {
            mode.label()
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Sessions started so far
    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            now_ms: self.now(),
            spinning: self.spinning,
            mode: self.mode,
            session_id: self.session.as_ref().map(|session| session.id),
            completed: self.completed_reels(),
            results: self.results,
            displays: std::array::from_fn(|index| self.reels[index].display()),
            reels_spinning: std::array::from_fn(|index| self.reels[index].is_spinning()),
            pending_timers: self.timers.len(),
        }
    }
}

impl Default for SlotMachine {
    fn default() -> Self {
        Self::new(SlotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> SlotMachine {
        SlotMachine::with_seed(SlotConfig::default(), 42)
    }

    #[test]
    fn test_initial_state() {
        let machine = machine();

        assert!(!machine.is_spinning());
        assert_eq!(machine.mode(), ReelCount::One);
        assert_eq!(machine.results(), &[None, None, None]);
        assert_eq!(machine.readout(), None);
        assert!(machine.reels().iter().all(|reel| reel.display().is_none()));
        assert_eq!(machine.delays(), [1000, 1500, 2000]);
    }

    #[test]
    fn test_spin_assigns_targets_and_delays() {
        let mut machine = machine();

        assert!(machine.spin_with(ReelCount::Two));
        let session = machine.session().unwrap();

        assert_eq!(session.targets.len(), 2);
        assert_eq!(session.delays_ms, vec![1000, 1500]);
        assert!(machine.is_reel_active(0));
        assert!(machine.is_reel_active(1));
        assert!(!machine.is_reel_active(2));
        assert_eq!(machine.results()[2], None);
        assert_eq!(machine.readout(), None);
    }

    #[test]
    fn test_spin_while_spinning_is_noop() {
        let mut machine = machine();
        machine.spin_with(ReelCount::Three);
        machine.advance_to(700);

        let before = machine.snapshot();
        assert!(!machine.spin());
        assert!(!machine.spin_with(ReelCount::One));
        assert!(!machine.select_mode(ReelCount::Two));
        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn test_completion_clears_spinning_once() {
        let mut machine = machine();
        machine.spin_with(ReelCount::Two);

        let events = machine.advance_to(1000);
        assert_eq!(machine.completed_reels(), 1);
        assert!(machine.is_spinning());
        assert_eq!(events.len(), 1);

        let events = machine.advance_to(1500);
        assert_eq!(machine.completed_reels(), 2);
        assert!(!machine.is_spinning());
        let ends = events
            .iter()
            .filter(|event| matches!(event.stage, Stage::SpinEnd { .. }))
            .count();
        assert_eq!(ends, 1);

        machine.advance_to(10_000);
        assert_eq!(machine.completed_reels(), 2);
        assert_eq!(machine.pending_timers(), 0);
    }

    #[test]
    fn test_button_labels() {
        let mut machine = machine();
        machine.spin_with(ReelCount::Two);

        assert_eq!(machine.button_label(ReelCount::Two), SPINNING_LABEL);
        assert_eq!(machine.button_label(ReelCount::One), "LUCKY 9");

        machine.run_until_idle();
        assert_eq!(machine.button_label(ReelCount::Two), "DOUBLE LUCKY 9");
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let mut machine = machine();
        machine.spin_with(ReelCount::Three);
        machine.advance_to(1200);
        machine.shutdown();

        assert!(!machine.is_spinning());
        assert_eq!(machine.pending_timers(), 0);
        assert!(machine.advance_to(5000).is_empty());
        assert_eq!(machine.completed_reels(), 1);

        let settled = machine.session().unwrap().targets[0];
        assert_eq!(machine.results(), &[Some(settled), None, None]);
        assert_eq!(machine.readout(), Some(settled.to_string()));
        assert_eq!(machine.reel(1).unwrap().display(), None);
        assert_eq!(machine.reel(2).unwrap().display(), None);
    }

    #[test]
    fn test_session_remaining() {
        let mut machine = machine();
        machine.spin_with(ReelCount::Three);
        assert_eq!(machine.session().unwrap().remaining(), 3);

        machine.advance_to(1500);
        assert_eq!(machine.session().unwrap().remaining(), 1);

        machine.run_until_idle();
        assert_eq!(machine.session().unwrap().remaining(), 0);
    }

    #[test]
    fn test_seeded_machines_agree() {
        let mut a = machine();
        let mut b = machine();
        a.spin_with(ReelCount::Three);
        b.spin_with(ReelCount::Three);

        assert_eq!(a.session().unwrap().targets, b.session().unwrap().targets);
    }
}

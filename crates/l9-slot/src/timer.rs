//! TimerQueue — cooperative one-shot and repeating timers in virtual time
//!
//! Stands in for a host event loop's `setTimeout`/`setInterval`: callers
//! schedule payloads, cancel them by id, and drain whatever falls due as the
//! clock advances. Due timers pop in deadline order; equal deadlines pop in
//! scheduling order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use l9_core::Millis;

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// A timer that came due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    /// Virtual time the timer was due at
    pub deadline: Millis,
    pub payload: T,
}

#[derive(Debug)]
struct Entry<T> {
    deadline: Millis,
    /// Heap sequence of the live heap node for this entry
    seq: u64,
    /// `Some` for repeating timers
    interval: Option<Millis>,
    payload: T,
}

/// Virtual-time timer queue
///
/// Cancelled entries are dropped from the map immediately and their heap
/// nodes are skipped lazily when they reach the top.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    next_id: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<(Millis, u64, TimerId)>>,
    entries: HashMap<TimerId, Entry<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            next_seq: 0,
            heap: BinaryHeap::new(),
            entries: HashMap::new(),
        }
    }

    /// Current virtual time
    #[inline]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Fire `payload` once, `delay` ms from now
    pub fn schedule_once(&mut self, delay: Millis, payload: T) -> TimerId {
        self.insert(self.now.saturating_add(delay), None, payload)
    }

    /// Fire `payload` every `interval` ms, first after one interval
    ///
    /// A zero interval is clamped to 1ms so a repeating timer can never
    /// spin forever at a single instant.
    pub fn schedule_every(&mut self, interval: Millis, payload: T) -> TimerId {
        let interval = interval.max(1);
        self.insert(self.now.saturating_add(interval), Some(interval), payload)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    #[inline]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of pending timers
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    /// Move the clock forward without firing anything. Never moves back.
    pub fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.entries.clear();
        self.heap.clear();
    }

    fn insert(&mut self, deadline: Millis, interval: Option<Millis>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();

        self.heap.push(Reverse((deadline, seq, id)));
        self.entries.insert(
            id,
            Entry {
                deadline,
                seq,
                interval,
                payload,
            },
        );
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pop the earliest timer due at or before `until`
    ///
    /// The clock moves to the fired timer's deadline, so anything scheduled
    /// while handling it is relative to that instant. Repeating timers are
    /// re-armed one interval after their deadline.
    pub fn pop_due(&mut self, until: Millis) -> Option<FiredTimer<T>> {
        while let Some(&Reverse((deadline, seq, id))) = self.heap.peek() {
            let live = self
                .entries
                .get(&id)
                .is_some_and(|entry| entry.seq == seq);
            if !live {
                self.heap.pop();
                continue;
            }
            if deadline > until {
                return None;
            }

            self.heap.pop();
            self.now = self.now.max(deadline);

            let rearm_seq = self.bump_seq();
            let entry = self.entries.get_mut(&id)?;
            let interval = entry.interval;
            match interval {
                Some(interval) => {
                    let payload = entry.payload.clone();
                    entry.deadline = deadline.saturating_add(interval);
                    entry.seq = rearm_seq;
                    self.heap.push(Reverse((entry.deadline, rearm_seq, id)));
                    return Some(FiredTimer {
                        id,
                        deadline,
                        payload,
                    });
                }
                None => {
                    let entry = self.entries.remove(&id)?;
                    return Some(FiredTimer {
                        id,
                        deadline,
                        payload: entry.payload,
                    });
                }
            }
        }
        None
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, until: Millis) -> Vec<(Millis, &'static str)> {
        let mut fired = Vec::new();
        while let Some(timer) = queue.pop_due(until) {
            fired.push((timer.deadline, timer.payload));
        }
        queue.advance_clock(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(30, "c");
        queue.schedule_once(10, "a");
        queue.schedule_once(20, "b");

        assert_eq!(queue.next_deadline(), Some(10));
        assert_eq!(drain(&mut queue, 100), vec![(10, "a"), (20, "b"), (30, "c")]);
        assert!(queue.is_empty());
        assert_eq!(queue.now(), 100);
    }

    #[test]
    fn test_equal_deadlines_keep_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(5, "first");
        queue.schedule_once(5, "second");

        assert_eq!(drain(&mut queue, 5), vec![(5, "first"), (5, "second")]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule_once(10, "keep");
        let dropped = queue.schedule_once(5, "drop");

        assert!(queue.cancel(dropped));
        assert!(!queue.cancel(dropped));
        assert!(queue.is_pending(keep));
        assert_eq!(drain(&mut queue, 50), vec![(10, "keep")]);
        assert!(!queue.is_pending(keep));
    }

    #[test]
    fn test_repeating_timer_rearms_until_cancelled() {
        let mut queue = TimerQueue::new();
        let tick = queue.schedule_every(50, "tick");

        assert_eq!(drain(&mut queue, 160).len(), 3);
        assert!(queue.is_pending(tick));
        assert_eq!(queue.next_deadline(), Some(200));

        queue.cancel(tick);
        assert!(drain(&mut queue, 1000).is_empty());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut queue = TimerQueue::new();
        queue.schedule_every(0, "spin");

        assert_eq!(drain(&mut queue, 3).len(), 3);
    }

    #[test]
    fn test_schedule_is_relative_to_now() {
        let mut queue: TimerQueue<&'static str> = TimerQueue::new();
        queue.advance_clock(500);
        queue.schedule_once(100, "later");

        assert!(queue.pop_due(599).is_none());
        let fired = queue.pop_due(600).unwrap();
        assert_eq!(fired.deadline, 600);
        assert_eq!(queue.now(), 600);
    }

    #[test]
    fn test_far_deadlines_saturate() {
        let mut queue = TimerQueue::new();
        queue.advance_clock(100);
        queue.schedule_once(Millis::MAX, "never");
        queue.schedule_every(Millis::MAX, "rarely");

        assert_eq!(queue.next_deadline(), Some(Millis::MAX));
        assert_eq!(queue.pop_due(Millis::MAX).map(|t| t.payload), Some("never"));
        assert_eq!(queue.pop_due(Millis::MAX).map(|t| t.payload), Some("rarely"));
        assert_eq!(queue.next_deadline(), Some(Millis::MAX));
    }

    #[test]
    fn test_clock_never_moves_back() {
        let mut queue: TimerQueue<()> = TimerQueue::new();
        queue.advance_clock(100);
        queue.advance_clock(40);

        assert_eq!(queue.now(), 100);
    }
}

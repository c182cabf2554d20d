//! Stage events — the semantic moments of a spin
//!
//! A stage is not an animation frame. Display ticks are visual noise and are
//! never recorded; only start, per-reel spin/stop, and end are.

use serde::{Deserialize, Serialize};

use l9_core::{Digit, L9Error, L9Result, Millis, ReelCount};

/// Canonical spin stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    /// Spin triggered
    SpinStart {
        session: u64,
        reel_count: ReelCount,
    },

    /// Reel began cycling and will settle after `delay_ms`
    ReelSpinning { reel_index: usize, delay_ms: Millis },

    /// Reel settled on its final digit
    ReelStop { reel_index: usize, digit: Digit },

    /// Every active reel settled
    SpinEnd { session: u64, results: Vec<Digit> },
}

impl Stage {
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart { .. } => "spin_start",
            Stage::ReelSpinning { .. } => "reel_spinning",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::SpinEnd { .. } => "spin_end",
        }
    }

    /// Reel this stage refers to, if any
    pub fn reel_index(&self) -> Option<usize> {
        match self {
            Stage::ReelSpinning { reel_index, .. } | Stage::ReelStop { reel_index, .. } => {
                Some(*reel_index)
            }
            _ => None,
        }
    }
}

/// A stage with its virtual timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEvent {
    pub stage: Stage,
    pub timestamp_ms: Millis,
}

impl StageEvent {
    pub fn new(stage: Stage, timestamp_ms: Millis) -> Self {
        Self {
            stage,
            timestamp_ms,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}

/// All stage events of one spin session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTrace {
    pub session: u64,
    pub events: Vec<StageEvent>,
}

impl StageTrace {
    pub fn new(session: u64) -> Self {
        Self {
            session,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Time between the first and last event
    pub fn duration_ms(&self) -> Millis {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    /// `(reel_index, digit)` of every reel stop, in the order they happened
    pub fn reel_stops(&self) -> Vec<(usize, Digit)> {
        self.events
            .iter()
            .filter_map(|event| match event.stage {
                Stage::ReelStop { reel_index, digit } => Some((reel_index, digit)),
                _ => None,
            })
            .collect()
    }

    /// Whether the session reached `SpinEnd`
    pub fn is_complete(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event.stage, Stage::SpinEnd { .. }))
    }

    /// Structural checks on the trace
    pub fn validate(&self) -> TraceValidation {
        let reel_count = self.events.iter().find_map(|event| match event.stage {
            Stage::SpinStart { reel_count, .. } => Some(reel_count.count()),
            _ => None,
        });

        TraceValidation {
            has_spin_start: reel_count.is_some(),
            has_spin_end: self.is_complete(),
            reel_count: reel_count.unwrap_or(0),
            reel_stop_count: self.reel_stops().len(),
            chronological: self
                .events
                .windows(2)
                .all(|pair| pair[0].timestamp_ms <= pair[1].timestamp_ms),
        }
    }

    pub fn to_json(&self) -> L9Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| L9Error::Serialization(e.to_string()))
    }
}

/// Result of [`StageTrace::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceValidation {
    pub has_spin_start: bool,
    pub has_spin_end: bool,
    pub reel_count: usize,
    pub reel_stop_count: usize,
    pub chronological: bool,
}

impl TraceValidation {
    pub fn is_valid(&self) -> bool {
        self.has_spin_start
            && self.has_spin_end
            && self.reel_stop_count == self.reel_count
            && self.chronological
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(value: u8) -> Digit {
        Digit::new(value).unwrap()
    }

    fn double_trace() -> StageTrace {
        let mut trace = StageTrace::new(1);
        trace.push(StageEvent::new(
            Stage::SpinStart {
                session: 1,
                reel_count: ReelCount::Two,
            },
            0,
        ));
        trace.push(StageEvent::new(
            Stage::ReelSpinning {
                reel_index: 0,
                delay_ms: 1000,
            },
            0,
        ));
        trace.push(StageEvent::new(
            Stage::ReelSpinning {
                reel_index: 1,
                delay_ms: 1500,
            },
            0,
        ));
        trace.push(StageEvent::new(
            Stage::ReelStop {
                reel_index: 0,
                digit: digit(4),
            },
            1000,
        ));
        trace.push(StageEvent::new(
            Stage::ReelStop {
                reel_index: 1,
                digit: digit(9),
            },
            1500,
        ));
        trace.push(StageEvent::new(
            Stage::SpinEnd {
                session: 1,
                results: vec![digit(4), digit(9)],
            },
            1500,
        ));
        trace
    }

    #[test]
    fn test_trace_validation() {
        let trace = double_trace();
        let validation = trace.validate();

        assert!(validation.is_valid());
        assert_eq!(validation.reel_count, 2);
        assert_eq!(trace.duration_ms(), 1500);
        assert_eq!(trace.reel_stops(), vec![(0, digit(4)), (1, digit(9))]);
    }

    #[test]
    fn test_incomplete_trace_is_invalid() {
        let mut trace = double_trace();
        trace.events.truncate(4);
        let validation = trace.validate();

        assert!(!validation.has_spin_end);
        assert_eq!(validation.reel_stop_count, 1);
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_stage_accessors() {
        let stop = Stage::ReelStop {
            reel_index: 2,
            digit: digit(0),
        };
        assert_eq!(stop.type_name(), "reel_stop");
        assert_eq!(stop.reel_index(), Some(2));
        assert_eq!(Stage::SpinStart { session: 3, reel_count: ReelCount::One }.reel_index(), None);
    }

    #[test]
    fn test_trace_json() {
        let trace = double_trace();
        let json = trace.to_json().unwrap();

        assert!(json.contains("\"type\": \"spin_start\""));
        assert!(json.contains("\"reel_count\": \"two\""));

        let parsed: StageTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}

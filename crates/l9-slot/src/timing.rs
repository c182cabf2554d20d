//! Timing profiles for reel spins

use serde::{Deserialize, Serialize};

use l9_core::{L9Error, L9Result, Millis, ReelCount};

/// Timing profile for reel spins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast mode
    Turbo,
    /// Short spins for demos and testing
    Studio,
    /// Hand-tuned or scaled values
    Custom,
}

/// Detailed timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Settle delay of the first reel (ms)
    pub base_delay_ms: Millis,

    /// Extra settle delay per reel index (ms)
    pub stagger_ms: Millis,

    /// Interval between display updates while spinning (ms)
    pub tick_interval_ms: Millis,
}

impl TimingConfig {
    /// Longest accepted settle delay or tick interval (one day)
    pub const MAX_DELAY_MS: Millis = 24 * 60 * 60 * 1000;

    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            base_delay_ms: 1000,
            stagger_ms: 500,
            tick_interval_ms: 50,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            base_delay_ms: 500,
            stagger_ms: 250,
            tick_interval_ms: 50,
        }
    }

    /// Studio mode
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            base_delay_ms: 200,
            stagger_ms: 100,
            tick_interval_ms: 20,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self {
                profile: TimingProfile::Custom,
                ..Self::normal()
            },
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: Millis| (ms as f64 * factor.max(0.0)).round() as Millis;

        Self {
            profile: TimingProfile::Custom,
            base_delay_ms: scale(self.base_delay_ms).max(1),
            stagger_ms: scale(self.stagger_ms),
            tick_interval_ms: scale(self.tick_interval_ms).max(1),
        }
    }

    /// Settle delay for reel `index`
    #[inline]
    pub fn reel_delay(&self, index: usize) -> Millis {
        self.base_delay_ms
            .saturating_add(self.stagger_ms.saturating_mul(index as Millis))
    }

    /// Settle delays for reels `0..count`
    pub fn delays(&self, count: usize) -> Vec<Millis> {
        (0..count).map(|index| self.reel_delay(index)).collect()
    }

    /// Time from spin start until the last of `count` reels settles
    pub fn total_spin_duration(&self, count: usize) -> Millis {
        match count {
            0 => 0,
            n => self.reel_delay(n - 1),
        }
    }

    /// Reject values that would stall or flood the timer queue
    pub fn validate(&self) -> L9Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(L9Error::Config(
                "tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.base_delay_ms == 0 {
            return Err(L9Error::Config(
                "base_delay_ms must be greater than 0".to_string(),
            ));
        }

        let last = (ReelCount::MAX - 1) as Millis;
        let fits = self
            .stagger_ms
            .checked_mul(last)
            .and_then(|stagger| stagger.checked_add(self.base_delay_ms))
            .is_some_and(|delay| delay <= Self::MAX_DELAY_MS);
        if !fits {
            return Err(L9Error::Config(format!(
                "last reel delay ({} + {} x {}) exceeds {}ms",
                self.base_delay_ms,
                self.stagger_ms,
                last,
                Self::MAX_DELAY_MS
            )));
        }
        if self.tick_interval_ms > Self::MAX_DELAY_MS {
            return Err(L9Error::Config(format!(
                "tick_interval_ms exceeds {}ms",
                Self::MAX_DELAY_MS
            )));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = TimingConfig::normal();
        let turbo = TimingConfig::turbo();
        let studio = TimingConfig::studio();

        assert!(turbo.base_delay_ms < normal.base_delay_ms);
        assert!(studio.base_delay_ms < turbo.base_delay_ms);
        assert_eq!(TimingConfig::from_profile(TimingProfile::Turbo), turbo);
        assert_eq!(
            TimingConfig::from_profile(TimingProfile::Custom).base_delay_ms,
            normal.base_delay_ms
        );
    }

    #[test]
    fn test_stagger_delays() {
        let config = TimingConfig::normal();

        assert_eq!(config.delays(3), vec![1000, 1500, 2000]);
        assert_eq!(config.reel_delay(1), 1500);
        assert_eq!(config.total_spin_duration(3), 2000);
        assert_eq!(config.total_spin_duration(0), 0);
    }

    #[test]
    fn test_scaled_keeps_tick_positive() {
        let scaled = TimingConfig::normal().scaled(0.0);

        assert_eq!(scaled.profile, TimingProfile::Custom);
        assert_eq!(scaled.tick_interval_ms, 1);
        assert_eq!(scaled.base_delay_ms, 1);
        assert!(scaled.validate().is_ok());

        let half = TimingConfig::normal().scaled(0.5);
        assert_eq!(half.delays(3), vec![500, 750, 1000]);
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = TimingConfig {
            tick_interval_ms: 0,
            ..TimingConfig::normal()
        };

        assert!(matches!(config.validate(), Err(L9Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_delays() {
        let huge_stagger = TimingConfig {
            stagger_ms: Millis::MAX,
            ..TimingConfig::normal()
        };
        assert!(matches!(huge_stagger.validate(), Err(L9Error::Config(_))));
        assert_eq!(huge_stagger.reel_delay(2), Millis::MAX);

        let huge_base = TimingConfig {
            base_delay_ms: Millis::MAX,
            stagger_ms: 0,
            ..TimingConfig::normal()
        };
        assert!(matches!(huge_base.validate(), Err(L9Error::Config(_))));

        let longest = TimingConfig {
            base_delay_ms: TimingConfig::MAX_DELAY_MS,
            stagger_ms: 0,
            ..TimingConfig::normal()
        };
        assert!(longest.validate().is_ok());
    }
}

//! Slot machine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use l9_core::{L9Error, L9Result};

use crate::timing::{TimingConfig, TimingProfile};

/// Complete slot machine configuration
///
/// Loaded from YAML; every field is optional and falls back to the
/// normal-profile defaults.
///
/// ```yaml
/// timing:
///   base_delay_ms: 1000
///   stagger_ms: 500
///   tick_interval_ms: 50
/// seed: 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Reel timing
    pub timing: TimingConfig,

    /// Fixed RNG seed for reproducible sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Log the stage trace of every finished spin
    pub trace: bool,
}

impl SlotConfig {
    /// Config with a named timing profile
    pub fn with_profile(profile: TimingProfile) -> Self {
        Self {
            timing: TimingConfig::from_profile(profile),
            ..Self::default()
        }
    }

    /// Set the RNG seed
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> L9Result<Self> {
        let config: SlotConfig =
            serde_yml::from_str(yaml).map_err(|e| L9Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> L9Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        log::info!("Loaded slot config from {}", path.display());
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> L9Result<String> {
        serde_yml::to_string(self).map_err(|e| L9Error::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> L9Result<()> {
        self.timing.validate()
    }
}

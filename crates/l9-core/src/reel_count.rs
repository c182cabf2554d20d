//! Game mode: how many reels a spin drives

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{L9Error, L9Result};

/// Number of active reels in a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelCount {
    /// "LUCKY 9"
    #[default]
    One,
    /// "DOUBLE LUCKY 9"
    Two,
    /// "TRIPLE LUCKY 9"
    Three,
}

impl ReelCount {
    /// Maximum number of reels on the machine
    pub const MAX: usize = 3;

    pub const ALL: [ReelCount; 3] = [ReelCount::One, ReelCount::Two, ReelCount::Three];

    #[inline]
    pub fn count(self) -> usize {
        match self {
            ReelCount::One => 1,
            ReelCount::Two => 2,
            ReelCount::Three => 3,
        }
    }

    /// Button label for this mode
    pub fn label(self) -> &'static str {
        match self {
            ReelCount::One => "LUCKY 9",
            ReelCount::Two => "DOUBLE LUCKY 9",
            ReelCount::Three => "TRIPLE LUCKY 9",
        }
    }

    /// Short name, as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            ReelCount::One => "single",
            ReelCount::Two => "double",
            ReelCount::Three => "triple",
        }
    }

    /// Whether reel `index` takes part in a spin of this mode
    #[inline]
    pub fn includes(self, index: usize) -> bool {
        index < self.count()
    }
}

impl TryFrom<u8> for ReelCount {
    type Error = L9Error;

    fn try_from(value: u8) -> L9Result<Self> {
        match value {
            1 => Ok(ReelCount::One),
            2 => Ok(ReelCount::Two),
            3 => Ok(ReelCount::Three),
            other => Err(L9Error::InvalidReelCount(other)),
        }
    }
}

impl FromStr for ReelCount {
    type Err = L9Error;

    fn from_str(s: &str) -> L9Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "one" | "1" => Ok(ReelCount::One),
            "double" | "two" | "2" => Ok(ReelCount::Two),
            "triple" | "three" | "3" => Ok(ReelCount::Three),
            _ => Err(L9Error::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ReelCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

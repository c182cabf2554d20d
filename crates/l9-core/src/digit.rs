//! Reel digit value

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{L9Error, L9Result};

/// A single reel digit, always in `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 9;
    /// Number of distinct digits
    pub const COUNT: usize = 10;

    pub fn new(value: u8) -> L9Result<Self> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(L9Error::InvalidDigit(value))
        }
    }

    /// Uniformly random digit
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(Self::MIN..=Self::MAX))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn as_index(self) -> usize {
        self.0 as usize
    }

    /// All digits in ascending order
    pub fn all() -> impl Iterator<Item = Digit> {
        (Self::MIN..=Self::MAX).map(Digit)
    }
}

impl TryFrom<u8> for Digit {
    type Error = L9Error;

    fn try_from(value: u8) -> L9Result<Self> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

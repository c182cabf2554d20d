//! l9-core: Shared types for Lucky 9
//!
//! Value types passed between the slot engine, the GUI and the CLI.

mod digit;
mod error;
mod reel_count;

pub use digit::*;
pub use error::*;
pub use reel_count::*;

/// Virtual time in milliseconds
pub type Millis = u64;

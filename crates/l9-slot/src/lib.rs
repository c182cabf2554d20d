//! # l9-slot — Lucky 9 reel engine
//!
//! Drives one to three digit reels through a timer-based spin sequence.
//! Nothing here owns a thread or a clock: the host advances virtual time
//! and the machine fires whatever timers fall due.
//!
//! ## Architecture
//!
//! ```text
//! SlotMachine (controller)
//!     │
//!     ├── TimerQueue<ReelTimer>   (shared scheduler, virtual ms)
//!     ├── [Reel; 3]               (Idle → Spinning → Idle)
//!     ├── SpinSession             (targets + stagger delays)
//!     └── StageTrace              (SpinStart … ReelStop … SpinEnd)
//! ```

pub mod config;
pub mod machine;
pub mod reel;
pub mod stage;
pub mod timer;
pub mod timing;

pub use config::*;
pub use machine::*;
pub use reel::*;
pub use stage::*;
pub use timer::*;
pub use timing::*;

//! Custom widgets for Lucky 9

mod light_strip;
mod reel_window;
mod result_display;
mod spin_buttons;

pub use light_strip::*;
pub use reel_window::*;
pub use result_display::*;
pub use spin_buttons::*;

//! l9-gui: iced-based widgets for Lucky 9
//!
//! Reel windows, decorative light strips, spin buttons and the result
//! readout, composed by [`slot_machine_view`].

pub mod theme;
pub mod view;
pub mod widgets;

pub use theme::*;
pub use view::*;
pub use widgets::*;

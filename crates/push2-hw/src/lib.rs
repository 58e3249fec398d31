//! Push 2 Hardware Library
//!
//! Provides hardware abstraction for the Ableton Push 2: the USB display
//! (packed RGB565 bitmaps with per-column masking) and the MIDI control
//! surface input.

pub mod display;
pub mod error;
pub mod input;

pub use display::{DisplayBitmap, DisplayTransport, Push2Display};
pub use error::{Error, Result};
pub use input::{InputRouter, MidiEvent};

/// Display dimensions
pub const DISPLAY_WIDTH: u16 = 960;
pub const DISPLAY_HEIGHT: u16 = 160;

/// USB VID:PID for the Push 2
pub const DISPLAY_VID: u16 = 0x2982;
pub const DISPLAY_PID: u16 = 0x1967;

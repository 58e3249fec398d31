//! Push 2 display module.
//!
//! Provides the packed-pixel codec, the device-native bitmap, and the USB
//! transport that ships encoded frames to the 960x160 display.

mod device;
mod protocol;

pub mod bitmap;
pub mod pixel;

pub use bitmap::DisplayBitmap;
pub use device::{DisplayTransport, Push2Display};
pub use pixel::{encode_pixel, rgb888_to_rgb565, XOR_MASKS};

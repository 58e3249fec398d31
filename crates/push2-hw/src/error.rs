//! Error types for the Push 2 hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the hardware.
#[derive(Error, Debug)]
pub enum Error {
    /// Display device not found or could not be opened.
    #[error("Push 2 display not found (VID:PID 2982:1967)")]
    DisplayNotFound,

    /// USB HID communication error.
    #[error("USB HID error: {0}")]
    Hid(#[from] hidapi::HidError),

    /// MIDI subsystem could not be initialized.
    #[error("MIDI init error: {0}")]
    MidiInit(#[from] midir::InitError),

    /// No MIDI input port matched the target name.
    #[error("no MIDI input port matching \"{0}\"")]
    InputPortNotFound(String),

    /// A matching MIDI input port was found but could not be opened.
    #[error("failed to open MIDI input port: {0}")]
    MidiConnect(String),

    /// Bitmap size mismatch.
    #[error("bitmap size mismatch: expected {expected}, got {actual}")]
    BitmapSize { expected: usize, actual: usize },
}

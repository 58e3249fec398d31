//! Device-native bitmap for the Push 2 display.

use crate::{Error, Result, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Total pixel count for the display.
pub const PIXEL_COUNT: usize = DISPLAY_WIDTH as usize * DISPLAY_HEIGHT as usize;

/// Packed-pixel bitmap at the display's native 960x160 resolution.
///
/// Row stride always equals the device width. The buffer is reused between
/// frames; cells a smaller source does not cover keep their previous value.
#[derive(Clone)]
pub struct DisplayBitmap {
    /// Pixel data, already packed and masked for the wire.
    data: Vec<u16>,
}

impl Default for DisplayBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBitmap {
    /// Creates a new bitmap initialized to zero.
    pub fn new() -> Self {
        Self {
            data: vec![0; PIXEL_COUNT],
        }
    }

    /// Returns the width of the bitmap.
    pub fn width(&self) -> u16 {
        DISPLAY_WIDTH
    }

    /// Returns the height of the bitmap.
    pub fn height(&self) -> u16 {
        DISPLAY_HEIGHT
    }

    /// Returns a reference to the raw pixel data.
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Returns a mutable reference to the raw pixel data.
    pub fn data_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Clears the bitmap to a solid value.
    pub fn clear(&mut self, value: u16) {
        self.data.fill(value);
    }

    /// Sets a pixel at the given coordinates.
    pub fn set_pixel(&mut self, x: u16, y: u16, value: u16) {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            let idx = y as usize * DISPLAY_WIDTH as usize + x as usize;
            self.data[idx] = value;
        }
    }

    /// Gets a pixel at the given coordinates.
    pub fn get_pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            let idx = y as usize * DISPLAY_WIDTH as usize + x as usize;
            Some(self.data[idx])
        } else {
            None
        }
    }

    /// Copies pre-encoded pixel data into the bitmap.
    pub fn copy_from_encoded(&mut self, data: &[u16]) -> Result<()> {
        if data.len() != self.data.len() {
            return Err(Error::BitmapSize {
                expected: self.data.len(),
                actual: data.len(),
            });
        }
        self.data.copy_from_slice(data);
        Ok(())
    }
}

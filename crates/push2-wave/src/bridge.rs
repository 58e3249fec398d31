//! Bridge between a tiny-skia drawing surface and the display transport.
//!
//! Owns the RGB frame buffer the renderer draws into and the device-native
//! bitmap sent on every flip. Single-threaded: only the animation task may
//! draw and flip.

use anyhow::anyhow;
use push2_hw::display::pixel::encode_pixel;
use push2_hw::{DisplayBitmap, DisplayTransport, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use tiny_skia::Pixmap;

/// Drawing surface plus encode/flip path for the display.
pub struct DisplayBridge {
    /// RGB frame buffer and drawing surface.
    pixmap: Pixmap,
    /// Device bitmap, reused between flips.
    bitmap: DisplayBitmap,
    /// Transport bound at construction.
    transport: Box<dyn DisplayTransport>,
}

impl DisplayBridge {
    /// Creates a bridge with a frame buffer at the display's native size.
    pub fn new(transport: Box<dyn DisplayTransport>) -> Self {
        Self::with_dimensions(transport, DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
            .expect("native display dimensions are valid")
    }

    /// Creates a bridge with a custom frame buffer size. Flips only update
    /// the overlap with the device bitmap.
    pub fn with_dimensions(
        transport: Box<dyn DisplayTransport>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("invalid frame buffer dimensions {}x{}", width, height))?;
        Ok(Self {
            pixmap,
            bitmap: DisplayBitmap::new(),
            transport,
        })
    }

    /// Returns the frame buffer dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Returns the mutable drawing surface for the current frame.
    pub fn surface_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Encodes the frame buffer into the device bitmap and transmits it.
    ///
    /// Only the overlap of frame buffer and device bitmap is re-encoded;
    /// bitmap cells outside it keep their previous value. Row stride stays
    /// at the device width so row boundaries remain aligned.
    pub fn flip(&mut self) -> push2_hw::Result<()> {
        let cols = (self.pixmap.width() as usize).min(self.bitmap.width() as usize);
        let rows = (self.pixmap.height() as usize).min(self.bitmap.height() as usize);
        let src_stride = self.pixmap.width() as usize;
        let dst_stride = self.bitmap.width() as usize;

        let pixels = self.pixmap.pixels();
        let data = self.bitmap.data_mut();

        for y in 0..rows {
            for x in 0..cols {
                // Surface pixels are premultiplied; unpremultiply before packing
                let p = pixels[y * src_stride + x].demultiply();
                data[y * dst_stride + x] = encode_pixel(p.red(), p.green(), p.blue(), x);
            }
        }

        self.transport.flip(&self.bitmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use push2_hw::display::pixel::rgb888_to_rgb565;
    use std::sync::{Arc, Mutex};
    use tiny_skia::Color;

    /// Transport that records every transmitted bitmap.
    struct RecordingTransport {
        frames: Arc<Mutex<Vec<Vec<u16>>>>,
    }

    impl DisplayTransport for RecordingTransport {
        fn flip(&self, bitmap: &DisplayBitmap) -> push2_hw::Result<()> {
            self.frames.lock().unwrap().push(bitmap.data().to_vec());
            Ok(())
        }
    }

    /// Transport that always fails.
    struct FailingTransport;

    impl DisplayTransport for FailingTransport {
        fn flip(&self, _bitmap: &DisplayBitmap) -> push2_hw::Result<()> {
            Err(push2_hw::Error::DisplayNotFound)
        }
    }

    fn recording_bridge(width: u32, height: u32) -> (DisplayBridge, Arc<Mutex<Vec<Vec<u16>>>>) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let transport = RecordingTransport {
            frames: frames.clone(),
        };
        (
            DisplayBridge::with_dimensions(Box::new(transport), width, height).unwrap(),
            frames,
        )
    }

    #[test]
    fn test_flip_encodes_with_column_masks() {
        let (mut bridge, frames) = recording_bridge(960, 160);
        bridge
            .surface_mut()
            .fill(Color::from_rgba8(255, 0, 0, 255));
        bridge.flip().unwrap();

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        let red = rgb888_to_rgb565(255, 0, 0);
        assert_eq!(frames[0][0], red ^ 0xF3E7);
        assert_eq!(frames[0][1], red ^ 0xFFE7);
    }

    #[test]
    fn test_flip_with_smaller_surface_updates_only_overlap() {
        let (mut bridge, frames) = recording_bridge(4, 2);

        // Seed a cell outside the overlap with prior content
        bridge.bitmap.set_pixel(10, 0, 0xBEEF);

        bridge
            .surface_mut()
            .fill(Color::from_rgba8(255, 255, 255, 255));
        bridge.flip().unwrap();

        let frames = frames.lock().unwrap();
        let white = rgb888_to_rgb565(255, 255, 255);
        let bw = 960usize;

        // Overlap rows are encoded at the device stride
        assert_eq!(frames[0][0], white ^ 0xF3E7);
        assert_eq!(frames[0][3], white ^ 0xFFE7);
        assert_eq!(frames[0][bw], white ^ 0xF3E7);
        assert_eq!(frames[0][bw + 3], white ^ 0xFFE7);

        // Cells beyond the overlap keep prior content
        assert_eq!(frames[0][10], 0xBEEF);
        assert_eq!(frames[0][4], 0);
        assert_eq!(frames[0][2 * bw], 0);
    }

    #[test]
    fn test_flip_propagates_transport_failure() {
        let mut bridge = DisplayBridge::with_dimensions(Box::new(FailingTransport), 4, 2).unwrap();
        assert!(bridge.flip().is_err());
    }

    #[test]
    fn test_zero_dimensions_are_an_error_not_a_panic() {
        assert!(DisplayBridge::with_dimensions(Box::new(FailingTransport), 0, 160).is_err());
        assert!(DisplayBridge::with_dimensions(Box::new(FailingTransport), 960, 0).is_err());
    }

    #[test]
    fn test_flip_unpremultiplies_before_encoding() {
        let (mut bridge, frames) = recording_bridge(4, 2);
        bridge
            .surface_mut()
            .fill(Color::from_rgba8(255, 0, 0, 128));
        bridge.flip().unwrap();

        // The pixel's own color is encoded, not its premultiplied form
        let red = rgb888_to_rgb565(255, 0, 0);
        assert_eq!(frames.lock().unwrap()[0][0], red ^ 0xF3E7);
    }
}

//! Display device communication via USB HID.

use crate::{Error, Result, DISPLAY_PID, DISPLAY_VID};
use hidapi::{HidApi, HidDevice};
use std::sync::Mutex;
use tracing::{debug, info, trace};

use super::bitmap::DisplayBitmap;
use super::protocol::{build_frame_chunk, build_header_packet, encode_frame, CHUNK_COUNT};

/// Transport that accepts a fully encoded bitmap and ships it to the
/// physical display.
pub trait DisplayTransport: Send {
    /// Transmits one complete frame.
    fn flip(&self, bitmap: &DisplayBitmap) -> Result<()>;
}

/// Push 2 display controller.
pub struct Push2Display {
    device: Mutex<HidDevice>,
}

impl Push2Display {
    /// Opens the display by VID:PID.
    ///
    /// The Push 2 exposes several USB interfaces; the display accepts bulk
    /// frame data on the first enumerated one.
    pub fn open() -> Result<Self> {
        let api = HidApi::new()?;

        let devices: Vec<_> = api
            .device_list()
            .filter(|d| d.vendor_id() == DISPLAY_VID && d.product_id() == DISPLAY_PID)
            .collect();

        if devices.is_empty() {
            return Err(Error::DisplayNotFound);
        }

        for dev in &devices {
            debug!(
                "Found HID device: path={:?}, interface={}",
                dev.path(),
                dev.interface_number()
            );
        }

        let device_info = devices.first().ok_or(Error::DisplayNotFound)?;
        let device = device_info.open_device(&api).map_err(|e| {
            debug!("Failed to open device: {}", e);
            Error::DisplayNotFound
        })?;

        info!(
            "Push 2 display opened (VID:{:04X} PID:{:04X}, interface={})",
            DISPLAY_VID,
            DISPLAY_PID,
            device_info.interface_number()
        );

        Ok(Self {
            device: Mutex::new(device),
        })
    }
}

impl DisplayTransport for Push2Display {
    /// Sends one frame: the header packet followed by all payload chunks.
    fn flip(&self, bitmap: &DisplayBitmap) -> Result<()> {
        let frame = encode_frame(bitmap.data());

        let device = self.device.lock().unwrap();
        device.write(&build_header_packet())?;
        for chunk_idx in 0..CHUNK_COUNT {
            let packet = build_frame_chunk(&frame, chunk_idx);
            device.write(&packet)?;
        }

        trace!("Frame transmitted ({} chunks)", CHUNK_COUNT);
        Ok(())
    }
}

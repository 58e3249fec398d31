//! Display protocol definitions and encoding.
//!
//! Protocol structure:
//! - Frame header: 16 bytes (FF CC AA 88 + 12 zero bytes), sent before each frame
//! - Pixel payload: 160 lines of 2048 bytes (1920 pixel bytes + 128 filler)
//! - Transfers: 20 chunks of 16384 bytes per frame

/// Report byte size (HID report ID).
pub const REPORT_SIZE: usize = 1;

/// Frame header sent before every frame.
pub const FRAME_HEADER: [u8; 16] = [
    0xFF, 0xCC, 0xAA, 0x88, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Pixel bytes per line (960 pixels, 2 bytes each).
pub const LINE_PIXEL_BYTES: usize = 1920;

/// Filler bytes appended to each line.
pub const LINE_FILLER_BYTES: usize = 128;

/// Total bytes per line on the wire.
pub const LINE_BYTES: usize = LINE_PIXEL_BYTES + LINE_FILLER_BYTES;

/// Number of lines per frame.
pub const LINE_COUNT: usize = 160;

/// Total payload bytes per frame.
pub const FRAME_BYTES: usize = LINE_BYTES * LINE_COUNT;

/// Transfer chunk size.
pub const CHUNK_SIZE: usize = 16384;

/// Number of chunks per frame.
pub const CHUNK_COUNT: usize = FRAME_BYTES / CHUNK_SIZE;

/// Total buffer size of one transfer including the report byte.
pub const BUFFER_SIZE: usize = REPORT_SIZE + CHUNK_SIZE;

/// Builds the frame header packet.
pub fn build_header_packet() -> [u8; REPORT_SIZE + FRAME_HEADER.len()] {
    let mut buffer = [0u8; REPORT_SIZE + FRAME_HEADER.len()];
    // Skip report byte (index 0)
    buffer[REPORT_SIZE..].copy_from_slice(&FRAME_HEADER);
    buffer
}

/// Serializes a masked bitmap into the wire payload: per line, 960
/// little-endian 16-bit pixels followed by 128 filler bytes.
pub fn encode_frame(pixels: &[u16]) -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_BYTES];
    let line_pixels = LINE_PIXEL_BYTES / 2;

    for line in 0..LINE_COUNT {
        let src = line * line_pixels;
        let dst = line * LINE_BYTES;
        for i in 0..line_pixels {
            if src + i < pixels.len() {
                let pixel = pixels[src + i];
                frame[dst + i * 2] = (pixel & 0xFF) as u8;
                frame[dst + i * 2 + 1] = (pixel >> 8) as u8;
            }
        }
    }

    frame
}

/// Builds one transfer packet from an encoded frame payload.
pub fn build_frame_chunk(frame: &[u8], chunk_index: usize) -> [u8; BUFFER_SIZE] {
    let mut buffer = [0u8; BUFFER_SIZE];
    let offset = chunk_index * CHUNK_SIZE;
    let end = (offset + CHUNK_SIZE).min(frame.len());
    if offset < end {
        buffer[REPORT_SIZE..REPORT_SIZE + (end - offset)].copy_from_slice(&frame[offset..end]);
    }
    buffer
}

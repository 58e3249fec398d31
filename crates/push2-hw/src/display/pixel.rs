//! Pixel codec for the Push 2 display.
//!
//! The display takes RGB565 pixels XOR-masked by column parity. The masking
//! is part of the display firmware's encoding scheme and must be bit-exact.

/// XOR masks applied by column parity (even columns first).
pub const XOR_MASKS: [u16; 2] = [0xF3E7, 0xFFE7];

/// Converts RGB888 to RGB565.
#[inline]
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Encodes one RGB sample into the display's wire format for the given
/// destination column.
#[inline]
pub fn encode_pixel(r: u8, g: u8, b: u8, column: usize) -> u16 {
    rgb888_to_rgb565(r, g, b) ^ XOR_MASKS[column % 2]
}

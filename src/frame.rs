//! Framing of controller values into expander bytes.
//!
//! The expander drives the controller's upper data lines D4..D7 from bits 4..7, so every value is
//! sent as two nibbles, most significant first. Each nibble is latched by a pulse on the enable
//! line: the frame repeats the nibble with E low, high and low again.

use crate::{Backlight, Mode};

/// Enable (strobe) line, expander bit 2.
pub const ENABLE: u8 = 0x04;

/// Read/write line, expander bit 1. Never driven high, the display is write only.
pub const READ: u8 = 0x02;

const NIBBLE_MASK: u8 = 0xf0;

/// Frame the high nibble of `data`.
///
/// Used on its own while the controller may still be in 8-bit mode during reset.
pub fn nibble(data: u8, mode: Mode, backlight: Backlight) -> [u8; 3] {
    let base = (data & NIBBLE_MASK) | mode as u8 | backlight as u8;
    [base, base | ENABLE, base]
}

/// Frame a full byte as two nibbles, high half first, to be sent in one transaction.
pub fn byte(data: u8, mode: Mode, backlight: Backlight) -> [u8; 6] {
    let [h0, h1, h2] = nibble(data, mode, backlight);
    let [l0, l1, l2] = nibble(data << 4, mode, backlight);
    [h0, h1, h2, l0, l1, l2]
}

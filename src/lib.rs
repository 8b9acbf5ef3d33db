#![cfg_attr(not(test), no_std)]
//! Buffered driver for HD44780 character LCDs wired to an I2C port expander (PCF8574 "backpack"
//! modules) like [this one]. It requires an I2C instance implementing [`embedded_hal::i2c::I2c`]
//! and an instance to delay execution with [`embedded_hal::delay::DelayNs`].
//!
//! Text is placed into an in-memory copy of the screen with [`sync_lcd::Lcd::print`] and only
//! reaches the display when [`sync_lcd::Lcd::refresh`] is called, so several placements can be
//! batched into one bus sync.
//!
//! Usage:
//! ```ignore
//! use hd44780_i2c_buffered::{sync_lcd::Lcd, Backlight, Geometry};
//!
//! const LCD_ADDRESS: u8 = 0x27; // Address depends on hardware, see link below
//!
//! // Create a I2C instance, needs to implement embedded_hal::i2c::I2c, this
//! // particular uses the arduino_hal crate for avr microcontrollers like the arduinos.
//! let dp = arduino_hal::Peripherals::take().unwrap();
//! let pins = arduino_hal::pins!(dp);
//! let mut i2c = arduino_hal::I2c::new(
//!     dp.TWI, //
//!     pins.a4.into_pull_up_input(), // use respective pins
//!     pins.a5.into_pull_up_input(),
//!     50000,
//! );
//! let mut delay = arduino_hal::Delay::new();
//!
//! let mut lcd = Lcd::new(&mut i2c, &mut delay, Geometry::Lcd20x4)
//!     .with_address(LCD_ADDRESS)
//!     .with_backlight(Backlight::On)
//!     .init()
//!     .unwrap();
//!
//! lcd.print("Hello", 0, 0);
//! lcd.print("world", 3, 15);
//! lcd.refresh().unwrap();
//! ```
//!
//! This [site][lcd address] describes how to find the address of your LCD devices.
//!
//! [this one]: https://funduinoshop.com/elektronische-module/displays/lcd/16x02-i2c-lcd-modul-hintergrundbeleuchtung-blau
//! [lcd address]: https://www.ardumotive.com/i2clcden.html

#[cfg(feature = "async")]
pub mod async_lcd;
pub mod buffer;
pub mod command;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod sync_lcd;

#[cfg(test)]
mod mock;

pub use error::{Error, UnsupportedGeometry};
pub use geometry::{Geometry, Segment};

/// Address of a PCF8574 backpack with all address jumpers open.
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Blank character, ' ' in the controller's character ROM.
pub const BLANK: u8 = 0x20;

/// State of the backlight switch on expander bit 3.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Backlight {
    Off = 0x00,
    On = 0x08,
}

/// Register select: whether a frame carries an instruction or a character.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Cmd = 0x00,
    Data = 0x01,
}

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use ufmt_write::uWrite;

use crate::buffer::{raw_bytes, rom_bytes, DisplayBuffer};
use crate::command::{self, Step, INIT_SCRIPT};
use crate::{frame, Backlight, Error, Geometry, Mode, DEFAULT_ADDRESS};

/// API to write to the LCD.
///
/// Text goes into a screen buffer first; [`Lcd::refresh`] copies the whole buffer to the display.
pub struct Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    i2c: &'a mut I,
    address: u8,
    delay: &'a mut D,
    backlight_state: Backlight,
    buffer: DisplayBuffer,
}

impl<'a, I, D> Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Create new instance with the I2C and delay instance and the shape of the display.
    ///
    /// The bus must already be set up. Nothing is sent until [`Lcd::init`] or
    /// [`Lcd::initialize`].
    pub fn new(i2c: &'a mut I, delay: &'a mut D, geometry: Geometry) -> Self {
        Self {
            i2c,
            delay,
            backlight_state: Backlight::Off,
            address: DEFAULT_ADDRESS,
            buffer: DisplayBuffer::new(geometry),
        }
    }

    /// Set I2C address, see [lcd address].
    ///
    /// [lcd address]: https://badboi.dev/rust,/microcontrollers/2020/11/09/i2c-hello-world.html
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_backlight(mut self, backlight: Backlight) -> Self {
        self.backlight_state = backlight;
        self
    }

    /// Initializes the hardware and returns the ready driver.
    pub fn init(mut self) -> Result<Self, Error<I::Error>> {
        self.initialize()?;
        Ok(self)
    }

    /// Run the reset script, see [`INIT_SCRIPT`].
    ///
    /// Can be repeated to recover a display that lost power. The screen buffer is kept, call
    /// [`Lcd::refresh`] afterwards to show it again.
    pub fn initialize(&mut self) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "lcd {=u8:#x}: init {}",
            self.address,
            self.buffer.geometry()
        );
        for step in INIT_SCRIPT {
            match step {
                Step::Wait(us) => self.delay.delay_us(us),
                Step::Nibble(data) => self.write4bits(data)?,
                Step::Command(data) => {
                    self.command(data)?;
                    self.delay.delay_us(command::settle_us(data));
                }
            }
        }
        Ok(())
    }

    fn write4bits(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(
                self.address,
                &frame::nibble(data, Mode::Cmd, self.backlight_state),
            )
            .map_err(Error::I2c)
    }

    fn send(&mut self, data: u8, mode: Mode) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(
                self.address,
                &frame::byte(data, mode, self.backlight_state),
            )
            .map_err(Error::I2c)
    }

    fn command(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.send(data, Mode::Cmd)
    }

    /// Switch the backlight. Takes effect immediately and is carried by every later frame.
    pub fn backlight(&mut self, backlight: Backlight) -> Result<(), Error<I::Error>> {
        self.backlight_state = backlight;
        self.i2c
            .write(self.address, &[backlight as u8])
            .map_err(Error::I2c)
    }

    /// Copy the screen buffer to the display.
    ///
    /// Sends one set-address command per DDRAM segment of the geometry followed by the cells of
    /// that segment. Stops at the first failed transaction.
    pub fn refresh(&mut self) -> Result<(), Error<I::Error>> {
        let geometry = self.buffer.geometry();
        #[cfg(feature = "defmt")]
        defmt::trace!("lcd {=u8:#x}: refresh {}", self.address, geometry);
        let mut offset = 0;
        for segment in geometry.segments() {
            self.command(command::set_ddram_address(segment.address))?;
            let end = offset + usize::from(segment.len);
            for i in offset..end {
                let cell = self.buffer.as_bytes()[i];
                self.send(cell, Mode::Data)?;
            }
            offset = end;
        }
        Ok(())
    }

    /// Blank the screen buffer. The display changes on the next [`Lcd::refresh`].
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Place `text` at `(row, col)` in the screen buffer. Coordinates are zero-based.
    ///
    /// Text stops at a `'\0'` or at the end of the row; nothing wraps to the next row. A start
    /// position outside the screen is ignored.
    pub fn print(&mut self, text: &str, row: u8, col: u8) {
        self.buffer.place(rom_bytes(text), row, col);
    }

    /// Like [`Lcd::print`] with raw character ROM codes, e.g. `0xDF` for a degree sign.
    pub fn print_bytes(&mut self, bytes: &[u8], row: u8, col: u8) {
        self.buffer.place(raw_bytes(bytes), row, col);
    }

    /// Set the cursor used by [`uWrite`] to (row, col). Coordinates are zero-based.
    pub fn set_cursor(&mut self, row: u8, col: u8) {
        self.buffer.set_cursor(row, col);
    }

    pub fn geometry(&self) -> Geometry {
        self.buffer.geometry()
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn backlight_state(&self) -> Backlight {
        self.backlight_state
    }

    /// Screen buffer, row major.
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Buffered character at (row, col).
    pub fn cell(&self, row: u8, col: u8) -> Option<u8> {
        self.buffer.cell(row, col)
    }
}

/// Writes into the screen buffer at the cursor, see [`Lcd::set_cursor`].
impl<'a, I, D> uWrite for Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = Error<I::Error>;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.buffer.write_at_cursor(rom_bytes(s));
        Ok(())
    }
}

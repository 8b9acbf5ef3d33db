use embedded_hal_async::{delay::DelayNs, i2c::I2c};

use ufmt_write::uWrite;

use crate::buffer::{raw_bytes, rom_bytes, DisplayBuffer};
use crate::command::{self, Step, INIT_SCRIPT};
use crate::{frame, Backlight, Error, Geometry, Mode, DEFAULT_ADDRESS};

/// API to write to the LCD.
///
/// Same as [`crate::sync_lcd::Lcd`], awaiting the bus and the delays.
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
    pub async fn init(mut self) -> Result<Self, Error<I::Error>> {
        self.initialize().await?;
        Ok(self)
    }

    /// Run the reset script, see [`INIT_SCRIPT`].
    pub async fn initialize(&mut self) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "lcd {=u8:#x}: init {}",
            self.address,
            self.buffer.geometry()
        );
        for step in INIT_SCRIPT {
            match step {
                Step::Wait(us) => self.delay.delay_us(us).await,
                Step::Nibble(data) => self.write4bits(data).await?,
                Step::Command(data) => {
                    self.command(data).await?;
                    self.delay.delay_us(command::settle_us(data)).await;
                }
            }
        }
        Ok(())
    }

    async fn write4bits(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(
                self.address,
                &frame::nibble(data, Mode::Cmd, self.backlight_state),
            )
            .await
            .map_err(Error::I2c)
    }

    async fn send(&mut self, data: u8, mode: Mode) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(
                self.address,
                &frame::byte(data, mode, self.backlight_state),
            )
            .await
            .map_err(Error::I2c)
    }

    async fn command(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.send(data, Mode::Cmd).await
    }

    pub async fn backlight(&mut self, backlight: Backlight) -> Result<(), Error<I::Error>> {
        self.backlight_state = backlight;
        self.i2c
            .write(self.address, &[backlight as u8])
            .await
            .map_err(Error::I2c)
    }

    /// Copy the screen buffer to the display.
    pub async fn refresh(&mut self) -> Result<(), Error<I::Error>> {
        let geometry = self.buffer.geometry();
        #[cfg(feature = "defmt")]
        defmt::trace!("lcd {=u8:#x}: refresh {}", self.address, geometry);
        let mut offset = 0;
        for segment in geometry.segments() {
            self.command(command::set_ddram_address(segment.address))
                .await?;
            let end = offset + usize::from(segment.len);
            for i in offset..end {
                let cell = self.buffer.as_bytes()[i];
                self.send(cell, Mode::Data).await?;
            }
            offset = end;
        }
        Ok(())
    }

    /// Blank the screen buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Place `text` at `(row, col)` in the screen buffer, see [`crate::sync_lcd::Lcd::print`].
    pub fn print(&mut self, text: &str, row: u8, col: u8) {
        self.buffer.place(rom_bytes(text), row, col);
    }

    pub fn print_bytes(&mut self, bytes: &[u8], row: u8, col: u8) {
        self.buffer.place(raw_bytes(bytes), row, col);
    }

    /// Set the cursor used by [`uWrite`] to (row, col).
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

    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, MockDelay, MockI2c};
    use embassy_futures::block_on;

    #[test]
    fn test_init_matches_blocking_driver() {
        let log = mock::log();
        let mut i2c = MockI2c::new(log.clone());
        let mut delay = MockDelay::new(log.clone());
        block_on(
            Lcd::new(&mut i2c, &mut delay, Geometry::Lcd16x2)
                .with_backlight(Backlight::On)
                .init(),
        )
        .unwrap();
        let async_log = log.borrow().clone();

        let log = mock::log();
        let mut i2c = MockI2c::new(log.clone());
        let mut delay = MockDelay::new(log.clone());
        crate::sync_lcd::Lcd::new(&mut i2c, &mut delay, Geometry::Lcd16x2)
            .with_backlight(Backlight::On)
            .init()
            .unwrap();
        assert_eq!(async_log, *log.borrow());
    }

    #[test]
    fn test_refresh_20x4() {
        let log = mock::log();
        let mut i2c = MockI2c::new(log.clone());
        let mut delay = MockDelay::new(log.clone());
        let mut lcd = Lcd::new(&mut i2c, &mut delay, Geometry::Lcd20x4);
        lcd.print("row three", 3, 0);
        block_on(lcd.refresh()).unwrap();

        let writes = mock::writes(&log);
        assert_eq!(writes.len(), 80 + 4);
        // fourth segment starts at 0x40 + 20
        assert_eq!(writes[63][..3], [0xD0, 0xD4, 0xD0]);
        assert_eq!(writes[63][3..], [0x40, 0x44, 0x40]);
        assert_eq!(writes[64][..3], [0x71, 0x75, 0x71]);
    }

    #[test]
    fn test_refresh_reports_failure() {
        let log = mock::log();
        let mut i2c = MockI2c::failing_after(log.clone(), 1);
        let mut delay = MockDelay::new(log.clone());
        let mut lcd = Lcd::new(&mut i2c, &mut delay, Geometry::Lcd40x2);
        assert!(matches!(block_on(lcd.refresh()), Err(Error::I2c(_))));
        assert_eq!(mock::writes(&log).len(), 1);
    }

    #[test]
    fn test_uwrite_then_refresh() {
        let log = mock::log();
        let mut i2c = MockI2c::new(log.clone());
        let mut delay = MockDelay::new(log.clone());
        let mut lcd = Lcd::new(&mut i2c, &mut delay, Geometry::Lcd16x2);
        lcd.set_cursor(0, 14);
        ufmt::uwrite!(lcd, "{}", 123).unwrap();
        assert_eq!(lcd.cell(0, 14), Some(b'1'));
        assert_eq!(lcd.cell(0, 15), Some(b'2'));
        assert_eq!(lcd.cell(1, 0), Some(crate::BLANK));
        assert!(log.borrow().is_empty());

        block_on(lcd.refresh()).unwrap();
        assert_eq!(mock::writes(&log)[15][..3], [0x31, 0x35, 0x31]);
    }
}

//! HD44780 instruction set and the reset script.

/// Instruction opcodes, the arguments are or-ed into the low bits.
#[repr(u8)]
#[derive(Copy, Clone)]
pub enum Instruction {
    Clear = 0x01,
    EntrySet = 0x04,
    DisplayControl = 0x08,
    FunctionSet = 0x20,
    DDRAMAddr = 0x80,
}

#[repr(u8)]
#[derive(Copy, Clone)]
pub enum BitMode {
    Bit4 = 0x00,
    Bit8 = 0x10,
}

// Flags of the configuration commands.
const TWO_LINES: u8 = 0x08;
const FONT_5X8: u8 = 0x00;
const ENTRY_INCREMENT: u8 = 0x02;
const ENTRY_NO_SHIFT: u8 = 0x00;
const DISPLAY_ON: u8 = 0x04;

/// One step of the reset script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Block for the given number of microseconds.
    Wait(u32),
    /// Send only the high nibble, as a command.
    Nibble(u8),
    /// Send a full command byte, then wait for [`settle_us`].
    Command(u8),
}

/// Wait after power on before the controller accepts anything.
pub const POWER_ON_DELAY_US: u32 = 50_000;
/// Wait after the first 8-bit function set.
pub const RESET_DELAY_US: u32 = 5_000;
/// Wait after the remaining reset nibbles.
pub const NIBBLE_DELAY_US: u32 = 150;
/// Execution time of an ordinary instruction (37 us in the datasheet).
pub const COMMAND_DELAY_US: u32 = 50;
/// Execution time of clear display (1.52 ms in the datasheet).
pub const CLEAR_DELAY_US: u32 = 2_000;

const MODE_8BIT: u8 = Instruction::FunctionSet as u8 | BitMode::Bit8 as u8;
const MODE_4BIT: u8 = Instruction::FunctionSet as u8 | BitMode::Bit4 as u8;

/// Reset and configuration sequence, run from an unknown controller state.
///
/// Three 8-bit function sets resynchronise the controller whether it was in 8-bit mode or
/// halfway through a 4-bit byte, then a single nibble switches it to 4-bit mode. Order and waits
/// must not change.
pub const INIT_SCRIPT: [Step; 13] = [
    Step::Wait(POWER_ON_DELAY_US),
    Step::Nibble(MODE_8BIT),
    Step::Wait(RESET_DELAY_US),
    Step::Nibble(MODE_8BIT),
    Step::Wait(NIBBLE_DELAY_US),
    Step::Nibble(MODE_8BIT),
    Step::Wait(NIBBLE_DELAY_US),
    Step::Nibble(MODE_4BIT),
    Step::Wait(NIBBLE_DELAY_US),
    Step::Command(MODE_4BIT | TWO_LINES | FONT_5X8),
    Step::Command(Instruction::EntrySet as u8 | ENTRY_INCREMENT | ENTRY_NO_SHIFT),
    // cursor and blink off
    Step::Command(Instruction::DisplayControl as u8 | DISPLAY_ON),
    Step::Command(Instruction::Clear as u8),
];

/// Settle time after a command byte.
pub fn settle_us(command: u8) -> u32 {
    if command == Instruction::Clear as u8 {
        CLEAR_DELAY_US
    } else {
        COMMAND_DELAY_US
    }
}

/// Set DDRAM address command.
pub fn set_ddram_address(address: u8) -> u8 {
    Instruction::DDRAMAddr as u8 | (address & 0x7f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_bytes() {
        let commands: std::vec::Vec<u8> = INIT_SCRIPT
            .iter()
            .filter_map(|step| match step {
                Step::Command(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(commands, [0x28, 0x06, 0x0C, 0x01]);
    }

    #[test]
    fn test_reset_nibbles() {
        let nibbles: std::vec::Vec<u8> = INIT_SCRIPT
            .iter()
            .filter_map(|step| match step {
                Step::Nibble(n) => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(nibbles, [0x30, 0x30, 0x30, 0x20]);
    }

    #[test]
    fn test_script_starts_with_power_on_wait() {
        assert_eq!(INIT_SCRIPT[0], Step::Wait(POWER_ON_DELAY_US));
    }

    #[test]
    fn test_ddram_address() {
        assert_eq!(set_ddram_address(0x00), 0x80);
        assert_eq!(set_ddram_address(0x40), 0xC0);
        assert_eq!(set_ddram_address(0x54), 0xD4);
    }

    #[test]
    fn test_settle_times() {
        assert_eq!(settle_us(0x01), CLEAR_DELAY_US);
        assert_eq!(settle_us(0x28), COMMAND_DELAY_US);
    }
}

//! Display bus abstractions
//!
//! Serial display controllers (ST7796S, ST7789, ILI9341, ...) discriminate
//! commands from their parameters with an out-of-band D/C line. This module
//! models that link as three blocking primitives.

/// Level of the D/C line for a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// D/C low: the byte is a controller opcode
    Command,
    /// D/C high: the bytes are parameters or pixel data
    Data,
}

/// Bus errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Serial peripheral rejected or failed the transfer
    Spi,
    /// Could not drive the data/command select line
    DataCommandPin,
    /// Could not drive the chip select line
    ChipSelectPin,
    /// Could not drive the reset line
    ResetPin,
}

/// Command/data discriminated display bus
///
/// All operations block the calling thread. Implementations own the link
/// exclusively; nothing else may toggle its control lines while a driver
/// holds it.
pub trait DisplayBus {
    /// Write a single opcode with the D/C line in command mode
    fn write_command(&mut self, opcode: u8) -> Result<(), BusError>;

    /// Write parameter or pixel bytes with the D/C line in data mode
    fn write_data(&mut self, data: &[u8]) -> Result<(), BusError>;

    /// Block for at least `ms` milliseconds
    ///
    /// This is a real wall-clock wait. The controller may still be
    /// processing the previous command until it has elapsed.
    fn delay_ms(&mut self, ms: u32) -> Result<(), BusError>;

    /// Pulse the hardware reset line, if the transport has one
    ///
    /// Returns `Ok(false)` when there is no reset line to drive.
    fn hardware_reset(&mut self) -> Result<bool, BusError> {
        Ok(false)
    }

    /// Write bytes in the given mode
    ///
    /// Command mode sends every byte as its own opcode.
    fn write(&mut self, mode: Mode, bytes: &[u8]) -> Result<(), BusError> {
        match mode {
            Mode::Command => {
                for &opcode in bytes {
                    self.write_command(opcode)?;
                }
                Ok(())
            }
            Mode::Data => self.write_data(bytes),
        }
    }
}

impl<T: DisplayBus + ?Sized> DisplayBus for &mut T {
    fn write_command(&mut self, opcode: u8) -> Result<(), BusError> {
        (**self).write_command(opcode)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        (**self).write_data(data)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<(), BusError> {
        (**self).delay_ms(ms)
    }

    fn hardware_reset(&mut self) -> Result<bool, BusError> {
        (**self).hardware_reset()
    }
}

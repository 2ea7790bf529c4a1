//! 4-wire SPI transport
//!
//! Drives a command/data display controller over an exclusive
//! [`SpiBus`]. Chip select is handled here rather than by an `SpiDevice`
//! because the D/C line must settle before CS falls:
//!
//! ```text
//!        command          data
//! DC  ‾‾\________/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//! CS  ‾‾‾‾\____/‾‾‾‾‾\__________/‾‾‾‾
//! SDA      [op]        [b0 b1 .. bn]
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::SpiBus;
use tessera_hal::{BusError, DisplayBus, Mode};

/// Reset pulse width (ms)
pub const RESET_PULSE_MS: u32 = 10;

/// Wait after releasing reset before the controller accepts commands (ms)
pub const RESET_RECOVERY_MS: u32 = 120;

/// Placeholder for an unconnected reset line
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// 4-wire SPI display bus
pub struct FourWire<SPI, DC, CS, RST, D> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: Option<RST>,
    delay: D,
}

impl<SPI, DC, CS, D> FourWire<SPI, DC, CS, NoPin, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    /// Create a transport without a reset line
    pub fn new(spi: SPI, dc: DC, cs: CS, delay: D) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst: None,
            delay,
        }
    }

    /// Attach a reset line
    pub fn with_reset<RST: OutputPin>(self, rst: RST) -> FourWire<SPI, DC, CS, RST, D> {
        FourWire {
            spi: self.spi,
            dc: self.dc,
            cs: self.cs,
            rst: Some(rst),
            delay: self.delay,
        }
    }
}

impl<SPI, DC, CS, RST, D> FourWire<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Give back the peripherals
    pub fn release(self) -> (SPI, DC, CS, Option<RST>, D) {
        (self.spi, self.dc, self.cs, self.rst, self.delay)
    }

    fn transfer(&mut self, mode: Mode, bytes: &[u8]) -> Result<(), BusError> {
        match mode {
            Mode::Command => self.dc.set_low(),
            Mode::Data => self.dc.set_high(),
        }
        .map_err(|_| BusError::DataCommandPin)?;

        self.cs.set_low().map_err(|_| BusError::ChipSelectPin)?;
        let sent = self
            .spi
            .write(bytes)
            .and_then(|()| self.spi.flush())
            .map_err(|_| BusError::Spi);
        // CS goes back up even when the transfer failed
        let deselected = self.cs.set_high().map_err(|_| BusError::ChipSelectPin);

        sent?;
        deselected
    }
}

impl<SPI, DC, CS, RST, D> DisplayBus for FourWire<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    fn write_command(&mut self, opcode: u8) -> Result<(), BusError> {
        self.transfer(Mode::Command, &[opcode])
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        if data.is_empty() {
            return Ok(());
        }
        self.transfer(Mode::Data, data)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<(), BusError> {
        self.delay.delay_ms(ms);
        Ok(())
    }

    fn hardware_reset(&mut self) -> Result<bool, BusError> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(false);
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("fourwire: pulsing reset");

        rst.set_high().map_err(|_| BusError::ResetPin)?;
        rst.set_low().map_err(|_| BusError::ResetPin)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        rst.set_high().map_err(|_| BusError::ResetPin)?;
        self.delay.delay_ms(RESET_RECOVERY_MS);
        Ok(true)
    }
}

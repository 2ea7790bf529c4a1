//! Recording bus for host tests
//!
//! Captures every bus operation in order so tests can assert on the exact
//! byte sequence a driver produced. Failures can be injected at the k-th
//! command or data write to exercise abort paths.

use alloc::vec::Vec;

use crate::bus::{BusError, DisplayBus};

/// One recorded bus operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    /// Opcode written in command mode
    Command(u8),
    /// Bytes written in data mode
    Data(Vec<u8>),
    /// Blocking delay in milliseconds
    Delay(u32),
    /// Hardware reset pulse
    Reset,
}

/// Bus that records instead of transmitting
#[derive(Debug, Default)]
pub struct RecordingBus {
    ops: Vec<BusOp>,
    commands_written: usize,
    data_writes: usize,
    fail_command: Option<usize>,
    fail_data: Option<usize>,
    has_reset_line: bool,
}

impl RecordingBus {
    /// Create an empty recording bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording bus that also reports a reset line
    pub fn with_reset_line() -> Self {
        Self {
            has_reset_line: true,
            ..Self::default()
        }
    }

    /// Fail the `index`-th command write (0-based) with `BusError::Spi`
    pub fn fail_at_command(mut self, index: usize) -> Self {
        self.fail_command = Some(index);
        self
    }

    /// Fail the `index`-th data write (0-based) with `BusError::Spi`
    pub fn fail_at_data_write(mut self, index: usize) -> Self {
        self.fail_data = Some(index);
        self
    }

    /// All recorded operations in order
    pub fn ops(&self) -> &[BusOp] {
        &self.ops
    }

    /// Opcodes written, in order
    pub fn commands(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Every data byte written, concatenated
    pub fn data_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            if let BusOp::Data(bytes) = op {
                out.extend_from_slice(bytes);
            }
        }
        out
    }

    /// Sum of all delays
    pub fn total_delay_ms(&self) -> u32 {
        self.ops
            .iter()
            .map(|op| match op {
                BusOp::Delay(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    /// Forget everything recorded so far (injected failures stay armed)
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl DisplayBus for RecordingBus {
    fn write_command(&mut self, opcode: u8) -> Result<(), BusError> {
        let index = self.commands_written;
        self.commands_written += 1;
        if self.fail_command == Some(index) {
            return Err(BusError::Spi);
        }
        self.ops.push(BusOp::Command(opcode));
        Ok(())
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        let index = self.data_writes;
        self.data_writes += 1;
        if self.fail_data == Some(index) {
            return Err(BusError::Spi);
        }
        self.ops.push(BusOp::Data(data.to_vec()));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<(), BusError> {
        self.ops.push(BusOp::Delay(ms));
        Ok(())
    }

    fn hardware_reset(&mut self) -> Result<bool, BusError> {
        if !self.has_reset_line {
            return Ok(false);
        }
        self.ops.push(BusOp::Reset);
        Ok(true)
    }
}

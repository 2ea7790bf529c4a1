//! Events that trigger lifecycle transitions

use tessera_protocol::opcodes::{self, cscon};
use tessera_protocol::CommandRecord;

/// Events that can trigger controller state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// Reset line was pulsed
    HardwareReset,
    /// `SWRESET` was sent
    SoftwareReset,
    /// `SLPOUT` was sent
    SleepOut,
    /// Final extension-command unlock key was sent
    ExtensionUnlocked,
    /// Pixel format and orientation are both known
    FormatAndOrientationSet,
    /// `DISPON` was sent
    DisplayOn,
}

impl ControllerEvent {
    /// Event implied by a record, if any
    ///
    /// [`ControllerEvent::FormatAndOrientationSet`] depends on accumulated configuration
    /// and is never produced here.
    pub fn from_record(record: &CommandRecord<'_>) -> Option<Self> {
        match (record.opcode, record.data) {
            (opcodes::SWRESET, _) => Some(ControllerEvent::SoftwareReset),
            (opcodes::SLPOUT, _) => Some(ControllerEvent::SleepOut),
            (opcodes::CSCON, [cscon::UNLOCK_PART2, ..]) => Some(ControllerEvent::ExtensionUnlocked),
            (opcodes::DISPON, _) => Some(ControllerEvent::DisplayOn),
            _ => None,
        }
    }
}

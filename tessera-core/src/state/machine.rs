//! Controller lifecycle state machine
//!
//! Transitions only move forward. The single way back is a reset, after
//! which the whole script has to be replayed from its first record.

use super::events::ControllerEvent;

/// Controller states, in lifecycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Nothing sent yet; controller state unknown
    #[default]
    Unpowered,
    /// Hardware or software reset issued; controller is in sleep-in mode
    Reset,
    /// Sleep-out issued; the controller leaves sleep once its delay elapses
    Sleeping,
    /// Extension command set unlocked
    Unlocked,
    /// Pixel format and orientation set
    Configured,
    /// Display output enabled; pixel data may be written
    Active,
}

impl ControllerState {
    /// Check if the controller accepts frame data
    pub fn accepts_pixels(&self) -> bool {
        matches!(self, ControllerState::Active)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: ControllerEvent) -> Self {
        use ControllerEvent::*;
        use ControllerState::*;

        match (self, event) {
            // Reset is accepted everywhere and restarts the lifecycle
            (_, HardwareReset) => Reset,
            (_, SoftwareReset) => Reset,

            (Reset, SleepOut) => Sleeping,

            (Sleeping, ExtensionUnlocked) => Unlocked,

            // Controllers without an extension lock skip Unlocked
            (Sleeping, FormatAndOrientationSet) => Configured,
            (Unlocked, FormatAndOrientationSet) => Configured,

            (Configured, DisplayOn) => Active,

            // Default: stay in current state
            _ => self,
        }
    }
}

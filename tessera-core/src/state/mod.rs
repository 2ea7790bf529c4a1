//! Controller lifecycle tracking
//!
//! The controller's own state is invisible to the host. This module
//! mirrors it from the commands that were sent, so the session can tell
//! whether a replayed script actually left the panel ready for pixels.

pub mod events;
pub mod machine;

pub use events::ControllerEvent;
pub use machine::ControllerState;

//! Session errors

use core::fmt;

use tessera_core::{ComposeError, ControllerState, InitError, PixelFormat};
use tessera_hal::BusError;

/// Errors reported by a display session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// Init script ends inside the record at `offset`
    MalformedScript {
        /// Byte offset of the truncated record
        offset: usize,
    },
    /// Transport write, delay or reset failed
    Transport(BusError),
    /// Scene could not be composed; nothing was sent
    Compose(ComposeError),
    /// Script left the controller in a pixel format frames cannot be sent in
    UnsupportedPixelFormat(Option<PixelFormat>),
    /// Script finished without enabling the display
    Incomplete(ControllerState),
    /// Panel RAM offset plus surface size runs past the controller's address range
    WindowOutOfRange,
    /// Session is already in use by this caller
    Busy,
}

impl From<BusError> for SessionError {
    fn from(e: BusError) -> Self {
        SessionError::Transport(e)
    }
}

impl From<InitError> for SessionError {
    fn from(e: InitError) -> Self {
        match e {
            InitError::MalformedScript { offset } => SessionError::MalformedScript { offset },
            InitError::TransportFailure(e) => SessionError::Transport(e),
        }
    }
}

impl From<ComposeError> for SessionError {
    fn from(e: ComposeError) -> Self {
        SessionError::Compose(e)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MalformedScript { offset } => {
                write!(f, "init script truncated in record at byte {}", offset)
            }
            SessionError::Transport(e) => write!(f, "transport failure: {:?}", e),
            SessionError::Compose(ComposeError::InvalidIndex {
                x,
                y,
                index,
                palette_len,
                ..
            }) => write!(
                f,
                "palette index {} at bitmap cell ({}, {}) outside palette of {}",
                index, x, y, palette_len
            ),
            SessionError::Compose(e) => write!(f, "compose failed: {:?}", e),
            SessionError::UnsupportedPixelFormat(Some(format)) => {
                write!(f, "controller set to {:?}, frames need RGB565", format)
            }
            SessionError::UnsupportedPixelFormat(None) => {
                write!(f, "init script never set a pixel format")
            }
            SessionError::Incomplete(state) => {
                write!(f, "init script stopped with controller in {:?}", state)
            }
            SessionError::WindowOutOfRange => {
                write!(f, "panel offset and size exceed the 16-bit address range")
            }
            SessionError::Busy => write!(f, "display session busy"),
        }
    }
}

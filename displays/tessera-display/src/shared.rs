//! Shared display access
//!
//! Wraps a [`DisplaySession`] in an `embassy-sync` blocking mutex so that
//! several parts of a program can hold `&SharedDisplay` and take turns.
//! The raw mutex type picks the scope: `NoopRawMutex` within one
//! executor or thread, `CriticalSectionRawMutex` across interrupts.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use tessera_core::{ControllerState, Group, Scene};
use tessera_hal::DisplayBus;

use crate::error::SessionError;
use crate::session::DisplaySession;

/// A display session behind a lock
pub struct SharedDisplay<M: RawMutex, B: DisplayBus> {
    inner: Mutex<M, RefCell<DisplaySession<B>>>,
}

impl<M: RawMutex, B: DisplayBus> SharedDisplay<M, B> {
    /// Share an open session
    pub const fn new(session: DisplaySession<B>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session
    ///
    /// Calling this again from inside `f` returns [`SessionError::Busy`]
    /// instead of deadlocking.
    pub fn with_session<R>(
        &self,
        f: impl FnOnce(&mut DisplaySession<B>) -> R,
    ) -> Result<R, SessionError> {
        self.inner.lock(|cell| {
            let mut session = cell.try_borrow_mut().map_err(|_| SessionError::Busy)?;
            Ok(f(&mut session))
        })
    }

    /// Render and send a frame
    pub fn commit(&self, scene: &Scene, root: &Group) -> Result<(), SessionError> {
        self.with_session(|session| session.commit(scene, root))?
    }

    /// Controller lifecycle state
    pub fn state(&self) -> Result<ControllerState, SessionError> {
        self.with_session(|session| session.state())
    }

    /// Take the session back
    pub fn into_inner(self) -> DisplaySession<B> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use tessera_core::PanelConfig;
    use tessera_hal::{BusOp, RecordingBus};
    use tessera_protocol::Script;

    const TINY_INIT: &[u8] = b"\x01\x00\x11\x00\x36\x01\x00\x3A\x01\x55\x29\x00";

    fn shared() -> SharedDisplay<NoopRawMutex, RecordingBus> {
        let session =
            DisplaySession::open(Script::new(TINY_INIT), RecordingBus::new(), PanelConfig::new(2, 2))
                .unwrap();
        SharedDisplay::new(session)
    }

    #[test]
    fn test_commit_through_lock() {
        let display = shared();
        display.commit(&Scene::new(), &Group::new()).unwrap();
        assert_eq!(display.state(), Ok(ControllerState::Active));

        let session = display.into_inner();
        assert_eq!(session.bus().ops().last(), Some(&BusOp::Data([0u8; 8].to_vec())));
    }

    #[test]
    fn test_reentrant_use_is_busy() {
        let display = shared();
        let inner = display.with_session(|_| display.commit(&Scene::new(), &Group::new()));
        assert_eq!(inner, Ok(Err(SessionError::Busy)));

        // Lock is usable again afterwards
        assert!(display.commit(&Scene::new(), &Group::new()).is_ok());
    }
}

//! Init-script replay
//!
//! Sequences script records onto a [`tessera_hal::DisplayBus`]. Replay
//! is opcode-agnostic; callers that care what a record meant attach a
//! [`RecordObserver`].

pub mod executor;

pub use executor::{execute_record, run_script, InitError, NoObserver, RecordObserver};

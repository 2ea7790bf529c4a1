//! Init-script bytecode for serial display controllers
//!
//! Controllers such as the ST7796S need a vendor-specific sequence of
//! opcodes, parameters and settle delays before they accept pixel data.
//! This crate defines a compact, bit-exact encoding for such sequences
//! and a zero-copy decoder for it.
//!
//! # Record Format
//!
//! A script is a plain concatenation of variable-length records:
//! ```text
//! ┌────────┬────────────┬─────────────┬──────────┐
//! │ OPCODE │ DESCRIPTOR │ DATA        │ DELAY    │
//! │ 1B     │ 1B         │ 0–127B      │ 0–1B     │
//! └────────┴────────────┴─────────────┴──────────┘
//! ```
//!
//! The descriptor's low seven bits hold the data length; its high bit says
//! whether a delay byte follows the data. `\x29\x80\x14` is "display on,
//! no parameters, then wait 20 ms".

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod opcodes;
pub mod script;
pub mod sequences;

pub use script::{
    decode_record, encode_script, CommandRecord, DelayEncoding, Descriptor, OwnedCommandRecord,
    Records, Script, ScriptError, DELAY_FLAG, LENGTH_MASK, MAX_DATA_LEN, MAX_RECORD_SIZE,
};

//! Script record encoding and decoding.
//!
//! Record format:
//! - OPCODE (1 byte): controller command
//! - DESCRIPTOR (1 byte): bit 7 = delay flag, bits 0-6 = data length
//! - DATA (0-127 bytes): command parameters
//! - DELAY (1 byte, only if the delay flag is set): settle time in ms

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Descriptor bit announcing a trailing delay byte
pub const DELAY_FLAG: u8 = 0x80;

/// Descriptor bits holding the data length
pub const LENGTH_MASK: u8 = 0x7F;

/// Maximum number of data bytes in one record
pub const MAX_DATA_LEN: usize = LENGTH_MASK as usize;

/// Maximum encoded record size (OPCODE + DESCRIPTOR + MAX_DATA + DELAY)
pub const MAX_RECORD_SIZE: usize = 1 + 1 + MAX_DATA_LEN + 1;

/// Errors that can occur while decoding or encoding a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScriptError {
    /// The stream ended inside the record starting at `offset`
    Malformed {
        /// Byte offset of the truncated record's opcode
        offset: usize,
    },
    /// Record data exceeds 127 bytes
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Decoded descriptor byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Descriptor {
    /// Number of data bytes that follow (0-127)
    pub data_len: u8,
    /// Whether a delay byte follows the data
    pub has_delay: bool,
}

impl Descriptor {
    /// Split a raw descriptor byte
    pub const fn unpack(byte: u8) -> Self {
        Self {
            data_len: byte & LENGTH_MASK,
            has_delay: byte & DELAY_FLAG != 0,
        }
    }

    /// Build the raw descriptor byte
    ///
    /// `data_len` is masked to seven bits.
    pub const fn pack(self) -> u8 {
        let flag = if self.has_delay { DELAY_FLAG } else { 0 };
        flag | (self.data_len & LENGTH_MASK)
    }
}

/// How the delay byte maps to a wait duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DelayEncoding {
    /// The byte is the delay in milliseconds
    #[default]
    Literal,
    /// As `Literal`, except 255 means 500 ms
    ///
    /// Several vendor init tables use this convention for the long settle
    /// after sleep-out.
    Extended255,
}

impl DelayEncoding {
    /// Wait duration in milliseconds for a raw delay byte
    pub const fn duration_ms(self, raw: u8) -> u32 {
        match (self, raw) {
            (DelayEncoding::Extended255, 255) => 500,
            _ => raw as u32,
        }
    }
}

/// One decoded script record, borrowing its data from the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandRecord<'a> {
    /// Controller opcode
    pub opcode: u8,
    /// Parameter bytes (at most 127)
    pub data: &'a [u8],
    /// Settle delay after the record, raw byte value
    pub delay: Option<u8>,
}

impl<'a> CommandRecord<'a> {
    /// Create a record, checking the data length
    pub fn new(opcode: u8, data: &'a [u8], delay: Option<u8>) -> Result<Self, ScriptError> {
        if data.len() > MAX_DATA_LEN {
            return Err(ScriptError::PayloadTooLarge);
        }
        Ok(Self {
            opcode,
            data,
            delay,
        })
    }

    /// Whether a delay follows this record
    pub fn has_delay(&self) -> bool {
        self.delay.is_some()
    }

    /// The descriptor this record encodes to
    pub fn descriptor(&self) -> Descriptor {
        Descriptor {
            data_len: self.data.len() as u8,
            has_delay: self.has_delay(),
        }
    }

    /// Number of bytes this record occupies on the wire
    pub fn encoded_len(&self) -> usize {
        2 + self.data.len() + usize::from(self.has_delay())
    }

    /// Encode this record into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, ScriptError> {
        if self.data.len() > MAX_DATA_LEN {
            return Err(ScriptError::PayloadTooLarge);
        }
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(ScriptError::BufferTooSmall);
        }

        buffer[0] = self.opcode;
        buffer[1] = self.descriptor().pack();
        buffer[2..2 + self.data.len()].copy_from_slice(self.data);
        if let Some(delay) = self.delay {
            buffer[2 + self.data.len()] = delay;
        }

        Ok(len)
    }

    /// Copy into an owned record
    ///
    /// Fails with `PayloadTooLarge` for a record assembled by hand with
    /// more than [`MAX_DATA_LEN`] data bytes.
    pub fn to_owned_record(&self) -> Result<OwnedCommandRecord, ScriptError> {
        let data = Vec::from_slice(self.data).map_err(|_| ScriptError::PayloadTooLarge)?;
        Ok(OwnedCommandRecord {
            opcode: self.opcode,
            data,
            delay: self.delay,
        })
    }
}

/// A record that owns its parameter bytes
///
/// Used when scripts are assembled at run time rather than embedded as
/// byte literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedCommandRecord {
    /// Controller opcode
    pub opcode: u8,
    /// Parameter bytes
    pub data: Vec<u8, MAX_DATA_LEN>,
    /// Settle delay after the record, raw byte value
    pub delay: Option<u8>,
}

impl OwnedCommandRecord {
    /// Create a record with the given opcode, parameters and delay
    pub fn new(opcode: u8, data: &[u8], delay: Option<u8>) -> Result<Self, ScriptError> {
        let mut vec = Vec::new();
        vec.extend_from_slice(data)
            .map_err(|_| ScriptError::PayloadTooLarge)?;
        Ok(Self {
            opcode,
            data: vec,
            delay,
        })
    }

    /// Create a parameterless record
    pub fn command(opcode: u8) -> Self {
        Self {
            opcode,
            data: Vec::new(),
            delay: None,
        }
    }

    /// Borrow as a wire record
    pub fn as_record(&self) -> CommandRecord<'_> {
        CommandRecord {
            opcode: self.opcode,
            data: &self.data,
            delay: self.delay,
        }
    }

    /// Encode this record into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_RECORD_SIZE>, ScriptError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = self.as_record().encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| ScriptError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Decode the record starting at `offset`
///
/// Returns the record and the offset just past it.
pub fn decode_record(bytes: &[u8], offset: usize) -> Result<(CommandRecord<'_>, usize), ScriptError> {
    let malformed = ScriptError::Malformed { offset };

    let opcode = *bytes.get(offset).ok_or(malformed)?;
    let descriptor = Descriptor::unpack(*bytes.get(offset + 1).ok_or(malformed)?);

    let data_start = offset + 2;
    let data_end = data_start + descriptor.data_len as usize;
    let data = bytes.get(data_start..data_end).ok_or(malformed)?;

    let (delay, next) = if descriptor.has_delay {
        (Some(*bytes.get(data_end).ok_or(malformed)?), data_end + 1)
    } else {
        (None, data_end)
    };

    Ok((
        CommandRecord {
            opcode,
            data,
            delay,
        },
        next,
    ))
}

/// A complete init script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script<'a> {
    bytes: &'a [u8],
}

impl<'a> Script<'a> {
    /// Wrap an encoded script
    ///
    /// The bytes are not checked here; see [`Script::validate`].
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The encoded bytes
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Iterate over decoded records
    pub fn records(&self) -> Records<'a> {
        Records {
            bytes: self.bytes,
            offset: 0,
            failed: false,
        }
    }

    /// Decode the whole script without executing it
    ///
    /// Returns the number of records.
    pub fn validate(&self) -> Result<usize, ScriptError> {
        let mut count = 0;
        for record in self.records() {
            record?;
            count += 1;
        }
        Ok(count)
    }
}

impl<'a> IntoIterator for Script<'a> {
    type Item = Result<CommandRecord<'a>, ScriptError>;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

/// Iterator over the records of a script
///
/// Yields one `Err` for a truncated trailing record and then stops.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Records<'a> {
    /// Byte offset of the next record
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<CommandRecord<'a>, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }

        match decode_record(self.bytes, self.offset) {
            Ok((record, next)) => {
                self.offset = next;
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Encode records back-to-back into a byte buffer
///
/// Returns the number of bytes written
pub fn encode_script<'r, I>(records: I, buffer: &mut [u8]) -> Result<usize, ScriptError>
where
    I: IntoIterator<Item = CommandRecord<'r>>,
{
    let mut written = 0;
    for record in records {
        written += record.encode(&mut buffer[written..])?;
    }
    Ok(written)
}

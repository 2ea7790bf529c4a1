//! Script executor
//!
//! Each record is decoded completely before any of its bytes go out, so a
//! truncated tail never reaches the controller half-sent. Records already
//! sent are not undone on failure; the controller must be reset and the
//! script replayed from the start.

use tessera_hal::{BusError, DisplayBus};
use tessera_protocol::{CommandRecord, DelayEncoding, Script, ScriptError};

/// Errors that can occur while replaying a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Script ends inside the record at `offset`
    MalformedScript {
        /// Byte offset of the truncated record
        offset: usize,
    },
    /// Bus write or delay failed
    TransportFailure(BusError),
}

impl From<BusError> for InitError {
    fn from(e: BusError) -> Self {
        InitError::TransportFailure(e)
    }
}

impl From<ScriptError> for InitError {
    fn from(e: ScriptError) -> Self {
        match e {
            ScriptError::Malformed { offset } => InitError::MalformedScript { offset },
            // Decoding only ever reports truncation
            ScriptError::PayloadTooLarge | ScriptError::BufferTooSmall => {
                InitError::MalformedScript { offset: 0 }
            }
        }
    }
}

/// Notified after each record has been sent and its delay has elapsed
pub trait RecordObserver {
    /// Record number `index` (0-based) completed
    fn record_sent(&mut self, index: usize, record: &CommandRecord<'_>);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl RecordObserver for NoObserver {
    fn record_sent(&mut self, _index: usize, _record: &CommandRecord<'_>) {}
}

/// Send one record: opcode, then parameters, then wait
pub fn execute_record<B: DisplayBus>(
    bus: &mut B,
    record: &CommandRecord<'_>,
    delays: DelayEncoding,
) -> Result<(), BusError> {
    bus.write_command(record.opcode)?;
    if !record.data.is_empty() {
        bus.write_data(record.data)?;
    }
    if let Some(raw) = record.delay {
        bus.delay_ms(delays.duration_ms(raw))?;
    }
    Ok(())
}

/// Replay a whole script
///
/// Returns the number of records sent.
pub fn run_script<B, O>(
    bus: &mut B,
    script: Script<'_>,
    delays: DelayEncoding,
    observer: &mut O,
) -> Result<usize, InitError>
where
    B: DisplayBus,
    O: RecordObserver + ?Sized,
{
    let mut sent = 0;
    for record in script.records() {
        let record = record?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "init: record {} opcode {=u8:#x} ({} data bytes)",
            sent,
            record.opcode,
            record.data.len()
        );

        if let Err(e) = execute_record(bus, &record, delays) {
            #[cfg(feature = "defmt")]
            defmt::warn!("init: transport failed at record {}: {:?}", sent, e);
            return Err(e.into());
        }

        observer.record_sent(sent, &record);
        sent += 1;
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("init: {} records sent", sent);

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;
    use std::vec::Vec;
    use tessera_hal::{BusOp, RecordingBus};
    use tessera_protocol::sequences::ST7796S_INIT;

    /// Collects `(index, opcode)` for every completed record
    #[derive(Default)]
    struct Completed(Vec<(usize, u8)>);

    impl RecordObserver for Completed {
        fn record_sent(&mut self, index: usize, record: &CommandRecord<'_>) {
            self.0.push((index, record.opcode));
        }
    }

    const SHORT_SCRIPT: &[u8] = b"\x01\x80\x96\x11\x80\x96\xF0\x01\xC3\x36\x01\x48\x3A\x01\x55\x29\x80\x14";

    #[test]
    fn test_record_byte_sequence() {
        let mut bus = RecordingBus::new();
        let record = CommandRecord::new(0xB6, &[0x80, 0x02, 0x3B], Some(10)).unwrap();
        execute_record(&mut bus, &record, DelayEncoding::Literal).unwrap();

        assert_eq!(
            bus.ops(),
            &[
                BusOp::Command(0xB6),
                BusOp::Data(vec![0x80, 0x02, 0x3B]),
                BusOp::Delay(10),
            ]
        );
    }

    #[test]
    fn test_empty_payload_sends_no_data_write() {
        let mut bus = RecordingBus::new();
        let record = CommandRecord::new(0x21, &[], None).unwrap();
        execute_record(&mut bus, &record, DelayEncoding::Literal).unwrap();
        assert_eq!(bus.ops(), &[BusOp::Command(0x21)]);
    }

    #[test]
    fn test_short_script_replay() {
        let mut bus = RecordingBus::new();
        let sent = run_script(
            &mut bus,
            Script::new(SHORT_SCRIPT),
            DelayEncoding::Literal,
            &mut NoObserver,
        )
        .unwrap();

        assert_eq!(sent, 6);
        assert_eq!(bus.commands(), vec![0x01, 0x11, 0xF0, 0x36, 0x3A, 0x29]);
        assert_eq!(bus.data_bytes(), vec![0xC3, 0x48, 0x55]);
        assert_eq!(bus.total_delay_ms(), 150 + 150 + 20);
    }

    #[test]
    fn test_extended_delay_encoding() {
        let mut bus = RecordingBus::new();
        run_script(
            &mut bus,
            Script::new(b"\x11\x80\xFF"),
            DelayEncoding::Extended255,
            &mut NoObserver,
        )
        .unwrap();
        assert_eq!(bus.ops(), &[BusOp::Command(0x11), BusOp::Delay(500)]);
    }

    #[test]
    fn test_observer_sees_every_record_in_order() {
        let mut bus = RecordingBus::new();
        let mut observer = Completed::default();
        run_script(&mut bus, ST7796S_INIT, DelayEncoding::Literal, &mut observer).unwrap();

        let seen = observer.0;

        assert_eq!(seen.len(), 12);
        assert_eq!(seen[0], (0, 0x01));
        assert_eq!(seen[11], (11, 0x29));
    }

    #[test]
    fn test_truncated_script_sends_complete_records_only() {
        // Valid reset record, then a DFC record missing two data bytes
        let mut bus = RecordingBus::new();
        let result = run_script(
            &mut bus,
            Script::new(b"\x01\x80\x96\xB6\x03\x80"),
            DelayEncoding::Literal,
            &mut NoObserver,
        );

        assert_eq!(result, Err(InitError::MalformedScript { offset: 3 }));
        assert_eq!(bus.ops(), &[BusOp::Command(0x01), BusOp::Delay(150)]);
    }

    #[test]
    fn test_transport_failure_halts_before_next_record() {
        for k in 0..6 {
            let mut bus = RecordingBus::new().fail_at_command(k);
            let mut observer = Completed::default();

            let result = run_script(
                &mut bus,
                Script::new(SHORT_SCRIPT),
                DelayEncoding::Literal,
                &mut observer,
            );

            assert_eq!(result, Err(InitError::TransportFailure(BusError::Spi)));
            let completed: Vec<usize> = observer.0.iter().map(|(i, _)| *i).collect();
            assert_eq!(completed, (0..k).collect::<Vec<_>>());
            // Only the first k opcodes reached the bus, in order
            assert_eq!(bus.commands(), SHORT_OPCODES[..k].to_vec());
        }
    }

    #[test]
    fn test_data_failure_skips_delay_and_rest() {
        // Fail the MADCTL parameter write (second data write)
        let mut bus = RecordingBus::new().fail_at_data_write(1);
        let result = run_script(
            &mut bus,
            Script::new(SHORT_SCRIPT),
            DelayEncoding::Literal,
            &mut NoObserver,
        );

        assert_eq!(result, Err(InitError::TransportFailure(BusError::Spi)));
        assert_eq!(bus.commands(), vec![0x01, 0x11, 0xF0, 0x36]);
        assert_eq!(bus.ops().last(), Some(&BusOp::Command(0x36)));
    }

    const SHORT_OPCODES: [u8; 6] = [0x01, 0x11, 0xF0, 0x36, 0x3A, 0x29];
}

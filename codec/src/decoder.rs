//! Datagram-to-message decoding session.

use std::num::NonZeroUsize;

use wire::{decode_layer, Command, CommandType};

use crate::error::{CodecError, CodecResult};
use crate::fragment::ReliableFragment;
use crate::limits::CodecLimits;
use crate::message::{MessageBody, ReliableMessage};
use crate::params::{decode_parameters, ParameterMap};
use crate::reassembly::Reassembler;

/// A fully decoded application message.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    pub body: MessageBody,
    pub parameters: ParameterMap,
    /// Reliable sequence number of the carrying command.
    pub sequence_number: i32,
    /// `true` if the message was rebuilt from fragments.
    pub reassembled: bool,
}

/// Running counters for a [`Decoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub datagrams: u64,
    /// Datagrams rejected by framing.
    pub malformed_datagrams: u64,
    pub commands: u64,
    pub fragments: u64,
    /// Messages decoded, reassembled ones included.
    pub messages: u64,
    pub reassembled: u64,
    /// Messages skipped because they are encrypted.
    pub encrypted: u64,
    /// Other messages and fragments skipped after a decode error.
    pub failed: u64,
    /// Incomplete messages evicted from the reassembler.
    pub evicted: u64,
    /// Fragments rejected for an impossible index or count, or for
    /// exceeding the per-message byte limit.
    pub dropped_fragments: u64,
}

/// Decodes captured datagrams into messages.
///
/// One decoder should see every datagram of a capture session in order, so
/// fragmented messages can be reassembled across datagrams.
#[derive(Debug)]
pub struct Decoder {
    limits: CodecLimits,
    reassembler: Reassembler,
    stats: DecoderStats,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(CodecLimits::default())
    }
}

impl Decoder {
    /// Creates a decoder with the given limits.
    #[must_use]
    pub fn new(limits: CodecLimits) -> Self {
        let capacity = NonZeroUsize::new(limits.reassembly_capacity).unwrap_or(NonZeroUsize::MIN);
        let reassembler = Reassembler::with_message_limits(
            capacity,
            limits.max_fragments,
            limits.max_message_bytes,
        );
        Self {
            limits,
            reassembler,
            stats: DecoderStats::default(),
        }
    }

    /// Returns the limits this decoder enforces.
    #[must_use]
    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Returns the fragment reassembler.
    #[must_use]
    pub fn reassembler(&self) -> &Reassembler {
        &self.reassembler
    }

    /// Returns a snapshot of the decoder counters.
    #[must_use]
    pub fn stats(&self) -> DecoderStats {
        DecoderStats {
            evicted: self.reassembler.evictions(),
            dropped_fragments: self.reassembler.dropped(),
            ..self.stats
        }
    }

    /// Decodes every message carried by one datagram.
    ///
    /// Commands failing with a skippable error (see
    /// [`CodecError::is_skippable`]) are logged and skipped; the rest of the
    /// datagram is still processed.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Wire`] if the datagram framing is malformed. No
    /// message of that datagram is returned.
    pub fn decode_datagram(&mut self, datagram: &[u8]) -> CodecResult<Vec<DecodedMessage>> {
        self.stats.datagrams += 1;
        let layer = match decode_layer(datagram, &self.limits.wire) {
            Ok(layer) => layer,
            Err(err) => {
                self.stats.malformed_datagrams += 1;
                return Err(err.into());
            }
        };

        let mut messages = Vec::new();
        for (index, command) in layer.commands.iter().enumerate() {
            self.stats.commands += 1;
            tracing::trace!(
                index,
                command_type = command.command_type,
                length = command.length,
                sequence = command.reliable_sequence_number,
                "dispatching command"
            );
            match self.decode_command(command) {
                Ok(Some(message)) => messages.push(message),
                Ok(None) => {}
                Err(err) if err.is_skippable() => self.record_skip(index, command, &err),
                Err(err) => {
                    self.stats.malformed_datagrams += 1;
                    return Err(err);
                }
            }
        }
        Ok(messages)
    }

    /// Decodes a single command.
    ///
    /// Returns `Ok(None)` for commands without a message (connection
    /// plumbing or a fragment of a still incomplete message).
    ///
    /// # Errors
    ///
    /// Returns the first error raised while interpreting the command. The
    /// error only concerns this command.
    pub fn decode_command(&mut self, command: &Command<'_>) -> CodecResult<Option<DecodedMessage>> {
        match command.kind() {
            Some(CommandType::SendReliable) => self.decode_reliable(command, false).map(Some),
            Some(CommandType::SendReliableFragment) => {
                self.stats.fragments += 1;
                let fragment = ReliableFragment::from_command(command)?;
                match self.reassembler.offer(&fragment) {
                    Some(rebuilt) => {
                        self.stats.reassembled += 1;
                        self.decode_reliable(&rebuilt, true).map(Some)
                    }
                    None => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    fn decode_reliable(
        &mut self,
        command: &Command<'_>,
        reassembled: bool,
    ) -> CodecResult<DecodedMessage> {
        let message = ReliableMessage::from_command(command, &self.limits.value)?;
        let parameters = decode_parameters(&message, &self.limits.value)?;
        self.stats.messages += 1;
        Ok(DecodedMessage {
            body: message.body,
            parameters,
            sequence_number: command.reliable_sequence_number,
            reassembled,
        })
    }

    fn record_skip(&mut self, index: usize, command: &Command<'_>, err: &CodecError) {
        match err {
            CodecError::EncryptionNotSupported { message_type } => {
                self.stats.encrypted += 1;
                tracing::debug!(
                    index,
                    sequence = command.reliable_sequence_number,
                    message_type,
                    "skipping encrypted message"
                );
            }
            _ => {
                self.stats.failed += 1;
                tracing::warn!(
                    index,
                    sequence = command.reliable_sequence_number,
                    error = %err,
                    "skipping undecodable command"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::EVENT_DATA;
    use bytestream::ByteWriter;
    use value::{TypeTag, Value};

    fn datagram(commands: &[(u8, i32, &[u8])]) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer
            .write_u16(1)
            .write_u8(0)
            .write_u8(u8::try_from(commands.len()).unwrap())
            .write_u32(0)
            .write_i32(0);
        for (command_type, sequence, body) in commands {
            writer
                .write_u8(*command_type)
                .write_u8(0)
                .write_u8(0)
                .write_u8(0)
                .write_i32(i32::try_from(body.len() + 12).unwrap())
                .write_i32(*sequence)
                .write_bytes(body);
        }
        writer.finish()
    }

    const RELIABLE: u8 = CommandType::SendReliable.raw();

    #[test]
    fn decodes_event_with_parameters() {
        let body = [0xF3, EVENT_DATA, 1, 0x00, 0x01, 5, TypeTag::Boolean.raw(), 1];
        let mut decoder = Decoder::default();
        let messages = decoder.decode_datagram(&datagram(&[(RELIABLE, 7, &body[..])])).unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, MessageBody::Event { event_code: 1 });
        assert_eq!(messages[0].parameters[&5], Value::Bool(true));
        assert_eq!(messages[0].sequence_number, 7);
        assert!(!messages[0].reassembled);
    }

    #[test]
    fn plumbing_commands_produce_nothing() {
        let mut decoder = Decoder::default();
        let bytes = datagram(&[
            (CommandType::Acknowledge.raw(), 1, &[0u8; 8][..]),
            (CommandType::Ping.raw(), 2, &[][..]),
            (0x42, 3, &[1, 2, 3][..]),
        ]);
        assert!(decoder.decode_datagram(&bytes).unwrap().is_empty());
        assert_eq!(decoder.stats().commands, 3);
        assert_eq!(decoder.stats().messages, 0);
    }

    #[test]
    fn malformed_datagram_is_an_error() {
        let mut decoder = Decoder::default();
        let err = decoder.decode_datagram(&[0; 5]).unwrap_err();
        assert!(!err.is_skippable());
        assert_eq!(decoder.stats().malformed_datagrams, 1);
        assert_eq!(decoder.stats().datagrams, 1);
    }

    #[test]
    fn failed_command_is_skipped() {
        let bad = [0xF3, EVENT_DATA, 1, 0x00, 0x01, 5, TypeTag::Boolean.raw(), 9];
        let good = [0xF3, EVENT_DATA, 2, 0x00, 0x00];
        let mut decoder = Decoder::default();
        let messages = decoder
            .decode_datagram(&datagram(&[(RELIABLE, 1, &bad[..]), (RELIABLE, 2, &good[..])]))
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, MessageBody::Event { event_code: 2 });
        assert_eq!(decoder.stats().failed, 1);
    }

    #[test]
    fn zero_reassembly_capacity_behaves_as_one() {
        let limits = CodecLimits {
            reassembly_capacity: 0,
            ..CodecLimits::default()
        };
        let decoder = Decoder::new(limits);
        assert_eq!(decoder.reassembler().capacity(), 1);
    }

    #[test]
    fn decoder_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Decoder>();
    }
}

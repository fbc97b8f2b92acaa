mod common;

use codec::{CodecError, CodecLimits, Decoder, MessageBody};
use common::{datagram, event, request, RawCommand, SIGNATURE};
use value::{TypeTag, Value};
use wire::{CommandType, DecodeError};

#[test]
fn single_event_with_boolean_parameter() {
    let body = [SIGNATURE, 4, 1, 0x00, 0x01, 5, 111, 1].to_vec();
    let mut decoder = Decoder::default();

    let messages = decoder
        .decode_datagram(&datagram(&[RawCommand::reliable(1, body)]))
        .unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].body.tag(), "event");
    assert_eq!(messages[0].body, MessageBody::Event { event_code: 1 });
    assert_eq!(messages[0].parameters.len(), 1);
    assert_eq!(messages[0].parameters[&5], Value::Bool(true));
}

#[test]
fn encrypted_message_is_skipped_and_counted() {
    let encrypted = vec![SIGNATURE, 131, 0xDE, 0xAD, 0xBE, 0xEF];
    let mut decoder = Decoder::default();

    let messages = decoder
        .decode_datagram(&datagram(&[
            RawCommand::reliable(1, encrypted),
            RawCommand::reliable(2, request(17)),
        ]))
        .unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0].body,
        MessageBody::Request {
            operation_code: 17
        }
    );
    let stats = decoder.stats();
    assert_eq!(stats.encrypted, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.messages, 1);
}

#[test]
fn response_with_debug_message() {
    let body = [
        vec![SIGNATURE, 3, 12, 0x7F, 0xFF, TypeTag::String.raw(), 0x00, 0x03],
        b"bad".to_vec(),
        vec![0x00, 0x01, 1, TypeTag::Int16.raw(), 0xFF, 0xFE],
    ]
    .concat();
    let mut decoder = Decoder::default();

    let messages = decoder
        .decode_datagram(&datagram(&[RawCommand::reliable(1, body)]))
        .unwrap();

    assert_eq!(
        messages[0].body,
        MessageBody::Response {
            operation_code: 12,
            return_code: 0x7FFF,
            debug_message: Some(b"bad".to_vec()),
        }
    );
    assert_eq!(messages[0].parameters[&1], Value::Int16(-2));
}

#[test]
fn truncated_command_rejects_the_datagram() {
    let mut bytes = datagram(&[RawCommand::reliable(1, request(1))]);
    bytes.truncate(bytes.len() - 1);
    let mut decoder = Decoder::default();

    let err = decoder.decode_datagram(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Wire(DecodeError::TruncatedCommand { command: 0, .. })
    ));
    assert_eq!(decoder.stats().malformed_datagrams, 1);
}

#[test]
fn oversized_datagram_rejected_by_limits() {
    let body = vec![0u8; 2000];
    let bytes = datagram(&[RawCommand::reliable(1, body)]);
    let mut decoder = Decoder::new(CodecLimits::for_testing());

    let err = decoder.decode_datagram(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Wire(DecodeError::LimitsExceeded { .. })
    ));
}

#[test]
fn fragments_reassemble_across_datagrams() {
    let parameters = [
        vec![9, TypeTag::String.raw(), 0x00, 0x0A],
        b"0123456789".to_vec(),
    ]
    .concat();
    let message = event(42, 1, &parameters);
    let (head, tail) = message.split_at(6);
    let mut decoder = Decoder::default();

    let first = decoder
        .decode_datagram(&datagram(&[
            RawCommand::fragment(300, 2, 1, tail),
            RawCommand::other(CommandType::Acknowledge, 0),
        ]))
        .unwrap();
    assert!(first.is_empty());
    assert!(decoder.reassembler().contains(300));

    let second = decoder
        .decode_datagram(&datagram(&[RawCommand::fragment(300, 2, 0, head)]))
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].body, MessageBody::Event { event_code: 42 });
    assert_eq!(second[0].parameters[&9], Value::String(b"0123456789".to_vec()));
    assert_eq!(second[0].sequence_number, 300);
    assert!(second[0].reassembled);

    let stats = decoder.stats();
    assert_eq!(stats.fragments, 2);
    assert_eq!(stats.reassembled, 1);
    assert!(decoder.reassembler().is_empty());
}

#[test]
fn reassembled_message_alongside_direct_messages() {
    let message = event(7, 0, &[]);
    let mut decoder = Decoder::default();

    let messages = decoder
        .decode_datagram(&datagram(&[
            RawCommand::reliable(1, request(1)),
            RawCommand::fragment(2, 2, 0, &message[..2]),
            RawCommand::fragment(2, 2, 1, &message[2..]),
            RawCommand::reliable(3, request(3)),
        ]))
        .unwrap();

    let codes: Vec<_> = messages.iter().map(|m| m.body.code()).collect();
    assert_eq!(codes, vec![Some(1), Some(7), Some(3)]);
}

#[test]
fn undecodable_fragment_is_skipped() {
    let short = RawCommand {
        command_type: CommandType::SendReliableFragment.raw(),
        sequence: 1,
        body: vec![0; 7],
    };
    let mut decoder = Decoder::default();

    let messages = decoder
        .decode_datagram(&datagram(&[short, RawCommand::reliable(2, request(5))]))
        .unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(decoder.stats().failed, 1);
}

#[test]
fn out_of_range_fragment_index_never_completes() {
    let mut decoder = Decoder::default();

    let messages = decoder
        .decode_datagram(&datagram(&[
            RawCommand::fragment(5, 2, 0, &[SIGNATURE, 2]),
            RawCommand::fragment(5, 2, 7, &[1, 0, 0]),
        ]))
        .unwrap();

    assert!(messages.is_empty());
    assert_eq!(decoder.stats().dropped_fragments, 1);
    assert_eq!(decoder.reassembler().progress(5), Some((1, 2)));
}

#[test]
fn fragmented_message_bounded_by_limits() {
    let limits = CodecLimits {
        max_fragments: 16,
        max_message_bytes: 8,
        ..CodecLimits::default()
    };
    let mut decoder = Decoder::new(limits);

    let messages = decoder
        .decode_datagram(&datagram(&[
            RawCommand::fragment(1, i32::MAX, 0, &[SIGNATURE]),
            RawCommand::fragment(2, 4, 0, &[SIGNATURE, 4, 7, 0]),
            RawCommand::fragment(2, 4, 1, &[0; 5]),
            RawCommand::fragment(2, 4, 2, &[0, 0]),
        ]))
        .unwrap();

    assert!(messages.is_empty());
    assert!(!decoder.reassembler().contains(1));
    assert_eq!(decoder.reassembler().progress(2), Some((2, 4)));
    assert_eq!(decoder.reassembler().held_bytes(2), Some(6));
    assert_eq!(decoder.stats().dropped_fragments, 2);
    assert_eq!(decoder.stats().fragments, 4);
}

#[test]
fn nested_parameter_depth_limited() {
    // Typed array of typed arrays, nested past the testing depth.
    let mut parameters = vec![1, TypeTag::TypedArray.raw()];
    for _ in 0..16 {
        parameters.extend_from_slice(&[0x00, 0x01, TypeTag::TypedArray.raw()]);
    }
    parameters.extend_from_slice(&[0x00, 0x00, TypeTag::TypedArray.raw()]);
    let body = event(1, 1, &parameters);
    let mut decoder = Decoder::new(CodecLimits::for_testing());

    let messages = decoder
        .decode_datagram(&datagram(&[RawCommand::reliable(1, body)]))
        .unwrap();

    assert!(messages.is_empty());
    assert_eq!(decoder.stats().failed, 1);
}

#![no_main]

use bytestream::ByteReader;
use libfuzzer_sys::fuzz_target;
use value::{decode_tagged_value, ValueLimits};

fuzz_target!(|data: &[u8]| {
    let limits = ValueLimits::for_testing();
    let mut reader = ByteReader::new(data);
    while !reader.is_empty() {
        let before = reader.remaining();
        if decode_tagged_value(&mut reader, &limits).is_err() {
            break;
        }
        // Nil consumes only its tag, so every successful decode makes progress.
        assert!(reader.remaining() < before);
    }
});

#![no_main]

use codec::{CodecLimits, Decoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // A small reassembly capacity makes eviction reachable.
    let limits = CodecLimits::for_testing();
    let mut decoder = Decoder::new(limits);

    // Split the input into length-prefixed datagrams so fragments can span them.
    let mut idx = 0usize;
    while idx < data.len() && idx < 8192 {
        let len = (data[idx] as usize).saturating_mul(4).saturating_add(12);
        idx += 1;
        let end = (idx + len).min(data.len());
        let datagram = &data[idx..end];
        idx = end;

        if let Ok(messages) = decoder.decode_datagram(datagram) {
            assert!(messages.len() <= datagram.len());
        }
        assert!(decoder.reassembler().len() <= decoder.reassembler().capacity());
    }
});

#![no_main]

use codec::{decode_map_with_limits, CodecLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must return an error or a map, never panic.
    let _ = decode_map_with_limits(data, &CodecLimits::for_testing());
});

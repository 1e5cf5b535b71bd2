#![no_main]

use binfile::file::io::{decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for swap in [false, true] {
        if let Ok(value) = decode::<u64>(data, swap) {
            assert_eq!(encode(value, swap).as_slice(), &data[..8]);
        }
        if let Ok(value) = decode::<i32>(data, swap) {
            assert_eq!(encode(value, swap).as_slice(), &data[..4]);
        }
        if let Ok(value) = decode::<f64>(data, swap) {
            // floats are never byte-reversed; NaN payloads still round-trip bytewise
            assert_eq!(encode(value, swap).as_slice(), &data[..8]);
        }
        let _ = decode::<u16>(data, swap);
        let _ = decode::<i8>(data, swap);
    }
});

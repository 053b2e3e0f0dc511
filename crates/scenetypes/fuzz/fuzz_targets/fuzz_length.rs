#![no_main]

#[macro_use] extern crate libfuzzer_sys;
extern crate scenetypes;

use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        if let Ok(n) = scenetypes::resolve_length(s, 96.0) {
            if n.is_nan() {
                panic!("NaN from {:?}", s);
            }
        }
    }
});

#![no_main]

#[macro_use] extern crate libfuzzer_sys;
extern crate scenetypes;

use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        // Must not panic.
        let mut n = 0;
        for _ in scenetypes::PathParser::from(s) {
            n += 1;

            if n == 10000 {
                panic!("endless loop");
            }
        }

        let _ = scenetypes::parse_path(s);
    }
});

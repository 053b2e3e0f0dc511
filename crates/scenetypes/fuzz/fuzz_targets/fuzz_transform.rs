#![no_main]

#[macro_use] extern crate libfuzzer_sys;
extern crate scenetypes;

use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        // Must not panic.
        let mut n = 0;
        for _ in scenetypes::TransformListParser::from(s) {
            n += 1;

            if n == 1000 {
                panic!("endless loop");
            }
        }

        if let Ok(list) = scenetypes::parse_transform_list(s) {
            let _ = scenetypes::compose(&list);
        }
    }
});

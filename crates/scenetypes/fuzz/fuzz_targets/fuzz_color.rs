#![no_main]

#[macro_use] extern crate libfuzzer_sys;
extern crate scenetypes;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic.
        if let Ok(scenetypes::Paint::Color(c)) = scenetypes::resolve_color(s) {
            let _ = c.with_opacity(0.5).to_rgba8();
        }
    }
});

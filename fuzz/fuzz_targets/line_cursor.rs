//! Fuzz target for the line cursor
//!
//! Exercises terminator handling and the lookahead slot against arbitrary
//! byte streams.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ovf_codec::LineCursor;

fuzz_target!(|data: &[u8]| {
    let mut cursor = LineCursor::new(data);
    while let Ok(true) = cursor.try_accept_line() {
        let _ = cursor.current_line();
    }
});

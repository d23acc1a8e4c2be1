//! Fuzz target for the OVF/OMF reader
//!
//! Tests reader robustness against malformed vector-field data.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the reader
    let _ = ovf_codec::read(data);
});

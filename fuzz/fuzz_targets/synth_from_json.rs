#![no_main]

use libfuzzer_sys::fuzz_target;

use abiv2gen::synth::{synthesize_description, SynthOptions};

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let Ok(description) = abiv2gen::description::description_from_json(data) else {
        return;
    };

    // Precondition errors on hostile widths are expected; panics are not.
    let _ = synthesize_description(&description, &SynthOptions::default());
});

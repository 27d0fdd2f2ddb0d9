#![no_main]

use coretabs_render::humanize::{DEFAULT_ABBREVIATIONS, humanize_key};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|key: &str| {
    let label = humanize_key(key, &DEFAULT_ABBREVIATIONS);
    assert_eq!(label, label.trim());
});

#![no_main]

use coretabs_render::{TextView, render};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let node = render(&value, "Fuzz");
    let _ = TextView::default().render(&node);
});

#![no_main]

use coretabs_state::StateStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let store = StateStore::new();
    if let Ok(restored) = store.restore_str(data) {
        assert_eq!(restored, store.len());
    }
});

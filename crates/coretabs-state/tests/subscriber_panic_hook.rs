//! A host panic hook sees subscriber panics that the store swallows.
//!
//! Kept in its own test binary: the panic hook is process-wide.

use std::cell::Cell;
use std::panic;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use coretabs_state::StateStore;
use serde_json::json;

#[test]
fn host_hook_replaces_default_panic_output() {
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let seen_by_hook = Arc::clone(&hook_calls);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |_| {
        seen_by_hook.fetch_add(1, Ordering::SeqCst);
    }));

    let store = StateStore::new();
    let delivered = Rc::new(Cell::new(0));
    let sink = Rc::clone(&delivered);
    let _bad = store.subscribe("k", |_, _| panic!("subscriber failure"));
    let _good = store.subscribe("k", move |_, _| sink.set(sink.get() + 1));

    store.set("k", json!(1));
    store.set("k", json!(2));

    panic::set_hook(previous);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 2);
    assert_eq!(delivered.get(), 2);
    assert_eq!(store.get("k"), Some(json!(2)));
}

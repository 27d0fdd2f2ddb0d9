//! Contract tests for the observable state store.
//!
//! Covers the notification contract end to end: ordering, previous-value
//! delivery, unsubscribe idempotence, panic isolation, copy semantics of
//! `get_all`, and `clear`.

use std::cell::RefCell;
use std::rc::Rc;

use coretabs_state::StateStore;
use serde_json::{Value, json};

type CallLog = Rc<RefCell<Vec<(Value, Option<Value>)>>>;

fn recorder(store: &StateStore, key: &str) -> CallLog {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let _handle = store.subscribe(key, move |new, old| {
        sink.borrow_mut().push((new.clone(), old.cloned()));
    });
    log
}

#[test]
fn set_twice_reports_previous_values() {
    let store = StateStore::new();
    let calls = recorder(&store, "x");

    store.set("x", 1);
    store.set("x", 2);

    assert_eq!(
        *calls.borrow(),
        vec![(json!(1), None), (json!(2), Some(json!(1)))]
    );
}

#[test]
fn every_subscriber_runs_once_in_order() {
    let store = StateStore::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for i in 0..5 {
        let order = Rc::clone(&order);
        let _ = store.subscribe("cases", move |new, old| {
            order.borrow_mut().push((i, new.clone(), old.cloned()));
        });
    }

    store.set("cases", json!(["C-1"]));

    let order = order.borrow();
    assert_eq!(order.len(), 5);
    for (idx, (i, new, old)) in order.iter().enumerate() {
        assert_eq!(*i, idx);
        assert_eq!(*new, json!(["C-1"]));
        assert_eq!(*old, None);
    }
}

#[test]
fn panicking_subscribers_do_not_stop_the_rest() {
    let store = StateStore::new();
    let ran = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&ran);
    let _a = store.subscribe("k", move |_, _| first.borrow_mut().push("first"));
    let _b = store.subscribe("k", |_, _| panic!("boom"));
    let third = Rc::clone(&ran);
    let _c = store.subscribe("k", move |_, _| third.borrow_mut().push("third"));
    let _d = store.subscribe("k", |_, _| panic!("boom again"));
    let fifth = Rc::clone(&ran);
    let _e = store.subscribe("k", move |_, _| fifth.borrow_mut().push("fifth"));

    store.set("k", json!(null));

    assert_eq!(*ran.borrow(), vec!["first", "third", "fifth"]);
}

#[test]
fn unsubscribed_callback_never_fires_again() {
    let store = StateStore::new();
    let calls = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&calls);
    let handle = store.subscribe("k", move |_, _| *sink.borrow_mut() += 1);

    store.set("k", 1);
    handle.unsubscribe();
    handle.unsubscribe();
    store.set("k", 2);
    store.set("k", 3);

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(store.subscriber_count("k"), 0);
}

#[test]
fn get_all_snapshot_is_detached() {
    let store = StateStore::new();
    store.set("documents", json!([{ "id": 1 }]));

    let mut all = store.get_all();
    if let Some(Value::Array(items)) = all.get_mut("documents") {
        items.clear();
    }
    all.remove("documents");

    assert_eq!(store.get("documents"), Some(json!([{ "id": 1 }])));
}

#[test]
fn clear_silences_stale_subscribers() {
    let store = StateStore::new();
    let calls = recorder(&store, "k");
    store.set("k", 1);
    store.clear();

    store.set("k", 2);
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(store.get("k"), Some(json!(2)));
}

#![forbid(unsafe_code)]

//! Keyed value registry with per-key change notification.
//!
//! # Design
//!
//! [`StateStore`] wraps its entries and subscriber lists in shared,
//! reference-counted storage (`Rc<RefCell<..>>`). Cloning a store creates a
//! new handle to the **same** state. Every [`set`](StateStore::set) notifies
//! the subscribers registered for that key, in registration order.
//!
//! Unlike a value-comparing observable, the store notifies on every write,
//! including writes of an equal value.
//!
//! # Performance
//!
//! | Operation     | Complexity                    |
//! |---------------|-------------------------------|
//! | `get()`       | O(1) + clone of the value     |
//! | `set()`       | O(S) where S = key subscribers |
//! | `subscribe()` | O(1) amortized                |
//! | `unsubscribe()` | O(S)                        |
//!
//! # Failure Modes
//!
//! - **Panicking subscriber**: caught with `catch_unwind`; the remaining
//!   subscribers still run and `set` returns normally. The panic is not
//!   logged here.
//! - **Re-entrant access**: no borrow is held while callbacks run, so a
//!   subscriber may call `get`, `set` or `subscribe` on the same store.
//!   Registrations added during a notification are not called for that
//!   notification.

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use serde_json::Value;

/// Subscriber callback: `(new_value, old_value)`.
type Callback = Rc<dyn Fn(&Value, Option<&Value>)>;

struct Registration {
    id: u64,
    callback: Callback,
}

/// Shared interior for [`StateStore`].
#[derive(Default)]
struct StoreInner {
    entries: HashMap<String, Value>,
    subscribers: HashMap<String, Vec<Registration>>,
    /// Never reset, so handles from before a `clear` cannot match new ids.
    next_id: u64,
}

/// A shared key/value registry with change notification.
///
/// # Example
///
/// ```
/// use coretabs_state::StateStore;
/// use serde_json::json;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let store = StateStore::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let log = Rc::clone(&seen);
/// let handle = store.subscribe("selectedCase", move |new, old| {
///     log.borrow_mut().push((new.clone(), old.cloned()));
/// });
///
/// store.set("selectedCase", json!("C-1"));
/// store.set("selectedCase", json!("C-2"));
/// handle.unsubscribe();
/// store.set("selectedCase", json!("C-3"));
///
/// assert_eq!(
///     *seen.borrow(),
///     vec![(json!("C-1"), None), (json!("C-2"), Some(json!("C-1")))]
/// );
/// ```
#[derive(Clone, Default)]
pub struct StateStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        let subscriber_total: usize = inner.subscribers.values().map(Vec::len).sum();
        f.debug_struct("StateStore")
            .field("entries", &inner.entries.len())
            .field("subscribers", &subscriber_total)
            .finish()
    }
}

impl StateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the value stored under `key`.
    ///
    /// Returns `None` when the key was never set (or was cleared). A stored
    /// JSON `null` is returned as `Some(Value::Null)`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().entries.get(key).cloned()
    }

    /// Access the value under `key` by reference without cloning.
    pub fn with<R>(&self, key: &str, f: impl FnOnce(Option<&Value>) -> R) -> R {
        f(self.inner.borrow().entries.get(key))
    }

    /// Whether a value (possibly `null`) is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Store `value` under `key` and notify the key's subscribers.
    ///
    /// Subscribers registered when `set` is called run before it returns,
    /// in registration order, each receiving `(new, previous)`.
    ///
    /// A panicking subscriber is caught and the remaining subscribers still
    /// run. The store itself logs nothing for it, but the process panic hook
    /// runs before the unwind is caught, so the default hook still prints the
    /// panic message to stderr. Hosts that want those silenced or routed
    /// elsewhere install their own hook with [`std::panic::set_hook`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        // Collect callbacks first so no borrow is held while they run.
        let (previous, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            let previous = inner.entries.insert(key.clone(), value.clone());
            let callbacks: Vec<Callback> = inner
                .subscribers
                .get(&key)
                .map(|regs| regs.iter().map(|r| Rc::clone(&r.callback)).collect())
                .unwrap_or_default();
            (previous, callbacks)
        };

        tracing::debug!(
            message = "state.set",
            key = key.as_str(),
            subscribers = callbacks.len(),
            replaced = previous.is_some()
        );

        for callback in &callbacks {
            let _ = catch_unwind(AssertUnwindSafe(|| callback(&value, previous.as_ref())));
        }
    }

    /// Register `callback` for changes to `key`.
    ///
    /// The returned [`Unsubscribe`] removes exactly this registration. Unlike
    /// an RAII guard, dropping the handle leaves the subscription active.
    pub fn subscribe(
        &self,
        key: impl Into<String>,
        callback: impl Fn(&Value, Option<&Value>) + 'static,
    ) -> Unsubscribe {
        let key = key.into();
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .subscribers
            .entry(key.clone())
            .or_default()
            .push(Registration {
                id,
                callback: Rc::new(callback),
            });
        tracing::trace!(message = "state.subscribe", key = key.as_str(), id);
        Unsubscribe {
            store: Rc::downgrade(&self.inner),
            key,
            id,
        }
    }

    /// Number of subscribers currently registered for `key`.
    #[must_use]
    pub fn subscriber_count(&self, key: &str) -> usize {
        self.inner
            .borrow()
            .subscribers
            .get(key)
            .map_or(0, Vec::len)
    }

    /// Shallow copy of every entry.
    #[must_use]
    pub fn get_all(&self) -> HashMap<String, Value> {
        self.inner.borrow().entries.clone()
    }

    /// Remove all entries and all subscribers.
    ///
    /// Existing [`Unsubscribe`] handles become no-ops.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        tracing::debug!(
            message = "state.clear",
            entries = inner.entries.len(),
            keys_with_subscribers = inner.subscribers.len()
        );
        inner.entries.clear();
        inner.subscribers.clear();
    }
}

/// Handle that removes one subscription from a [`StateStore`].
///
/// Calling [`unsubscribe`](Self::unsubscribe) more than once is a no-op. The
/// handle holds only a weak reference, so it never keeps a store alive.
pub struct Unsubscribe {
    store: Weak<RefCell<StoreInner>>,
    key: String,
    id: u64,
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("key", &self.key)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Unsubscribe {
    /// Remove the registration this handle was created for.
    pub fn unsubscribe(&self) {
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let mut inner = store.borrow_mut();
        let now_empty = match inner.subscribers.get_mut(&self.key) {
            Some(regs) => {
                regs.retain(|r| r.id != self.id);
                regs.is_empty()
            }
            None => return,
        };
        if now_empty {
            inner.subscribers.remove(&self.key);
        }
    }

    /// Key this handle is registered against.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

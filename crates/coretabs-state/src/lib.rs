#![forbid(unsafe_code)]

//! Shared application state for CoreTabs.
//!
//! This crate replaces ambient module-level variables (case lists, document
//! lists, the active language, ...) with one explicit, observable registry:
//!
//! - [`StateStore`]: a keyed map of JSON values with per-key subscriber lists.
//! - [`Unsubscribe`]: handle returned by [`StateStore::subscribe`] that
//!   removes exactly one registration.
//!
//! # Invariants
//!
//! 1. `set` notifies every subscriber registered for the key, synchronously,
//!    in registration order, before returning.
//! 2. Each subscriber receives the new value and the previous value (`None`
//!    when the key was never set).
//! 3. A panicking subscriber never prevents later subscribers from running
//!    and never propagates out of `set`.
//! 4. `get_all` returns a copy; mutating it never affects the store.

pub mod error;
pub mod persist;
pub mod store;

pub use error::{Result, StateError};
pub use store::{StateStore, Unsubscribe};

#![forbid(unsafe_code)]

//! CoreTabs public facade crate.
//!
//! Re-exports the component crates and, with the default `i18n` feature,
//! provides [`Session`]: one state store plus a translator, with the
//! renderer and text view configured for the active language.

#[cfg(feature = "i18n")]
pub mod session;

#[cfg(feature = "i18n")]
pub use session::{LANGUAGE_KEY, Session};

pub mod prelude {
    pub use coretabs_format as format;
    #[cfg(feature = "i18n")]
    pub use coretabs_i18n as i18n;
    pub use coretabs_render as render;
    pub use coretabs_state as state;

    #[cfg(feature = "i18n")]
    pub use crate::Session;
    #[cfg(feature = "i18n")]
    pub use coretabs_i18n::{Language, Translator};
    pub use coretabs_render::{Cell, RenderConfig, RenderNode, Renderer, TextView, render};
    pub use coretabs_state::{StateStore, Unsubscribe};
}

//! Adapter utilities for the `windower` crate.
//!
//! The `windower` crate is UI-agnostic and focuses on the core state
//! machines. This crate provides the small, framework-neutral plumbing a
//! real embedding needs around them:
//!
//! - The [`VisibilityObserver`] contract over a platform's
//!   viewport-intersection primitive, plus a deterministic in-process
//!   implementation
//! - [`Surface`]: one engine + gate + cursor per logical view, wired to
//!   sentinel and per-item watches, with disposal semantics
//! - [`ShortcutRegistry`]: injectable key-combo routing for keyboard
//!   collaborators
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod observer;
mod shortcuts;
mod surface;


pub use observer::{
    HubObserver, NullObserver, VisibilityObserver, WatchId, WatchOptions, WatchTarget,
};
pub use shortcuts::{BindingId, KeyCombo, KeyEvent, ShortcutRegistry};
pub use surface::{Surface, SurfaceOptions, TickReport};

//! A headless progressive loading engine for large ordered collections.
//!
//! For adapter-level utilities (visibility plumbing, surface wiring,
//! shortcut routing), see the `windower-adapter` crate.
//!
//! This crate focuses on the state machines needed to populate huge
//! scrollable collections without loading everything at once: an
//! epoch-keyed materialized prefix that grows page by page, per-item lazy
//! payload authorization, and a selection cursor that stays consistent
//! while the collection is filtered and sorted underneath it.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - the ordered collection (post filter/sort) and its length each pass
//! - visibility signals (sentinel and per-item intersection events)
//! - a deferred tick that commits pending page growth
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cursor;
mod epoch;
mod error;
mod gate;
mod key;
mod options;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use cursor::{Breakpoints, Layout, SelectionCursor};
pub use epoch::Epoch;
pub use error::ConfigError;
pub use gate::{
    DEFAULT_GATE_MARGIN_PX, DEFAULT_GATE_THRESHOLD, GateOptions, OnReadyCallback, ResourceGate,
};
pub use options::{
    DEFAULT_INITIAL_LOAD_COUNT, DEFAULT_PAGE_SIZE, OnChangeCallback, WindowOptions,
};
pub use state::WindowState;
pub use types::{
    Align, AlignRequest, CommitOutcome, Direction, ItemId, SelectionChange, SelectionSource,
};
pub use window::WindowEngine;

#[doc(hidden)]
pub use key::WindowKey;

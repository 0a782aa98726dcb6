use alloc::collections::{BTreeMap, BTreeSet};

use windower::{DEFAULT_GATE_MARGIN_PX, DEFAULT_GATE_THRESHOLD};

/// Opaque renderable handle.
///
/// The embedding UI mints these (element ids, widget handles, slot indexes)
/// and is responsible for resolving them back to concrete elements; this
/// crate only routes them.
pub type WatchTarget = u64;

/// Handle returned by [`VisibilityObserver::watch`]; disposes that watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchId(u64);

/// Per-watch intersection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchOptions {
    /// Fraction of the target that must intersect the viewport.
    pub threshold: f32,
    /// Extra margin around the viewport, in pixels.
    pub margin_px: u32,
}

impl WatchOptions {
    /// Defaults for per-item payload watches.
    pub fn payload() -> Self {
        Self {
            threshold: DEFAULT_GATE_THRESHOLD,
            margin_px: DEFAULT_GATE_MARGIN_PX,
        }
    }

    /// Defaults for the end-of-window sentinel: a generous margin so the
    /// next page is decided well before the user reaches the end.
    pub fn sentinel() -> Self {
        Self {
            threshold: DEFAULT_GATE_THRESHOLD,
            margin_px: 200,
        }
    }
}

/// A viewport-intersection primitive, seen from the surface's side.
///
/// Implementations translate "element intersects viewport ± margin" signals
/// from the host platform into the surface's discrete
/// [`crate::Surface::handle_visibility`] calls. The surface registers and
/// disposes watches through this trait; it never learns what a target
/// physically is.
///
/// Contract: a target that is already visible when watched must be reported
/// exactly once (the surface consults [`Self::is_visible`] at watch time,
/// so implementations only need to keep that answer truthful).
pub trait VisibilityObserver {
    fn watch(&mut self, target: WatchTarget, options: WatchOptions) -> WatchId;
    fn unwatch(&mut self, id: WatchId);
    /// Whether `target` currently intersects the viewport (± margin).
    fn is_visible(&self, target: WatchTarget) -> bool;
}

/// A deterministic in-process [`VisibilityObserver`].
///
/// The embedding layer feeds it plain [`Self::set_visible`] transitions;
/// there is no platform binding. This is the default observer for
/// simulations and tests, and a reasonable base for real adapters that
/// already receive intersection events elsewhere.
#[derive(Clone, Debug, Default)]
pub struct HubObserver {
    next_id: u64,
    watches: BTreeMap<WatchId, WatchTarget>,
    visible: BTreeSet<WatchTarget>,
}

impl HubObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visibility transition for `target`.
    pub fn set_visible(&mut self, target: WatchTarget, visible: bool) {
        if visible {
            self.visible.insert(target);
        } else {
            self.visible.remove(&target);
        }
    }

    /// Whether `target` has at least one live watch.
    pub fn is_watched(&self, target: WatchTarget) -> bool {
        self.watches.values().any(|&t| t == target)
    }

    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }
}

impl VisibilityObserver for HubObserver {
    fn watch(&mut self, target: WatchTarget, _options: WatchOptions) -> WatchId {
        let id = WatchId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.watches.insert(id, target);
        id
    }

    fn unwatch(&mut self, id: WatchId) {
        self.watches.remove(&id);
    }

    fn is_visible(&self, target: WatchTarget) -> bool {
        self.visible.contains(&target)
    }
}

/// The degraded-environment observer: watches nothing, sees nothing.
///
/// Used by [`crate::Surface::new_degraded`] when no intersection primitive
/// exists; the surface then authorizes every materialized item eagerly and
/// grows the window on explicit triggers only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl VisibilityObserver for NullObserver {
    fn watch(&mut self, _target: WatchTarget, _options: WatchOptions) -> WatchId {
        WatchId(0)
    }

    fn unwatch(&mut self, _id: WatchId) {}

    fn is_visible(&self, _target: WatchTarget) -> bool {
        false
    }
}

use alloc::sync::Arc;

use crate::key::ReadyKeySet;
use crate::{ConfigError, ItemId, WindowKey};

/// A callback fired exactly once per key, when its payload is authorized.
pub type OnReadyCallback<K> = Arc<dyn Fn(&K) + Send + Sync>;

pub const DEFAULT_GATE_THRESHOLD: f32 = 0.1;
pub const DEFAULT_GATE_MARGIN_PX: u32 = 50;

/// Configuration for [`ResourceGate`].
pub struct GateOptions<K = ItemId> {
    /// Fraction of an item that must intersect the viewport before its
    /// payload is authorized.
    pub threshold: f32,
    /// How far outside the viewport to begin loading, in pixels.
    ///
    /// The default favors loading slightly before an item is visible, to
    /// avoid a visible pop-in at the cost of modest over-fetching.
    pub margin_px: u32,
    /// Optional callback fired on each promotion.
    pub on_ready: Option<OnReadyCallback<K>>,
}

impl<K> GateOptions<K> {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_GATE_THRESHOLD,
            margin_px: DEFAULT_GATE_MARGIN_PX,
            on_ready: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_margin_px(mut self, margin_px: u32) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn with_on_ready(
        mut self,
        on_ready: Option<impl Fn(&K) + Send + Sync + 'static>,
    ) -> Self {
        self.on_ready = on_ready.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) || self.threshold.is_nan() {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl<K> Default for GateOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for GateOptions<K> {
    fn clone(&self) -> Self {
        Self {
            threshold: self.threshold,
            margin_px: self.margin_px,
            on_ready: self.on_ready.clone(),
        }
    }
}

impl<K> core::fmt::Debug for GateOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GateOptions")
            .field("threshold", &self.threshold)
            .field("margin_px", &self.margin_px)
            .finish_non_exhaustive()
    }
}

/// Per-item lazy payload authorization.
///
/// Each item's promotion is independent of pagination: an item becomes
/// "ready" the first time it intersects the viewport (plus margin), and the
/// ready set only grows from there. Once visible, an item's payload stays
/// authorized, so re-scrolling past it never flickers back to a placeholder.
///
/// The gate is deliberately ignorant of the visibility primitive; the
/// adapter feeds it [`Self::mark_visible`] calls.
pub struct ResourceGate<K: WindowKey = ItemId> {
    options: GateOptions<K>,
    ready: ReadyKeySet<K>,
}

impl<K: WindowKey> ResourceGate<K> {
    pub fn new(options: GateOptions<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            ready: ReadyKeySet::new(),
        })
    }

    pub fn options(&self) -> &GateOptions<K> {
        &self.options
    }

    /// Promotes `key` to the ready set.
    ///
    /// Returns `true` exactly once per key; subsequent visibility toggles
    /// for the same key are no-ops and never re-fire `on_ready`.
    pub fn mark_visible(&mut self, key: K) -> bool {
        if self.ready.contains(&key) {
            return false;
        }
        wtrace!("gate: key promoted to ready");
        if let Some(cb) = &self.options.on_ready {
            cb(&key);
        }
        self.ready.insert(key);
        true
    }

    /// Whether `key`'s payload is authorized to load.
    pub fn is_ready(&self, key: &K) -> bool {
        self.ready.contains(key)
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    /// Iterates over the ready set without allocations. Order is
    /// unspecified.
    pub fn for_each_ready(&self, mut f: impl FnMut(&K)) {
        for key in self.ready.iter() {
            f(key);
        }
    }

    /// Drops every authorization.
    ///
    /// Only meant to run alongside a full reset of the owning surface;
    /// routine collection changes keep the ready set so unchanged items do
    /// not flicker.
    pub fn clear(&mut self) {
        self.ready.clear();
    }
}

impl<K: WindowKey> core::fmt::Debug for ResourceGate<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceGate")
            .field("options", &self.options)
            .field("ready_len", &self.ready.len())
            .finish()
    }
}

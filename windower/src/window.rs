use alloc::sync::Arc;
use core::cell::Cell;
use core::cmp;

use crate::{CommitOutcome, ConfigError, Epoch, ItemId, WindowKey, WindowOptions, WindowState};

/// A materialization step that has been decided but not yet committed.
///
/// The tag records the epoch generation the step was issued against; a
/// `reset()` or epoch change bumps the generation, so the eventual commit of
/// a superseded step is discarded rather than applied to post-reset state.
#[derive(Clone, Copy, Debug)]
struct PendingLoad {
    next: usize,
    generation: u64,
}

/// A headless incremental-pagination engine.
///
/// The engine owns how much of a caller-supplied ordered collection is
/// materialized at any time. It is intentionally UI-agnostic:
/// - It never holds the collection, only `count` + a key accessor.
/// - Your adapter drives it: sentinel visibility calls
///   [`Self::notify_end_sentinel_visible`], and a deferred scheduler tick
///   calls [`Self::commit_pending`].
/// - Page growth is two-phase (decide, then commit after a cooperative
///   yield) so bursts of rapid visibility triggers coalesce into a bounded
///   rate of materialization steps.
///
/// For the visibility plumbing and selection wiring, see the
/// `windower-adapter` crate.
#[derive(Clone, Debug)]
pub struct WindowEngine<K = ItemId> {
    options: WindowOptions<K>,
    // `None` after `reset()`, so the next sync re-initializes even when the
    // collection is unchanged.
    epoch: Option<Epoch>,
    generation: u64,
    materialized: usize,
    has_more: bool,
    pending: Option<PendingLoad>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: WindowKey> WindowEngine<K> {
    /// Creates a new engine and applies the initial load.
    ///
    /// Fails fast on invalid configuration (`page_size == 0` or
    /// `initial_load_count == 0`) rather than looping forever later.
    pub fn new(options: WindowOptions<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        let epoch = Epoch::compute(options.count, |i| (options.get_item_key)(i));
        wdebug!(
            count = options.count,
            page_size = options.page_size,
            initial_load_count = options.initial_load_count,
            "WindowEngine::new"
        );
        let mut engine = Self {
            options,
            epoch: Some(epoch),
            generation: 0,
            materialized: 0,
            has_more: false,
            pending: None,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        engine.apply_initial_load();
        Ok(engine)
    }

    pub fn options(&self) -> &WindowOptions<K> {
        &self.options
    }

    /// Replaces the options wholesale, then re-syncs against the new
    /// collection (epoch-keyed, so an identical key sequence keeps the
    /// current materialized prefix).
    pub fn set_options(&mut self, options: WindowOptions<K>) -> Result<(), ConfigError> {
        options.validate()?;
        self.options = options;
        self.sync_collection();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut WindowOptions<K>),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Points the engine at a new collection view.
    ///
    /// Call this (or [`Self::sync_collection`]) on every render pass; the
    /// materialized prefix only resets when the key sequence actually
    /// changed.
    pub fn set_collection(
        &mut self,
        count: usize,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) {
        self.options.count = count;
        self.options.get_item_key = Arc::new(get_item_key);
        self.sync_collection();
    }

    /// Updates the collection length while keeping the key accessor.
    pub fn set_count(&mut self, count: usize) {
        self.options.count = count;
        self.sync_collection();
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&WindowEngine<K>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Recomputes the epoch fingerprint from the current `count` and key
    /// accessor. Returns `true` when the collection conceptually changed and
    /// the window was re-initialized.
    ///
    /// Reference-only changes (same keys, same order) are no-ops by design:
    /// the embedding UI may rebuild its collection object on every pass.
    pub fn sync_collection(&mut self) -> bool {
        let next = Epoch::compute(self.options.count, |i| (self.options.get_item_key)(i));
        if Some(next) == self.epoch {
            return false;
        }
        wdebug!(count = self.options.count, "sync_collection: epoch changed");
        self.epoch = Some(next);
        self.generation = self.generation.wrapping_add(1);
        self.apply_initial_load();
        self.notify();
        true
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    /// The current collection fingerprint; `None` after a [`Self::reset`]
    /// until the next sync.
    pub fn epoch(&self) -> Option<Epoch> {
        self.epoch
    }

    /// Length of the materialized prefix.
    pub fn materialized(&self) -> usize {
        self.materialized
    }

    /// The materialized slice of the collection, as an index range.
    pub fn materialized_range(&self) -> core::ops::Range<usize> {
        0..self.materialized
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a materialization step is in flight (decided, not committed).
    pub fn is_loading(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.generation == self.generation)
    }

    /// Returns a lightweight snapshot of the pagination state.
    pub fn window_state(&self) -> WindowState {
        WindowState {
            materialized: self.materialized,
            page_size: self.options.page_size,
            has_more: self.has_more,
            is_loading: self.is_loading(),
        }
    }

    pub fn key_for(&self, index: usize) -> K {
        (self.options.get_item_key)(index)
    }

    /// Iterates over the materialized prefix's keys without allocations.
    pub fn for_each_materialized_key(&self, mut f: impl FnMut(K)) {
        for i in 0..self.materialized {
            f(self.key_for(i));
        }
    }

    /// Decides the next materialization step.
    ///
    /// No-op while a step is in flight or nothing more exists; at most one
    /// step is pending per engine, so overlapping triggers can never
    /// double-count `page_size`. Returns whether a step was queued.
    ///
    /// The step is committed by [`Self::commit_pending`], which the adapter
    /// invokes after a cooperative yield (any deferred-callback primitive:
    /// zero-delay timer, microtask, next tick).
    pub fn load_more(&mut self) -> bool {
        if self.is_loading() || !self.has_more {
            return false;
        }
        let next = cmp::min(
            self.materialized.saturating_add(self.options.page_size),
            self.options.count,
        );
        wtrace!(next, generation = self.generation, "load_more: queued");
        self.pending = Some(PendingLoad {
            next,
            generation: self.generation,
        });
        self.notify();
        true
    }

    /// Commits the pending materialization step, if any.
    ///
    /// A step issued against a superseded epoch generation is silently
    /// discarded; that is expected traffic, not an error.
    pub fn commit_pending(&mut self) -> CommitOutcome {
        let Some(pending) = self.pending.take() else {
            return CommitOutcome::Idle;
        };
        if pending.generation != self.generation {
            wdebug!(
                next = pending.next,
                generation = pending.generation,
                current = self.generation,
                "commit_pending: stale step discarded"
            );
            return CommitOutcome::Stale;
        }
        self.materialized = cmp::min(pending.next, self.options.count);
        self.has_more = self.materialized < self.options.count;
        wtrace!(materialized = self.materialized, has_more = self.has_more, "commit_pending");
        self.notify();
        CommitOutcome::Applied
    }

    /// The sentinel trigger: an element after the last materialized item
    /// became visible. Equivalent to a manual "load more" affordance.
    pub fn notify_end_sentinel_visible(&mut self) -> bool {
        self.load_more()
    }

    /// Synchronously clears the materialized prefix.
    ///
    /// Idempotent, and always wins over an in-flight load: the stale step's
    /// eventual commit is discarded. The next [`Self::sync_collection`]
    /// re-applies the initial load.
    pub fn reset(&mut self) {
        if self.materialized == 0 && self.has_more && !self.is_loading() {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.epoch = None;
        self.materialized = 0;
        self.has_more = true;
        self.notify();
    }

    fn apply_initial_load(&mut self) {
        self.materialized = cmp::min(self.options.initial_load_count, self.options.count);
        self.has_more = self.options.count > self.materialized;
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }
}

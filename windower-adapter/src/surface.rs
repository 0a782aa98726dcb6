use alloc::collections::BTreeMap;

use windower::{
    CommitOutcome, ConfigError, Direction, GateOptions, ItemId, Layout, ResourceGate,
    SelectionChange, SelectionCursor, SelectionSource, WindowEngine, WindowKey, WindowOptions,
    WindowState,
};

use crate::{HubObserver, NullObserver, VisibilityObserver, WatchId, WatchOptions, WatchTarget};

/// Configuration for [`Surface`].
pub struct SurfaceOptions<K = ItemId> {
    pub window: WindowOptions<K>,
    pub gate: GateOptions<K>,
    pub layout: Layout,
    pub sentinel_watch: WatchOptions,
    pub item_watch: WatchOptions,
}

impl<K> SurfaceOptions<K> {
    pub fn new(window: WindowOptions<K>) -> Self {
        Self {
            window,
            gate: GateOptions::new(),
            layout: Layout::Linear,
            sentinel_watch: WatchOptions::sentinel(),
            item_watch: WatchOptions::payload(),
        }
    }

    pub fn with_gate(mut self, gate: GateOptions<K>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_sentinel_watch(mut self, sentinel_watch: WatchOptions) -> Self {
        self.sentinel_watch = sentinel_watch;
        self
    }

    pub fn with_item_watch(mut self, item_watch: WatchOptions) -> Self {
        self.item_watch = item_watch;
        self
    }
}

impl<K> core::fmt::Debug for SurfaceOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SurfaceOptions")
            .field("window", &self.window)
            .field("gate", &self.gate)
            .field("layout", &self.layout)
            .field("sentinel_watch", &self.sentinel_watch)
            .field("item_watch", &self.item_watch)
            .finish()
    }
}

/// What one cooperative tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub commit: CommitOutcome,
    pub selection: Option<SelectionChange>,
}

struct ItemWatch<K> {
    key: K,
    id: WatchId,
}

/// One logical render surface: a window engine, a resource gate and a
/// selection cursor wired to a visibility observer.
///
/// Engines are never shared between surfaces; a grid view and a list view
/// of the same collection each own a `Surface`, since each carries
/// surface-specific layout semantics.
///
/// The embedding drives it with four calls:
/// - [`Self::sync`] once per render pass (epoch check + reconciliation)
/// - [`Self::handle_visibility`] for each intersection transition
/// - [`Self::tick`] from a deferred scheduler (commits pending page growth)
/// - [`Self::dispose`] on unmount
pub struct Surface<K: WindowKey + Clone = ItemId, O: VisibilityObserver = HubObserver> {
    engine: WindowEngine<K>,
    gate: ResourceGate<K>,
    cursor: SelectionCursor,
    layout: Layout,
    observer: O,
    items: BTreeMap<WatchTarget, ItemWatch<K>>,
    sentinel: Option<(WatchTarget, WatchId)>,
    sentinel_watch: WatchOptions,
    item_watch: WatchOptions,
    degraded: bool,
    disposed: bool,
}

impl<K: WindowKey + Clone> Surface<K, NullObserver> {
    /// Creates a surface for an environment without a viewport-intersection
    /// primitive.
    ///
    /// Policy: every materialized item's payload is authorized immediately,
    /// and the window grows only through explicit [`Self::load_more`]
    /// triggers. This is a deliberate degradation, never a crash; callers
    /// can inspect it via [`Self::is_degraded`] (e.g. to render a "load
    /// more" button instead of relying on scroll).
    pub fn new_degraded(options: SurfaceOptions<K>) -> Result<Self, ConfigError> {
        Self::build(options, NullObserver, true)
    }
}

impl<K: WindowKey + Clone, O: VisibilityObserver> Surface<K, O> {
    /// Creates a surface backed by `observer`.
    pub fn new(options: SurfaceOptions<K>, observer: O) -> Result<Self, ConfigError> {
        Self::build(options, observer, false)
    }

    fn build(options: SurfaceOptions<K>, observer: O, degraded: bool) -> Result<Self, ConfigError> {
        validate_watch(&options.sentinel_watch)?;
        validate_watch(&options.item_watch)?;
        let engine = WindowEngine::new(options.window)?;
        let gate = ResourceGate::new(options.gate)?;
        let mut surface = Self {
            engine,
            gate,
            cursor: SelectionCursor::new(),
            layout: options.layout,
            observer,
            items: BTreeMap::new(),
            sentinel: None,
            sentinel_watch: options.sentinel_watch,
            item_watch: options.item_watch,
            degraded,
            disposed: false,
        };
        surface.promote_if_degraded();
        Ok(surface)
    }

    pub fn engine(&self) -> &WindowEngine<K> {
        &self.engine
    }

    /// Direct engine access, e.g. to point it at a new collection view
    /// before the next [`Self::sync`].
    pub fn engine_mut(&mut self) -> &mut WindowEngine<K> {
        &mut self.engine
    }

    pub fn gate(&self) -> &ResourceGate<K> {
        &self.gate
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Switches grid/linear semantics (e.g. after a viewport resize changed
    /// the breakpoint-derived column count).
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    // Rendering accessors.

    pub fn materialized_range(&self) -> core::ops::Range<usize> {
        self.engine.materialized_range()
    }

    pub fn has_more(&self) -> bool {
        self.engine.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.engine.is_loading()
    }

    pub fn window_state(&self) -> WindowState {
        self.engine.window_state()
    }

    /// Placeholder-vs-payload decision for one rendered item.
    pub fn is_ready(&self, key: &K) -> bool {
        self.gate.is_ready(key)
    }

    pub fn selection(&self) -> Option<usize> {
        self.cursor.selection()
    }

    // Wiring.

    /// Registers the end-of-window sentinel element.
    ///
    /// Replaces any previous sentinel watch. If the sentinel is already
    /// visible when registered, the load trigger fires once immediately.
    pub fn set_sentinel(&mut self, target: WatchTarget) {
        if self.disposed {
            return;
        }
        if let Some((_, id)) = self.sentinel.take() {
            self.observer.unwatch(id);
        }
        let id = self.observer.watch(target, self.sentinel_watch);
        self.sentinel = Some((target, id));
        if self.observer.is_visible(target) {
            self.engine.notify_end_sentinel_visible();
        }
    }

    /// Registers a rendered item for payload-visibility tracking.
    ///
    /// Idempotent per `(target, key)` pair. Re-registering a target with a
    /// different key (element recycling) replaces the old watch. If the
    /// target is already visible, the key is promoted immediately.
    pub fn observe_item(&mut self, target: WatchTarget, key: K) {
        if self.disposed {
            return;
        }
        if self.degraded {
            self.gate.mark_visible(key);
            return;
        }
        if let Some(watch) = self.items.get(&target) {
            if watch.key == key {
                return;
            }
            self.observer.unwatch(watch.id);
        }
        let id = self.observer.watch(target, self.item_watch);
        let visible = self.observer.is_visible(target);
        if visible {
            self.gate.mark_visible(key.clone());
        }
        self.items.insert(target, ItemWatch { key, id });
    }

    /// Entry point for intersection transitions from the embedding layer.
    ///
    /// Only enter edges matter: the window never shrinks and the ready set
    /// is monotone, so leave edges are dropped here.
    pub fn handle_visibility(&mut self, target: WatchTarget, visible: bool) {
        if self.disposed || !visible {
            return;
        }
        if self.sentinel.is_some_and(|(t, _)| t == target) {
            self.engine.notify_end_sentinel_visible();
            return;
        }
        if let Some(watch) = self.items.get(&target) {
            let key = watch.key.clone();
            self.gate.mark_visible(key);
        }
    }

    /// Manual "load more" affordance; equivalent to a sentinel trigger.
    pub fn load_more(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.engine.load_more()
    }

    /// One cooperative scheduler step.
    ///
    /// Commits at most one pending materialization step, so a synchronous
    /// burst of sentinel triggers advances the window by a single page.
    /// Then reconciles the cursor against the (possibly grown) view.
    ///
    /// A sentinel that is still inside the viewport after the commit (the
    /// materialized window is shorter than the viewport) queues the next
    /// page right away; the window keeps filling one page per tick until
    /// the sentinel scrolls out or the collection is exhausted.
    pub fn tick(&mut self) -> TickReport {
        if self.disposed {
            return TickReport {
                commit: CommitOutcome::Idle,
                selection: None,
            };
        }
        let commit = self.engine.commit_pending();
        if commit == CommitOutcome::Applied
            && self.sentinel.is_some_and(|(t, _)| self.observer.is_visible(t))
        {
            self.engine.notify_end_sentinel_visible();
        }
        self.promote_if_degraded();
        let selection = self.reconcile();
        TickReport { commit, selection }
    }

    /// Per-render-pass entry: re-syncs against the caller's collection and
    /// reconciles the selection.
    ///
    /// The first pass over a non-empty view selects index 0 and requests
    /// alignment; that change is tagged
    /// [`SelectionSource::Programmatic`], so downstream consumers do not
    /// mistake it for user navigation.
    pub fn sync(&mut self) -> Option<SelectionChange> {
        if self.disposed {
            return None;
        }
        self.engine.sync_collection();
        self.promote_if_degraded();
        self.reconcile()
    }

    // Selection entry points for keyboard collaborators.

    pub fn move_selection(&mut self, direction: Direction) -> Option<SelectionChange> {
        if self.disposed {
            return None;
        }
        self.cursor
            .move_selection(direction, self.layout, self.engine.materialized())
    }

    pub fn select(&mut self, index: usize) -> Option<SelectionChange> {
        if self.disposed {
            return None;
        }
        self.cursor
            .select(index, SelectionSource::User, self.engine.materialized())
    }

    pub fn select_next(&mut self) -> Option<SelectionChange> {
        self.move_selection(Direction::Down)
    }

    pub fn select_previous(&mut self) -> Option<SelectionChange> {
        self.move_selection(Direction::Up)
    }

    /// Synchronously detaches every watch and discards any in-flight
    /// materialization step. No callback-driven entry point does anything
    /// after this.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        wdebug!(items = self.items.len(), "surface disposed");
        for (_, watch) in core::mem::take(&mut self.items) {
            self.observer.unwatch(watch.id);
        }
        if let Some((_, id)) = self.sentinel.take() {
            self.observer.unwatch(id);
        }
        self.engine.reset();
        self.cursor.clear();
        self.gate.clear();
        self.disposed = true;
    }

    fn reconcile(&mut self) -> Option<SelectionChange> {
        self.cursor.reconcile(self.engine.materialized())
    }

    fn promote_if_degraded(&mut self) {
        if !self.degraded {
            return;
        }
        let gate = &mut self.gate;
        self.engine.for_each_materialized_key(|key| {
            gate.mark_visible(key);
        });
    }
}

impl<K: WindowKey + Clone, O: VisibilityObserver> core::fmt::Debug for Surface<K, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("window", &self.engine.window_state())
            .field("layout", &self.layout)
            .field("ready_len", &self.gate.ready_len())
            .field("selection", &self.cursor.selection())
            .field("degraded", &self.degraded)
            .field("disposed", &self.disposed)
            .finish()
    }
}

fn validate_watch(options: &WatchOptions) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&options.threshold) {
        return Err(ConfigError::InvalidThreshold(options.threshold));
    }
    Ok(())
}

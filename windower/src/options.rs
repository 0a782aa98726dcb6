use alloc::sync::Arc;

use crate::window::WindowEngine;
use crate::{ConfigError, ItemId};

/// A callback fired when the engine's pagination state changes.
pub type OnChangeCallback<K> = Arc<dyn Fn(&WindowEngine<K>) + Send + Sync>;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_INITIAL_LOAD_COUNT: usize = 10;

/// Configuration for [`crate::WindowEngine`].
///
/// This type is designed to be cheap to clone: the key accessor is stored in
/// an `Arc` so adapters can update a few fields and call
/// `WindowEngine::set_options` without reallocating closures.
///
/// The collection itself stays caller-owned. The engine only ever reads
/// `count` and `get_item_key(i)`, so the caller is free to rebuild its
/// filtered/sorted vector on every render pass.
pub struct WindowOptions<K = ItemId> {
    /// Length of the caller's (post filter/sort) collection.
    pub count: usize,
    /// Stable identity of the item at index `i`.
    pub get_item_key: Arc<dyn Fn(usize) -> K + Send + Sync>,

    /// Items materialized per `load_more` step. Must be non-zero.
    pub page_size: usize,
    /// Items materialized up front on first sync / epoch change. Must be
    /// non-zero; increments after the initial load always use `page_size`.
    pub initial_load_count: usize,

    /// Optional callback fired when the engine's internal state changes.
    pub on_change: Option<OnChangeCallback<K>>,
}

impl WindowOptions<ItemId> {
    /// Creates options for a collection keyed by string id.
    pub fn new(count: usize, get_item_key: impl Fn(usize) -> ItemId + Send + Sync + 'static) -> Self {
        Self::new_with_key(count, get_item_key)
    }
}

impl<K> WindowOptions<K> {
    /// Creates options with a custom key mapping.
    ///
    /// `get_item_key(i)` must return a stable, unique identity for the item
    /// at index `i`; the epoch fingerprint is derived from the ordered key
    /// sequence.
    pub fn new_with_key(
        count: usize,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            get_item_key: Arc::new(get_item_key),
            page_size: DEFAULT_PAGE_SIZE,
            initial_load_count: DEFAULT_INITIAL_LOAD_COUNT,
            on_change: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_initial_load_count(mut self, initial_load_count: usize) -> Self {
        self.initial_load_count = initial_load_count;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&WindowEngine<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if self.initial_load_count == 0 {
            return Err(ConfigError::InvalidInitialLoadCount);
        }
        Ok(())
    }
}

impl<K> Clone for WindowOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            get_item_key: Arc::clone(&self.get_item_key),
            page_size: self.page_size,
            initial_load_count: self.initial_load_count,
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> core::fmt::Debug for WindowOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("count", &self.count)
            .field("page_size", &self.page_size)
            .field("initial_load_count", &self.initial_load_count)
            .finish_non_exhaustive()
    }
}

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

#[cfg(feature = "std")]
pub(crate) type ReadyKeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type ReadyKeySet<K> = BTreeSet<K>;

/// Bound for item keys.
///
/// Keys must be hashable in both modes: the epoch fingerprint is computed by
/// hashing the ordered key sequence.
#[cfg(feature = "std")]
pub trait WindowKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> WindowKey for K {}

#[cfg(not(feature = "std"))]
pub trait WindowKey: core::hash::Hash + Ord {}
#[cfg(not(feature = "std"))]
impl<K: core::hash::Hash + Ord> WindowKey for K {}

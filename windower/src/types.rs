/// Default item key type.
///
/// The source collections this engine targets identify items by stable string
/// ids; use [`crate::WindowOptions::new_with_key`] for anything cheaper.
pub type ItemId = alloc::string::String;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Directional selection movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Outcome of [`crate::WindowEngine::commit_pending`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommitOutcome {
    /// No load was pending.
    Idle,
    /// The pending page was applied; the materialized prefix grew.
    Applied,
    /// The pending page was issued against a superseded epoch and discarded.
    Stale,
}

/// Who drove a selection change.
///
/// Reconciliation and first-paint selection are `Programmatic`; keyboard
/// navigation and explicit jumps are `User`. Downstream consumers (e.g.
/// telemetry) must be able to tell the two apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionSource {
    User,
    Programmatic,
}

/// A request to scroll the item at `index` into a given viewport position.
///
/// The index is deliberately opaque to this crate: the render surface is
/// responsible for resolving it to a concrete renderable position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignRequest {
    pub index: usize,
    pub align: Align,
}

/// An observable selection transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionChange {
    /// The new selection; `None` clears it.
    pub index: Option<usize>,
    pub source: SelectionSource,
    /// At most one alignment request per change; `None` for clears.
    pub align: Option<AlignRequest>,
}

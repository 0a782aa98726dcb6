/// A lightweight, serializable snapshot of the pagination state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    /// Length of the materialized prefix.
    pub materialized: usize,
    pub page_size: usize,
    pub has_more: bool,
    /// Whether a materialization step is in flight (decided, not committed).
    pub is_loading: bool,
}

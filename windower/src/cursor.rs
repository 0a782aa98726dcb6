use alloc::vec::Vec;
use core::num::NonZeroUsize;

use crate::{Align, AlignRequest, Direction, SelectionChange, SelectionSource};

/// Shape of the surface a cursor moves over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// Grid: up/down move by one row (`columns`), left/right by one item.
    Grid { columns: NonZeroUsize },
    /// Linear list: up/down move by one item, left/right are ignored.
    Linear,
}

/// Viewport width → grid columns.
///
/// Entries map a minimum viewport width to a column count; the widest
/// matching entry wins, and widths below every entry get one column. The
/// default table mirrors the usual six responsive CSS breakpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoints {
    entries: Vec<(u32, NonZeroUsize)>,
}

impl Breakpoints {
    /// Builds a table from `(min_width, columns)` pairs, in any order.
    pub fn new(entries: impl IntoIterator<Item = (u32, NonZeroUsize)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        Self { entries }
    }

    pub fn columns_for(&self, viewport_width: u32) -> NonZeroUsize {
        for &(min_width, columns) in &self.entries {
            if viewport_width >= min_width {
                return columns;
            }
        }
        NonZeroUsize::MIN
    }

    /// The grid layout for a given viewport width.
    pub fn grid_layout_for(&self, viewport_width: u32) -> Layout {
        Layout::Grid {
            columns: self.columns_for(viewport_width),
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        let cols = |n: usize| NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN);
        Self::new([
            (1536, cols(6)),
            (1280, cols(5)),
            (1024, cols(4)),
            (768, cols(3)),
            (640, cols(2)),
        ])
    }
}

/// Keyboard-navigable selection over the materialized prefix.
///
/// The cursor never inspects the collection; callers pass the current
/// materialized count, and the cursor keeps its index inside
/// `[0, materialized)` (or cleared when the view is empty). Directional
/// movement respects the surface [`Layout`], so one cursor instance serves
/// exactly one surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    index: Option<usize>,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection, `None` when nothing is selected.
    pub fn selection(&self) -> Option<usize> {
        self.index
    }

    /// Moves the selection one step in `direction`, clamped to the
    /// materialized view.
    ///
    /// With no current selection, any direction lands on index 0. A move
    /// that clamps onto the current index reports nothing, so holding an
    /// arrow key at an edge does not spam alignment requests.
    pub fn move_selection(
        &mut self,
        direction: Direction,
        layout: Layout,
        materialized: usize,
    ) -> Option<SelectionChange> {
        if materialized == 0 {
            return None;
        }
        let Some(current) = self.index else {
            return self.apply(0, SelectionSource::User);
        };

        let last = materialized - 1;
        let row = match layout {
            Layout::Grid { columns } => columns.get(),
            Layout::Linear => 1,
        };
        let next = match (direction, layout) {
            (Direction::Up, _) => current.saturating_sub(row),
            (Direction::Down, _) => core::cmp::min(last, current.saturating_add(row)),
            (Direction::Left, Layout::Grid { .. }) => current.saturating_sub(1),
            (Direction::Right, Layout::Grid { .. }) => {
                core::cmp::min(last, current.saturating_add(1))
            }
            // Horizontal movement is meaningless in a linear list.
            (Direction::Left | Direction::Right, Layout::Linear) => return None,
        };
        let next = core::cmp::min(next, last);
        if next == current {
            return None;
        }
        self.apply(next, SelectionSource::User)
    }

    /// Absolute jump, clamped to the materialized view.
    ///
    /// Always issues an alignment request, even when `index` is already
    /// selected: an explicit jump re-centers the target.
    pub fn select(
        &mut self,
        index: usize,
        source: SelectionSource,
        materialized: usize,
    ) -> Option<SelectionChange> {
        if materialized == 0 {
            return None;
        }
        self.apply(core::cmp::min(index, materialized - 1), source)
    }

    /// Re-fits the selection after the materialized view changed.
    ///
    /// Policy: clamp an out-of-range index to the last item, select index 0
    /// when an empty view gains content, clear when the view empties.
    /// Idempotent: re-running with no state change returns `None` and issues
    /// no second alignment request.
    pub fn reconcile(&mut self, materialized: usize) -> Option<SelectionChange> {
        match self.index {
            _ if materialized == 0 => {
                if self.index.take().is_some() {
                    wtrace!("cursor: view emptied, selection cleared");
                    return Some(SelectionChange {
                        index: None,
                        source: SelectionSource::Programmatic,
                        align: None,
                    });
                }
                None
            }
            None => self.apply(0, SelectionSource::Programmatic),
            Some(current) if current >= materialized => {
                self.apply(materialized - 1, SelectionSource::Programmatic)
            }
            Some(_) => None,
        }
    }

    /// Clears the selection without emitting a change.
    pub fn clear(&mut self) {
        self.index = None;
    }

    fn apply(&mut self, index: usize, source: SelectionSource) -> Option<SelectionChange> {
        self.index = Some(index);
        Some(SelectionChange {
            index: Some(index),
            source,
            align: Some(AlignRequest {
                index,
                align: Align::Center,
            }),
        })
    }
}

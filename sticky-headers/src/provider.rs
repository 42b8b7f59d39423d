use crate::{GroupId, RowPosition, RowRange};

/// Maps row positions to header groups.
///
/// Implementations decide grouping (by first letter, by day, ...); the
/// engine only consumes the mapping.
///
/// Contract:
/// - `group_at` must be a pure function of `position` and the current data
///   snapshot: two calls for the same position without an intervening data
///   mutation must agree. The engine re-reads and `debug_assert!`s this in
///   debug builds but does not defend against violations in release.
/// - Rows returning `None` never carry a header and are transparent to
///   boundary detection: a sentinel row neither starts nor ends a group, the
///   scan skips it and continues with the next concrete row.
/// - Rows of one group are assumed contiguous in display order. The engine
///   does not detect non-contiguous groupings; the same [`GroupId`] appearing
///   in two disjoint runs simply pins once per run.
pub trait GroupingProvider {
    fn row_count(&self) -> usize;

    /// The group of the row at `position`, or `None` for sentinel rows.
    ///
    /// Callers guarantee `position < row_count()`; the engine validates the
    /// host-reported window before querying.
    fn group_at(&self, position: RowPosition) -> Option<GroupId>;
}

/// Geometry reported by the host list view.
pub trait ListGeometry {
    /// The window of currently laid-out rows. Empty when the list has no
    /// children attached.
    fn visible_range(&self) -> RowRange;

    /// Top edge of a laid-out row relative to the content top where headers
    /// pin. Negative once the row has partially scrolled past that edge.
    ///
    /// Only queried for positions inside [`Self::visible_range`].
    fn top_offset_of(&self, position: RowPosition) -> i64;
}

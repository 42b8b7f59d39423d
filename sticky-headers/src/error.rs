use thiserror::Error;

use crate::RowPosition;

/// A row position outside the provider's `[0, row_count)` window.
///
/// Positions are never silently clamped. A host that reports a stale visible
/// range after mutating its data must re-layout and notify the overlay
/// instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("row position {position} outside 0..{row_count}")]
pub struct PositionError {
    pub position: RowPosition,
    pub row_count: usize,
}

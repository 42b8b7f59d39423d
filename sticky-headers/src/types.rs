/// A zero-based index into the host list's logical item sequence.
///
/// Stable between scroll events; invalidated whenever the item count changes.
pub type RowPosition = usize;

/// Identity of a header group.
///
/// A `GroupId` only ever holds a non-negative identifier. Providers speaking
/// the legacy wire format, where any negative value marks a row that never
/// carries a header, decode it with [`GroupId::from_raw`]; the sentinel maps
/// onto `Option::None` and can never be pinned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(i64);

impl GroupId {
    /// Returns `None` for negative identifiers.
    pub const fn new(id: i64) -> Option<Self> {
        if id < 0 { None } else { Some(Self(id)) }
    }

    /// Decodes the wire encoding used by adapter-style providers: any
    /// negative value means "this row has no header" (e.g. list-level header
    /// or footer rows).
    pub const fn from_raw(raw: i64) -> Option<Self> {
        Self::new(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

/// The window of currently laid-out rows, `[start_index, end_index)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl RowRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }
}

/// The engine's per-frame result.
///
/// Recomputed on every scroll/layout event, never persisted across events.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementState {
    /// The group whose header is pinned.
    pub active: GroupId,
    /// The incoming group while a hand-off is in progress.
    pub next: Option<GroupId>,
    /// 0.0 while the active header is fully pinned, 1.0 the moment the next
    /// header has fully replaced it. Driven by scroll position.
    pub transition: f32,
    /// Content-top of the scroll container, where the pinned header sits.
    pub pinned_top: i64,
}

/// The pure result of scanning the visible window for header groups.
///
/// Produced by [`crate::PlacementEngine::scan`]; adapters that need to
/// measure a header before resolving the hand-off keep the scan around and
/// feed it to [`crate::PlacementEngine::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupScan {
    /// The candidate active group.
    pub active: GroupId,
    /// The first visible concrete row of the active group.
    pub active_position: RowPosition,
    /// The first visible row belonging to a different group, if any.
    pub boundary: Option<GroupBoundary>,
}

/// A visible row at which the header group changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupBoundary {
    pub group: GroupId,
    pub position: RowPosition,
    /// Top offset of the boundary row relative to the content top, px.
    pub top: i64,
}

/// On-screen rectangle of a header in the scroll axis, for hit-testing.
///
/// Horizontal hosts map their "left" coordinate onto `top`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderRect {
    pub top: i64,
    pub height: u32,
}

impl HeaderRect {
    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height as i64)
    }

    pub fn contains(&self, offset: i64) -> bool {
        offset >= self.top && offset < self.bottom()
    }
}

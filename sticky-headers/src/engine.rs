use crate::{
    GroupBoundary, GroupId, GroupScan, GroupingProvider, ListGeometry, PlacementState,
    PositionError, RowPosition,
};

/// Configuration for [`PlacementEngine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Content-top of the scroll container; where the pinned header sits.
    ///
    /// 0 for the common case of a header fixed to the viewport top. Reported
    /// back verbatim as [`PlacementState::pinned_top`]; row top offsets are
    /// expected to be measured from the same edge.
    pub top_inset: i64,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_inset(mut self, top_inset: i64) -> Self {
        self.top_inset = top_inset;
        self
    }
}

/// Decides which header is pinned and where the hand-off to the next one
/// happens.
///
/// The only state carried across frames is the last *established* group,
/// which keeps a header pinned while the viewport shows sentinel rows only
/// (footer-only viewports do not blink the header out). Everything else is a
/// pure recomputation from current inputs, committed in a single assignment
/// at the end of [`Self::resolve`], so a superseded in-flight computation can
/// be discarded without partial mutation becoming visible.
///
/// Instantiate one engine per list instance; engines are never shared.
#[derive(Clone, Debug, Default)]
pub struct PlacementEngine {
    options: EngineOptions,
    established: Option<GroupId>,
}

impl PlacementEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            established: None,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// The group currently pinned (or last pinned), if any.
    pub fn established(&self) -> Option<GroupId> {
        self.established
    }

    /// Invalidates every conclusion drawn from the previous data snapshot.
    ///
    /// Hosts must call this whenever rows are inserted, removed or moved; the
    /// next placement restarts the grouping scan from scratch.
    pub fn invalidate(&mut self) {
        sdebug!("invalidate");
        self.established = None;
    }

    /// Scans the visible window for the active group and the next boundary.
    ///
    /// Pure: no engine state is touched. Returns `Ok(None)` when the window
    /// is empty or contains only sentinel rows.
    ///
    /// Sentinel rows are transparent: they neither provide the active group
    /// nor end it. When two group boundaries collide on the same pixel row
    /// (zero-height groups), the later group in scroll order wins as the
    /// boundary.
    pub fn scan<P, G>(
        &self,
        provider: &P,
        geometry: &G,
    ) -> Result<Option<GroupScan>, PositionError>
    where
        P: GroupingProvider,
        G: ListGeometry,
    {
        let range = geometry.visible_range();
        if range.is_empty() {
            return Ok(None);
        }
        let row_count = provider.row_count();
        if range.end_index > row_count {
            swarn!(
                end_index = range.end_index,
                row_count,
                "visible range outside provider window"
            );
            return Err(PositionError {
                position: range.end_index - 1,
                row_count,
            });
        }

        // The first concrete row decides the active candidate.
        let mut cursor = range.start_index;
        let active = loop {
            if cursor >= range.end_index {
                return Ok(None);
            }
            if let Some(group) = provider.group_at(cursor) {
                break group;
            }
            cursor += 1;
        };
        let active_position = cursor;

        debug_assert!(
            provider.group_at(active_position) == Some(active),
            "GroupingProvider::group_at must be pure between data mutations (position={active_position})"
        );

        let mut boundary: Option<GroupBoundary> = None;
        let mut current = active;
        for position in (active_position + 1)..range.end_index {
            let Some(group) = provider.group_at(position) else {
                continue;
            };
            if group == current {
                continue;
            }
            let top = geometry.top_offset_of(position);
            match boundary {
                None => boundary = Some(GroupBoundary { group, position, top }),
                // Boundary collision on the exact same pixel row: the later
                // group in scroll order takes over as "next".
                Some(b) if top == b.top => {
                    boundary = Some(GroupBoundary { group, position, top });
                }
                Some(_) => break,
            }
            current = group;
        }

        Ok(Some(GroupScan {
            active,
            active_position,
            boundary,
        }))
    }

    /// Commits a scan into a placement.
    ///
    /// `pinned_height` answers the measured main-axis size of the active
    /// header, queried at most once per call; adapters typically answer from
    /// their bound holder.
    ///
    /// With `scan = None` (sentinel-only or empty viewport) the last
    /// established group stays pinned with no transition; if no group has
    /// ever been established, no header is rendered and `None` is returned.
    pub fn resolve(
        &mut self,
        scan: Option<GroupScan>,
        pinned_height: impl FnOnce(GroupId) -> u32,
    ) -> Option<PlacementState> {
        let pinned_top = self.options.top_inset;
        let Some(scan) = scan else {
            return self.established.map(|active| PlacementState {
                active,
                next: None,
                transition: 0.0,
                pinned_top,
            });
        };

        let height = pinned_height(scan.active);
        let (next, transition) = match scan.boundary {
            Some(boundary) => handoff(boundary, height),
            None => (None, 0.0),
        };

        self.established = Some(scan.active);
        strace!(
            active = scan.active.get(),
            transition = transition as f64,
            "resolve"
        );
        Some(PlacementState {
            active: scan.active,
            next,
            transition,
            pinned_top,
        })
    }

    /// Scan + resolve in one call.
    pub fn place<P, G>(
        &mut self,
        provider: &P,
        geometry: &G,
        pinned_height: impl FnOnce(GroupId) -> u32,
    ) -> Result<Option<PlacementState>, PositionError>
    where
        P: GroupingProvider,
        G: ListGeometry,
    {
        let scan = self.scan(provider, geometry)?;
        Ok(self.resolve(scan, pinned_height))
    }

    /// Calls `f` with `(position, group, top_offset)` for every visible row
    /// that starts a new group, in scroll order. Zero allocation.
    ///
    /// Hosts drawing inline (non-pinned) headers above each group drive their
    /// draw pass from this.
    pub fn for_each_group_start<P, G>(
        &self,
        provider: &P,
        geometry: &G,
        mut f: impl FnMut(RowPosition, GroupId, i64),
    ) -> Result<(), PositionError>
    where
        P: GroupingProvider,
        G: ListGeometry,
    {
        let range = geometry.visible_range();
        if range.is_empty() {
            return Ok(());
        }
        let row_count = provider.row_count();
        if range.end_index > row_count {
            return Err(PositionError {
                position: range.end_index - 1,
                row_count,
            });
        }

        let mut previous: Option<GroupId> = None;
        for position in range.start_index..range.end_index {
            let Some(group) = provider.group_at(position) else {
                continue;
            };
            let is_start = match previous {
                Some(prev) => group != prev,
                // The window's first concrete row needs a look back past the
                // window to tell whether it heads its group.
                None => (0..position).rev().find_map(|p| provider.group_at(p)) != Some(group),
            };
            if is_start {
                f(position, group, geometry.top_offset_of(position));
            }
            previous = Some(group);
        }
        Ok(())
    }
}

/// Hand-off interpolation for a boundary row against the pinned header size.
fn handoff(boundary: GroupBoundary, height: u32) -> (Option<GroupId>, f32) {
    let height = height as i64;
    if height == 0 {
        // Degenerate zero-height header: hand off instantly once the
        // boundary reaches the pinned edge.
        return if boundary.top <= 0 {
            (Some(boundary.group), 1.0)
        } else {
            (None, 0.0)
        };
    }
    if boundary.top > height {
        return (None, 0.0);
    }
    let transition = (1.0 - boundary.top as f32 / height as f32).clamp(0.0, 1.0);
    (Some(boundary.group), transition)
}

/// Whether the row at `position` is the first row of its group.
///
/// Sentinel rows never start a group; when looking back, they are skipped
/// until the previous concrete row is found. Hosts reserving space above
/// group-leading rows for an inline header key their item offsets off this.
pub fn starts_group<P: GroupingProvider>(
    provider: &P,
    position: RowPosition,
) -> Result<bool, PositionError> {
    let row_count = provider.row_count();
    if position >= row_count {
        return Err(PositionError {
            position,
            row_count,
        });
    }
    let Some(group) = provider.group_at(position) else {
        return Ok(false);
    };
    let previous = (0..position).rev().find_map(|p| provider.group_at(p));
    Ok(previous != Some(group))
}

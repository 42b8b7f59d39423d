use sticky_headers::{
    EngineOptions, GroupId, GroupingProvider, HeaderRect, ListGeometry, PlacementEngine,
    PlacementState, PositionError,
};

use crate::{HeaderFactory, HolderCache};

/// Configuration for [`OverlayController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayOptions {
    /// Content-top of the scroll container; where the pinned header sits.
    pub top_inset: i64,
    /// Acquire/release cycles a parked holder may sit out before eviction.
    pub max_idle: u64,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            top_inset: 0,
            max_idle: 8,
        }
    }
}

impl OverlayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_inset(mut self, top_inset: i64) -> Self {
        self.top_inset = top_inset;
        self
    }

    pub fn with_max_idle(mut self, max_idle: u64) -> Self {
        self.max_idle = max_idle;
        self
    }
}

/// The committed result of one overlay update.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayFrame {
    pub placement: PlacementState,
    /// On-screen rectangle of the pinned header; pushed upward out of the
    /// viewport while the next header takes its place.
    pub rect: HeaderRect,
    /// Rectangle of the incoming header during a hand-off. `None` when no
    /// hand-off is in progress or the incoming holder could not be created.
    pub next_rect: Option<HeaderRect>,
}

/// Orchestrates placement, holder pooling and hand-off rendering state for
/// one sticky list instance.
///
/// Drive it by calling [`Self::update`] from every scroll or layout
/// notification, [`Self::notify_data_changed`] whenever the item sequence is
/// mutated, and [`Self::detach`] when the host list is torn down.
///
/// Instantiate one controller per list. The holder pool is owned here and
/// must never be touched from another thread; if grouping lookups happen on
/// a background thread, marshal the results back before updating.
pub struct OverlayController<F: HeaderFactory> {
    engine: PlacementEngine,
    cache: HolderCache<F>,
    options: OverlayOptions,
    frame: Option<OverlayFrame>,
}

impl<F: HeaderFactory> OverlayController<F> {
    pub fn new(options: OverlayOptions, factory: F) -> Self {
        let engine = PlacementEngine::new(EngineOptions::new().with_top_inset(options.top_inset));
        Self {
            engine,
            cache: HolderCache::new(factory),
            options,
            frame: None,
        }
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn cache(&self) -> &HolderCache<F> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut HolderCache<F> {
        &mut self.cache
    }

    /// The frame committed by the last [`Self::update`], if any.
    pub fn frame(&self) -> Option<&OverlayFrame> {
        self.frame.as_ref()
    }

    /// Recomputes the overlay for the host's current scroll/layout state.
    ///
    /// Returns the committed frame, or `Ok(None)` when no header should be
    /// rendered: nothing established yet, or the active header's holder
    /// could not be created (rendering degrades, scrolling continues).
    pub fn update<P, G>(
        &mut self,
        provider: &P,
        geometry: &G,
    ) -> Result<Option<OverlayFrame>, PositionError>
    where
        P: GroupingProvider,
        G: ListGeometry,
    {
        let scan = self.engine.scan(provider, geometry)?;
        strace!(scanned = scan.is_some(), "update");

        let Some(active) = scan.map(|s| s.active).or_else(|| self.engine.established()) else {
            // Nothing has ever been established: a steady state, not an
            // error. No header is rendered.
            self.cache.release_except(&[]);
            self.cache.evict_unused(self.options.max_idle);
            self.frame = None;
            return Ok(None);
        };

        // Park everything except the group that stays pinned, so an outgoing
        // holder can be reused for the incoming header within this frame.
        self.cache.release_except(&[active]);

        if self.cache.acquire(active).is_err() {
            swarn!(
                group = active.get(),
                "could not create header holder; overlay disabled for this group"
            );
            // The placement still commits so the established group survives;
            // its header is simply not rendered.
            self.engine.resolve(scan, |_| 0);
            self.cache.evict_unused(self.options.max_idle);
            self.frame = None;
            return Ok(None);
        }
        if let Some(s) = &scan {
            self.cache.bind(active, s.active_position);
        }
        let height = self.cache.height_of(active).unwrap_or(0);

        let Some(placement) = self.engine.resolve(scan, |_| height) else {
            self.cache.evict_unused(self.options.max_idle);
            self.frame = None;
            return Ok(None);
        };

        let height_px = height as i64;
        let boundary = scan.and_then(|s| s.boundary);
        let push = match (placement.next, boundary) {
            (Some(_), Some(b)) => (height_px - b.top).clamp(0, height_px),
            _ => 0,
        };
        let rect = HeaderRect {
            top: placement.pinned_top - push,
            height,
        };

        let next_rect = match (placement.next, boundary) {
            (Some(next), Some(b)) => {
                if self.cache.acquire(next).is_ok() {
                    self.cache.bind(next, b.position);
                    let next_height = self.cache.height_of(next).unwrap_or(height);
                    Some(HeaderRect {
                        top: rect.top.saturating_add(height_px),
                        height: next_height,
                    })
                } else {
                    swarn!(
                        group = next.get(),
                        "could not create holder for the incoming header"
                    );
                    None
                }
            }
            _ => None,
        };

        self.cache.evict_unused(self.options.max_idle);
        self.frame = Some(OverlayFrame {
            placement,
            rect,
            next_rect,
        });
        Ok(self.frame)
    }

    /// Entry point for host data mutations (insert/remove/move).
    ///
    /// Invalidates the engine and parks every live holder; holders stay in
    /// the pool and are rebound from scratch on the next update.
    pub fn notify_data_changed(&mut self) {
        sdebug!("notify_data_changed");
        self.engine.invalidate();
        self.cache.release_except(&[]);
        self.frame = None;
    }

    /// Tears the overlay down. Every holder, live or parked, is destroyed.
    pub fn detach(&mut self) {
        self.engine.invalidate();
        self.cache.clear();
        self.frame = None;
    }

    /// Rectangle of the pinned header, for hit-testing taps that must route
    /// to the header instead of the row beneath it.
    pub fn current_header_rect(&self) -> Option<HeaderRect> {
        self.frame.as_ref().map(|f| f.rect)
    }

    /// Rectangle of the incoming header while a hand-off is in progress.
    pub fn next_header_rect(&self) -> Option<HeaderRect> {
        self.frame.as_ref().and_then(|f| f.next_rect)
    }

    /// Routes a tap at `offset` (scroll-axis px) to the header it lands on.
    pub fn hit_test(&self, offset: i64) -> Option<GroupId> {
        let frame = self.frame.as_ref()?;
        if frame.rect.contains(offset) {
            return Some(frame.placement.active);
        }
        match (frame.placement.next, frame.next_rect) {
            (Some(next), Some(rect)) if rect.contains(offset) => Some(next),
            _ => None,
        }
    }
}

use crate::*;

use std::vec::Vec;

use sticky_headers::{GroupId, GroupingProvider, HeaderRect, ListGeometry, RowRange};

fn gid(id: i64) -> GroupId {
    GroupId::new(id).unwrap()
}

struct RawSliceProvider<'a>(&'a [i64]);

impl GroupingProvider for RawSliceProvider<'_> {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn group_at(&self, position: usize) -> Option<GroupId> {
        GroupId::from_raw(self.0[position])
    }
}

struct PixelGeometry {
    range: RowRange,
    row_height: i64,
    scroll: i64,
}

impl ListGeometry for PixelGeometry {
    fn visible_range(&self) -> RowRange {
        self.range
    }

    fn top_offset_of(&self, position: usize) -> i64 {
        position as i64 * self.row_height - self.scroll
    }
}

#[derive(Clone, Copy)]
struct UniformGeometry {
    row_height: i64,
    scroll: i64,
    viewport: i64,
    count: usize,
}

impl ListGeometry for UniformGeometry {
    fn visible_range(&self) -> RowRange {
        let start = (self.scroll / self.row_height).max(0) as usize;
        let end_px = self.scroll + self.viewport;
        let end = ((end_px + self.row_height - 1) / self.row_height).max(0) as usize;
        RowRange {
            start_index: start.min(self.count),
            end_index: end.min(self.count),
        }
    }

    fn top_offset_of(&self, position: usize) -> i64 {
        position as i64 * self.row_height - self.scroll
    }
}

#[derive(Default)]
struct TestFactory {
    created: usize,
    binds: usize,
    height: u32,
    per_group_kinds: bool,
    fail: bool,
}

impl TestFactory {
    fn with_height(height: u32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    fn with_kinds() -> Self {
        Self {
            height: 40,
            per_group_kinds: true,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            height: 40,
            fail: true,
            ..Self::default()
        }
    }
}

struct TestHolder {
    id: usize,
    kind: HeaderKind,
    bound: Option<usize>,
}

impl HeaderFactory for TestFactory {
    type Holder = TestHolder;
    type Error = &'static str;

    fn kind_of(&self, group: GroupId) -> HeaderKind {
        if self.per_group_kinds {
            (group.get() % 2) as HeaderKind
        } else {
            0
        }
    }

    fn create(&mut self, kind: HeaderKind) -> Result<TestHolder, &'static str> {
        if self.fail {
            return Err("header inflation failed");
        }
        self.created += 1;
        Ok(TestHolder {
            id: self.created,
            kind,
            bound: None,
        })
    }

    fn bind(&mut self, holder: &mut TestHolder, position: usize) {
        self.binds += 1;
        holder.bound = Some(position);
    }

    fn height_of(&self, _holder: &TestHolder) -> u32 {
        self.height
    }
}

#[test]
fn acquire_is_idempotent_within_a_frame() {
    let mut cache = HolderCache::new(TestFactory::default());
    let first = cache.acquire(gid(1)).unwrap().id;
    let again = cache.acquire(gid(1)).unwrap().id;
    assert_eq!(first, again);
    assert_eq!(cache.factory().created, 1);
    assert_eq!(cache.live_len(), 1);
}

#[test]
fn released_holders_are_reused_not_recreated() {
    let mut cache = HolderCache::new(TestFactory::default());
    let first = cache.acquire(gid(1)).unwrap().id;
    cache.release(gid(1));
    assert_eq!(cache.free_len(), 1);

    let reused = cache.acquire(gid(2)).unwrap().id;
    assert_eq!(reused, first);
    assert_eq!(cache.factory().created, 1);
    assert_eq!(cache.free_len(), 0);
    assert!(!cache.is_live(gid(1)));
    assert!(cache.is_live(gid(2)));
}

#[test]
fn holders_of_different_kinds_are_not_interchangeable() {
    let mut cache = HolderCache::new(TestFactory::with_kinds());
    cache.acquire(gid(2)).unwrap();
    cache.release(gid(2));

    // Group 3 renders with the other kind; the parked holder does not fit.
    let holder = cache.acquire(gid(3)).unwrap();
    assert_eq!(holder.kind, 1);
    assert_eq!(cache.factory().created, 2);
    assert_eq!(cache.free_len(), 1);
}

#[test]
fn idle_holders_are_evicted_after_max_idle_cycles() {
    let mut cache = HolderCache::new(TestFactory::with_kinds());
    cache.acquire(gid(1)).unwrap();
    cache.release(gid(1)); // parked at cycle 2

    // Churn the other kind so the parked holder only sits and idles.
    for _ in 0..4 {
        cache.acquire(gid(0)).unwrap();
        cache.release(gid(0));
    } // cycle 10
    assert_eq!(cache.len(), 2);

    cache.evict_unused(4);
    assert_eq!(cache.len(), 1);

    // The survivor was parked this cycle and stays.
    cache.evict_unused(4);
    assert_eq!(cache.len(), 1);
}

#[test]
fn clear_drops_live_and_parked_holders() {
    let mut cache = HolderCache::new(TestFactory::default());
    cache.acquire(gid(1)).unwrap();
    cache.acquire(gid(2)).unwrap();
    cache.release(gid(1));
    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.holder(gid(2)).is_none());
}

#[test]
fn controller_reports_the_handoff_frame() {
    let provider = RawSliceProvider(&[1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
    let geometry = PixelGeometry {
        range: RowRange {
            start_index: 3,
            end_index: 8,
        },
        row_height: 40,
        scroll: 180,
    };
    let mut controller = OverlayController::new(OverlayOptions::new(), TestFactory::with_height(40));

    let frame = controller.update(&provider, &geometry).unwrap().unwrap();
    assert_eq!(frame.placement.active, gid(1));
    assert_eq!(frame.placement.next, Some(gid(2)));
    assert!((frame.placement.transition - 0.5).abs() < 1e-6);
    // Pushed 20 px out of the viewport; the incoming header abuts it.
    assert_eq!(frame.rect, HeaderRect { top: -20, height: 40 });
    assert_eq!(frame.next_rect, Some(HeaderRect { top: 20, height: 40 }));
    assert_eq!(controller.cache().live_len(), 2);
    assert_eq!(controller.cache().factory().binds, 2);

    assert_eq!(controller.hit_test(-10), Some(gid(1)));
    assert_eq!(controller.hit_test(30), Some(gid(2)));
    assert_eq!(controller.hit_test(100), None);
}

#[test]
fn scroll_sweep_reuses_two_holders_across_many_groups() {
    let raw: Vec<i64> = (0..20).map(|i| i / 5).collect();
    let provider = RawSliceProvider(&raw);
    let mut controller = OverlayController::new(
        OverlayOptions::new().with_max_idle(64),
        TestFactory::with_height(40),
    );

    for scroll in (0..=640).step_by(8) {
        let geometry = UniformGeometry {
            row_height: 40,
            scroll: scroll as i64,
            viewport: 120,
            count: raw.len(),
        };
        let frame = controller.update(&provider, &geometry).unwrap();
        assert!(frame.is_some());
        assert!(controller.cache().live_len() <= 2);
    }

    // Four groups crossed the viewport on two holders.
    assert_eq!(controller.cache().factory().created, 2);
}

#[test]
fn factory_failure_degrades_rendering_but_keeps_scrolling() {
    let provider = RawSliceProvider(&[1, 1, 2, 2]);
    let geometry = PixelGeometry {
        range: RowRange {
            start_index: 0,
            end_index: 4,
        },
        row_height: 40,
        scroll: 0,
    };
    let mut controller = OverlayController::new(OverlayOptions::new(), TestFactory::failing());

    assert_eq!(controller.update(&provider, &geometry).unwrap(), None);
    assert_eq!(controller.engine().established(), Some(gid(1)));
    assert_eq!(controller.current_header_rect(), None);

    // The next update after the factory recovers renders normally.
    controller.cache_mut().factory_mut().fail = false;
    assert!(controller.update(&provider, &geometry).unwrap().is_some());
}

#[test]
fn data_change_rebinds_from_scratch() {
    let before = RawSliceProvider(&[1, 1, 1, 1, 2, 2]);
    let geometry = PixelGeometry {
        range: RowRange {
            start_index: 0,
            end_index: 4,
        },
        row_height: 40,
        scroll: 0,
    };
    let mut controller = OverlayController::new(OverlayOptions::new(), TestFactory::with_height(40));
    controller.update(&before, &geometry).unwrap();
    assert_eq!(controller.cache().holder(gid(1)).unwrap().bound, Some(0));

    // Rows 0..4 removed: group 1 is gone entirely.
    controller.notify_data_changed();
    assert_eq!(controller.frame(), None);
    assert_eq!(controller.cache().live_len(), 0);

    let after = RawSliceProvider(&[2, 2]);
    let shrunk = PixelGeometry {
        range: RowRange {
            start_index: 0,
            end_index: 2,
        },
        row_height: 40,
        scroll: 0,
    };
    let frame = controller.update(&after, &shrunk).unwrap().unwrap();
    assert_eq!(frame.placement.active, gid(2));
    assert!(!controller.cache().is_live(gid(1)));
    assert_eq!(controller.cache().holder(gid(2)).unwrap().bound, Some(0));
}

#[test]
fn sentinel_only_viewport_keeps_the_pinned_header() {
    let provider = RawSliceProvider(&[1, 1, -1, -1]);
    let establishing = PixelGeometry {
        range: RowRange {
            start_index: 0,
            end_index: 2,
        },
        row_height: 40,
        scroll: 0,
    };
    let mut controller = OverlayController::new(OverlayOptions::new(), TestFactory::with_height(40));
    controller.update(&provider, &establishing).unwrap();

    let footer_only = PixelGeometry {
        range: RowRange {
            start_index: 2,
            end_index: 4,
        },
        row_height: 40,
        scroll: 80,
    };
    let frame = controller.update(&provider, &footer_only).unwrap().unwrap();
    assert_eq!(frame.placement.active, gid(1));
    assert_eq!(frame.placement.transition, 0.0);
    assert_eq!(frame.rect, HeaderRect { top: 0, height: 40 });
}

#[test]
fn nothing_renders_before_a_group_is_established() {
    let provider = RawSliceProvider(&[-1, -1]);
    let geometry = PixelGeometry {
        range: RowRange {
            start_index: 0,
            end_index: 2,
        },
        row_height: 40,
        scroll: 0,
    };
    let mut controller = OverlayController::new(OverlayOptions::new(), TestFactory::with_height(40));
    assert_eq!(controller.update(&provider, &geometry).unwrap(), None);
    assert_eq!(controller.cache().live_len(), 0);
    assert_eq!(controller.hit_test(0), None);
}

#[test]
fn detach_destroys_every_holder() {
    let provider = RawSliceProvider(&[1, 1, 2, 2]);
    let geometry = PixelGeometry {
        range: RowRange {
            start_index: 0,
            end_index: 4,
        },
        row_height: 40,
        scroll: 60,
    };
    let mut controller = OverlayController::new(OverlayOptions::new(), TestFactory::with_height(40));
    controller.update(&provider, &geometry).unwrap();
    assert!(!controller.cache().is_empty());

    controller.detach();
    assert!(controller.cache().is_empty());
    assert_eq!(controller.frame(), None);
    assert_eq!(controller.engine().established(), None);
}

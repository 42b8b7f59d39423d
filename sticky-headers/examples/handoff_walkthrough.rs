// Example: watching the pinned header hand off to the next group while
// scrolling a contacts-style list.
use sticky_headers::{
    EngineOptions, GroupId, GroupingProvider, ListGeometry, PlacementEngine, RowRange,
};

/// Four sections of ten rows each, plus a footer row that never carries a
/// header (the negative wire sentinel).
struct Sections(Vec<i64>);

impl GroupingProvider for Sections {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn group_at(&self, position: usize) -> Option<GroupId> {
        GroupId::from_raw(self.0[position])
    }
}

/// Uniform 16 px rows scrolled `scroll` px into the content.
struct Rows {
    scroll: i64,
    viewport: i64,
    count: usize,
}

const ROW_PX: i64 = 16;

impl ListGeometry for Rows {
    fn visible_range(&self) -> RowRange {
        let start = (self.scroll / ROW_PX).max(0) as usize;
        let end = ((self.scroll + self.viewport + ROW_PX - 1) / ROW_PX) as usize;
        RowRange {
            start_index: start.min(self.count),
            end_index: end.min(self.count),
        }
    }

    fn top_offset_of(&self, position: usize) -> i64 {
        position as i64 * ROW_PX - self.scroll
    }
}

fn main() {
    let mut raw: Vec<i64> = Vec::new();
    for section in 0..4 {
        for _ in 0..10 {
            raw.push(section);
        }
    }
    raw.push(-1); // footer
    let provider = Sections(raw);

    let mut engine = PlacementEngine::new(EngineOptions::new());
    let header_px = 24u32;

    for scroll in (0..=420i64).step_by(12) {
        let rows = Rows {
            scroll,
            viewport: 96,
            count: provider.row_count(),
        };
        let Some(state) = engine.place(&provider, &rows, |_| header_px).unwrap() else {
            println!("scroll={scroll:>3} (no header)");
            continue;
        };
        match state.next {
            Some(next) => println!(
                "scroll={scroll:>3} pinned=Section {} incoming=Section {} transition={:.2}",
                state.active.get(),
                next.get(),
                state.transition
            ),
            None => println!("scroll={scroll:>3} pinned=Section {}", state.active.get()),
        }
    }
}

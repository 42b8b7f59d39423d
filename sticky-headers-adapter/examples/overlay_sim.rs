// Example: driving an OverlayController with a toy label "UI".
use std::convert::Infallible;

use sticky_headers::{GroupId, GroupingProvider, ListGeometry, RowRange};
use sticky_headers_adapter::{HeaderFactory, HeaderKind, OverlayController, OverlayOptions};

const ROW_PX: i64 = 20;
const ROWS_PER_SECTION: usize = 8;

struct BySection {
    count: usize,
}

impl GroupingProvider for BySection {
    fn row_count(&self) -> usize {
        self.count
    }

    fn group_at(&self, position: usize) -> Option<GroupId> {
        GroupId::new((position / ROWS_PER_SECTION) as i64)
    }
}

struct Rows {
    scroll: i64,
    viewport: i64,
    count: usize,
}

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

/// A "view inflater" that renders headers as owned strings.
struct LabelFactory;

struct LabelHolder {
    text: String,
}

impl HeaderFactory for LabelFactory {
    type Holder = LabelHolder;
    type Error = Infallible;

    fn create(&mut self, _kind: HeaderKind) -> Result<LabelHolder, Infallible> {
        Ok(LabelHolder {
            text: String::new(),
        })
    }

    fn bind(&mut self, holder: &mut LabelHolder, position: usize) {
        holder.text = format!("Section {}", position / ROWS_PER_SECTION);
    }

    fn height_of(&self, _holder: &LabelHolder) -> u32 {
        24
    }
}

fn main() {
    let provider = BySection { count: 64 };
    let mut overlay = OverlayController::new(OverlayOptions::new(), LabelFactory);

    for scroll in (0..=480i64).step_by(20) {
        let rows = Rows {
            scroll,
            viewport: 120,
            count: provider.row_count(),
        };
        let Some(frame) = overlay.update(&provider, &rows).unwrap() else {
            continue;
        };
        let rect = frame.rect;
        let label = overlay
            .cache()
            .holder(frame.placement.active)
            .map(|h| h.text.as_str())
            .unwrap_or("?");
        println!(
            "scroll={scroll:>3} [{label}] top={} transition={:.2}",
            rect.top, frame.placement.transition
        );
    }

    overlay.detach();
}

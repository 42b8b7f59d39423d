use alloc::vec::Vec;

use sticky_headers::{GroupId, RowPosition};

use crate::key::{Entry, GroupMap};
use crate::{HeaderFactory, HeaderKind};

struct LiveEntry<H> {
    kind: HeaderKind,
    holder: H,
}

struct FreeEntry<H> {
    kind: HeaderKind,
    holder: H,
    /// Acquire/release cycle at which the holder was parked.
    released_at: u64,
}

/// A create-once, bind-many pool of header holders keyed by group.
///
/// At most one live holder exists per group, and `acquire` is idempotent
/// within a frame: repeated calls hand back the same holder instance.
/// Released holders park in a free pool per [`HeaderKind`] and are destroyed
/// only once they have sat out more than a caller-chosen number of
/// acquire/release cycles, bounding memory when group cardinality is large.
///
/// The cache owns its factory and is owned by exactly one overlay; it is
/// never shared across lists or threads.
pub struct HolderCache<F: HeaderFactory> {
    factory: F,
    live: GroupMap<LiveEntry<F::Holder>>,
    free: Vec<FreeEntry<F::Holder>>,
    cycle: u64,
}

impl<F: HeaderFactory> HolderCache<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            live: GroupMap::new(),
            free: Vec::new(),
            cycle: 0,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Number of live (acquired) holders.
    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    /// Number of parked holders awaiting reuse.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total holders alive, live plus parked.
    pub fn len(&self) -> usize {
        self.live.len() + self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.free.is_empty()
    }

    pub fn is_live(&self, group: GroupId) -> bool {
        self.live.contains_key(&group)
    }

    /// Returns the live holder for `group`, acquiring one if needed.
    ///
    /// Reuses a parked holder of the matching kind when one exists (its
    /// previous binding is simply overwritten by the next [`Self::bind`]);
    /// otherwise the factory creates a new holder.
    pub fn acquire(&mut self, group: GroupId) -> Result<&mut F::Holder, F::Error> {
        self.cycle = self.cycle.wrapping_add(1);
        let kind = self.factory.kind_of(group);
        let entry = match self.live.entry(group) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let parked = self.free.iter().position(|f| f.kind == kind);
                let holder = match parked {
                    Some(at) => self.free.swap_remove(at).holder,
                    None => {
                        sdebug!(group = group.get(), kind, "creating header holder");
                        self.factory.create(kind)?
                    }
                };
                entry.insert(LiveEntry { kind, holder })
            }
        };
        Ok(&mut entry.holder)
    }

    /// Parks the holder for `group` for reuse; it is not destroyed.
    ///
    /// No-op when the group has no live holder.
    pub fn release(&mut self, group: GroupId) {
        self.cycle = self.cycle.wrapping_add(1);
        if let Some(entry) = self.live.remove(&group) {
            self.free.push(FreeEntry {
                kind: entry.kind,
                holder: entry.holder,
                released_at: self.cycle,
            });
        }
    }

    /// Parks every live holder whose group is not in `keep`.
    pub fn release_except(&mut self, keep: &[GroupId]) {
        let parked: Vec<GroupId> = self
            .live
            .keys()
            .copied()
            .filter(|group| !keep.contains(group))
            .collect();
        for group in parked {
            self.release(group);
        }
    }

    /// Destroys parked holders that have sat out more than `max_idle`
    /// acquire/release cycles.
    pub fn evict_unused(&mut self, max_idle: u64) {
        let cycle = self.cycle;
        self.free
            .retain(|entry| cycle.wrapping_sub(entry.released_at) <= max_idle);
    }

    /// Binds the live holder for `group` to `position`.
    ///
    /// No-op when the group has no live holder.
    pub fn bind(&mut self, group: GroupId, position: RowPosition) {
        if let Some(entry) = self.live.get_mut(&group) {
            self.factory.bind(&mut entry.holder, position);
        }
    }

    /// Measured size of the live holder for `group`, px.
    pub fn height_of(&self, group: GroupId) -> Option<u32> {
        self.live
            .get(&group)
            .map(|entry| self.factory.height_of(&entry.holder))
    }

    pub fn holder(&self, group: GroupId) -> Option<&F::Holder> {
        self.live.get(&group).map(|entry| &entry.holder)
    }

    pub fn holder_mut(&mut self, group: GroupId) -> Option<&mut F::Holder> {
        self.live.get_mut(&group).map(|entry| &mut entry.holder)
    }

    /// Drops every holder, live and parked.
    pub fn clear(&mut self) {
        self.live.clear();
        self.free.clear();
    }
}

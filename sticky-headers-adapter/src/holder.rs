use sticky_headers::{GroupId, RowPosition};

/// Structural kind of a header.
///
/// Holders of one kind are interchangeable rendering objects that differ
/// only by bound data; the pool reuses them across groups of the same kind.
pub type HeaderKind = u32;

/// The capability a host supplies for creating, binding and measuring header
/// holders.
///
/// A holder is an opaque rendering object: an inflated view, a retained
/// widget subtree, a pre-laid-out text block. [`crate::HolderCache`] creates
/// one lazily per kind in flight, rebinds it as the pinned group changes, and
/// destroys it only after it has sat idle past the eviction horizon or the
/// overlay is torn down.
pub trait HeaderFactory {
    type Holder;
    /// Creation failure. Fatal for the affected group's header only; the
    /// overlay keeps running without it.
    type Error;

    /// The kind of header `group` renders with. Hosts with a single header
    /// layout keep the default.
    fn kind_of(&self, group: GroupId) -> HeaderKind {
        let _ = group;
        0
    }

    fn create(&mut self, kind: HeaderKind) -> Result<Self::Holder, Self::Error>;

    /// Binds `holder` to the data at `position`.
    ///
    /// Called on every frame the holder participates in, so a previous
    /// binding is simply overwritten; holders never carry stale data across
    /// data-set mutations.
    fn bind(&mut self, holder: &mut Self::Holder, position: RowPosition);

    /// Measured size of a bound holder in the scroll axis, px.
    fn height_of(&self, holder: &Self::Holder) -> u32;
}

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use sticky_headers::GroupId;

#[cfg(feature = "std")]
pub(crate) type GroupMap<V> = HashMap<GroupId, V>;
#[cfg(not(feature = "std"))]
pub(crate) type GroupMap<V> = BTreeMap<GroupId, V>;

#[cfg(feature = "std")]
pub(crate) use std::collections::hash_map::Entry;

#[cfg(not(feature = "std"))]
pub(crate) use alloc::collections::btree_map::Entry;

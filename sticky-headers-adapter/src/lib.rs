//! Adapter utilities for the `sticky-headers` crate.
//!
//! The `sticky-headers` crate is UI-agnostic and focuses on placement math.
//! This crate provides the holder half of a sticky overlay:
//!
//! - [`HeaderFactory`]: the capability a host supplies for creating, binding
//!   and measuring header holders
//! - [`HolderCache`]: create-once, bind-many pooling of holders so no scroll
//!   frame ever allocates a new rendering object
//! - [`OverlayController`]: per-event orchestration of scan, binding and the
//!   pixel hand-off between the pinned and the incoming header
//!
//! This crate is intentionally framework-neutral (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod controller;
mod holder;
mod key;

#[cfg(test)]
mod tests;

pub use cache::HolderCache;
pub use controller::{OverlayController, OverlayFrame, OverlayOptions};
pub use holder::{HeaderFactory, HeaderKind};

//! A headless sticky-header placement engine for virtualized lists.
//!
//! For holder pooling and per-frame overlay orchestration, see the
//! `sticky-headers-adapter` crate.
//!
//! This crate focuses on the core decision a sticky overlay has to make on
//! every scroll frame: which header group is pinned right now, which group is
//! about to take its place, and how far along the pixel hand-off between the
//! two is.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the visible row window and per-row top offsets ([`ListGeometry`])
//! - the mapping from rows to header groups ([`GroupingProvider`])
//! - the measured size of the pinned header
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod error;
mod provider;
mod types;


pub use engine::{EngineOptions, PlacementEngine, starts_group};
pub use error::PositionError;
pub use provider::{GroupingProvider, ListGeometry};
pub use types::{
    GroupBoundary, GroupId, GroupScan, HeaderRect, PlacementState, RowPosition, RowRange,
};

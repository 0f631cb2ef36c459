//! Domain logic and core data structures
//!
//! This module contains pure types and state machines that are independent
//! of any device, rendering technology or network service.

pub mod core;
pub mod map_selection;
pub mod permission;
pub mod place;

pub use self::core::{Coordinate, MapRegion};
pub use map_selection::{MapSelection, MapSelectionError, MapSelectionState};
pub use permission::{Capability, PermissionState};
pub use place::{PhotoRef, Place, PlaceId};

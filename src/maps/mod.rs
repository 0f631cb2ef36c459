//! Remote map services
//!
//! Static preview image links and reverse geocoding. Both take their API key
//! and endpoints from an injected `MapsConfig`.

pub mod geocode;
pub mod static_map;

pub use geocode::{AddressLookup, LookupError, address_from_response};
pub use static_map::StaticMapUrlBuilder;

//! Core geographic types
//!
//! Plain values shared by every layer. Nothing here talks to a device
//! or the network.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on Earth in decimal degrees
///
/// Produced by a GPS fix or a map tap, consumed by the static map builder,
/// the address lookup and the `Place` record. Never mutated once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the `lat,lon` pair used by the map web services
    pub fn to_query_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Returns true if both components are finite and within WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Visible area of the interactive map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Region the map opens on when no location has been picked
    pub const DEFAULT: MapRegion = MapRegion {
        center: Coordinate {
            latitude: 37.78,
            longitude: -122.43,
        },
        latitude_delta: 0.0922,
        longitude_delta: 0.0421,
    };

    /// Returns true if the coordinate lies inside the visible span
    pub fn contains(&self, point: &Coordinate) -> bool {
        let half_lat = self.latitude_delta / 2.0;
        let half_lon = self.longitude_delta / 2.0;
        (point.latitude - self.center.latitude).abs() <= half_lat
            && (point.longitude - self.center.longitude).abs() <= half_lon
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pair_keeps_sign_and_precision() {
        let coord = Coordinate::new(37.78, -122.43);
        assert_eq!(coord.to_query_pair(), "37.78,-122.43");
    }

    #[test]
    fn coordinate_bounds() {
        assert!(Coordinate::new(10.0, 20.0).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn default_region_contains_its_center() {
        let region = MapRegion::default();
        assert!(region.contains(&region.center));
        assert!(region.contains(&Coordinate::new(37.8, -122.42)));
        assert!(!region.contains(&Coordinate::new(10.0, 20.0)));
    }
}

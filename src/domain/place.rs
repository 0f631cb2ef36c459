//! Place records created by the add-place form

use crate::domain::core::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One-time identifier minted when a place is created
///
/// The place list uses it to recognise re-deliveries of the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceId(Uuid);

impl PlaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque handle to a captured photo (the asset URI reported by the camera)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user-created place
///
/// Photo and location are optional: the form only checks presence, it does
/// not require every field to be filled before submitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    id: PlaceId,
    pub title: String,
    pub photo: Option<PhotoRef>,
    pub location: Option<Coordinate>,
}

impl Place {
    /// Creates a place with a freshly minted identifier
    pub fn new(
        title: impl Into<String>,
        photo: Option<PhotoRef>,
        location: Option<Coordinate>,
    ) -> Self {
        Self {
            id: PlaceId::new(),
            title: title.into(),
            photo,
            location,
        }
    }

    pub fn id(&self) -> PlaceId {
        self.id
    }

    /// Returns true if title, photo and location are all present
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && self.photo.is_some() && self.location.is_some()
    }
}

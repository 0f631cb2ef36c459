//! Add-place form: title, photo and location gathered into one `Place`

use crate::app::image_picker::ImagePicker;
use crate::app::location_picker::LocationPicker;
use crate::domain::Place;
use crate::platform::{Camera, LocationProvider, Notifier, PermissionService};
use tracing::{info, warn};

pub struct PlaceForm<S, N, C, L> {
    title: String,
    image: ImagePicker<S, N, C>,
    location: LocationPicker<S, N, L>,
}

impl<S, N, C, L> PlaceForm<S, N, C, L>
where
    S: PermissionService,
    N: Notifier,
    C: Camera,
    L: LocationProvider,
{
    pub fn new(image: ImagePicker<S, N, C>, location: LocationPicker<S, N, L>) -> Self {
        Self {
            title: String::new(),
            image,
            location,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &ImagePicker<S, N, C> {
        &self.image
    }

    pub fn location(&self) -> &LocationPicker<S, N, L> {
        &self.location
    }

    /// Builds a place from whatever the fields currently hold
    ///
    /// Photo and location may be absent; only their presence is recorded.
    pub fn submit(&self) -> Place {
        let place = Place::new(
            self.title.trim(),
            self.image.selection(),
            self.location.selection(),
        );
        if !place.is_complete() {
            warn!(id = %place.id(), "place created with missing fields");
        }
        info!(id = %place.id(), title = %place.title, "place created");
        place
    }

    /// Empties every field
    pub fn reset(&mut self) {
        self.title.clear();
        self.image.clear();
        self.location.clear();
    }
}

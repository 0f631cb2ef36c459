//! Permission-gated location acquisition
//!
//! The current location comes either from a GPS fix ("Locate User") or from
//! a point picked on the map screen and delivered back through navigation.

use crate::app::picker::{CAPTURE_IN_PROGRESS_TITLE, CaptureError, Preview, SelectionSlot};
use crate::domain::{Capability, Coordinate};
use crate::maps::StaticMapUrlBuilder;
use crate::platform::{LocationProvider, Notifier, PermissionGate, PermissionService};
use std::rc::Rc;
use tracing::{info, warn};

pub const NO_LOCATION_TEXT: &str = "No location picked yet.";

/// What the location preview box shows
#[derive(Debug, Clone, PartialEq)]
pub enum LocationPreview {
    Text(&'static str),
    MapImage(String),
}

pub struct LocationPicker<S, N, L> {
    gate: Rc<PermissionGate<S, N>>,
    locator: L,
    slot: SelectionSlot<Coordinate>,
}

impl<S, N, L> LocationPicker<S, N, L>
where
    S: PermissionService,
    N: Notifier,
    L: LocationProvider,
{
    pub fn new(gate: Rc<PermissionGate<S, N>>, locator: L) -> Self {
        Self {
            gate,
            locator,
            slot: SelectionSlot::new(Capability::Location),
        }
    }

    /// Reads the device position and makes it the current selection
    pub async fn locate_user(&self) -> Result<Coordinate, CaptureError> {
        let _in_flight = self.slot.begin().inspect_err(|_| {
            warn!("location fix already in progress, ignoring");
            self.gate
                .notifier()
                .alert(CAPTURE_IN_PROGRESS_TITLE, "Your location is already being determined.");
        })?;

        if !self.gate.verify(Capability::Location).await {
            return Err(CaptureError::PermissionRefused(Capability::Location));
        }

        let coordinate = match self.locator.current_position().await {
            Ok(coordinate) => coordinate,
            Err(source) => {
                warn!(error = %source, "location fix failed");
                self.gate
                    .notifier()
                    .alert("Location unavailable", "Your location could not be determined.");
                return Err(CaptureError::CaptureFailed {
                    capability: Capability::Location,
                    source,
                });
            }
        };

        info!(%coordinate, "located user");
        self.slot.store(coordinate);
        Ok(coordinate)
    }

    /// Accepts a coordinate picked on the map screen
    ///
    /// No permission is involved: the user chose the point by hand.
    pub fn accept_picked_location(&self, coordinate: Coordinate) {
        info!(%coordinate, "location picked on map");
        self.slot.store(coordinate);
    }

    pub fn selection(&self) -> Option<Coordinate> {
        self.slot.selection()
    }

    pub fn preview(&self) -> Preview<Coordinate> {
        self.slot.preview()
    }

    /// Placeholder text, or the static map image of the current selection
    pub fn preview_with(&self, maps: &StaticMapUrlBuilder) -> LocationPreview {
        match self.slot.selection() {
            Some(coordinate) => LocationPreview::MapImage(maps.preview_url(&coordinate)),
            None => LocationPreview::Text(NO_LOCATION_TEXT),
        }
    }

    pub fn slot(&self) -> &SelectionSlot<Coordinate> {
        &self.slot
    }

    pub fn clear(&self) {
        self.slot.clear();
    }
}

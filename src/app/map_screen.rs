//! Interactive map screen: tap to place a marker, confirm to hand it back

use crate::app::observer::{Observers, SubscriptionId};
use crate::domain::{Coordinate, MapRegion, MapSelection, MapSelectionError};
use crate::platform::Notifier;
use tracing::{debug, info, warn};

pub const MARKER_TITLE: &str = "Add this location";
pub const NO_LOCATION_TITLE: &str = "No location picked";
pub const NO_LOCATION_MESSAGE: &str = "Pick a location first";

/// Marker drawn at the pending coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub title: &'static str,
    pub coordinate: Coordinate,
}

pub struct MapScreen<N> {
    region: MapRegion,
    selection: MapSelection,
    notifier: N,
    observers: Observers<Option<Marker>>,
}

impl<N: Notifier> MapScreen<N> {
    pub fn new(region: MapRegion, notifier: N) -> Self {
        Self {
            region,
            selection: MapSelection::new(),
            notifier,
            observers: Observers::new(),
        }
    }

    pub fn region(&self) -> MapRegion {
        self.region
    }

    pub fn selection(&self) -> &MapSelection {
        &self.selection
    }

    /// Handles a tap on the map
    ///
    /// A tap that is not a valid position is refused and the marker stays
    /// where it was.
    pub fn tap(&mut self, coordinate: Coordinate) -> Result<(), MapSelectionError> {
        self.selection.tap(coordinate).inspect_err(|err| {
            warn!(error = %err, "map tap ignored");
        })?;
        debug!(
            %coordinate,
            in_initial_region = self.region.contains(&coordinate),
            "map tapped"
        );
        self.observers.notify(&self.marker());
        Ok(())
    }

    pub fn marker(&self) -> Option<Marker> {
        self.selection.pending().map(|coordinate| Marker {
            title: MARKER_TITLE,
            coordinate,
        })
    }

    /// Confirms the pending coordinate
    ///
    /// Refuses with an alert when nothing was tapped.
    pub fn confirm(&self) -> Result<Coordinate, MapSelectionError> {
        match self.selection.confirm() {
            Ok(coordinate) => {
                info!(%coordinate, "map location confirmed");
                Ok(coordinate)
            }
            Err(err) => {
                self.notifier.alert(NO_LOCATION_TITLE, NO_LOCATION_MESSAGE);
                Err(err)
            }
        }
    }

    /// Starts over with nothing picked, as when the screen is opened again
    pub fn reset(&mut self) {
        let had_marker = !self.selection.is_empty();
        self.selection.reset();
        if had_marker {
            self.observers.notify(&None);
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Option<Marker>) + 'static,
    {
        self.observers.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedDevice;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn tap_places_marker_and_confirm_returns_it() {
        let device = Rc::new(SimulatedDevice::new());
        let mut screen = MapScreen::new(MapRegion::DEFAULT, Rc::clone(&device));

        screen.tap(Coordinate::new(10.0, 20.0)).unwrap();

        assert_eq!(
            screen.marker(),
            Some(Marker {
                title: MARKER_TITLE,
                coordinate: Coordinate::new(10.0, 20.0),
            })
        );
        assert_eq!(screen.confirm(), Ok(Coordinate::new(10.0, 20.0)));
        assert!(device.alerts().is_empty());
    }

    #[test]
    fn confirm_without_tap_alerts() {
        let device = Rc::new(SimulatedDevice::new());
        let screen = MapScreen::new(MapRegion::DEFAULT, Rc::clone(&device));

        assert_eq!(screen.confirm(), Err(MapSelectionError::NoLocationPicked));

        let alerts = device.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, NO_LOCATION_TITLE);
        assert_eq!(alerts[0].message, NO_LOCATION_MESSAGE);
    }

    #[test]
    fn observers_follow_marker() {
        let device = Rc::new(SimulatedDevice::new());
        let mut screen = MapScreen::new(MapRegion::DEFAULT, device);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        screen.subscribe(move |marker| sink.borrow_mut().push(marker.map(|m| m.coordinate)));

        screen.tap(Coordinate::new(1.0, 2.0)).unwrap();
        screen.reset();
        screen.reset();

        assert_eq!(*seen.borrow(), vec![Some(Coordinate::new(1.0, 2.0)), None]);
        assert_eq!(screen.region(), MapRegion::DEFAULT);
    }

    #[test]
    fn invalid_tap_leaves_marker_and_observers_alone() {
        let device = Rc::new(SimulatedDevice::new());
        let mut screen = MapScreen::new(MapRegion::DEFAULT, Rc::clone(&device));
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);
        screen.subscribe(move |_| *counter.borrow_mut() += 1);

        let result = screen.tap(Coordinate::new(f64::NAN, f64::NAN));

        assert!(matches!(result, Err(MapSelectionError::InvalidCoordinate(_))));
        assert!(screen.marker().is_none());
        assert_eq!(*notified.borrow(), 0);
        assert_eq!(screen.confirm(), Err(MapSelectionError::NoLocationPicked));
    }
}

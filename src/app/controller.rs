//! Application controller and coordination layer
//!
//! The controller owns every screen, routes navigation messages between
//! them and turns user intents (tap, take image, add place) into calls on
//! the right state holder.

use crate::app::form::PlaceForm;
use crate::app::image_picker::ImagePicker;
use crate::app::location_picker::{LocationPicker, LocationPreview};
use crate::app::map_screen::MapScreen;
use crate::app::picker::CaptureError;
use crate::app::place_list::PlaceList;
use crate::app::state::{AppState, NavigationQueue, Route, Screen, StateEvent, StateMachine};
use crate::config::{CaptureOptions, ConfigError, MapsConfig};
use crate::domain::{Coordinate, MapSelectionError, PhotoRef, Place};
use crate::maps::StaticMapUrlBuilder;
use crate::platform::{Camera, LocationProvider, Notifier, PermissionGate, PermissionService};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Everything a device has to offer the place flow
pub trait Device: PermissionService + Camera + LocationProvider + Notifier {}

impl<T> Device for T where T: PermissionService + Camera + LocationProvider + Notifier {}

pub type SharedForm<D> = PlaceForm<Rc<D>, Rc<D>, Rc<D>, Rc<D>>;

/// Main application controller
pub struct PlaceFlowController<D> {
    state: AppState,
    navigator: NavigationQueue,
    form: SharedForm<D>,
    map: MapScreen<Rc<D>>,
    list: PlaceList,
    maps: StaticMapUrlBuilder,
}

impl<D: Device> PlaceFlowController<D> {
    /// Creates a controller on top of a device
    ///
    /// # Returns
    /// The controller focused on the place list, or ConfigError if the
    /// injected configuration is invalid
    pub fn new(
        device: Rc<D>,
        maps_config: MapsConfig,
        capture_options: CaptureOptions,
    ) -> Result<Self, ConfigError> {
        maps_config.validate()?;
        capture_options.validate()?;

        let gate = Rc::new(PermissionGate::new(Rc::clone(&device), Rc::clone(&device)));
        let form = PlaceForm::new(
            ImagePicker::new(Rc::clone(&gate), Rc::clone(&device), capture_options),
            LocationPicker::new(gate, Rc::clone(&device)),
        );
        let map = MapScreen::new(maps_config.initial_region, device);
        let maps = StaticMapUrlBuilder::new(maps_config)?;

        Ok(Self {
            state: AppState::default(),
            navigator: NavigationQueue::new(),
            form,
            map,
            list: PlaceList::new(),
            maps,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn focused(&self) -> Screen {
        self.state.focused
    }

    pub fn form(&self) -> &SharedForm<D> {
        &self.form
    }

    pub fn map(&self) -> &MapScreen<Rc<D>> {
        &self.map
    }

    pub fn places(&self) -> &PlaceList {
        &self.list
    }

    pub fn pending_navigation(&self) -> usize {
        self.navigator.len()
    }

    /// "+" on the list screen
    pub fn open_add_place(&mut self) {
        self.navigator.navigate(Route::AddPlace {
            picked_location: None,
        });
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.set_title(title);
    }

    /// "Take Image" on the form
    pub async fn take_image(&self) -> Result<PhotoRef, CaptureError> {
        self.form.image().take_image().await
    }

    /// "Locate User" on the form
    pub async fn locate_user(&self) -> Result<Coordinate, CaptureError> {
        self.form.location().locate_user().await
    }

    /// "Pick on Map" on the form
    pub fn pick_on_map(&mut self) {
        self.navigator.navigate(Route::Map);
    }

    /// Tap on the map screen
    pub fn tap_map(&mut self, coordinate: Coordinate) -> Result<(), MapSelectionError> {
        self.map.tap(coordinate)
    }

    /// "Save" on the map screen
    ///
    /// Navigates back to the form only when a location was tapped.
    pub fn save_map_location(&mut self) -> Result<Coordinate, MapSelectionError> {
        let coordinate = self.map.confirm()?;
        self.navigator.navigate(Route::AddPlace {
            picked_location: Some(coordinate),
        });
        Ok(coordinate)
    }

    /// "Add Place" on the form
    pub fn add_place(&mut self) -> Place {
        let place = self.form.submit();
        self.form.reset();
        self.navigator.navigate(Route::AllPlaces {
            place: Some(place.clone()),
        });
        place
    }

    /// Preview box of the form's location picker
    pub fn location_preview(&self) -> LocationPreview {
        self.form.location().preview_with(&self.maps)
    }

    /// A screen regains focus without a new route (back navigation)
    pub fn focus(&mut self, screen: Screen) {
        self.apply(StateEvent::Focus(screen));
    }

    /// Delivers queued routes, in order, each exactly once
    ///
    /// # Returns
    /// Number of routes delivered
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(route) = self.navigator.next() {
            if route == Route::Map {
                self.map.reset();
            }
            self.apply(StateEvent::Navigate(route));
            delivered += 1;
        }
        delivered
    }

    fn apply(&mut self, event: StateEvent) {
        let current = std::mem::take(&mut self.state);
        self.state = StateMachine::process_event(current, event);
        debug!(screen = ?self.state.focused, "screen focused");
        self.on_focus();
    }

    fn on_focus(&mut self) {
        match self.state.focused {
            Screen::AllPlaces => {
                if let Some(place) = self.state.all_places_params.clone() {
                    self.list.deliver(place);
                }
            }
            Screen::AddPlace => {
                // Consumed once so a later GPS fix is not overwritten on refocus
                if let Some(picked) = self.state.add_place_params.take() {
                    self.form.location().accept_picked_location(picked);
                }
            }
            Screen::Map => {
                info!(region = ?self.map.region(), "map opened");
            }
        }
    }
}

/// Logs a capture error the way the UI layer would swallow it
pub fn report_capture_error(err: &CaptureError) {
    match err {
        CaptureError::Busy(_) => debug!(error = %err, "capture ignored"),
        _ => warn!(error = %err, "capture aborted"),
    }
}

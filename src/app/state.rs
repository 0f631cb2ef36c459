//! Navigation state management
//!
//! Defines which screen is focused and the route parameters each screen was
//! last opened with. Parameters stay attached to their screen, as in a stack
//! navigator, so focusing a screen again re-delivers them.

use crate::domain::{Coordinate, Place};
use std::collections::VecDeque;
use tracing::debug;

/// Screens of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// List of created places
    #[default]
    AllPlaces,
    /// Form for a new place
    AddPlace,
    /// Interactive map for picking a location
    Map,
}

/// A screen transition with its typed payload
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    AllPlaces { place: Option<Place> },
    AddPlace { picked_location: Option<Coordinate> },
    Map,
}

impl Route {
    pub fn screen(&self) -> Screen {
        match self {
            Route::AllPlaces { .. } => Screen::AllPlaces,
            Route::AddPlace { .. } => Screen::AddPlace,
            Route::Map => Screen::Map,
        }
    }
}

/// Outbox of pending transitions
///
/// Each route is handed out exactly once by `next`.
#[derive(Debug, Default)]
pub struct NavigationQueue {
    pending: VecDeque<Route>,
}

impl NavigationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, route: Route) {
        debug!(screen = ?route.screen(), "navigation queued");
        self.pending.push_back(route);
    }

    pub fn next(&mut self) -> Option<Route> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Focused screen plus the parameters held by each screen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub focused: Screen,
    pub all_places_params: Option<Place>,
    pub add_place_params: Option<Coordinate>,
}

/// Possible state transition events
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    /// A route was delivered
    Navigate(Route),
    /// A screen regained focus without new parameters (back navigation)
    Focus(Screen),
}

/// State machine for navigation transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the new state
    ///
    /// A route without parameters keeps the ones the screen already holds.
    pub fn process_event(current: AppState, event: StateEvent) -> AppState {
        match event {
            StateEvent::Navigate(Route::AllPlaces { place }) => AppState {
                focused: Screen::AllPlaces,
                all_places_params: place.or(current.all_places_params),
                ..current
            },
            StateEvent::Navigate(Route::AddPlace { picked_location }) => AppState {
                focused: Screen::AddPlace,
                add_place_params: picked_location.or(current.add_place_params),
                ..current
            },
            StateEvent::Navigate(Route::Map) => AppState {
                focused: Screen::Map,
                ..current
            },
            StateEvent::Focus(screen) => AppState {
                focused: screen,
                ..current
            },
        }
    }
}

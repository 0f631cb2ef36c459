//! Session list of created places

use crate::app::observer::{Observers, SubscriptionId};
use crate::domain::{Place, PlaceId};
use std::collections::HashSet;
use tracing::{debug, info};

/// Append-only, creation-ordered list of places
///
/// Deliveries are idempotent per `PlaceId`, so re-focusing the list screen
/// with the same route parameters does not add the place twice.
#[derive(Default)]
pub struct PlaceList {
    places: Vec<Place>,
    seen: HashSet<PlaceId>,
    observers: Observers<Vec<Place>>,
}

impl PlaceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the place unless its id was already delivered
    ///
    /// # Returns
    /// true if the list grew
    pub fn deliver(&mut self, place: Place) -> bool {
        if !self.seen.insert(place.id()) {
            debug!(id = %place.id(), "duplicate delivery ignored");
            return false;
        }
        info!(id = %place.id(), count = self.places.len() + 1, "place added to list");
        self.places.push(place);
        self.observers.notify(&self.places);
        true
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Vec<Place>) + 'static,
    {
        self.observers.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn same_place_delivered_twice_is_kept_once() {
        let mut list = PlaceList::new();
        let place = Place::new("Museum", None, None);

        assert!(list.deliver(place.clone()));
        assert!(!list.deliver(place));

        assert_eq!(list.len(), 1);
    }

    #[test]
    fn equal_content_different_identity_is_kept() {
        let mut list = PlaceList::new();

        list.deliver(Place::new("Museum", None, None));
        list.deliver(Place::new("Museum", None, None));

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn order_follows_creation() {
        let mut list = PlaceList::new();
        let first = Place::new("First", None, None);
        let second = Place::new("Second", None, None);

        list.deliver(first.clone());
        list.deliver(second.clone());
        list.deliver(first);

        let titles: Vec<&str> = list.places().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn observers_only_hear_effective_appends() {
        let mut list = PlaceList::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        list.subscribe(move |_| counter.set(counter.get() + 1));

        let place = Place::new("Pier", None, None);
        list.deliver(place.clone());
        list.deliver(place);

        assert_eq!(calls.get(), 1);
    }
}

//! Tap-to-pick selection on the interactive map
//!
//! This module tracks whether the user has tapped a point on the map yet.
//! Confirming is only allowed once a coordinate is actually pending.

use crate::domain::core::Coordinate;
use thiserror::Error;

/// Errors that can occur while confirming a map selection
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapSelectionError {
    /// Confirm was requested before any tap
    #[error("no location picked")]
    NoLocationPicked,
    /// The tap did not land on a real position (non-finite or out of range)
    #[error("{0} is not a valid position")]
    InvalidCoordinate(Coordinate),
}

/// State of the map selection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MapSelectionState {
    /// Nothing tapped yet
    #[default]
    NoSelection,
    /// A tap recorded this coordinate; a marker is shown there
    SelectionPending { coordinate: Coordinate },
}

/// Manages the tap → confirm workflow of the map screen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapSelection {
    state: MapSelectionState,
}

impl MapSelection {
    /// Creates a selection with nothing picked
    ///
    /// # Example
    /// ```rust
    /// use place_capture::domain::map_selection::MapSelection;
    ///
    /// let selection = MapSelection::new();
    /// assert!(selection.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current selection state
    pub fn state(&self) -> &MapSelectionState {
        &self.state
    }

    /// Checks if no coordinate has been tapped yet
    pub fn is_empty(&self) -> bool {
        matches!(self.state, MapSelectionState::NoSelection)
    }

    /// Records a tap
    ///
    /// A later tap replaces the pending coordinate, moving the marker. A
    /// coordinate that is not a valid position leaves the state unchanged.
    ///
    /// # Example
    /// ```rust
    /// use place_capture::domain::{core::Coordinate, map_selection::MapSelection};
    ///
    /// let mut selection = MapSelection::new();
    /// selection.tap(Coordinate::new(10.0, 20.0)).unwrap();
    /// assert_eq!(selection.pending(), Some(Coordinate::new(10.0, 20.0)));
    /// assert!(selection.tap(Coordinate::new(f64::NAN, 0.0)).is_err());
    /// ```
    pub fn tap(&mut self, coordinate: Coordinate) -> Result<(), MapSelectionError> {
        if !coordinate.is_valid() {
            return Err(MapSelectionError::InvalidCoordinate(coordinate));
        }
        self.state = MapSelectionState::SelectionPending { coordinate };
        Ok(())
    }

    /// Gets the pending coordinate, where the marker is drawn
    ///
    /// # Returns
    /// Some(coordinate) if a tap was recorded, None otherwise
    pub fn pending(&self) -> Option<Coordinate> {
        match self.state {
            MapSelectionState::SelectionPending { coordinate } => Some(coordinate),
            MapSelectionState::NoSelection => None,
        }
    }

    /// Confirms the selection
    ///
    /// The check is made against the selection state itself, so confirming
    /// before any tap is always refused.
    ///
    /// # Returns
    /// The pending coordinate, or `MapSelectionError::NoLocationPicked`
    pub fn confirm(&self) -> Result<Coordinate, MapSelectionError> {
        self.pending().ok_or(MapSelectionError::NoLocationPicked)
    }

    /// Clears the selection
    pub fn reset(&mut self) {
        self.state = MapSelectionState::NoSelection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_is_empty() {
        let selection = MapSelection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.pending(), None);
    }

    #[test]
    fn tap_then_confirm_yields_tapped_coordinate() {
        let mut selection = MapSelection::new();
        selection.tap(Coordinate::new(10.0, 20.0)).unwrap();

        assert!(!selection.is_empty());
        assert_eq!(selection.confirm(), Ok(Coordinate::new(10.0, 20.0)));
    }

    #[test]
    fn confirm_without_tap_is_refused() {
        let selection = MapSelection::new();
        assert_eq!(selection.confirm(), Err(MapSelectionError::NoLocationPicked));
    }

    #[test]
    fn second_tap_moves_marker() {
        let mut selection = MapSelection::new();
        selection.tap(Coordinate::new(1.0, 1.0)).unwrap();
        selection.tap(Coordinate::new(2.0, 3.0)).unwrap();
        assert_eq!(selection.pending(), Some(Coordinate::new(2.0, 3.0)));
    }

    #[test]
    fn reset_returns_to_no_selection() {
        let mut selection = MapSelection::new();
        selection.tap(Coordinate::new(1.0, 1.0)).unwrap();
        selection.reset();
        assert!(selection.is_empty());
        assert!(selection.confirm().is_err());
    }

    #[test]
    fn non_finite_tap_is_refused_and_keeps_marker() {
        let mut selection = MapSelection::new();
        selection.tap(Coordinate::new(1.0, 1.0)).unwrap();

        let nan = Coordinate::new(f64::NAN, 20.0);
        assert!(matches!(
            selection.tap(nan),
            Err(MapSelectionError::InvalidCoordinate(_))
        ));
        assert!(selection.tap(Coordinate::new(0.0, f64::INFINITY)).is_err());
        assert!(selection.tap(Coordinate::new(95.0, 0.0)).is_err());
        assert_eq!(selection.confirm(), Ok(Coordinate::new(1.0, 1.0)));
    }
}

//! Shared plumbing for the capability pickers
//!
//! A picker holds at most one current selection, replaced by every
//! successful capture, and refuses a new capture while one is in flight.

use crate::app::observer::{Observers, SubscriptionId};
use crate::domain::Capability;
use crate::platform::PlatformError;
use std::cell::{Cell, RefCell};
use thiserror::Error;
use tracing::debug;

pub const CAPTURE_IN_PROGRESS_TITLE: &str = "Capture in progress";

/// Errors that abort a capture
///
/// All of them leave the current selection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("{0} permission refused")]
    PermissionRefused(Capability),
    #[error("{0} capture already in progress")]
    Busy(Capability),
    #[error("{0} capture cancelled")]
    Cancelled(Capability),
    #[error("{capability} capture failed: {source}")]
    CaptureFailed {
        capability: Capability,
        #[source]
        source: PlatformError,
    },
}

/// Two-state display of a picker
#[derive(Debug, Clone, PartialEq)]
pub enum Preview<T> {
    Empty,
    Selected(T),
}

impl<T> Preview<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Preview::Empty)
    }
}

/// Current selection, in-flight flag and subscribers of one picker
pub struct SelectionSlot<T> {
    capability: Capability,
    current: RefCell<Option<T>>,
    in_flight: Cell<bool>,
    observers: Observers<Preview<T>>,
}

impl<T: Clone> SelectionSlot<T> {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            current: RefCell::new(None),
            in_flight: Cell::new(false),
            observers: Observers::new(),
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Marks a capture as started
    ///
    /// # Returns
    /// A guard that clears the flag when dropped, or `CaptureError::Busy`
    /// if another capture is still outstanding
    pub fn begin(&self) -> Result<InFlightGuard<'_>, CaptureError> {
        if self.in_flight.replace(true) {
            return Err(CaptureError::Busy(self.capability));
        }
        Ok(InFlightGuard {
            flag: &self.in_flight,
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Replaces the selection and notifies subscribers
    pub fn store(&self, value: T) {
        debug!(capability = %self.capability, "selection stored");
        *self.current.borrow_mut() = Some(value.clone());
        self.observers.notify(&Preview::Selected(value));
    }

    /// Drops the selection and notifies subscribers
    pub fn clear(&self) {
        let had_value = self.current.borrow_mut().take().is_some();
        if had_value {
            self.observers.notify(&Preview::Empty);
        }
    }

    pub fn selection(&self) -> Option<T> {
        self.current.borrow().clone()
    }

    pub fn preview(&self) -> Preview<T> {
        match self.selection() {
            Some(value) => Preview::Selected(value),
            None => Preview::Empty,
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Preview<T>) + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

/// RAII marker for an outstanding capture
pub struct InFlightGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn second_begin_is_busy_until_guard_drops() {
        let slot = SelectionSlot::<u8>::new(Capability::Camera);

        let guard = slot.begin().unwrap();
        assert!(slot.is_in_flight());
        assert_eq!(
            slot.begin().err(),
            Some(CaptureError::Busy(Capability::Camera))
        );

        drop(guard);
        assert!(!slot.is_in_flight());
        assert!(slot.begin().is_ok());
    }

    #[test]
    fn store_replaces_and_notifies() {
        let slot = SelectionSlot::<u8>::new(Capability::Location);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        slot.subscribe(move |preview| sink.borrow_mut().push(preview.clone()));

        assert!(slot.preview().is_empty());
        slot.store(1);
        slot.store(2);
        slot.clear();
        slot.clear();

        assert_eq!(slot.selection(), None);
        assert_eq!(
            *seen.borrow(),
            vec![Preview::Selected(1), Preview::Selected(2), Preview::Empty]
        );
    }
}

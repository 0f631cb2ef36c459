//! Device capability seams
//!
//! Everything that would touch real hardware (permission prompts, the
//! camera, the GPS receiver, modal alerts) sits behind the traits in this
//! module. The rest of the crate only sees these contracts.

pub mod permission;
pub mod simulated;

use crate::config::CaptureOptions;
use crate::domain::{Capability, Coordinate, PermissionState};
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

pub use permission::PermissionGate;
pub use simulated::{Alert, PermissionAnswer, SimulatedDevice};

/// Errors reported by a platform call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The permission prompt itself could not be shown or answered
    #[error("{capability} permission request failed: {reason}")]
    PermissionRequest {
        capability: Capability,
        reason: String,
    },
    /// The capability failed while running
    #[error("{capability} unavailable: {reason}")]
    Unavailable {
        capability: Capability,
        reason: String,
    },
}

/// Platform permission service
///
/// Owns the permission state; callers can only read it or ask the user.
pub trait PermissionService {
    /// Current state for the capability
    fn status(&self, capability: Capability) -> PermissionState;

    /// Prompts the user and resolves with the state they left it in
    fn request(
        &self,
        capability: Capability,
    ) -> impl Future<Output = Result<PermissionState, PlatformError>>;
}

/// One asset produced by a camera capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraAsset {
    pub uri: String,
}

/// Outcome of launching the camera
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CameraResult {
    pub canceled: bool,
    pub assets: Vec<CameraAsset>,
}

impl CameraResult {
    /// A completed capture holding a single asset
    pub fn captured(uri: impl Into<String>) -> Self {
        Self {
            canceled: false,
            assets: vec![CameraAsset { uri: uri.into() }],
        }
    }

    /// The user backed out of the camera
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            assets: Vec::new(),
        }
    }
}

/// Platform camera
pub trait Camera {
    fn launch(
        &self,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<CameraResult, PlatformError>>;
}

/// Platform location service
pub trait LocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, PlatformError>>;
}

/// Blocking user-visible message (an alert dialog on a phone)
pub trait Notifier {
    fn alert(&self, title: &str, message: &str);
}

impl<T: PermissionService> PermissionService for Rc<T> {
    fn status(&self, capability: Capability) -> PermissionState {
        (**self).status(capability)
    }

    fn request(
        &self,
        capability: Capability,
    ) -> impl Future<Output = Result<PermissionState, PlatformError>> {
        (**self).request(capability)
    }
}

impl<T: Camera> Camera for Rc<T> {
    fn launch(
        &self,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<CameraResult, PlatformError>> {
        (**self).launch(options)
    }
}

impl<T: LocationProvider> LocationProvider for Rc<T> {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, PlatformError>> {
        (**self).current_position()
    }
}

impl<T: Notifier> Notifier for Rc<T> {
    fn alert(&self, title: &str, message: &str) {
        (**self).alert(title, message)
    }
}

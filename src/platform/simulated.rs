//! Headless device backend
//!
//! Implements every capability trait with scripted answers so flows can run
//! without hardware: the CLI demo and the test suites both drive it. Calls
//! are counted and alerts recorded for inspection.

use crate::config::CaptureOptions;
use crate::domain::{Capability, Coordinate, PermissionState};
use crate::platform::{
    CameraResult, Camera, LocationProvider, Notifier, PermissionService, PlatformError,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use tracing::info;

/// How the simulated user answers a permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionAnswer {
    #[default]
    Grant,
    Deny,
    /// The prompt itself errors out
    Fail,
}

/// An alert that was shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

pub struct SimulatedDevice {
    permissions: RefCell<HashMap<Capability, PermissionState>>,
    answers: RefCell<HashMap<Capability, PermissionAnswer>>,
    requests: RefCell<HashMap<Capability, usize>>,
    camera_script: RefCell<VecDeque<Result<CameraResult, String>>>,
    camera_launches: Cell<usize>,
    last_capture_options: Cell<Option<CaptureOptions>>,
    position: Cell<Coordinate>,
    location_failure: RefCell<Option<String>>,
    location_reads: Cell<usize>,
    alerts: RefCell<Vec<Alert>>,
}

impl SimulatedDevice {
    /// Position reported by the GPS until changed
    pub const DEFAULT_POSITION: Coordinate = Coordinate {
        latitude: 37.7749,
        longitude: -122.4194,
    };

    /// Creates a device with every permission undetermined and every prompt granted
    pub fn new() -> Self {
        Self {
            permissions: RefCell::new(HashMap::new()),
            answers: RefCell::new(HashMap::new()),
            requests: RefCell::new(HashMap::new()),
            camera_script: RefCell::new(VecDeque::new()),
            camera_launches: Cell::new(0),
            last_capture_options: Cell::new(None),
            position: Cell::new(Self::DEFAULT_POSITION),
            location_failure: RefCell::new(None),
            location_reads: Cell::new(0),
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn set_permission(&self, capability: Capability, state: PermissionState) {
        self.permissions.borrow_mut().insert(capability, state);
    }

    pub fn set_answer(&self, capability: Capability, answer: PermissionAnswer) {
        self.answers.borrow_mut().insert(capability, answer);
    }

    pub fn status_of(&self, capability: Capability) -> PermissionState {
        self.permissions
            .borrow()
            .get(&capability)
            .copied()
            .unwrap_or_default()
    }

    /// Queues the result of the next camera launch
    pub fn push_camera_result(&self, result: CameraResult) {
        self.camera_script.borrow_mut().push_back(Ok(result));
    }

    /// Queues a hardware failure for the next camera launch
    pub fn push_camera_failure(&self, reason: impl Into<String>) {
        self.camera_script.borrow_mut().push_back(Err(reason.into()));
    }

    pub fn set_position(&self, position: Coordinate) {
        self.position.set(position);
    }

    /// Makes every following GPS read fail (None restores it)
    pub fn set_location_failure(&self, reason: Option<String>) {
        *self.location_failure.borrow_mut() = reason;
    }

    pub fn permission_requests(&self, capability: Capability) -> usize {
        self.requests.borrow().get(&capability).copied().unwrap_or(0)
    }

    pub fn camera_launches(&self) -> usize {
        self.camera_launches.get()
    }

    pub fn last_capture_options(&self) -> Option<CaptureOptions> {
        self.last_capture_options.get()
    }

    pub fn location_reads(&self) -> usize {
        self.location_reads.get()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionService for SimulatedDevice {
    fn status(&self, capability: Capability) -> PermissionState {
        self.status_of(capability)
    }

    async fn request(&self, capability: Capability) -> Result<PermissionState, PlatformError> {
        *self.requests.borrow_mut().entry(capability).or_insert(0) += 1;
        tokio::task::yield_now().await;

        let answer = self
            .answers
            .borrow()
            .get(&capability)
            .copied()
            .unwrap_or_default();
        let state = match answer {
            PermissionAnswer::Grant => PermissionState::Granted,
            PermissionAnswer::Deny => PermissionState::Denied,
            PermissionAnswer::Fail => {
                return Err(PlatformError::PermissionRequest {
                    capability,
                    reason: "prompt could not be presented".to_string(),
                });
            }
        };
        self.set_permission(capability, state);
        Ok(state)
    }
}

impl Camera for SimulatedDevice {
    async fn launch(&self, options: &CaptureOptions) -> Result<CameraResult, PlatformError> {
        let launch = self.camera_launches.get() + 1;
        self.camera_launches.set(launch);
        self.last_capture_options.set(Some(*options));
        tokio::task::yield_now().await;

        let scripted = self.camera_script.borrow_mut().pop_front();
        match scripted {
            Some(Ok(result)) => Ok(result),
            Some(Err(reason)) => Err(PlatformError::Unavailable {
                capability: Capability::Camera,
                reason,
            }),
            None => Ok(CameraResult::captured(format!(
                "file:///simulated/camera/photo-{launch}.jpg"
            ))),
        }
    }
}

impl LocationProvider for SimulatedDevice {
    async fn current_position(&self) -> Result<Coordinate, PlatformError> {
        self.location_reads.set(self.location_reads.get() + 1);
        tokio::task::yield_now().await;

        if let Some(reason) = self.location_failure.borrow().clone() {
            return Err(PlatformError::Unavailable {
                capability: Capability::Location,
                reason,
            });
        }
        Ok(self.position.get())
    }
}

impl Notifier for SimulatedDevice {
    fn alert(&self, title: &str, message: &str) {
        info!(alert_title = title, alert_message = message, "alert shown");
        self.alerts.borrow_mut().push(Alert {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

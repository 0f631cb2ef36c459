//! Permission-gated photo capture

use crate::app::picker::{CAPTURE_IN_PROGRESS_TITLE, CaptureError, Preview, SelectionSlot};
use crate::config::CaptureOptions;
use crate::domain::{Capability, PhotoRef};
use crate::platform::{Camera, CameraResult, Notifier, PermissionGate, PermissionService};
use std::rc::Rc;
use tracing::{info, warn};

pub const NO_IMAGE_TEXT: &str = "No image taken yet.";

pub struct ImagePicker<S, N, C> {
    gate: Rc<PermissionGate<S, N>>,
    camera: C,
    options: CaptureOptions,
    slot: SelectionSlot<PhotoRef>,
}

impl<S, N, C> ImagePicker<S, N, C>
where
    S: PermissionService,
    N: Notifier,
    C: Camera,
{
    pub fn new(gate: Rc<PermissionGate<S, N>>, camera: C, options: CaptureOptions) -> Self {
        Self {
            gate,
            camera,
            options,
            slot: SelectionSlot::new(Capability::Camera),
        }
    }

    /// Takes a photo and makes it the current selection
    ///
    /// Permission is verified before the camera is launched; the camera is
    /// launched at most once per call.
    pub async fn take_image(&self) -> Result<PhotoRef, CaptureError> {
        let _in_flight = self.slot.begin().inspect_err(|_| {
            warn!("camera capture already in progress, ignoring");
            self.gate
                .notifier()
                .alert(CAPTURE_IN_PROGRESS_TITLE, "Wait for the current photo to finish.");
        })?;

        if !self.gate.verify(Capability::Camera).await {
            return Err(CaptureError::PermissionRefused(Capability::Camera));
        }

        let result = match self.camera.launch(&self.options).await {
            Ok(result) => result,
            Err(source) => {
                warn!(error = %source, "camera failed");
                self.gate
                    .notifier()
                    .alert("Camera unavailable", "The photo could not be taken.");
                return Err(CaptureError::CaptureFailed {
                    capability: Capability::Camera,
                    source,
                });
            }
        };

        let Some(photo) = first_asset(result) else {
            info!("camera closed without a photo");
            self.gate
                .notifier()
                .alert("No image taken", "The camera was closed before a photo was taken.");
            return Err(CaptureError::Cancelled(Capability::Camera));
        };

        info!(uri = photo.uri(), "photo taken");
        self.slot.store(photo.clone());
        Ok(photo)
    }

    pub fn selection(&self) -> Option<PhotoRef> {
        self.slot.selection()
    }

    pub fn preview(&self) -> Preview<PhotoRef> {
        self.slot.preview()
    }

    /// Text or image URI to show in the preview box
    pub fn preview_text(&self) -> String {
        match self.slot.selection() {
            Some(photo) => photo.uri().to_string(),
            None => NO_IMAGE_TEXT.to_string(),
        }
    }

    pub fn slot(&self) -> &SelectionSlot<PhotoRef> {
        &self.slot
    }

    pub fn clear(&self) {
        self.slot.clear();
    }
}

fn first_asset(result: CameraResult) -> Option<PhotoRef> {
    let CameraResult { canceled, assets } = result;
    if canceled {
        return None;
    }
    assets.into_iter().next().map(|asset| PhotoRef::new(asset.uri))
}

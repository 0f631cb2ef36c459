//! Check-then-request permission gate
//!
//! | state        | action                          | result                   |
//! |--------------|---------------------------------|--------------------------|
//! | undetermined | prompt the user, await decision | proceed iff granted      |
//! | denied       | show an explanatory alert       | refuse, no new prompt    |
//! | granted      | nothing                         | proceed                  |

use crate::domain::{Capability, PermissionState};
use crate::platform::{Notifier, PermissionService};
use tracing::{debug, warn};

pub const INSUFFICIENT_PERMISSION_TITLE: &str = "Insufficient Permission";

/// Guards a capability behind the platform permission state
pub struct PermissionGate<S, N> {
    service: S,
    notifier: N,
}

impl<S, N> PermissionGate<S, N>
where
    S: PermissionService,
    N: Notifier,
{
    pub fn new(service: S, notifier: N) -> Self {
        Self { service, notifier }
    }

    /// Returns true if the capability may be used right now
    ///
    /// A failed prompt counts as a refusal.
    pub async fn verify(&self, capability: Capability) -> bool {
        match self.service.status(capability) {
            PermissionState::Granted => true,
            PermissionState::Denied => {
                debug!(%capability, "permission denied, refusing");
                self.notifier
                    .alert(INSUFFICIENT_PERMISSION_TITLE, &denied_message(capability));
                false
            }
            PermissionState::Undetermined => {
                debug!(%capability, "permission undetermined, requesting");
                match self.service.request(capability).await {
                    Ok(state) => {
                        debug!(%capability, ?state, "permission request answered");
                        state.is_granted()
                    }
                    Err(err) => {
                        warn!(%capability, error = %err, "permission request failed");
                        self.notifier.alert(
                            INSUFFICIENT_PERMISSION_TITLE,
                            &request_failed_message(capability),
                        );
                        false
                    }
                }
            }
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

/// Alert body shown when a capability was denied
pub fn denied_message(capability: Capability) -> String {
    match capability {
        Capability::Camera => "You need to grant camera permission to use the app".to_string(),
        Capability::Location => {
            "You need to grant location permission to use this app".to_string()
        }
    }
}

/// Alert body shown when the permission prompt itself could not be completed
pub fn request_failed_message(capability: Capability) -> String {
    format!("The {} permission could not be requested. Please try again.", capability.noun())
}

//! Permission vocabulary for sensitive device capabilities

use std::fmt;

/// A device feature that needs the user's consent before use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Camera,
    Location,
}

impl Capability {
    /// Lower-case noun used in user-facing messages
    pub fn noun(&self) -> &'static str {
        match self {
            Capability::Camera => "camera",
            Capability::Location => "location",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Authorization state reported by the platform
///
/// Transitions belong to the platform permission service; this crate only
/// reads the state and asks for a decision when it is `Undetermined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

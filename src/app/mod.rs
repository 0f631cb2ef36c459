//! Application orchestration layer
//!
//! Plain state holders for each screen, the pickers they embed, and the
//! controller that routes navigation between them. Presentation code
//! observes these holders through `observer::Observers`.

pub mod controller;
pub mod form;
pub mod image_picker;
pub mod location_picker;
pub mod map_screen;
pub mod observer;
pub mod picker;
pub mod place_list;
pub mod state;

pub use controller::{Device, PlaceFlowController};
pub use picker::{CaptureError, Preview};
pub use state::{Route, Screen};

//! Configuration module for place-capture
//!
//! Settings are built once (defaults, environment overrides) and injected
//! into the services that need them.

pub mod capture;
pub mod maps;

pub use capture::CaptureOptions;
pub use maps::{ConfigError, MapsConfig};

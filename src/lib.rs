//! Capture a place: a title, a photo from the camera and a location picked
//! by GPS or on a map, collected into an in-memory list for the session.

pub mod app;
pub mod config;
pub mod domain;
pub mod maps;
pub mod platform;

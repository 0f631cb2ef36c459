use crate::domain::core::MapRegion;
use reqwest::Url;
use thiserror::Error;

/// Settings shared by the static map builder and the address lookup
///
/// Passed in at construction time; nothing reads the key from a global.
#[derive(Debug, Clone, PartialEq)]
pub struct MapsConfig {
    pub api_key: String,
    pub static_map_url: String,
    pub geocode_url: String,
    pub zoom: u8,
    pub image_width: u32,
    pub image_height: u32,
    pub map_type: String,
    pub marker_color: String,
    pub marker_label: char,
    pub initial_region: MapRegion,
}

impl MapsConfig {
    pub const DEFAULT_STATIC_MAP_URL: &'static str = "https://maps.googleapis.com/maps/api/staticmap";
    pub const DEFAULT_GEOCODE_URL: &'static str = "https://maps.googleapis.com/maps/api/geocode/json";
    pub const DEFAULT_ZOOM: u8 = 14;
    pub const MAX_ZOOM: u8 = 21;
    pub const DEFAULT_WIDTH: u32 = 400;
    pub const DEFAULT_HEIGHT: u32 = 200;
    pub const MAX_IMAGE_SIDE: u32 = 640;

    pub const ENV_API_KEY: &'static str = "PLACES_MAPS_API_KEY";
    pub const ENV_ZOOM: &'static str = "PLACES_MAPS_ZOOM";
    pub const ENV_SIZE: &'static str = "PLACES_MAPS_SIZE";
    pub const ENV_STATIC_MAP_URL: &'static str = "PLACES_STATIC_MAP_URL";
    pub const ENV_GEOCODE_URL: &'static str = "PLACES_GEOCODE_URL";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            static_map_url: Self::DEFAULT_STATIC_MAP_URL.to_string(),
            geocode_url: Self::DEFAULT_GEOCODE_URL.to_string(),
            zoom: Self::DEFAULT_ZOOM,
            image_width: Self::DEFAULT_WIDTH,
            image_height: Self::DEFAULT_HEIGHT,
            map_type: "roadmap".to_string(),
            marker_color: "red".to_string(),
            marker_label: 'S',
            initial_region: MapRegion::DEFAULT,
        }
    }

    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key → value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(Self::ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key.trim());

        if let Some(raw) = lookup(Self::ENV_ZOOM) {
            config.zoom = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: Self::ENV_ZOOM,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(Self::ENV_SIZE) {
            let (width, height) = parse_size(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: Self::ENV_SIZE,
                value: raw.clone(),
            })?;
            config.image_width = width;
            config.image_height = height;
        }
        if let Some(url) = lookup(Self::ENV_STATIC_MAP_URL) {
            config.static_map_url = url;
        }
        if let Some(url) = lookup(Self::ENV_GEOCODE_URL) {
            config.geocode_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.zoom > Self::MAX_ZOOM {
            return Err(ConfigError::InvalidZoom { zoom: self.zoom });
        }
        let side_ok = |side: u32| (1..=Self::MAX_IMAGE_SIDE).contains(&side);
        if !side_ok(self.image_width) || !side_ok(self.image_height) {
            return Err(ConfigError::InvalidImageSize {
                width: self.image_width,
                height: self.image_height,
            });
        }
        for (key, url) in [
            (Self::ENV_STATIC_MAP_URL, &self.static_map_url),
            (Self::ENV_GEOCODE_URL, &self.geocode_url),
        ] {
            if Url::parse(url).is_err() {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: url.clone(),
                });
            }
        }
        // Spliced into the static map query as is
        for (key, value) in [
            ("map_type", &self.map_type),
            ("marker_color", &self.marker_color),
        ] {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.clone(),
                });
            }
        }
        if !self.marker_label.is_ascii_alphanumeric() {
            return Err(ConfigError::InvalidValue {
                key: "marker_label",
                value: self.marker_label.to_string(),
            });
        }
        Ok(())
    }

    /// Image size in the `WxH` form expected by the static map service
    pub fn size_param(&self) -> String {
        format!("{}x{}", self.image_width, self.image_height)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Maps API key is missing (set {})", MapsConfig::ENV_API_KEY)]
    MissingApiKey,
    #[error("Zoom level {zoom} is outside 0..={}", MapsConfig::MAX_ZOOM)]
    InvalidZoom { zoom: u8 },
    #[error("Image size {width}x{height} is outside 1..={} per side", MapsConfig::MAX_IMAGE_SIDE)]
    InvalidImageSize { width: u32, height: u32 },
    #[error("Capture quality {quality} is outside 0.0..=1.0")]
    InvalidQuality { quality: f32 },
    #[error("Capture aspect {width}:{height} must be non-zero")]
    InvalidAspect { width: u32, height: u32 },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

fn parse_size(raw: &str) -> Option<(u32, u32)> {
    let (width, height) = raw.trim().split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

use crate::config::{ConfigError, MapsConfig};
use crate::domain::Coordinate;
use reqwest::Url;

/// Builds links to rendered map preview images
///
/// The image is never fetched here; the URL is handed to whatever displays it.
#[derive(Debug, Clone)]
pub struct StaticMapUrlBuilder {
    base: Url,
    config: MapsConfig,
}

impl StaticMapUrlBuilder {
    /// Creates a builder for a validated configuration
    pub fn new(config: MapsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base = Url::parse(&config.static_map_url).map_err(|_| ConfigError::InvalidValue {
            key: MapsConfig::ENV_STATIC_MAP_URL,
            value: config.static_map_url.clone(),
        })?;
        Ok(Self { base, config })
    }

    /// Preview image centred on the coordinate with a marker on it
    pub fn preview_url(&self, coordinate: &Coordinate) -> String {
        let point = coordinate.to_query_pair();
        let config = &self.config;

        // Map type and marker style are plain alphanumerics after validation,
        // so only the key goes through the form encoder.
        let mut url = self.base.clone();
        url.set_query(Some(&format!(
            "center={point}&zoom={zoom}&size={size}&maptype={map_type}\
             &markers=color:{color}%7Clabel:{label}%7C{point}",
            zoom = config.zoom,
            size = config.size_param(),
            map_type = config.map_type,
            color = config.marker_color,
            label = config.marker_label,
        )));
        url.query_pairs_mut().append_pair("key", &config.api_key);
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(key: &str) -> StaticMapUrlBuilder {
        StaticMapUrlBuilder::new(MapsConfig::new(key)).unwrap()
    }

    #[test]
    fn center_and_marker_each_carry_the_point_once() {
        let url = builder("secret").preview_url(&Coordinate::new(37.78, -122.43));

        assert_eq!(url.matches("center=37.78,-122.43").count(), 1);
        assert_eq!(url.matches("%7C37.78,-122.43").count(), 1);
        assert_eq!(url.matches("37.78,-122.43").count(), 2);
    }

    #[test]
    fn fixed_layout_and_injected_key() {
        let url = builder("secret").preview_url(&Coordinate::new(1.5, 2.5));

        assert!(url.starts_with("https://maps.googleapis.com/maps/api/staticmap?"));
        assert!(url.contains("&zoom=14&"));
        assert!(url.contains("&size=400x200&"));
        assert!(url.contains("&maptype=roadmap&"));
        assert!(url.contains("markers=color:red%7Clabel:S%7C1.5,2.5"));
        assert!(url.ends_with("&key=secret"));
        assert!(!url.contains(char::is_whitespace));
    }

    #[test]
    fn key_cannot_add_query_parameters() {
        let key = "ab&center=0,0 #x";
        let url = builder(key).preview_url(&Coordinate::new(37.78, -122.43));

        assert_eq!(url.matches("center=").count(), 1);
        assert!(!url.contains('#'));

        let parsed = Url::parse(&url).unwrap();
        let keys: Vec<String> = parsed
            .query_pairs()
            .filter(|(name, _)| name == "key")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(keys, vec![key.to_string()]);
        let centers = parsed.query_pairs().filter(|(name, _)| name == "center").count();
        assert_eq!(centers, 1);
    }

    #[test]
    fn unsafe_marker_style_is_rejected() {
        let mut config = MapsConfig::new("secret");
        config.marker_color = "red&key=other".to_string();
        assert!(matches!(
            StaticMapUrlBuilder::new(config),
            Err(ConfigError::InvalidValue { key: "marker_color", .. })
        ));

        let mut config = MapsConfig::new("secret");
        config.static_map_url = "not a url".to_string();
        assert!(matches!(
            StaticMapUrlBuilder::new(config),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}

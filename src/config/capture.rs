use crate::config::maps::ConfigError;

/// Options handed to the camera on every capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub allows_editing: bool,
    pub aspect: (u32, u32),
    pub quality: f32,
}

impl CaptureOptions {
    pub const DEFAULT_ASPECT: (u32, u32) = (16, 9);
    pub const DEFAULT_QUALITY: f32 = 0.5;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(ConfigError::InvalidQuality {
                quality: self.quality,
            });
        }
        let (width, height) = self.aspect;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidAspect { width, height });
        }
        Ok(())
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            aspect: Self::DEFAULT_ASPECT,
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        let options = CaptureOptions::default();
        assert!(options.allows_editing);
        assert_eq!(options.aspect, (16, 9));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let options = CaptureOptions {
            quality: 1.5,
            ..CaptureOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(ConfigError::InvalidQuality { quality: 1.5 })
        );

        let options = CaptureOptions {
            aspect: (16, 0),
            ..CaptureOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidAspect { .. })
        ));
    }
}

use crate::error::{StackVizError, StackVizResult};

/// Output resolution and frame rate requested from the rendering engine.
///
/// A bad configuration is a fatal error, surfaced before any directive is
/// emitted; there is no silent fallback to engine defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub frame_rate: u32,
}

impl Default for RenderConfig {
    /// 4K UHD at 60 fps, the delivery format of the authored scenes.
    fn default() -> Self {
        Self {
            pixel_width: 3840,
            pixel_height: 2160,
            frame_rate: 60,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> StackVizResult<()> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(StackVizError::validation(
                "config pixel_width/pixel_height must be non-zero",
            ));
        }
        if self.frame_rate == 0 {
            return Err(StackVizError::validation("config frame_rate must be non-zero"));
        }
        if !self.pixel_width.is_multiple_of(2) || !self.pixel_height.is_multiple_of(2) {
            // Engines deliver yuv420p mp4, which needs even dimensions.
            return Err(StackVizError::validation(
                "config pixel_width/pixel_height must be even",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_4k60_and_valid() {
        let cfg = RenderConfig::default();
        assert_eq!((cfg.pixel_width, cfg.pixel_height), (3840, 2160));
        assert_eq!(cfg.frame_rate, 60);
        cfg.validate().unwrap();
    }

    #[test]
    fn validation_catches_bad_values() {
        assert!(
            RenderConfig {
                pixel_width: 0,
                ..RenderConfig::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            RenderConfig {
                frame_rate: 0,
                ..RenderConfig::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            RenderConfig {
                pixel_width: 1921,
                ..RenderConfig::default()
            }
            .validate()
            .is_err()
        );
    }
}

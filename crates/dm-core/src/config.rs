//! Floor-map configuration.
//!
//! Hosts pass a JSON object with any subset of fields; everything missing
//! falls back to the defaults below.

use crate::model::{NormPos, Zone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a `MapConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse map config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid map config: {0}")]
    Invalid(String),
}

/// Size of a desk glyph in view-box units (fractions of the displayed image).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphMetrics {
    pub width: f64,
    pub height: f64,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            width: 0.025,
            height: 0.012,
        }
    }
}

/// Tooltip box size and spacing, in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipMetrics {
    pub width: f64,
    pub height: f64,
    /// Minimum distance kept from every container edge.
    pub padding: f64,
    /// Gap between the desk and the tooltip.
    pub offset: f64,
}

impl Default for TooltipMetrics {
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 165.0,
            padding: 15.0,
            offset: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Background image width / height. The desk overlay uses a unit view
    /// box, so `1.0` until the host reports the real image ratio.
    pub image_aspect: f64,
    /// Where new desks are placed.
    pub default_position: NormPos,
    /// Zone assigned to new desks.
    pub default_zone: Zone,
    /// Id prefix used by the single-add command.
    pub single_add_prefix: String,
    pub glyph: GlyphMetrics,
    pub tooltip: TooltipMetrics,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            image_aspect: 1.0,
            default_position: NormPos::CENTER,
            default_zone: Zone::SouthZone,
            single_add_prefix: "DESK".to_string(),
            glyph: GlyphMetrics::default(),
            tooltip: TooltipMetrics::default(),
        }
    }
}

impl MapConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_aspect(self.image_aspect)?;
        let glyph_ok = [self.glyph.width, self.glyph.height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !glyph_ok {
            return Err(ConfigError::Invalid(
                "glyph width and height must be positive".to_string(),
            ));
        }
        let t = &self.tooltip;
        let tooltip_ok = [t.width, t.height, t.padding, t.offset]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if !tooltip_ok {
            return Err(ConfigError::Invalid(
                "tooltip metrics must be non-negative".to_string(),
            ));
        }
        if self.single_add_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "singleAddPrefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// An image aspect ratio must be finite and positive.
    pub fn check_aspect(aspect: f64) -> Result<(), ConfigError> {
        if aspect.is_finite() && aspect > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "imageAspect must be a positive number, got {aspect}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = MapConfig::from_json("{}").unwrap();
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = MapConfig::from_json(
            r#"{"imageAspect": 1.7778, "defaultZone": "Left Wing", "tooltip": {"width": 200}}"#,
        )
        .unwrap();
        assert_eq!(config.image_aspect, 1.7778);
        assert_eq!(config.default_zone, Zone::LeftWing);
        assert_eq!(config.tooltip.width, 200.0);
        assert_eq!(config.tooltip.height, 165.0);
        assert_eq!(config.single_add_prefix, "DESK");
    }

    #[test]
    fn rejects_bad_aspect() {
        let err = MapConfig::from_json(r#"{"imageAspect": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = MapConfig::from_json("{imageAspect").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

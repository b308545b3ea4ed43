//! Configuration for the center-popup behaviour
//!
//! Every tunable of the controller lives here so hosts can load it from JSON
//! alongside the rest of their map settings, or tweak individual fields
//! through [`Configurable::update_config`](crate::traits::Configurable::update_config).

use crate::core::constants::{
    DEFAULT_ANCHOR_OFFSET_Y, DEFAULT_CENTER_POPUP_TOLERANCE, DEFAULT_DEBOUNCE_DELAY_MS,
    DEFAULT_MATCH_EPSILON, DESCRIPTION_ELEMENT_ID, TITLE_ELEMENT_ID,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which markers of the marker group get their popup closed when nothing is
/// within tolerance of the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseScope {
    /// Only circle markers
    #[default]
    CircleMarkers,
    /// Circle markers and plain markers alike
    PointMarkers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterPopupConfig {
    /// Quiet period after the last move event before recomputing
    pub debounce_delay_ms: u64,
    /// Maximum anchor distance, in pixels, for the nearest marker to count
    pub tolerance: f64,
    /// Anchor offset below the viewport center, in pixels
    pub anchor_offset_y: f64,
    /// Per-axis epsilon when matching projected points between groups
    pub match_epsilon: f64,
    pub title_element_id: String,
    pub description_element_id: String,
    pub close_scope: CloseScope,
}

impl Default for CenterPopupConfig {
    fn default() -> Self {
        Self {
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            tolerance: DEFAULT_CENTER_POPUP_TOLERANCE,
            anchor_offset_y: DEFAULT_ANCHOR_OFFSET_Y,
            match_epsilon: DEFAULT_MATCH_EPSILON,
            title_element_id: TITLE_ELEMENT_ID.to_string(),
            description_element_id: DESCRIPTION_ELEMENT_ID.to_string(),
            close_scope: CloseScope::default(),
        }
    }
}

impl CenterPopupConfig {
    /// Parses a (possibly partial) JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    /// Sets the debounce delay, rounded up to whole milliseconds
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        let millis = delay.as_nanos().div_ceil(1_000_000);
        self.debounce_delay_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_close_scope(mut self, close_scope: CloseScope) -> Self {
        self.close_scope = close_scope;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance >= 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if !(self.match_epsilon > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "match_epsilon must be positive, got {}",
                self.match_epsilon
            )));
        }
        if !self.anchor_offset_y.is_finite() {
            return Err(MapError::InvalidConfig("anchor_offset_y must be finite".into()));
        }
        if self.title_element_id.is_empty() || self.description_element_id.is_empty() {
            return Err(MapError::InvalidConfig("panel element ids must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CenterPopupConfig::default();
        assert_eq!(config.debounce_delay(), Duration::from_millis(5));
        assert_eq!(config.tolerance, 100.0);
        assert_eq!(config.anchor_offset_y, 50.0);
        assert_eq!(config.match_epsilon, 1e-6);
        assert_eq!(config.title_element_id, "title-text");
        assert_eq!(config.description_element_id, "description-text");
        assert_eq!(config.close_scope, CloseScope::CircleMarkers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            CenterPopupConfig::from_json(r#"{"tolerance": 42.5, "close_scope": "point_markers"}"#)
                .unwrap();
        assert_eq!(config.tolerance, 42.5);
        assert_eq!(config.close_scope, CloseScope::PointMarkers);
        assert_eq!(config.debounce_delay_ms, 5);
    }

    #[test]
    fn test_debounce_delay_rounds_up_to_millis() {
        let config = CenterPopupConfig::default().with_debounce_delay(Duration::from_micros(300));
        assert_eq!(config.debounce_delay_ms, 1);

        let config = CenterPopupConfig::default().with_debounce_delay(Duration::from_micros(2001));
        assert_eq!(config.debounce_delay(), Duration::from_millis(3));

        let config = CenterPopupConfig::default().with_debounce_delay(Duration::from_millis(40));
        assert_eq!(config.debounce_delay_ms, 40);

        let config = CenterPopupConfig::default().with_debounce_delay(Duration::ZERO);
        assert_eq!(config.debounce_delay_ms, 0);

        let config = CenterPopupConfig::default().with_debounce_delay(Duration::MAX);
        assert_eq!(config.debounce_delay_ms, u64::MAX);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(CenterPopupConfig::from_json(r#"{"tolerance": -1.0}"#).is_err());
        assert!(CenterPopupConfig::from_json(r#"{"match_epsilon": 0.0}"#).is_err());
        assert!(CenterPopupConfig::from_json(r#"{"title_element_id": ""}"#).is_err());
        assert!(CenterPopupConfig::from_json("not json").is_err());
    }
}

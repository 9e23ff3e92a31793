//! Separation standards and horizon configuration for detection.

use serde::{Deserialize, Serialize};

/// Configuration for one detection pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeparationStandards {
    /// Look-ahead horizon for conflict prediction in seconds
    pub lookahead_s: f64,
    /// Minimum horizontal separation in nautical miles
    pub horizontal_sep_nm: f64,
    /// Minimum vertical separation in feet
    pub vertical_sep_ft: f64,
}

impl Default for SeparationStandards {
    fn default() -> Self {
        // En-route radar separation minima.
        Self {
            lookahead_s: 120.0,
            horizontal_sep_nm: 5.0,
            vertical_sep_ft: 1000.0,
        }
    }
}

/// Rejected detection parameters.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("look-ahead horizon must be a positive finite number of seconds, got {0}")]
    InvalidLookahead(f64),
    #[error("horizontal separation minimum must be positive and finite, got {0} NM")]
    InvalidHorizontalSeparation(f64),
    #[error("vertical separation minimum must be positive and finite, got {0} ft")]
    InvalidVerticalSeparation(f64),
}

impl SeparationStandards {
    /// Check that all parameters are positive and finite.
    ///
    /// Valid parameters pass through unchanged; detection results are
    /// identical with or without this check.
    pub fn validate(&self) -> Result<(), RulesError> {
        if !self.lookahead_s.is_finite() || self.lookahead_s <= 0.0 {
            return Err(RulesError::InvalidLookahead(self.lookahead_s));
        }
        if !self.horizontal_sep_nm.is_finite() || self.horizontal_sep_nm <= 0.0 {
            return Err(RulesError::InvalidHorizontalSeparation(
                self.horizontal_sep_nm,
            ));
        }
        if !self.vertical_sep_ft.is_finite() || self.vertical_sep_ft <= 0.0 {
            return Err(RulesError::InvalidVerticalSeparation(self.vertical_sep_ft));
        }
        Ok(())
    }
}

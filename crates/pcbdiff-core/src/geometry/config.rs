use serde::{Deserialize, Serialize};

use crate::errors::{PcbDiffError, Result};

/// Pixel constants for rendering a layout
///
/// Footprint size is fixed in screen pixels and does not follow the zoom
/// scale, so boxes and labels stay legible at any fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Blank border kept on every side of the fitted layout
    pub margin_px: f64,
    pub footprint_width_px: f64,
    pub footprint_height_px: f64,
    /// Distance between the footprint edge and its label anchor
    pub label_gap_px: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            margin_px: 100.0,
            footprint_width_px: 60.0,
            footprint_height_px: 20.0,
            label_gap_px: 6.0,
        }
    }
}

impl GeometryConfig {
    /// # Errors
    ///
    /// Returns `InvalidGeometryConfig` for non-finite values, a non-positive
    /// footprint or a negative margin/gap.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("margin_px", self.margin_px),
            ("footprint_width_px", self.footprint_width_px),
            ("footprint_height_px", self.footprint_height_px),
            ("label_gap_px", self.label_gap_px),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PcbDiffError::InvalidGeometryConfig {
                reason: format!("{} must be finite", name),
            });
        }
        if self.footprint_width_px <= 0.0 || self.footprint_height_px <= 0.0 {
            return Err(PcbDiffError::InvalidGeometryConfig {
                reason: "footprint dimensions must be positive".to_string(),
            });
        }
        if self.margin_px < 0.0 || self.label_gap_px < 0.0 {
            return Err(PcbDiffError::InvalidGeometryConfig {
                reason: "margin and label gap cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

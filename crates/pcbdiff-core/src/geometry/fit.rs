use serde::{Deserialize, Serialize};

use super::config::GeometryConfig;
use super::primitives::{Point, Rect, Viewport};

/// Uniform scale-and-translate mapping raw coordinates to screen pixels
///
/// One transform is derived for the whole store so relative geometry is
/// preserved: `screen = (raw - origin) * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    /// Fit raw extents into a viewport with the configured margin
    ///
    /// An axis with zero raw extent (a single column or row of parts)
    /// contributes a factor of 1. When the viewport is narrower than twice the
    /// margin, the margin shrinks to a quarter of the smaller side.
    pub fn compute(bounds: Option<Rect>, viewport: Viewport, config: &GeometryConfig) -> Self {
        let margin = effective_margin(viewport, config);
        let Some(bounds) = bounds else {
            return Self {
                scale: 1.0,
                origin_x: 0.0,
                origin_y: 0.0,
                offset_x: margin,
                offset_y: margin,
            };
        };

        // Halved extents stay finite for any finite coordinates
        let axis_factor = |available: f64, half_raw: f64| {
            if half_raw > 0.0 {
                (available / 2.0 / half_raw).min(f64::MAX)
            } else {
                1.0
            }
        };
        let sx = axis_factor(
            viewport.width() - 2.0 * margin,
            half_extent(bounds.min_x, bounds.max_x),
        );
        let sy = axis_factor(
            viewport.height() - 2.0 * margin,
            half_extent(bounds.min_y, bounds.max_y),
        );

        Self {
            scale: sx.min(sy),
            origin_x: bounds.min_x,
            origin_y: bounds.min_y,
            offset_x: margin,
            offset_y: margin,
        }
    }

    /// Map a raw coordinate to screen pixels
    ///
    /// Works on halved distances so board extents near `f64::MAX` cannot
    /// overflow; the result is identical to `(x - origin) * scale + offset`
    /// everywhere that expression is finite.
    pub fn project(&self, x: f64, y: f64) -> Point {
        Point::new(
            (half_extent(self.origin_x, x) * self.scale) * 2.0 + self.offset_x,
            (half_extent(self.origin_y, y) * self.scale) * 2.0 + self.offset_y,
        )
    }
}

fn half_extent(min: f64, max: f64) -> f64 {
    max / 2.0 - min / 2.0
}

fn effective_margin(viewport: Viewport, config: &GeometryConfig) -> f64 {
    let cap = viewport.width().min(viewport.height()) / 4.0;
    config.margin_px.min(cap)
}

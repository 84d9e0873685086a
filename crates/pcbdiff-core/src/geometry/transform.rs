use serde::{Deserialize, Serialize};

use super::config::GeometryConfig;
use super::fit::FitTransform;
use super::primitives::{Point, Rect};
use crate::model::Record;

/// Screen placement of one component
///
/// The footprint is `screen_width` x `screen_height` pixels centred on
/// `(screen_x, screen_y)` and rotated by `rotation_degrees` about that
/// centre. Screen Y grows downward, so positive angles turn clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTransform {
    pub reference_id: String,
    pub screen_x: f64,
    pub screen_y: f64,
    pub screen_width: f64,
    pub screen_height: f64,
    pub rotation_degrees: f64,
    /// Footprint corners, clockwise from the unrotated top-left
    pub corners: [Point; 4],
    /// Axis-aligned box around the rotated footprint
    pub bounds: Rect,
    pub label_anchor: Point,
    pub label: String,
}

impl ComponentTransform {
    /// Place one record under a fit transform
    ///
    /// Pure in the record fields, the fit and the config.
    pub fn for_record(record: &Record, fit: &FitTransform, config: &GeometryConfig) -> Self {
        let centre = fit.project(record.x, record.y);
        let w = config.footprint_width_px;
        let h = config.footprint_height_px;

        let corners = rotated_corners(centre, w, h, record.angle);
        // corners is never empty
        let bounds = Rect::enclosing(&corners).unwrap_or(Rect::new(centre.x, centre.y, centre.x, centre.y));

        Self {
            reference_id: record.reference_id.clone(),
            screen_x: centre.x,
            screen_y: centre.y,
            screen_width: w,
            screen_height: h,
            rotation_degrees: record.angle,
            corners,
            bounds,
            label_anchor: label_anchor(centre, record.angle, config),
            label: record.label(),
        }
    }
}

fn rotated_corners(centre: Point, w: f64, h: f64, angle: f64) -> [Point; 4] {
    let (sin, cos) = angle.to_radians().sin_cos();
    let (hw, hh) = (w / 2.0, h / 2.0);
    [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| {
        Point::new(
            centre.x + dx * cos - dy * sin,
            centre.y + dx * sin + dy * cos,
        )
    })
}

/// Label sits below the footprint; the drop depends on which side faces down
fn label_anchor(centre: Point, angle: f64, config: &GeometryConfig) -> Point {
    let a = angle.rem_euclid(360.0);
    let horizontal = !(45.0..315.0).contains(&a) || (135.0..225.0).contains(&a);
    let half_extent = if horizontal {
        config.footprint_height_px / 2.0
    } else {
        config.footprint_width_px / 2.0
    };
    Point::new(centre.x, centre.y + half_extent + config.label_gap_px)
}

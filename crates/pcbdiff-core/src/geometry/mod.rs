//! Geometry Engine: raw placement coordinates to screen transforms
//!
//! A single [`FitTransform`] is derived from the extents of the whole store
//! and applied to every record, so a larger viewport only rescales and
//! translates the layout. Footprints have a fixed pixel size that does not
//! follow the zoom.

pub mod cache;
pub mod config;
pub mod engine;
pub mod fit;
pub mod primitives;
pub mod transform;

pub use cache::{CacheStats, GeometryCache};
pub use config::GeometryConfig;
pub use engine::{compute_layout_geometry, LayoutGeometry};
pub use fit::FitTransform;
pub use primitives::{Point, Rect, Viewport};
pub use transform::ComponentTransform;

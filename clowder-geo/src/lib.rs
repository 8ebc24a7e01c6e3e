//! Geospatial query engine
//!
//! Bounding-box filtering over located items: `Point`, `BoundingBox`,
//! and the order-preserving in-memory filter used by both the API layer
//! and the storage pushdown path.

pub mod bbox;
pub mod error;

pub use bbox::{filter_by_box, BoundingBox, Locatable, Point};
pub use error::GeoError;

//! Geospatial error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeoError {
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),
}

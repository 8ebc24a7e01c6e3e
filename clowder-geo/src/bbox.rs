//! Points, bounding boxes, and the closed-box filter

use serde::{Deserialize, Serialize};

use crate::GeoError;

/// A WGS84 coordinate pair.
///
/// Fields are named rather than positional: storage backends commonly encode
/// points as `[longitude, latitude]` arrays, and that translation belongs at
/// the transport/storage boundary, never inside the filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// An axis-aligned rectangle in latitude/longitude space.
///
/// Both corners must be valid points and `south_west` must not exceed
/// `north_east` on either axis. Boxes wrapping the antimeridian are not
/// supported and are rejected by [`BoundingBox::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south_west: Point,
    pub north_east: Point,
}

impl BoundingBox {
    pub fn new(south_west: Point, north_east: Point) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Check the box invariants, naming the violated bound on failure.
    pub fn validate(&self) -> Result<(), GeoError> {
        for (corner, point) in [("south-west", &self.south_west), ("north-east", &self.north_east)]
        {
            if !point.latitude.is_finite() || !point.longitude.is_finite() {
                return Err(GeoError::InvalidBoundingBox(format!(
                    "{} corner has a non-finite coordinate",
                    corner
                )));
            }
            if !(-90.0..=90.0).contains(&point.latitude) {
                return Err(GeoError::InvalidBoundingBox(format!(
                    "{} latitude {} is outside [-90, 90]",
                    corner, point.latitude
                )));
            }
            if !(-180.0..=180.0).contains(&point.longitude) {
                return Err(GeoError::InvalidBoundingBox(format!(
                    "{} longitude {} is outside [-180, 180]",
                    corner, point.longitude
                )));
            }
        }
        if self.south_west.latitude > self.north_east.latitude {
            return Err(GeoError::InvalidBoundingBox(format!(
                "south-west latitude {} exceeds north-east latitude {}",
                self.south_west.latitude, self.north_east.latitude
            )));
        }
        if self.south_west.longitude > self.north_east.longitude {
            return Err(GeoError::InvalidBoundingBox(format!(
                "south-west longitude {} exceeds north-east longitude {}",
                self.south_west.longitude, self.north_east.longitude
            )));
        }
        Ok(())
    }

    /// Closed-box containment: points on any edge or corner are inside.
    pub fn contains(&self, point: &Point) -> bool {
        self.south_west.latitude <= point.latitude
            && point.latitude <= self.north_east.latitude
            && self.south_west.longitude <= point.longitude
            && point.longitude <= self.north_east.longitude
    }
}

/// Anything carrying a point location, so the filter stays independent of
/// the concrete resource type.
pub trait Locatable {
    fn location(&self) -> Point;
}

/// Filter `items` down to those whose location lies within `bbox`.
///
/// The result is an order-preserving subsequence of the input. An invalid
/// box is an error up front; no partial result is ever produced.
pub fn filter_by_box<T: Locatable>(
    items: Vec<T>,
    bbox: &BoundingBox,
) -> Result<Vec<T>, GeoError> {
    bbox.validate()?;
    Ok(items
        .into_iter()
        .filter(|item| bbox.contains(&item.location()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Pin {
        name: &'static str,
        at: Point,
    }

    impl Locatable for Pin {
        fn location(&self) -> Point {
            self.at
        }
    }

    fn pin(name: &'static str, lat: f64, lon: f64) -> Pin {
        Pin {
            name,
            at: Point::new(lat, lon),
        }
    }

    fn manhattan_box() -> BoundingBox {
        BoundingBox::new(Point::new(40.71, -74.01), Point::new(40.73, -73.93))
    }

    #[test]
    fn test_filter_keeps_only_points_inside() {
        let pins = vec![pin("inside", 40.72, -73.97), pin("north", 41.00, -73.97)];

        let filtered = filter_by_box(pins, &manhattan_box()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "inside");
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let pins = vec![
            pin("a", 40.72, -73.95),
            pin("out", 0.0, 0.0),
            pin("b", 40.71, -74.01),
            pin("c", 40.73, -73.93),
        ];

        let filtered = filter_by_box(pins, &manhattan_box()).unwrap();
        let names: Vec<_> = filtered.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_edges_and_corners_are_inside() {
        let bbox = manhattan_box();
        // Edges
        assert!(bbox.contains(&Point::new(40.73, -73.97)));
        assert!(bbox.contains(&Point::new(40.71, -73.97)));
        assert!(bbox.contains(&Point::new(40.72, -74.01)));
        assert!(bbox.contains(&Point::new(40.72, -73.93)));
        // Corners
        assert!(bbox.contains(&Point::new(40.71, -74.01)));
        assert!(bbox.contains(&Point::new(40.73, -73.93)));
        // Just outside
        assert!(!bbox.contains(&Point::new(40.7099, -73.97)));
        assert!(!bbox.contains(&Point::new(40.72, -73.9299)));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let bbox = manhattan_box();
        let pins = vec![
            pin("a", 40.72, -73.95),
            pin("out", 50.0, 10.0),
            pin("b", 40.71, -73.94),
        ];

        let once = filter_by_box(pins, &bbox).unwrap();
        let twice = filter_by_box(once.clone(), &bbox).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_degenerate_point_box_matches_exact_location_only() {
        let at = Point::new(40.72, -73.97);
        let bbox = BoundingBox::new(at, at);
        let pins = vec![
            pin("exact", 40.72, -73.97),
            pin("near", 40.7200001, -73.97),
            pin("exact2", 40.72, -73.97),
        ];

        let filtered = filter_by_box(pins, &bbox).unwrap();
        let names: Vec<_> = filtered.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["exact", "exact2"]);
    }

    #[test]
    fn test_inverted_latitude_is_rejected() {
        let bbox = BoundingBox::new(Point::new(40.73, -74.01), Point::new(40.71, -73.93));
        let err = filter_by_box(vec![pin("a", 40.72, -73.97)], &bbox).unwrap_err();
        let GeoError::InvalidBoundingBox(msg) = err;
        assert!(msg.contains("latitude"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_inverted_longitude_is_rejected() {
        let bbox = BoundingBox::new(Point::new(40.71, -73.93), Point::new(40.73, -74.01));
        let err = bbox.validate().unwrap_err();
        let GeoError::InvalidBoundingBox(msg) = err;
        assert!(msg.contains("longitude"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_out_of_range_and_non_finite_corners_are_rejected() {
        let too_north = BoundingBox::new(Point::new(40.0, -74.0), Point::new(90.5, -73.0));
        assert!(too_north.validate().is_err());

        let nan = BoundingBox::new(Point::new(f64::NAN, -74.0), Point::new(41.0, -73.0));
        let GeoError::InvalidBoundingBox(msg) = nan.validate().unwrap_err();
        assert!(msg.contains("non-finite"), "unexpected message: {}", msg);

        let wrapped = BoundingBox::new(Point::new(40.0, 179.0), Point::new(41.0, -179.0));
        assert!(wrapped.validate().is_err());
    }
}

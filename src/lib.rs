//! # Segment Explorer
//!
//! Find Strava segments whose end point lies in a band around a reference corner.
//!
//! This library provides:
//! - Great-circle destination projection from a point, bearing and distance
//! - A law-of-cosines band test for "does this point lie between two corners"
//! - A multi-radius sweep that queries bounding boxes, filters and deduplicates segments
//!
//! ## Features
//!
//! - **`http`** - Enable the Strava HTTP client
//! - **`cli`** - Build the `segment-explorer` command-line tool
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use segment_explorer::{geo_utils, Bearing, Coordinate};
//!
//! let corner = Coordinate::new(37.512844, -121.881369);
//! let limit = geo_utils::project(&corner, 1.0, Bearing::SouthWest);
//!
//! // A point halfway between the corner and the limit is inside the band
//! let mid = Coordinate::new(
//!     (corner.latitude + limit.latitude) / 2.0,
//!     (corner.longitude + limit.longitude) / 2.0,
//! );
//! assert!(geo_utils::contains(&mid, &corner, &limit));
//! ```

use std::fmt;
use std::str::FromStr;

pub mod error;
pub use error::{CollaboratorError, ExploreError, Result};

pub mod geo_utils;
pub use geo_utils::{contains, project};

pub mod matcher;
pub use matcher::filter_candidates;

pub mod explorer;
pub use explorer::{
    explore, ExploreConfig, ExploreResult, SegmentLookup, SegmentSearch, SegmentSet,
    MAX_DISTANCE_KM, MAX_WITHIN_KM,
};

// HTTP client for the Strava API
#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{Athlete, StravaClient, StravaError};

// ============================================================================
// Core Types
// ============================================================================

/// A coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use segment_explorer::Coordinate;
/// let point = Coordinate::new(37.512844, -121.881369); // Fremont, CA
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a coordinate from a `[lat, lng]` slice, as returned by the Strava API.
    ///
    /// Fails with [`ExploreError::InvalidCoordinate`] if the slice does not hold
    /// exactly two values or the values are out of range.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [lat, lng] => {
                let coord = Self::new(*lat, *lng);
                if coord.is_valid() {
                    Ok(coord)
                } else {
                    Err(ExploreError::InvalidCoordinate { latitude: *lat, longitude: *lng })
                }
            }
            _ => Err(ExploreError::InvalidCoordinate {
                latitude: values.first().copied().unwrap_or(f64::NAN),
                longitude: values.get(1).copied().unwrap_or(f64::NAN),
            }),
        }
    }

    /// Check if the coordinate has valid values.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Compass direction used to project a corner outwards.
///
/// North is 0 degrees, east 90, south 180, west 270. The two bearings are
/// 170 degrees apart, not 180, so the searched region is skewed rather than
/// a symmetric ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bearing {
    NorthEast,
    SouthWest,
}

impl Bearing {
    pub const ALL: [Bearing; 2] = [Bearing::NorthEast, Bearing::SouthWest];

    /// Compass angle in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            Bearing::NorthEast => 45.0,
            Bearing::SouthWest => 235.0,
        }
    }

    /// Truncated radian value used by the spherical reference formula.
    pub fn approx_radians(self) -> f64 {
        match self {
            Bearing::NorthEast => 0.785,
            Bearing::SouthWest => 4.101,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Bearing::NorthEast => "north_east",
            Bearing::SouthWest => "south_west",
        }
    }
}

impl FromStr for Bearing {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self> {
        Bearing::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| ExploreError::InvalidBearing(s.to_string()))
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A search rectangle given by its south-west and north-east corners.
///
/// Corners are not reordered: a sweep projecting past the reference corner
/// may hand over a box whose corners are swapped, and it is passed on as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub sw: Coordinate,
    pub ne: Coordinate,
}

impl BoundingBox {
    pub fn new(sw: Coordinate, ne: Coordinate) -> Self {
        Self { sw, ne }
    }

    /// Build bounds from a flat `[sw_lat, sw_lng, ne_lat, ne_lng]` slice.
    ///
    /// # Example
    /// ```
    /// use segment_explorer::BoundingBox;
    ///
    /// let bounds = BoundingBox::from_slice(&[10.0, 10.0, 10.2, 10.2]).unwrap();
    /// assert_eq!(bounds.ne.latitude, 10.2);
    /// assert!(BoundingBox::from_slice(&[10.0, 10.0, 10.2]).is_err());
    /// ```
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [sw_lat, sw_lng, ne_lat, ne_lng] => Ok(Self::new(
                Coordinate::new(*sw_lat, *sw_lng),
                Coordinate::new(*ne_lat, *ne_lng),
            )),
            _ => Err(ExploreError::InvalidBounds { components: values.len() }),
        }
    }

    /// Flat `[sw_lat, sw_lng, ne_lat, ne_lng]` form expected by the search service.
    pub fn to_array(&self) -> [f64; 4] {
        [self.sw.latitude, self.sw.longitude, self.ne.latitude, self.ne.longitude]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.to_array();
        write!(f, "{},{},{},{}", a, b, c, d)
    }
}

/// Strava segment identifier.
pub type SegmentId = u64;

/// Segment as returned by a bounding-box search.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub id: SegmentId,
    pub name: String,
    pub start_latlng: Option<Coordinate>,
    pub end_latlng: Option<Coordinate>,
}

/// Fully resolved segment, including the athlete's effort count.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Stable identifier, used for deduplication
    pub id: SegmentId,
    pub name: String,
    /// Start point, `None` if the service returned a malformed value
    pub start_latlng: Option<Coordinate>,
    /// End point, `None` if the service returned a malformed value
    pub end_latlng: Option<Coordinate>,
    /// Number of efforts the athlete has recorded on this segment
    pub effort_count: u64,
}

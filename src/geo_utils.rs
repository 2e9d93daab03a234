//! # Geographic Utilities
//!
//! Destination projection and band containment used by the segment sweep.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`project`] | Destination point from an origin, a bearing and a distance |
//! | [`project_spherical`] | Closed-form spherical version of [`project`], kept as a cross-check |
//! | [`contains`] | Check if a point lies in the band between two corners |
//! | [`round_to`] | Round a value to a fixed number of decimal places |
//!
//! ## Example
//!
//! ```rust
//! use segment_explorer::{geo_utils, Bearing, Coordinate};
//!
//! let origin = Coordinate::new(52.20472, 0.14056);
//! let dest = geo_utils::project(&origin, 11.0, Bearing::SouthWest);
//! assert!(dest.latitude < origin.latitude);
//! assert!(dest.longitude < origin.longitude);
//! ```
//!
//! ## Algorithm Notes
//!
//! ### Projection
//!
//! [`project`] solves the direct geodesic problem on the WGS84 ellipsoid through
//! `geo`'s [`Geodesic`] metric space. Results are rounded to
//! [`PROJECTION_DECIMALS`] places so that repeated sweeps query identical boxes.
//!
//! ### Containment
//!
//! [`contains`] works in the flat (lat, lng) plane. It is a law-of-cosines test:
//! the target is accepted when neither angle at the two corners of the triangle
//! (target, corner_a, corner_b) is obtuse. That is membership in the band
//! perpendicular to the corner_a–corner_b axis, not a rectangle test. At the
//! distances involved (under 20 km) the missing spherical correction does not matter.

use geo::{Destination, Geodesic, Point};

use crate::{Bearing, Coordinate};

/// Decimal places kept on projected coordinates.
pub const PROJECTION_DECIMALS: i32 = 4;

/// Earth radius in kilometers used by [`project_spherical`].
pub const EARTH_RADIUS_KM: f64 = 6378.1;

// =============================================================================
// Projection
// =============================================================================

/// Compute the point reached from `origin` after travelling `distance_km`
/// along `bearing`.
///
/// Negative distances are treated as zero. Output latitude and longitude are
/// rounded to [`PROJECTION_DECIMALS`] places.
///
/// # Example
///
/// ```rust
/// use segment_explorer::{geo_utils, Bearing, Coordinate};
///
/// let origin = Coordinate::new(37.512844, -121.881369);
/// let same = geo_utils::project(&origin, 0.0, Bearing::NorthEast);
/// assert!((same.latitude - origin.latitude).abs() < 1e-4);
/// assert!((same.longitude - origin.longitude).abs() < 1e-4);
/// ```
pub fn project(origin: &Coordinate, distance_km: f64, bearing: Bearing) -> Coordinate {
    let start = Point::new(origin.longitude, origin.latitude);
    let meters = distance_km.max(0.0) * 1000.0;
    let dest = Geodesic::destination(start, bearing.degrees(), meters);

    Coordinate::new(
        round_to(dest.y(), PROJECTION_DECIMALS),
        round_to(dest.x(), PROJECTION_DECIMALS),
    )
}

/// Spherical-trigonometry projection on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// Uses the truncated radian bearing from [`Bearing::approx_radians`]. It agrees
/// with [`project`] to a few meters at sweep distances and is used to cross-check it.
pub fn project_spherical(origin: &Coordinate, distance_km: f64, bearing: Bearing) -> Coordinate {
    let brng = bearing.approx_radians();
    let angular = distance_km.max(0.0) / EARTH_RADIUS_KM;
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * brng.cos()).asin();
    let lon2 = lon1
        + (brng.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    Coordinate::new(
        round_to(lat2.to_degrees(), PROJECTION_DECIMALS),
        round_to(lon2.to_degrees(), PROJECTION_DECIMALS),
    )
}

/// Round `value` to `decimals` decimal places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// =============================================================================
// Containment
// =============================================================================

/// Squared planar distance between two coordinates, in degrees².
#[inline]
fn planar_distance_sq(p1: &Coordinate, p2: &Coordinate) -> f64 {
    let dlat = p1.latitude - p2.latitude;
    let dlng = p1.longitude - p2.longitude;
    dlat * dlat + dlng * dlng
}

/// Check if `target` lies in the band between `corner_a` and `corner_b`.
///
/// With a = |corner_a corner_b|, b = |corner_b target| and c = |target corner_a|,
/// returns `a² + b² >= c² && a² + c² >= b²`. Symmetric in the two corners and
/// always true for the corners themselves. When the corners coincide every
/// target is accepted.
///
/// # Example
///
/// ```rust
/// use segment_explorer::{geo_utils, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
///
/// // Far off the axis but still between the two perpendiculars
/// assert!(geo_utils::contains(&Coordinate::new(5.0, 0.5), &a, &b));
/// // Beyond corner b along the axis
/// assert!(!geo_utils::contains(&Coordinate::new(0.0, 1.5), &a, &b));
/// ```
pub fn contains(target: &Coordinate, corner_a: &Coordinate, corner_b: &Coordinate) -> bool {
    let a2 = planar_distance_sq(corner_a, corner_b);
    let b2 = planar_distance_sq(corner_b, target);
    let c2 = planar_distance_sq(target, corner_a);

    a2 + b2 >= c2 && a2 + c2 >= b2
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_56, 4), 1.2346);
        assert_eq!(round_to(-121.881_369, 4), -121.8814);
        assert_eq!(round_to(2.0, 4), 2.0);
    }

    #[test]
    fn test_project_zero_distance() {
        let origin = Coordinate::new(37.512844, -121.881369);
        for bearing in Bearing::ALL {
            let p = project(&origin, 0.0, bearing);
            assert!(approx_eq(p.latitude, origin.latitude, 1e-4));
            assert!(approx_eq(p.longitude, origin.longitude, 1e-4));
        }
    }

    #[test]
    fn test_project_deterministic() {
        let origin = Coordinate::new(52.20472, 0.14056);
        for bearing in Bearing::ALL {
            assert_eq!(project(&origin, 7.5, bearing), project(&origin, 7.5, bearing));
        }
    }

    #[test]
    fn test_project_direction() {
        let origin = Coordinate::new(52.20472, 0.14056);

        let ne = project(&origin, 5.0, Bearing::NorthEast);
        assert!(ne.latitude > origin.latitude);
        assert!(ne.longitude > origin.longitude);

        let sw = project(&origin, 5.0, Bearing::SouthWest);
        assert!(sw.latitude < origin.latitude);
        assert!(sw.longitude < origin.longitude);
    }

    #[test]
    fn test_project_known_distance() {
        // 45 degrees at 10km: ~7.07km north, 1 degree of latitude ~111.2km
        let origin = Coordinate::new(0.0, 0.0);
        let p = project(&origin, 10.0, Bearing::NorthEast);
        assert!(approx_eq(p.latitude, 0.0639, 0.001));
        assert!(approx_eq(p.longitude, 0.0635, 0.001));
    }

    #[test]
    fn test_project_rounding() {
        let p = project(&Coordinate::new(37.512844, -121.881369), 3.3, Bearing::SouthWest);
        assert_eq!(round_to(p.latitude, 4), p.latitude);
        assert_eq!(round_to(p.longitude, 4), p.longitude);
    }

    #[test]
    fn test_project_is_not_reversible() {
        // 45 and 235 degrees are not antipodal
        let origin = Coordinate::new(37.512844, -121.881369);
        let out = project(&origin, 10.0, Bearing::NorthEast);
        let back = project(&out, 10.0, Bearing::SouthWest);
        let off = (back.latitude - origin.latitude).abs() + (back.longitude - origin.longitude).abs();
        assert!(off > 0.001, "expected a skewed return point, got {:?}", back);
    }

    #[test]
    fn test_project_matches_spherical_reference() {
        let origins = [
            Coordinate::new(37.512844, -121.881369),
            Coordinate::new(52.20472, 0.14056),
            Coordinate::new(-33.8688, 151.2093),
        ];
        for origin in &origins {
            for bearing in Bearing::ALL {
                for d in [0.0, 2.0, 10.0, 20.0] {
                    let geodesic = project(origin, d, bearing);
                    let spherical = project_spherical(origin, d, bearing);
                    assert!(
                        approx_eq(geodesic.latitude, spherical.latitude, 0.002)
                            && approx_eq(geodesic.longitude, spherical.longitude, 0.002),
                        "{:?} vs {:?} for {:?} {} {}km",
                        geodesic, spherical, origin, bearing, d
                    );
                }
            }
        }
    }

    #[test]
    fn test_project_negative_distance() {
        let origin = Coordinate::new(10.0, 10.0);
        assert_eq!(project(&origin, -3.0, Bearing::SouthWest), project(&origin, 0.0, Bearing::SouthWest));
    }

    #[test]
    fn test_contains_corners() {
        let a = Coordinate::new(37.51, -121.88);
        let b = Coordinate::new(37.49, -121.91);
        assert!(contains(&a, &a, &b));
        assert!(contains(&b, &a, &b));
    }

    #[test]
    fn test_contains_symmetric() {
        let a = Coordinate::new(10.0, 10.0);
        let b = Coordinate::new(10.2, 10.2);
        let targets = [
            Coordinate::new(10.1, 10.1),
            Coordinate::new(10.3, 10.3),
            Coordinate::new(9.9, 10.0),
            Coordinate::new(10.0, 10.4),
            Coordinate::new(11.0, 9.0),
        ];
        for t in &targets {
            assert_eq!(contains(t, &a, &b), contains(t, &b, &a), "asymmetric for {:?}", t);
        }
    }

    #[test]
    fn test_contains_band_not_rectangle() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 1.0);

        assert!(contains(&Coordinate::new(0.5, 0.5), &a, &b));
        // Outside the a-b rectangle but between the perpendiculars
        assert!(contains(&Coordinate::new(1.2, 0.0), &a, &b));
        // Past either end of the axis
        assert!(!contains(&Coordinate::new(1.5, 1.5), &a, &b));
        assert!(!contains(&Coordinate::new(-0.1, -0.1), &a, &b));
    }

    #[test]
    fn test_contains_degenerate_corners() {
        let a = Coordinate::new(1.0, 1.0);
        assert!(contains(&Coordinate::new(50.0, -50.0), &a, &a));
    }
}

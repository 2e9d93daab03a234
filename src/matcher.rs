//! Filter search results down to segments that end inside the band.
//!
//! The band for one query runs from the box's reference corner to a limit
//! point projected `within_km` further along the sweep bearing:
//!
//! - `SouthWest` sweeps project from the north-east corner
//! - `NorthEast` sweeps project from the south-west corner
//!
//! A candidate is kept when its end point passes [`contains`] against the
//! reference corner and the limit point.

use log::{debug, info};

use crate::geo_utils::{contains, project};
use crate::{Bearing, BoundingBox, Coordinate, Segment};

/// Reference corner and limit point for a box searched along `bearing`.
///
/// Returned as the `(corner_a, corner_b)` pair handed to [`contains`]. For a
/// south-west sweep the limit comes first, for a north-east sweep the
/// reference corner does. The limit is rounded by [`project`] but the corner
/// is passed through unrounded, so for a corner with more than 4 decimals the
/// band is offset by up to ~5 m and a zero `within_km` still leaves a tiny band.
pub fn band_for(bounds: &BoundingBox, within_km: f64, bearing: Bearing) -> (Coordinate, Coordinate) {
    match bearing {
        Bearing::SouthWest => {
            let limit = project(&bounds.ne, within_km, bearing);
            (limit, bounds.ne)
        }
        Bearing::NorthEast => {
            let limit = project(&bounds.sw, within_km, bearing);
            (bounds.sw, limit)
        }
    }
}

/// Keep the candidates whose end point lies between the reference corner of
/// `bounds` and the limit projected `within_km` along `bearing`.
///
/// Candidates without a usable end point are rejected. Input order is preserved.
pub fn filter_candidates(
    candidates: Vec<Segment>,
    bounds: &BoundingBox,
    within_km: f64,
    bearing: Bearing,
) -> Vec<Segment> {
    let (corner_a, corner_b) = band_for(bounds, within_km, bearing);
    debug!("[Matcher] {} band {} -> {}", bearing, corner_a, corner_b);

    candidates
        .into_iter()
        .filter(|segment| match segment.end_latlng {
            Some(end) if end.is_valid() => {
                let keep = contains(&end, &corner_a, &corner_b);
                if keep {
                    info!("[Matcher] Adding segment {}/{} end {}", segment.id, segment.name, end);
                } else {
                    debug!("[Matcher] Skipping segment {}/{} end {}", segment.id, segment.name, end);
                }
                keep
            }
            _ => {
                debug!("[Matcher] Skipping segment {}/{}: no usable end point", segment.id, segment.name);
                false
            }
        })
        .collect()
}

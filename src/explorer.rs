//! Multi-radius segment sweep.
//!
//! [`explore`] runs two sweeps from a reference corner. The south-west sweep
//! projects progressively farther south-west corners and pairs each with the
//! reference as north-east corner; the north-east sweep does the opposite.
//! Every box is searched, each result is resolved to a full [`Segment`],
//! filtered with [`filter_candidates`] and merged into a [`SegmentSet`].
//!
//! Everything runs sequentially on the caller's thread. Collaborator errors
//! abort the whole call; no partial result is returned.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::error::{CollaboratorError, ExploreError, Result};
use crate::geo_utils::project;
use crate::matcher::filter_candidates;
use crate::{Bearing, BoundingBox, Coordinate, Segment, SegmentId, SegmentSummary};

/// Upper bound on the sweep distance, in kilometers.
pub const MAX_DISTANCE_KM: u32 = 20;

/// Upper bound on the band width, in kilometers.
pub const MAX_WITHIN_KM: f64 = 0.5;

// ============================================================================
// Collaborators
// ============================================================================

/// Bounding-box segment search.
pub trait SegmentSearch {
    /// Return the segments found inside `bounds` for `activity_type`.
    fn search(
        &self,
        bounds: &BoundingBox,
        activity_type: &str,
    ) -> std::result::Result<Vec<SegmentSummary>, CollaboratorError>;
}

/// Segment detail lookup.
pub trait SegmentLookup {
    /// Resolve a segment by id. `Ok(None)` means the segment does not exist.
    fn lookup(&self, id: SegmentId) -> std::result::Result<Option<Segment>, CollaboratorError>;
}

// ============================================================================
// Configuration
// ============================================================================

/// Sweep parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreConfig {
    /// First sweep distance from the reference corner.
    /// Default: 5 km. Reset to 0 when greater than `distance_end_km`.
    pub distance_start_km: u32,

    /// Upper bound of the sweep, queried only when a step lands on it.
    /// Default: 10 km, capped at [`MAX_DISTANCE_KM`].
    pub distance_end_km: u32,

    /// How far past the reference corner a segment may end.
    /// Default: 1.0 km, capped at [`MAX_WITHIN_KM`]. Must be finite and non-negative.
    pub within_km: f64,

    /// Distance between sweep steps. Default: 2 km
    pub step_km: u32,

    /// Activity type passed to the search service. Default: "running"
    pub activity_type: String,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            distance_start_km: 5,
            distance_end_km: 10,
            within_km: 1.0,
            step_km: 2,
            activity_type: "running".to_string(),
        }
    }
}

impl ExploreConfig {
    /// Apply the distance and band limits.
    ///
    /// Out-of-range distances are adjusted, not rejected. A zero step or a
    /// negative or non-finite band width fails.
    pub fn clamped(&self) -> Result<Self> {
        if self.step_km == 0 {
            return Err(ExploreError::InvalidStep);
        }
        // Negative and NaN widths project onto the corner, which accepts every segment
        if !(self.within_km.is_finite() && self.within_km >= 0.0) {
            return Err(ExploreError::InvalidWithin(self.within_km));
        }

        let mut config = self.clone();
        if config.distance_end_km > MAX_DISTANCE_KM {
            warn!(
                "[Explorer] Distance {}km too high for segment exploration, using {}km",
                config.distance_end_km, MAX_DISTANCE_KM
            );
            config.distance_end_km = MAX_DISTANCE_KM;
        }
        if config.distance_start_km > config.distance_end_km {
            warn!(
                "[Explorer] Distance start {}km is past end {}km, starting from 0",
                config.distance_start_km, config.distance_end_km
            );
            config.distance_start_km = 0;
        }
        if config.within_km > MAX_WITHIN_KM {
            warn!(
                "[Explorer] Range {}km too high from segment end, using {}km",
                config.within_km, MAX_WITHIN_KM
            );
            config.within_km = MAX_WITHIN_KM;
        }
        Ok(config)
    }

    /// Sweep distances from `distance_start_km` in steps of `step_km`.
    ///
    /// `distance_end_km` is included only when `(end - start) % step == 0`.
    pub fn distances(&self) -> impl Iterator<Item = u32> {
        (self.distance_start_km..=self.distance_end_km).step_by(self.step_km.max(1) as usize)
    }
}

// ============================================================================
// Accumulator
// ============================================================================

/// Unique segments in first-seen order.
#[derive(Debug, Default)]
pub struct SegmentSet {
    segments: Vec<Segment>,
    seen: HashSet<SegmentId>,
}

impl SegmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment unless one with the same id is already present.
    ///
    /// Returns `true` if the segment was added.
    pub fn insert(&mut self, segment: Segment) -> bool {
        if !self.seen.insert(segment.id) {
            return false;
        }
        self.segments.push(segment);
        true
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.seen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Finish accumulation and total the effort counts.
    pub fn into_result(self) -> ExploreResult {
        let total_efforts = self.segments.iter().map(|s| s.effort_count).sum();
        ExploreResult { segments: self.segments, total_efforts }
    }
}

/// Outcome of [`explore`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreResult {
    /// Matched segments, deduplicated, in first-seen order
    pub segments: Vec<Segment>,
    /// Sum of effort counts over `segments`
    pub total_efforts: u64,
}

impl ExploreResult {
    /// `(name, effort_count)` for every matched segment, in result order.
    pub fn effort_breakdown(&self) -> Vec<(&str, u64)> {
        self.segments.iter().map(|s| (s.name.as_str(), s.effort_count)).collect()
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Box searched at one sweep step.
///
/// The moving corner is projected from `origin`; the reference stays fixed.
pub fn sweep_bounds(origin: &Coordinate, distance_km: u32, bearing: Bearing) -> BoundingBox {
    let moving = project(origin, distance_km as f64, bearing);
    match bearing {
        Bearing::SouthWest => BoundingBox::new(moving, *origin),
        Bearing::NorthEast => BoundingBox::new(*origin, moving),
    }
}

/// Sweep outwards from `origin` and collect the segments that end in the band.
///
/// Runs a south-west sweep followed by a north-east sweep over
/// `config.distances()` after applying [`ExploreConfig::clamped`]. Segments
/// already collected are not looked up or filtered again.
///
/// # Errors
///
/// [`ExploreError::InvalidStep`] for a zero step,
/// [`ExploreError::InvalidWithin`] for a negative or non-finite band width, and
/// [`ExploreError::Collaborator`] for the first search or lookup failure.
pub fn explore<S, L>(
    search: &S,
    lookup: &L,
    origin: &Coordinate,
    config: &ExploreConfig,
) -> Result<ExploreResult>
where
    S: SegmentSearch + ?Sized,
    L: SegmentLookup + ?Sized,
{
    let config = config.clamped()?;
    let mut found = SegmentSet::new();

    info!(
        "[Explorer] Exploring from {} over {}..={}km every {}km, within {}km",
        origin, config.distance_start_km, config.distance_end_km, config.step_km, config.within_km
    );

    for bearing in [Bearing::SouthWest, Bearing::NorthEast] {
        for distance in config.distances() {
            let bounds = sweep_bounds(origin, distance, bearing);
            info!("[Explorer] {} sweep at {}km: bounds {}", bearing, distance, bounds);

            let summaries = search
                .search(&bounds, &config.activity_type)
                .map_err(ExploreError::Collaborator)?;

            let mut candidates = Vec::with_capacity(summaries.len());
            for summary in summaries {
                if found.contains(summary.id) {
                    continue;
                }
                match lookup.lookup(summary.id).map_err(ExploreError::Collaborator)? {
                    Some(segment) => candidates.push(segment),
                    None => debug!("[Explorer] Segment {} not found, skipping", summary.id),
                }
            }

            for segment in filter_candidates(candidates, &bounds, config.within_km, bearing) {
                found.insert(segment);
            }
        }
    }

    let result = found.into_result();
    info!(
        "[Explorer] Found {} segments, {} efforts",
        result.segments.len(),
        result.total_efforts
    );
    Ok(result)
}

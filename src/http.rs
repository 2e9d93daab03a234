//! HTTP client for the Strava segments API.
//!
//! [`StravaClient`] implements [`SegmentSearch`] and [`SegmentLookup`] on top
//! of an async `reqwest` client. Calls block on a private single-threaded
//! tokio runtime, so the sweep stays synchronous.
//!
//! Requests are not retried. A non-success status other than 404 is returned
//! as [`StravaError::Status`] and aborts the sweep.

use std::time::{Duration, Instant};

use log::{debug, info};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

use crate::error::CollaboratorError;
use crate::explorer::{SegmentLookup, SegmentSearch};
use crate::{BoundingBox, Coordinate, Segment, SegmentId, SegmentSummary};

/// Default Strava API root.
pub const DEFAULT_BASE_URL: &str = "https://www.strava.com/api/v3";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors from the Strava HTTP layer.
#[derive(Error, Debug)]
pub enum StravaError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("{0} not found")]
    NotFound(String),
}

/// Authenticated athlete.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Athlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
}

/// `/segments/explore` response
#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    segments: Vec<ApiSegmentSummary>,
}

#[derive(Debug, Deserialize)]
struct ApiSegmentSummary {
    id: SegmentId,
    #[serde(default)]
    name: String,
    start_latlng: Option<Vec<f64>>,
    end_latlng: Option<Vec<f64>>,
}

/// `/segments/{id}` response
#[derive(Debug, Deserialize)]
struct ApiSegment {
    id: SegmentId,
    #[serde(default)]
    name: String,
    start_latlng: Option<Vec<f64>>,
    end_latlng: Option<Vec<f64>>,
    athlete_segment_stats: Option<ApiAthleteStats>,
}

#[derive(Debug, Deserialize)]
struct ApiAthleteStats {
    #[serde(default)]
    effort_count: u64,
}

/// Malformed or empty lat/lng arrays become `None`.
fn to_coordinate(values: Option<Vec<f64>>) -> Option<Coordinate> {
    values.and_then(|v| Coordinate::from_slice(&v).ok())
}

impl From<ApiSegmentSummary> for SegmentSummary {
    fn from(api: ApiSegmentSummary) -> Self {
        Self {
            id: api.id,
            name: api.name,
            start_latlng: to_coordinate(api.start_latlng),
            end_latlng: to_coordinate(api.end_latlng),
        }
    }
}

impl From<ApiSegment> for Segment {
    fn from(api: ApiSegment) -> Self {
        Self {
            id: api.id,
            name: api.name,
            start_latlng: to_coordinate(api.start_latlng),
            end_latlng: to_coordinate(api.end_latlng),
            effort_count: api.athlete_segment_stats.map_or(0, |s| s.effort_count),
        }
    }
}

/// Blocking Strava client.
pub struct StravaClient {
    client: Client,
    auth_header: String,
    base_url: String,
    runtime: Runtime,
}

impl StravaClient {
    /// Create a client for the public Strava API with the given access token.
    pub fn new(access_token: &str) -> Result<Self, StravaError> {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    /// Create a client against a different API root.
    pub fn with_base_url(access_token: &str, base_url: &str) -> Result<Self, StravaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(Self {
            client,
            auth_header: format!("Bearer {}", access_token),
            base_url: base_url.trim_end_matches('/').to_string(),
            runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Segments inside `bounds` for `activity_type`.
    pub fn explore_segments(
        &self,
        bounds: &BoundingBox,
        activity_type: &str,
    ) -> Result<Vec<SegmentSummary>, StravaError> {
        let query = [
            ("bounds", bounds.to_string()),
            ("activity_type", activity_type.to_string()),
        ];
        let response: Option<ExploreResponse> =
            self.runtime.block_on(self.get_json("/segments/explore", &query))?;
        let segments: Vec<SegmentSummary> = response
            .map(|r| r.segments.into_iter().map(SegmentSummary::from).collect())
            .unwrap_or_default();

        info!("[StravaClient] {} segments in {}", segments.len(), bounds);
        Ok(segments)
    }

    /// Segment details, or `None` if Strava has no segment with this id.
    pub fn segment(&self, id: SegmentId) -> Result<Option<Segment>, StravaError> {
        let path = format!("/segments/{}", id);
        let response: Option<ApiSegment> = self.runtime.block_on(self.get_json(&path, &[]))?;
        Ok(response.map(Segment::from))
    }

    /// The athlete the access token belongs to.
    pub fn athlete(&self) -> Result<Athlete, StravaError> {
        self.runtime
            .block_on(self.get_json("/athlete", &[]))?
            .ok_or_else(|| StravaError::NotFound("athlete".to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, StravaError> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let resp = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            debug!("[StravaClient] GET {} -> 404 after {:?}", url, start.elapsed());
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StravaError::Status { status, url });
        }

        let body = resp.json::<T>().await?;
        debug!("[StravaClient] GET {} -> {} in {:?}", url, status, start.elapsed());
        Ok(Some(body))
    }
}

impl SegmentSearch for StravaClient {
    fn search(
        &self,
        bounds: &BoundingBox,
        activity_type: &str,
    ) -> Result<Vec<SegmentSummary>, CollaboratorError> {
        self.explore_segments(bounds, activity_type).map_err(Into::into)
    }
}

impl SegmentLookup for StravaClient {
    fn lookup(&self, id: SegmentId) -> Result<Option<Segment>, CollaboratorError> {
        self.segment(id).map_err(Into::into)
    }
}

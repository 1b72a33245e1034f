use serde::{Deserialize, Serialize};

use crate::models::domain::{Job, JobMatch};
use crate::core::distance::round_km;

/// A visible job on the wire; `distanceKm` is rounded to one decimal for
/// display and omitted entirely for provider views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibleJob {
    #[serde(flatten)]
    pub job: Job,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<JobMatch> for VisibleJob {
    fn from(m: JobMatch) -> Self {
        Self {
            job: m.job,
            distance_km: m.distance_km.map(round_km),
        }
    }
}

/// Response for the visible-jobs query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibleJobsResponse {
    pub matches: Vec<VisibleJob>,
    #[serde(rename = "totalJobs")]
    pub total_jobs: usize,
    /// Explanatory text for empty student results (e.g. no location set);
    /// never an error condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for the catalog list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total: usize,
}

/// Response for the reverse geocode endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseGeocodeResponse {
    pub address: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

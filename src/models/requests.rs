use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Coordinates;

/// Request to create a job posting
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[validate(length(min = 1))]
    #[serde(alias = "company_name", rename = "companyName")]
    pub company_name: String,
    #[validate(range(min = 0.0))]
    pub budget: f64,
    #[serde(alias = "job_type", rename = "type")]
    pub job_type: String,
    #[validate(length(min = 1))]
    pub location: String,
}

/// Partial update of a job; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJobRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(alias = "company_name", rename = "companyName", default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(alias = "job_type", rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub status: Option<crate::models::domain::JobStatus>,
}

/// Request to apply to a job (applicant id comes from the bearer token)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(alias = "cover_letter", rename = "coverLetter", default)]
    pub cover_letter: Option<String>,
}

/// Request to move an application out of the pending state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationRequest {
    pub status: crate::models::domain::ApplicationStatus,
}

/// Request for the role-aware visible-jobs query
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VisibleJobsRequest {
    pub role: crate::models::domain::Role,
    #[serde(default)]
    pub search: String,
    /// "all", "active" or "completed"; only meaningful for providers
    #[serde(alias = "status_filter", rename = "statusFilter", default = "default_status_filter")]
    pub status_filter: String,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[validate(range(min = 0.001))]
    #[serde(alias = "radius_km", rename = "radiusKm", default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_status_filter() -> String {
    "all".to_string()
}

fn default_radius_km() -> f64 {
    10.0
}

/// Query string filters for the catalog list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Query string for the reverse geocode endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeQuery {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_jobs_request_defaults() {
        let req: VisibleJobsRequest =
            serde_json::from_str(r#"{"role": "student"}"#).expect("minimal request parses");
        assert_eq!(req.status_filter, "all");
        assert_eq!(req.radius_km, 10.0);
        assert!(req.location.is_none());
        assert!(req.search.is_empty());
    }

    #[test]
    fn test_visible_jobs_request_rejects_nonpositive_radius() {
        use validator::Validate;

        let req: VisibleJobsRequest =
            serde_json::from_str(r#"{"role": "student", "radiusKm": 0.0}"#).unwrap();
        assert!(req.validate().is_err());

        let req: VisibleJobsRequest =
            serde_json::from_str(r#"{"role": "student", "radiusKm": -5.0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_wire_aliases() {
        let req: CreateJobRequest = serde_json::from_str(
            r#"{"title": "Tutor", "companyName": "Acme", "budget": 50, "type": "remote", "location": "London"}"#,
        )
        .unwrap();
        assert_eq!(req.job_type, "remote");
        assert_eq!(req.company_name, "Acme");
    }
}

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that the point lies on the globe
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Lifecycle state of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Completed,
}

/// Lifecycle state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Transitions are one-way: a pending application moves to exactly one
    /// of the later states and never returns.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (
                ApplicationStatus::Pending,
                ApplicationStatus::Reviewed
                    | ApplicationStatus::Accepted
                    | ApplicationStatus::Rejected
            )
        )
    }
}

/// A student's submission against a job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "coverLetter", default)]
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    #[serde(rename = "appliedAt")]
    pub applied_at: chrono::DateTime<chrono::Utc>,
}

/// A provider-created job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub budget: f64,
    #[serde(rename = "type")]
    pub job_type: String,
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub status: JobStatus,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Job {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}

/// Who is asking for jobs; visibility rules differ per role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Provider,
}

/// Status constraint for a provider's own view; `All` means unconstrained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(JobStatus),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(StatusFilter::All),
            "active" => Some(StatusFilter::Only(JobStatus::Active)),
            "completed" => Some(StatusFilter::Only(JobStatus::Completed)),
            _ => None,
        }
    }

    pub fn admits(&self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Optional, independently combinable catalog list filters (AND semantics)
#[derive(Debug, Clone, Default)]
pub struct JobFilters {
    pub search: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

/// A job surviving the visibility rules, annotated with the distance from
/// the requesting student (`None` for provider views)
#[derive(Debug, Clone)]
pub struct JobMatch {
    pub job: Job,
    pub distance_km: Option<f64>,
}

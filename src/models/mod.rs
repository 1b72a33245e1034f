// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Application, ApplicationStatus, Coordinates, Job, JobFilters, JobMatch, JobStatus, Role,
    StatusFilter,
};
pub use requests::{
    ApplyRequest, CreateJobRequest, ListJobsQuery, ReverseGeocodeQuery, UpdateApplicationRequest,
    UpdateJobRequest, VisibleJobsRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, JobListResponse, ReverseGeocodeResponse, VisibleJob,
    VisibleJobsResponse,
};

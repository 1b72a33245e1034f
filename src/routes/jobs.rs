use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::MatchEngine;
use crate::models::{
    ApplyRequest, CreateJobRequest, Coordinates, ErrorResponse, HealthResponse, JobFilters,
    JobListResponse, ListJobsQuery, ReverseGeocodeQuery, ReverseGeocodeResponse, Role,
    StatusFilter, UpdateApplicationRequest, UpdateJobRequest, VisibleJob, VisibleJobsRequest,
    VisibleJobsResponse,
};
use crate::services::{
    CatalogError, Geocoder, IdentityVerifier, JobCatalog, NominatimClient, RedisStore,
};

pub type SharedCatalog = JobCatalog<RedisStore, Arc<NominatimClient>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<SharedCatalog>,
    pub geocoder: Arc<NominatimClient>,
    pub identity: IdentityVerifier,
    pub engine: MatchEngine,
    pub max_radius_km: f64,
}

/// Configure all job-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/jobs", web::get().to(list_jobs))
        .route("/jobs", web::post().to(create_job))
        .route("/jobs/visible", web::post().to(visible_jobs))
        .route("/jobs/{id}", web::patch().to(update_job))
        .route("/jobs/{id}", web::delete().to(delete_job))
        .route("/jobs/{id}/apply", web::post().to(apply_to_job))
        .route(
            "/jobs/{job_id}/applications/{application_id}",
            web::patch().to(update_application),
        )
        .route("/geocode/reverse", web::get().to(reverse_geocode));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn unauthorized(message: String) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "unauthorized".to_string(),
        message,
        status_code: 401,
    })
}

/// Map catalog failures onto the wire taxonomy: missing records are 404,
/// bad input is 400, storage outage is 503
fn catalog_error(e: CatalogError) -> HttpResponse {
    match e {
        CatalogError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message,
            status_code: 404,
        }),
        CatalogError::Validation(message) => bad_request("validation_failed", message),
        CatalogError::Storage(err) => {
            tracing::error!("Storage failure: {}", err);
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "storage_unavailable".to_string(),
                message: err.to_string(),
                status_code: 503,
            })
        }
    }
}

/// Resolve the calling user or reject the mutating request
fn require_user(state: &AppState, req: &HttpRequest) -> Result<String, HttpResponse> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    state
        .identity
        .current_user_id(header)
        .map_err(|e| unauthorized(e.to_string()))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let storage_healthy = state.catalog.list(&JobFilters::default()).await.is_ok();
    let status = if storage_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Catalog listing with optional query filters
///
/// GET /api/v1/jobs?search=&type=&location=&status=
async fn list_jobs(
    state: web::Data<AppState>,
    query: web::Query<ListJobsQuery>,
) -> impl Responder {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match StatusFilter::parse(raw) {
            Some(StatusFilter::All) | None => {
                return bad_request(
                    "invalid_status",
                    "Status must be one of: active, completed".to_string(),
                );
            }
            Some(StatusFilter::Only(status)) => Some(status),
        },
    };

    let filters = JobFilters {
        search: query.search.clone(),
        job_type: query.job_type.clone(),
        location: query.location.clone(),
        status,
    };

    match state.catalog.list(&filters).await {
        Ok(jobs) => {
            let total = jobs.len();
            HttpResponse::Ok().json(JobListResponse { jobs, total })
        }
        Err(e) => catalog_error(e),
    }
}

/// Create a job posting
///
/// POST /api/v1/jobs
async fn create_job(
    state: web::Data<AppState>,
    req: web::Json<CreateJobRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = require_user(&state, &http_req) {
        return e;
    }

    if let Err(errors) = req.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    match state.catalog.create(req.into_inner()).await {
        Ok(job) => HttpResponse::Created().json(job),
        Err(e) => catalog_error(e),
    }
}

/// Merge a partial update into a job
///
/// PATCH /api/v1/jobs/{id}
async fn update_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateJobRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = require_user(&state, &http_req) {
        return e;
    }

    match state.catalog.update(&path, req.into_inner()).await {
        Ok(job) => HttpResponse::Ok().json(job),
        Err(e) => catalog_error(e),
    }
}

/// Delete a job
///
/// DELETE /api/v1/jobs/{id}
async fn delete_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = require_user(&state, &http_req) {
        return e;
    }

    match state.catalog.delete(&path).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => catalog_error(e),
    }
}

/// Apply to a job; the applicant id comes from the bearer token
///
/// POST /api/v1/jobs/{id}/apply
async fn apply_to_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ApplyRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let user_id = match require_user(&state, &http_req) {
        Ok(id) => id,
        Err(e) => return e,
    };

    if let Err(errors) = req.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    match state.catalog.apply(&path, &user_id, req.into_inner()).await {
        Ok(job) => HttpResponse::Ok().json(job),
        Err(e) => catalog_error(e),
    }
}

/// Move an application out of the pending state
///
/// PATCH /api/v1/jobs/{job_id}/applications/{application_id}
async fn update_application(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateApplicationRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = require_user(&state, &http_req) {
        return e;
    }

    let (job_id, application_id) = path.into_inner();
    match state
        .catalog
        .update_application(&job_id, &application_id, req.status)
        .await
    {
        Ok(job) => HttpResponse::Ok().json(job),
        Err(e) => catalog_error(e),
    }
}

/// Role-aware visibility query
///
/// POST /api/v1/jobs/visible
///
/// Request body:
/// ```json
/// {
///   "role": "student|provider",
///   "search": "string",
///   "statusFilter": "all|active|completed",
///   "location": {"lat": 51.5, "lng": -0.12},
///   "radiusKm": 10
/// }
/// ```
async fn visible_jobs(
    state: web::Data<AppState>,
    req: web::Json<VisibleJobsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for visible_jobs request: {}", errors);
        return bad_request("validation_failed", errors.to_string());
    }

    if req.radius_km > state.max_radius_km {
        return bad_request(
            "validation_failed",
            format!("radiusKm must not exceed {}", state.max_radius_km),
        );
    }

    let Some(status_filter) = StatusFilter::parse(&req.status_filter) else {
        return bad_request(
            "invalid_status_filter",
            "statusFilter must be one of: all, active, completed".to_string(),
        );
    };

    if let Some(location) = &req.location {
        if !location.is_valid() {
            return bad_request(
                "validation_failed",
                format!("Malformed coordinates: {}, {}", location.lat, location.lng),
            );
        }
    }

    let jobs = match state.catalog.list(&JobFilters::default()).await {
        Ok(jobs) => jobs,
        Err(e) => return catalog_error(e),
    };

    let outcome = state.engine.visible_jobs(
        jobs,
        req.role,
        &req.search,
        status_filter,
        req.location,
        req.radius_km,
    );

    // Empty student views carry an explanation, never an error
    let message = match (req.role, req.location.is_some(), outcome.matches.is_empty()) {
        (Role::Student, false, _) => {
            Some("Set your location to see jobs near you.".to_string())
        }
        (Role::Student, true, true) => Some(format!(
            "No active jobs found within {}km of your location. Try adjusting your search radius.",
            req.radius_km
        )),
        _ => None,
    };

    tracing::info!(
        "Visible jobs: role={:?}, {} of {} jobs",
        req.role,
        outcome.matches.len(),
        outcome.total_jobs
    );

    HttpResponse::Ok().json(VisibleJobsResponse {
        matches: outcome.matches.into_iter().map(VisibleJob::from).collect(),
        total_jobs: outcome.total_jobs,
        message,
    })
}

/// Display-only reverse geocode lookup
///
/// GET /api/v1/geocode/reverse?lat=51.5&lng=-0.12
async fn reverse_geocode(
    state: web::Data<AppState>,
    query: web::Query<ReverseGeocodeQuery>,
) -> impl Responder {
    let point = Coordinates::new(query.lat, query.lng);
    if !point.is_valid() {
        return bad_request(
            "validation_failed",
            format!("Malformed coordinates: {}, {}", point.lat, point.lng),
        );
    }

    match state.geocoder.reverse(&point).await {
        Ok(address) => HttpResponse::Ok().json(ReverseGeocodeResponse { address }),
        Err(e) => {
            tracing::warn!("Reverse geocode failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "geocoder_unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

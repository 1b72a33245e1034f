use thiserror::Error;
use uuid::Uuid;

use crate::core::filters::matches_catalog_filters;
use crate::models::{
    Application, ApplicationStatus, ApplyRequest, CreateJobRequest, Job, JobFilters, JobStatus,
    UpdateJobRequest,
};
use crate::services::geocode::Geocoder;
use crate::services::storage::{Storage, StorageError};

const JOBS_COLLECTION: &str = "jobs";

/// Errors surfaced by catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] StorageError),
}

/// Authoritative job catalog
///
/// Owns the stored job collection and its primitive CRUD. The store only
/// offers whole-collection read/write, so every mutation is a
/// read-modify-write; a catalog-wide lock serializes them to prevent lost
/// updates. Reads take no lock. Geocoding runs outside the lock so a slow
/// lookup never blocks other writers.
pub struct JobCatalog<S, G> {
    storage: S,
    geocoder: G,
    write_lock: tokio::sync::Mutex<()>,
}

impl<S: Storage, G: Geocoder> JobCatalog<S, G> {
    pub fn new(storage: S, geocoder: G) -> Self {
        Self {
            storage,
            geocoder,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn read_jobs(&self) -> Result<Vec<Job>, CatalogError> {
        let records = self.storage.read_collection(JOBS_COLLECTION).await?;
        let jobs = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Job>(record) {
                Ok(job) => Some(job),
                Err(e) => {
                    tracing::warn!("Skipping malformed job record: {}", e);
                    None
                }
            })
            .collect();
        Ok(jobs)
    }

    async fn write_jobs(&self, jobs: &[Job]) -> Result<(), CatalogError> {
        let records = jobs
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;
        self.storage
            .write_collection(JOBS_COLLECTION, records)
            .await?;
        Ok(())
    }

    /// List jobs in stable insertion order, applying the optional filters
    /// with AND semantics
    pub async fn list(&self, filters: &JobFilters) -> Result<Vec<Job>, CatalogError> {
        let jobs = self.read_jobs().await?;
        Ok(jobs
            .into_iter()
            .filter(|job| matches_catalog_filters(job, filters))
            .collect())
    }

    /// Fetch a single job by id
    pub async fn get(&self, id: &str) -> Result<Job, CatalogError> {
        self.read_jobs()
            .await?
            .into_iter()
            .find(|job| job.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("Job {} not found", id)))
    }

    /// Create a job posting
    ///
    /// Coordinates are resolved from the location text best-effort: a
    /// geocoder failure or miss leaves them absent and creation still
    /// succeeds.
    pub async fn create(&self, data: CreateJobRequest) -> Result<Job, CatalogError> {
        // Resolve before taking the write lock; the lookup may block on
        // network I/O
        let coordinates = match self.geocoder.forward(&data.location).await {
            Ok(point) => point,
            Err(e) => {
                tracing::warn!(
                    "Geocoding failed for \"{}\", creating job without coordinates: {}",
                    data.location,
                    e
                );
                None
            }
        };

        let job = Job {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            description: data.description,
            requirements: data.requirements,
            company_name: data.company_name,
            budget: data.budget,
            job_type: data.job_type,
            location: data.location,
            coordinates,
            status: JobStatus::Active,
            applications: vec![],
            created_at: chrono::Utc::now(),
        };

        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs().await?;
        jobs.push(job.clone());
        self.write_jobs(&jobs).await?;

        tracing::info!(
            "Created job {} ({}), coordinates resolved: {}",
            job.id,
            job.title,
            job.coordinates.is_some()
        );

        Ok(job)
    }

    /// Merge a partial update into an existing job
    ///
    /// `id` and `created_at` are never overwritten.
    pub async fn update(&self, id: &str, updates: UpdateJobRequest) -> Result<Job, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs().await?;

        let job = jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("Job {} not found", id)))?;

        if let Some(title) = updates.title {
            job.title = title;
        }
        if let Some(description) = updates.description {
            job.description = description;
        }
        if let Some(requirements) = updates.requirements {
            job.requirements = requirements;
        }
        if let Some(company_name) = updates.company_name {
            job.company_name = company_name;
        }
        if let Some(budget) = updates.budget {
            job.budget = budget;
        }
        if let Some(job_type) = updates.job_type {
            job.job_type = job_type;
        }
        if let Some(location) = updates.location {
            job.location = location;
        }
        if let Some(coordinates) = updates.coordinates {
            if !coordinates.is_valid() {
                return Err(CatalogError::Validation(format!(
                    "Coordinates out of range: {}, {}",
                    coordinates.lat, coordinates.lng
                )));
            }
            job.coordinates = Some(coordinates);
        }
        if let Some(status) = updates.status {
            job.status = status;
        }

        let updated = job.clone();
        self.write_jobs(&jobs).await?;

        Ok(updated)
    }

    /// Delete a job; repeat deletion of the same id fails with NotFound
    pub async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs().await?;

        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        if jobs.len() == before {
            return Err(CatalogError::NotFound(format!("Job {} not found", id)));
        }

        self.write_jobs(&jobs).await?;
        tracing::info!("Deleted job {}", id);
        Ok(())
    }

    /// Append a student's application to a job
    pub async fn apply(
        &self,
        job_id: &str,
        user_id: &str,
        data: ApplyRequest,
    ) -> Result<Job, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs().await?;

        let job = jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| CatalogError::NotFound(format!("Job {} not found", job_id)))?;

        job.applications.push(Application {
            id: Uuid::new_v4().to_string(),
            job_id: job_id.to_string(),
            user_id: user_id.to_string(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            cover_letter: data.cover_letter,
            status: ApplicationStatus::Pending,
            applied_at: chrono::Utc::now(),
        });

        let updated = job.clone();
        self.write_jobs(&jobs).await?;

        tracing::info!("User {} applied to job {}", user_id, job_id);
        Ok(updated)
    }

    /// Move an application out of the pending state
    pub async fn update_application(
        &self,
        job_id: &str,
        application_id: &str,
        new_status: ApplicationStatus,
    ) -> Result<Job, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs().await?;

        let job = jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| CatalogError::NotFound(format!("Job {} not found", job_id)))?;

        let application = job
            .applications
            .iter_mut()
            .find(|app| app.id == application_id)
            .ok_or_else(|| {
                CatalogError::NotFound(format!("Application {} not found", application_id))
            })?;

        if !application.status.can_transition_to(new_status) {
            return Err(CatalogError::Validation(format!(
                "Illegal application transition: {:?} -> {:?}",
                application.status, new_status
            )));
        }
        application.status = new_status;

        let updated = job.clone();
        self.write_jobs(&jobs).await?;

        Ok(updated)
    }
}

use crate::core::distance::distance_between;
use crate::core::filters::matches_search;
use crate::models::{Coordinates, Job, JobMatch, Role, StatusFilter};

/// Result of a visibility query
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<JobMatch>,
    pub total_jobs: usize,
}

/// Role-aware visibility engine
///
/// Given the raw catalog listing, decides which jobs a requester sees:
/// providers get their full view constrained only by search and status,
/// students get active jobs inside their radius, annotated with the
/// great-circle distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine;

impl MatchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the visible job subset for a requester
    ///
    /// Jobs come back in catalog order; no nearest-first sort is applied.
    /// A non-positive `radius_km` is a caller precondition violation and
    /// must be rejected before invoking.
    ///
    /// # Arguments
    /// * `jobs` - Raw catalog listing
    /// * `role` - Requester role, selects the visibility branch
    /// * `search` - Case-insensitive substring over title/company name
    /// * `status_filter` - Provider-only status constraint
    /// * `user_location` - Student position; `None` yields the empty set
    /// * `radius_km` - Student visibility radius (inclusive boundary)
    pub fn visible_jobs(
        &self,
        jobs: Vec<Job>,
        role: Role,
        search: &str,
        status_filter: StatusFilter,
        user_location: Option<Coordinates>,
        radius_km: f64,
    ) -> MatchOutcome {
        let total_jobs = jobs.len();

        let matches = match role {
            Role::Provider => jobs
                .into_iter()
                .filter(|job| matches_search(job, search))
                .filter(|job| status_filter.admits(job.status))
                .map(|job| JobMatch {
                    job,
                    distance_km: None,
                })
                .collect(),
            Role::Student => {
                // Fail closed: a student without a location sees nothing
                let Some(origin) = user_location else {
                    return MatchOutcome {
                        matches: vec![],
                        total_jobs,
                    };
                };

                jobs.into_iter()
                    .filter(|job| matches_search(job, search))
                    .filter(|job| job.is_active())
                    .filter_map(|job| {
                        // Jobs that never geocoded stay invisible to students
                        let coordinates = job.coordinates?;
                        let distance = distance_between(&origin, &coordinates);
                        (distance <= radius_km).then_some(JobMatch {
                            job,
                            distance_km: Some(distance),
                        })
                    })
                    .collect()
            }
        };

        MatchOutcome { matches, total_jobs }
    }
}

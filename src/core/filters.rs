use crate::models::{Job, JobFilters};

/// Case-insensitive substring search over title and company name
///
/// This is the engine-side search applied before the role branch; an
/// empty query matches everything.
#[inline]
pub fn matches_search(job: &Job, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    job.title.to_lowercase().contains(&needle)
        || job.company_name.to_lowercase().contains(&needle)
}

/// Catalog list predicate: all supplied filters must hold (AND semantics)
///
/// The catalog's `search` is broader than the engine's and also covers
/// the description. `job_type` and `location` are exact tag matches,
/// not geo predicates.
#[inline]
pub fn matches_catalog_filters(job: &Job, filters: &JobFilters) -> bool {
    if let Some(search) = &filters.search {
        let needle = search.to_lowercase();
        let hit = job.title.to_lowercase().contains(&needle)
            || job.description.to_lowercase().contains(&needle)
            || job.company_name.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }

    if let Some(job_type) = &filters.job_type {
        if &job.job_type != job_type {
            return false;
        }
    }

    if let Some(location) = &filters.location {
        if &job.location != location {
            return false;
        }
    }

    if let Some(status) = &filters.status {
        if &job.status != status {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, JobStatus};

    fn create_test_job(title: &str, company: &str, description: &str) -> Job {
        Job {
            id: "test_job".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            requirements: String::new(),
            company_name: company.to_string(),
            budget: 100.0,
            job_type: "remote".to_string(),
            location: "London, UK".to_string(),
            coordinates: Some(Coordinates::new(51.5074, -0.1278)),
            status: JobStatus::Active,
            applications: vec![],
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let job = create_test_job("Graphic Designer", "PixelWorks", "");

        assert!(matches_search(&job, "desi"));
        assert!(matches_search(&job, "GRAPHIC"));
        assert!(matches_search(&job, "pixelworks"));
        assert!(!matches_search(&job, "plumber"));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let job = create_test_job("Anything", "Anyone", "");
        assert!(matches_search(&job, ""));
    }

    #[test]
    fn test_engine_search_ignores_description() {
        let job = create_test_job("Tutor", "Acme", "needs photoshop skills");
        assert!(!matches_search(&job, "photoshop"));
    }

    #[test]
    fn test_catalog_search_covers_description() {
        let job = create_test_job("Tutor", "Acme", "needs photoshop skills");
        let filters = JobFilters {
            search: Some("Photoshop".to_string()),
            ..Default::default()
        };
        assert!(matches_catalog_filters(&job, &filters));
    }

    #[test]
    fn test_catalog_filters_and_semantics() {
        let job = create_test_job("Tutor", "Acme", "");

        // All filters match
        let filters = JobFilters {
            search: Some("tut".to_string()),
            job_type: Some("remote".to_string()),
            location: Some("London, UK".to_string()),
            status: Some(JobStatus::Active),
        };
        assert!(matches_catalog_filters(&job, &filters));

        // One mismatching filter fails the whole predicate
        let filters = JobFilters {
            search: Some("tut".to_string()),
            job_type: Some("on-site".to_string()),
            ..Default::default()
        };
        assert!(!matches_catalog_filters(&job, &filters));
    }

    #[test]
    fn test_no_filters_matches_everything() {
        let job = create_test_job("Tutor", "Acme", "");
        assert!(matches_catalog_filters(&job, &JobFilters::default()));
    }

    #[test]
    fn test_location_filter_is_exact_tag_match() {
        let job = create_test_job("Tutor", "Acme", "");
        let filters = JobFilters {
            location: Some("London".to_string()),
            ..Default::default()
        };
        // "London" is a substring of the stored tag but not an exact match
        assert!(!matches_catalog_filters(&job, &filters));
    }
}

//! GigMatch - Geo-aware job matching service for the student gig marketplace
//!
//! This library provides the matching/query core behind the GigMatch
//! marketplace: the job catalog's filter semantics and the role-aware
//! visibility engine with great-circle radius filtering.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::haversine_distance, MatchEngine};
pub use crate::models::{Coordinates, Job, JobFilters, JobMatch, JobStatus, Role, StatusFilter};

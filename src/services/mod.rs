// Service exports
pub mod catalog;
pub mod geocode;
pub mod identity;
pub mod storage;

pub use catalog::{CatalogError, JobCatalog};
pub use geocode::{GeocodeError, Geocoder, NominatimClient};
pub use identity::{IdentityError, IdentityVerifier};
pub use storage::{MemoryStore, RedisStore, Storage, StorageError};

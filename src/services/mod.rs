// Service exports
pub mod cache;
pub mod geocoder;
pub mod postgres;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use geocoder::{GeocoderClient, GeocoderError};
pub use postgres::{StoreClient, StoreError};

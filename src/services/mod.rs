// Service exports
pub mod appwrite;
pub mod cache;
pub mod postgres;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::{CacheError, MatchCache};
pub use postgres::{PostgresClient, PostgresError};

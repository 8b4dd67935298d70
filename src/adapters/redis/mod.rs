//! Redis-backed video record repository.

pub mod error;
pub mod pool;
pub mod repository;

pub use error::RepositoryError;
pub use pool::RedisPool;

/// Key prefix for serialized video records.
pub(super) const VIDEO_KEY_PREFIX: &str = "video:";
/// Key prefix for per-user sets of owned video ids.
pub(super) const USER_VIDEOS_PREFIX: &str = "user-videos:";

//! Redis error types for the repository adapter.

use deadpool_redis::CreatePoolError;
use thiserror::Error;

pub type RedisError = deadpool_redis::redis::RedisError;
pub type PoolError = deadpool_redis::PoolError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("create pool error: {0}")]
    CreatePool(String),
}

impl From<CreatePoolError> for RepositoryError {
    fn from(err: CreatePoolError) -> Self {
        RepositoryError::CreatePool(err.to_string())
    }
}

//! Ports - Trait definitions implemented by adapters.

pub mod repository;
pub mod storage;
pub mod thumbnails;

pub use repository::VideoRepository;
pub use storage::ObjectStorage;
pub use thumbnails::{StoredThumbnail, ThumbnailStore};

//! In-memory adapters.

pub mod thumbnails;

pub use thumbnails::ThumbnailCache;

//! Presley - Video Hosting Backend
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (video records, orientation)
//! - media/: External tool integration (ffprobe, ffmpeg)
//! - ports/: Trait definitions
//! - adapters/: Concrete implementations (HTTP, S3, Redis, assets dir, in-memory cache)
//! - config: Environment configuration

pub mod adapters;
pub mod config;
pub mod domain;
pub mod media;
pub mod ports;

// Re-exports for convenience
pub use adapters::http::{router, AppState};
pub use config::Config;
pub use domain::{Orientation, Video};

//! Environment configuration.

use std::env;

/// Which thumbnail store the server runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbnailStoreKind {
    /// Files under the assets directory, served at /assets.
    Fs,
    /// Bounded in-memory cache, served at /api/thumbnails.
    Memory,
}

/// Runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Base URL thumbnail links are composed against
    pub public_base_url: String,
    /// Redis connection URL
    pub redis_url: String,
    /// HS256 secret for bearer token validation
    pub jwt_secret: String,
    /// S3 bucket for uploaded videos
    pub s3_bucket: String,
    /// S3 region, part of the public video URL
    pub s3_region: String,
    /// Directory for thumbnail files (fs store)
    pub assets_dir: String,
    pub thumbnail_store: ThumbnailStoreKind,
    /// Entry bound for the in-memory thumbnail store
    pub thumbnail_cache_capacity: usize,
    /// Video upload body ceiling in bytes
    pub max_video_bytes: usize,
    /// Thumbnail upload body ceiling in bytes
    pub max_thumbnail_bytes: usize,
    /// Repack uploads for progressive playback before storing
    pub faststart: bool,
    /// Ceiling on a single ffprobe/ffmpeg invocation
    pub media_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics if required variables are not set.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let port = env::var("PORT").unwrap_or_else(|_| String::from("8091"));
        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| String::from("redis://127.0.0.1/")),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET env var required"),
            s3_bucket: env::var("S3_BUCKET").expect("S3_BUCKET env var required"),
            s3_region: env::var("S3_REGION").expect("S3_REGION env var required"),
            assets_dir: env::var("ASSETS_DIR").unwrap_or_else(|_| String::from("./assets")),
            thumbnail_store: match env::var("THUMBNAIL_STORE").as_deref() {
                Ok("memory") => ThumbnailStoreKind::Memory,
                _ => ThumbnailStoreKind::Fs,
            },
            thumbnail_cache_capacity: parsed_var("THUMBNAIL_CACHE_CAPACITY", 256),
            max_video_bytes: parsed_var("MAX_VIDEO_BYTES", 1 << 30),
            max_thumbnail_bytes: parsed_var("MAX_THUMBNAIL_BYTES", 10 << 20),
            faststart: parsed_var("FASTSTART", true),
            media_timeout_secs: parsed_var("MEDIA_TIMEOUT_SECS", 300),
            port,
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

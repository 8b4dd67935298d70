//! Server binary - wires adapters to the HTTP layer.

use presley::adapters::aws::S3Adapter;
use presley::adapters::http::{router, AppState};
use presley::adapters::local::AssetDir;
use presley::adapters::memory::ThumbnailCache;
use presley::adapters::redis::RedisPool;
use presley::config::{Config, ThumbnailStoreKind};
use presley::media::{RealProbeRunner, RealRepackRunner};
use presley::ports::thumbnails::ThumbnailStore;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::fmt::init();

    let repository = match RedisPool::new(&config.redis_url) {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Failed to connect to Redis: {:?}", err);
            std::process::exit(1);
        }
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let storage = S3Adapter::new(
        aws_sdk_s3::Client::new(&aws_config),
        config.s3_bucket.clone(),
        config.s3_region.clone(),
    );

    let thumbnails: Arc<dyn ThumbnailStore> = match config.thumbnail_store {
        ThumbnailStoreKind::Fs => {
            let assets = AssetDir::new(&config.assets_dir);
            assets
                .ensure_exists()
                .await
                .expect("Failed to create assets directory");
            Arc::new(assets)
        }
        ThumbnailStoreKind::Memory => {
            let capacity = NonZeroUsize::new(config.thumbnail_cache_capacity.max(1))
                .expect("capacity is nonzero");
            Arc::new(ThumbnailCache::new(capacity))
        }
    };

    let media_timeout = Duration::from_secs(config.media_timeout_secs);
    let state = AppState {
        config: Arc::new(config),
        videos: Arc::new(repository),
        storage: Arc::new(storage),
        thumbnails,
        prober: Arc::new(RealProbeRunner::new(media_timeout)),
        repacker: Arc::new(RealRepackRunner::new(media_timeout)),
    };

    let addr = format!("{}:{}", state.config.addr, state.config.port);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("Listening at {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}

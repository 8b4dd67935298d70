//! Local filesystem adapters.

pub mod assets;

pub use assets::AssetDir;

//! Adapters - Concrete implementations of ports.

pub mod aws;
pub mod http;
pub mod local;
pub mod memory;
pub mod redis;

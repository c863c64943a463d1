//! Resource Implementations
//!
//! Lifecycle operations for each provider resource type.

pub mod subnet;

//! vpcsync Provider Adapter
//!
//! Implements the subnet lifecycle API over the provider's HTTP JSON
//! endpoint.

pub mod client;
pub mod resources;

pub use client::{ClientConfig, SubnetClient};
pub use resources::subnet::NOT_FOUND_CODE;

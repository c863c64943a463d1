//! vpcsync Core Library
//!
//! Decides and applies the provider calls that converge a subnet to its
//! desired configuration, committing state after every mutation.

pub mod api;
pub mod applier;
pub mod context;
pub mod error;
pub mod reconciler;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::{CreatedSubnet, SubnetApi};
pub use applier::{deploy, remove};
pub use context::{Context, ProgressLog, TracingLog};
pub use error::{Error, ProviderError, Result, StateError};
pub use reconciler::{decide, plan_removal};
pub use store::{MemoryStateStore, SqliteStateStore, StateStore};
pub use types::*;

/// vpcsync version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

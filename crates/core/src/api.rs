//! Subnet lifecycle API
//!
//! The only provider operations reconciliation needs. Implementations are
//! thin adapters over a real provider; see `vpcsync-provider` for HTTP.

use crate::error::ProviderError;

/// Subnet returned by a successful create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSubnet {
    pub subnet_id: String,
}

/// Trait for subnet lifecycle operations
#[async_trait::async_trait]
pub trait SubnetApi: Send + Sync {
    /// Create a subnet in `vpc_id`, placed in `availability_zone`
    async fn create_subnet(
        &self,
        vpc_id: &str,
        availability_zone: &str,
    ) -> Result<CreatedSubnet, ProviderError>;

    /// Delete a subnet. Fails with `ProviderError::NotFound` when it is already gone.
    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), ProviderError>;
}

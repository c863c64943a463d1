//! Subnet resource over HTTP

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vpcsync_core::{CreatedSubnet, ProviderError, SubnetApi};

use crate::client::{error_body, transport, SubnetClient};

/// Error code the provider uses for an unknown subnet identifier
pub const NOT_FOUND_CODE: &str = "InvalidSubnetID.NotFound";

#[derive(Debug, Serialize)]
struct CreateSubnetRequest<'a> {
    vpc_id: &'a str,
    availability_zone: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateSubnetResponse {
    subnet: Option<SubnetBody>,
}

#[derive(Debug, Deserialize)]
struct SubnetBody {
    subnet_id: String,
    #[serde(default)]
    state: Option<String>,
}

#[async_trait::async_trait]
impl SubnetApi for SubnetClient {
    async fn create_subnet(
        &self,
        vpc_id: &str,
        availability_zone: &str,
    ) -> Result<CreatedSubnet, ProviderError> {
        let request = self
            .request(Method::POST, &["subnets"])?
            .json(&CreateSubnetRequest {
                vpc_id,
                availability_zone,
            });
        let response = self.send(request).await?;

        if !response.status().is_success() {
            let body = error_body(response).await;
            return Err(ProviderError::Api {
                code: body.code,
                message: body.message,
            });
        }

        let text = response.text().await.map_err(transport)?;
        let created: CreateSubnetResponse = serde_json::from_str(&text)
            .map_err(|e| malformed(format!("Cannot decode create response: {}", e)))?;
        let subnet = created
            .subnet
            .ok_or_else(|| malformed("No subnet in response"))?;

        info!(
            "Provider created subnet {} ({})",
            subnet.subnet_id,
            subnet.state.as_deref().unwrap_or("unknown")
        );
        Ok(CreatedSubnet {
            subnet_id: subnet.subnet_id,
        })
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), ProviderError> {
        if matches!(subnet_id, "" | "." | "..") {
            return Err(ProviderError::Api {
                code: "InvalidSubnetID.Malformed".to_string(),
                message: format!("Invalid subnet ID '{}'", subnet_id),
            });
        }

        let request = self.request(Method::DELETE, &["subnets", subnet_id])?;
        let response = self.send(request).await?;

        if response.status().is_success() {
            debug!("Provider deleted subnet {}", subnet_id);
            return Ok(());
        }

        // A bare 404 may come from a proxy or a wrong prefix, not the provider
        let body = error_body(response).await;
        if body.code == NOT_FOUND_CODE {
            return Err(ProviderError::NotFound {
                subnet_id: subnet_id.to_string(),
            });
        }

        Err(ProviderError::Api {
            code: body.code,
            message: body.message,
        })
    }
}

fn malformed(message: impl Into<String>) -> ProviderError {
    ProviderError::Api {
        code: "MalformedResponse".to_string(),
        message: message.into(),
    }
}

//! Client for communicating with the provider API

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use tracing::debug;
use vpcsync_core::ProviderError;

/// Connection settings for the provider API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://127.0.0.1:8787`
    pub endpoint: String,
    /// Region sent with every request
    pub region: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8787".to_string(),
            region: "us-east-1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Error document returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// HTTP client wrapper for the provider API
#[derive(Debug, Clone)]
pub struct SubnetClient {
    http: reqwest::Client,
    endpoint: Url,
    region: String,
}

impl SubnetClient {
    pub fn new(config: ClientConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport)?;

        let endpoint = Url::parse(&config.endpoint)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| invalid_endpoint(&config.endpoint))?;

        Ok(Self {
            http,
            endpoint,
            region: config.region,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Build a request against `/v1/{segments..}` carrying the region header.
    ///
    /// Each segment is percent-encoded, so `/`, `?` and `#` inside one
    /// stay part of that segment.
    pub(crate) fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ProviderError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| invalid_endpoint(self.endpoint.as_str()))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);

        debug!("{} {}", method, url);
        Ok(self
            .http
            .request(method, url)
            .header("x-region", &self.region))
    }

    /// Send a request, mapping connection failures to `ProviderError::Transport`
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ProviderError> {
        request.send().await.map_err(transport)
    }
}

/// Read the error document of a failed response.
///
/// Falls back to the status line when the body is not an error document.
pub(crate) async fn error_body(response: Response) -> ErrorBody {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    serde_json::from_str(&text).unwrap_or_else(|_| ErrorBody {
        code: status.as_u16().to_string(),
        message: if text.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            text
        },
    })
}

pub(crate) fn transport(e: reqwest::Error) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

fn invalid_endpoint(endpoint: &str) -> ProviderError {
    ProviderError::Transport(format!("Invalid provider endpoint '{}'", endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_request_carries_region() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ping"))
            .and(header("x-region", "eu-west-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = SubnetClient::new(ClientConfig {
            endpoint: format!("{}/", server.uri()),
            region: "eu-west-1".to_string(),
            ..Default::default()
        })
        .unwrap();

        let response = client
            .send(client.request(Method::GET, &["ping"]).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_request_keeps_endpoint_prefix_and_encodes_segments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gateway/v1/subnets/subnet-a%2Fb%3Fc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = SubnetClient::new(ClientConfig {
            endpoint: format!("{}/gateway", server.uri()),
            ..Default::default()
        })
        .unwrap();

        let response = client
            .send(
                client
                    .request(Method::GET, &["subnets", "subnet-a/b?c"])
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        for endpoint in ["not a url", "mailto:ops@example.com"] {
            let err = SubnetClient::new(ClientConfig {
                endpoint: endpoint.to_string(),
                ..Default::default()
            })
            .unwrap_err();
            assert!(matches!(err, ProviderError::Transport(_)));
        }
    }

    #[tokio::test]
    async fn test_error_body_falls_back_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = SubnetClient::new(ClientConfig {
            endpoint: server.uri(),
            ..Default::default()
        })
        .unwrap();

        let response = client
            .send(client.request(Method::GET, &["ping"]).unwrap())
            .await
            .unwrap();
        let body = error_body(response).await;

        assert_eq!(body.code, "503");
        assert_eq!(body.message, "Service Unavailable");
    }
}

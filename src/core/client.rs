//! PanLex API client and single-query transport

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::core::config::ClientConfig;
use crate::core::errors::{PanlexError, Result};
use crate::core::limiter::RateLimiter;
use crate::core::models::{PageResponse, Params, ServiceErrorBody};

/// Client for the PanLex API.
///
/// Cheap to clone; clones share one HTTP connection pool and one rate
/// limiter, so the configured call rate holds process-wide no matter how
/// many aggregations are in flight.
#[derive(Debug, Clone)]
pub struct PanlexClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    limiter: Arc<RateLimiter>,
}

impl PanlexClient {
    /// Create a new client from an explicit configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        let limiter = Arc::new(RateLimiter::new(config.max_rps));

        Ok(Self {
            http,
            config: Arc::new(config),
            limiter,
        })
    }

    /// Create from environment (`PANLEX_API` and friends)
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve an endpoint argument against the configured base address.
    ///
    /// A leading `/` means relative to the base URL; anything else is
    /// taken as an absolute URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.config.base_url, endpoint)
        } else {
            endpoint.to_string()
        }
    }

    /// Issue one request/response cycle against `endpoint`.
    ///
    /// Params are sent as a JSON object body via POST. A 409 answer is
    /// surfaced as [`PanlexError::Api`] with the service's code and
    /// message; any other non-success status as [`PanlexError::Http`].
    /// Pages with inconsistent pagination accounting are rejected as
    /// [`PanlexError::Protocol`].
    pub async fn query(&self, endpoint: &str, params: &Params) -> Result<PageResponse> {
        self.limiter.acquire().await;

        let url = self.endpoint_url(endpoint);
        debug!(%url, "querying PanLex");

        let response = self
            .http
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| PanlexError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();

        if status.is_success() {
            let page: PageResponse =
                response
                    .json()
                    .await
                    .map_err(|e| PanlexError::InvalidResponse {
                        message: e.to_string(),
                    })?;

            if let Some(violation) = page.paging_violation() {
                warn!(endpoint, %violation, "rejecting malformed page");
                return Err(PanlexError::Protocol {
                    endpoint: endpoint.to_string(),
                    message: violation,
                });
            }

            debug!(
                endpoint,
                result_num = page.result_num,
                "received page"
            );
            Ok(page)
        } else if status == StatusCode::CONFLICT {
            let body: ServiceErrorBody =
                response
                    .json()
                    .await
                    .map_err(|e| PanlexError::InvalidResponse {
                        message: format!("malformed 409 body: {}", e),
                    })?;
            Err(PanlexError::Api {
                code: body.code,
                message: body.message,
            })
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(PanlexError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}

//! HTTP token exchanger
//!
//! Resolves a bearer token into a context identifier with a single
//! authenticated `GET` against the configured endpoint:
//!
//! - `200`: the full response body is the context identifier
//! - `401`/`403`: `ClavisError::Unauthorized`
//! - anything else: `ClavisError::BadRequest`, logged at error level
//! - transport failure: `ClavisError::Network`, never retried

use std::sync::Arc;

use async_trait::async_trait;
use clavis_core::TokenExchanger;
use clavis_domain::{BearerToken, ClavisError, Result};
use reqwest::{Method, StatusCode};
use tracing::{debug, error, info, warn};

use crate::errors::InfraError;
use crate::http::HttpClient;
use crate::observability::metrics::ContextCacheMetrics;

/// [`TokenExchanger`] backed by [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
    client: HttpClient,
    metrics: Arc<ContextCacheMetrics>,
}

impl HttpTokenExchanger {
    pub fn new(client: HttpClient) -> Self {
        Self::with_metrics(client, Arc::new(ContextCacheMetrics::new()))
    }

    pub fn with_metrics(client: HttpClient, metrics: Arc<ContextCacheMetrics>) -> Self {
        Self { client, metrics }
    }

    pub fn metrics(&self) -> &Arc<ContextCacheMetrics> {
        &self.metrics
    }

    async fn exchange_once(&self, endpoint: &str, token: &BearerToken) -> Result<String> {
        let request = self.client.request(Method::GET, endpoint).bearer_auth(token.expose());
        let response = self.client.send(request).await?;

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(url = %endpoint, %status, "token rejected by exchange endpoint");
                return Err(ClavisError::Unauthorized(format!(
                    "could not exchange token: {}",
                    status_text(status)
                )));
            }
            _ => {
                error!(url = %endpoint, %status, "unexpected status from token exchange endpoint");
                return Err(ClavisError::BadRequest(status_text(status)));
            }
        }

        // Dropping the response on a read error releases the connection.
        let body = response.bytes().await.map_err(|err| ClavisError::from(InfraError::from(err)))?;
        let context = String::from_utf8(body.to_vec()).map_err(|_| {
            ClavisError::BadRequest("token exchange returned a non UTF-8 context".into())
        })?;

        info!(context = %context, "token exchange successful");
        Ok(context)
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange(&self, endpoint: &str, token: &BearerToken) -> Result<String> {
        debug!(url = %endpoint, "exchanging token");
        match self.exchange_once(endpoint, token).await {
            Ok(context) => {
                self.metrics.record_exchange();
                Ok(context)
            }
            Err(err) => {
                self.metrics.record_exchange_failure(&err);
                Err(err)
            }
        }
    }
}

/// `"403 Forbidden"` style status text.
fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

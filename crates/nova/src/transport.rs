use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{AuthProvider, Token};
use crate::configs::TransportConfig;
use crate::errors::{CapabilityError, CapabilityResult};

/// The single choke point every capability request goes through.
///
/// Authentication is strictly additive: when a token is available it is sent as a
/// bearer credential, otherwise the request goes out anonymously. A request is
/// attempted exactly once.
pub struct AuthenticatedTransport {
    client: Client,
    config: TransportConfig,
    auth: Arc<dyn AuthProvider>,
}

impl AuthenticatedTransport {
    pub fn new(config: TransportConfig, auth: Arc<dyn AuthProvider>) -> CapabilityResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            config,
            auth,
        })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn auth(&self) -> Arc<dyn AuthProvider> {
        Arc::clone(&self.auth)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.config.endpoint(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.config.endpoint(path))
    }

    /// Send the request, attaching a bearer token when one can be obtained.
    /// Any non-2xx status is a failure regardless of the body.
    pub async fn call(&self, request: RequestBuilder) -> CapabilityResult<Response> {
        let request = match self.auth.get_token().await {
            Ok(Some(token)) => match bearer_header(&token) {
                Some(value) => request.header(AUTHORIZATION, value),
                None => request,
            },
            Ok(None) => {
                debug!("no active session, sending request anonymously");
                request
            }
            Err(e) => {
                warn!(error = %e, "could not obtain auth token, sending request anonymously");
                request
            }
        };

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "backend responded");

        if !status.is_success() {
            return Err(CapabilityError::Status(status));
        }
        Ok(response)
    }
}

/// `None` when the token cannot travel as a header value
fn bearer_header(token: &Token) -> Option<HeaderValue> {
    match HeaderValue::from_str(&format!("Bearer {}", token.as_str())) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some(value)
        }
        Err(e) => {
            warn!(error = %e, "auth token is not a valid header, sending request anonymously");
            None
        }
    }
}

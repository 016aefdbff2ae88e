use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::utils::decode;
use crate::errors::CapabilityResult;
use crate::transport::AuthenticatedTransport;

pub const CHAT_PATH: &str = "/chat";

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

/// Generic chat completion
pub struct ChatClient {
    transport: Arc<AuthenticatedTransport>,
}

impl ChatClient {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    pub async fn send(&self, message: &str) -> CapabilityResult<String> {
        let request = self
            .transport
            .post(CHAT_PATH)
            .json(&ChatRequest { message });
        let response = self.transport.call(request).await?;
        let body: ChatResponse = decode(response).await?;
        Ok(body.response)
    }
}

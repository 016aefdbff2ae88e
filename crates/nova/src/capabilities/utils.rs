use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{CapabilityError, CapabilityResult};

/// Read a response body as JSON
pub async fn read_body(response: Response) -> CapabilityResult<Value> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// A 2xx body carrying a truthy `error` field is an application error, not a success
pub fn check_application_error(body: &Value) -> CapabilityResult<()> {
    match body.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(()),
        Some(Value::String(message)) if message.is_empty() => Ok(()),
        Some(Value::String(message)) => Err(CapabilityError::Application(message.clone())),
        Some(other) => Err(CapabilityError::Application(other.to_string())),
    }
}

/// Decode a body whose only failure mode is a non-2xx status
pub async fn decode<T: DeserializeOwned>(response: Response) -> CapabilityResult<T> {
    let body = read_body(response).await?;
    Ok(serde_json::from_value(body)?)
}

/// Decode a body that may carry an `error` field
pub async fn decode_checked<T: DeserializeOwned>(response: Response) -> CapabilityResult<T> {
    let body = read_body(response).await?;
    check_application_error(&body)?;
    Ok(serde_json::from_value(body)?)
}

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::utils::{check_application_error, read_body};
use crate::errors::CapabilityResult;
use crate::transport::AuthenticatedTransport;

pub const SEARCH_PATH: &str = "/search-web";

lazy_static! {
    static ref REDIRECT_TARGET: Regex =
        Regex::new(r"[?&]uddg=([^&#]+)").expect("redirect pattern is valid");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResultItem {
    Snippet(String),
    Link { title: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// `None` when the body carried no `results` array at all
    pub items: Option<Vec<SearchResultItem>>,
}

/// Extract the destination of a redirect-wrapped link.
///
/// Links of the form `https://duckduckgo.com/l/?uddg=<percent-encoded target>&rut=...`
/// yield the decoded target, unwrapping again while the target is itself wrapped.
/// Anything else is returned unchanged, so applying this to its own output is a
/// no-op.
pub fn unwrap_redirect(url: &str) -> String {
    let mut current = url.to_string();
    // every step yields a strictly shorter string
    while let Some(target) = redirect_target(&current) {
        if target == current {
            break;
        }
        current = target;
    }
    current
}

fn redirect_target(url: &str) -> Option<String> {
    let captures = REDIRECT_TARGET.captures(url)?;
    let target = urlencoding::decode(captures.get(1)?.as_str()).ok()?;
    Some(target.into_owned())
}

fn parse_results(mut body: Value) -> CapabilityResult<SearchResults> {
    let items = match body.get_mut("results").map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => return Ok(SearchResults { items: None }),
    };

    let items = items
        .into_iter()
        .map(|item| -> CapabilityResult<SearchResultItem> {
            Ok(match serde_json::from_value::<SearchResultItem>(item)? {
                SearchResultItem::Link { title, url } => SearchResultItem::Link {
                    title,
                    url: unwrap_redirect(&url),
                },
                snippet => snippet,
            })
        })
        .collect::<CapabilityResult<Vec<_>>>()?;

    Ok(SearchResults { items: Some(items) })
}

/// Web search
pub struct SearchClient {
    transport: Arc<AuthenticatedTransport>,
}

impl SearchClient {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    pub async fn search(&self, query: &str) -> CapabilityResult<SearchResults> {
        let request = self
            .transport
            .post(SEARCH_PATH)
            .json(&json!({ "query": query }));
        let response = self.transport.call(request).await?;
        let body = read_body(response).await?;
        check_application_error(&body)?;
        parse_results(body)
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::errors::AuthError;

/// Opaque bearer credential. Fetched fresh for every call, never cached here.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Token(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(****)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// The external identity collaborator.
///
/// `get_token` returning `Ok(None)` means "nobody is signed in"; an `Err` means the
/// provider itself failed. Callers treat both the same way: the request goes out
/// without credentials.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    async fn get_token(&self) -> Result<Option<Token>, AuthError>;
}

/// No identity provider configured
pub struct Anonymous;

#[async_trait]
impl AuthProvider for Anonymous {
    fn current_user(&self) -> Option<User> {
        None
    }

    async fn get_token(&self) -> Result<Option<Token>, AuthError> {
        Ok(None)
    }
}

/// A token handed over on the command line or through the environment
pub struct StaticToken {
    token: Token,
    user: Option<User>,
}

impl StaticToken {
    pub fn new(token: Token) -> Self {
        Self { token, user: None }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }
}

#[async_trait]
impl AuthProvider for StaticToken {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    async fn get_token(&self) -> Result<Option<Token>, AuthError> {
        Ok(Some(self.token.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct SessionData {
    token: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    user: Option<User>,
}

impl SessionData {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= Utc::now())
    }
}

/// Session written by an external sign-in flow, re-read on every call so a
/// sign-out or refresh is picked up without restarting.
///
/// ```json
/// {"token": "...", "expires_at": "2026-01-01T00:00:00Z", "user": {"id": "user_1", "first_name": "Ada"}}
/// ```
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<SessionData>, AuthError> {
        parse_session(fs::read_to_string(&self.path))
    }

    async fn load_async(&self) -> Result<Option<SessionData>, AuthError> {
        parse_session(tokio::fs::read_to_string(&self.path).await)
    }
}

fn parse_session(read: io::Result<String>) -> Result<Option<SessionData>, AuthError> {
    let contents = match read {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

#[async_trait]
impl AuthProvider for SessionFile {
    fn current_user(&self) -> Option<User> {
        match self.load() {
            Ok(Some(session)) if !session.is_expired() => session.user,
            _ => None,
        }
    }

    async fn get_token(&self) -> Result<Option<Token>, AuthError> {
        let Some(session) = self.load_async().await? else {
            return Ok(None);
        };
        if let Some(expires_at) = session.expires_at.filter(|_| session.is_expired()) {
            return Err(AuthError::Expired(expires_at));
        }
        Ok(Some(Token::new(session.token)))
    }
}

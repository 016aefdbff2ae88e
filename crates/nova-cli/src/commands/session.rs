use anyhow::{Context, Result};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::prompt::lines::LinePrompt;
use crate::prompt::rustyline::RustylinePrompt;
use crate::prompt::Prompt;
use crate::session::Session;
use nova::assistant::Assistant;
use nova::transport::AuthenticatedTransport;

pub fn build_assistant(config: &Config) -> Result<Assistant> {
    debug!(base_url = %config.base_url, "connecting to backend");
    let transport = AuthenticatedTransport::new(config.transport(), config.auth_provider())
        .context("Failed to build HTTP client")?;
    Ok(Assistant::new(Arc::new(transport), config.geolocator()))
}

/// Interactive on a terminal, one submission per line otherwise
pub fn build_session(config: &Config) -> Result<Session<'static>> {
    let prompt: Box<dyn Prompt> = if io::stdin().is_terminal() {
        Box::new(RustylinePrompt::new(&config.assistant_name)?)
    } else {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stdout()))
    };
    Ok(Session::new(
        build_assistant(config)?,
        prompt,
        &config.assistant_name,
    ))
}

/// One-shot commands never read from stdin
pub fn build_headless_session(config: &Config) -> Result<Session<'static>> {
    let prompt = Box::new(RustylinePrompt::new(&config.assistant_name)?);
    Ok(Session::new(
        build_assistant(config)?,
        prompt,
        &config.assistant_name,
    ))
}

//! Outbound HTTP client construction shared by the upstream resolvers.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::VERSION;

fn user_agent() -> String {
    format!("zipcode-weather/{VERSION}")
}

/// Build a client whose every request is bounded by `timeout_seconds`.
pub fn build_client(timeout_seconds: u32) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(user_agent())
        .build()
        .with_context(|| "Failed to create HTTP client")
}

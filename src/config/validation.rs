//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All errors are
//! collected, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{AppConfig, HtmxConfig};

const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("htmx.redirect_status {0} is not one of 301, 302, 303, 307, 308")]
    RedirectStatus(u16),

    #[error("{field} {value:?} is not a socket address")]
    Address { field: &'static str, value: String },
}

/// Validate the HX middleware settings.
pub fn validate_htmx(config: &HtmxConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_htmx(config, &mut errors);
    finish(errors)
}

/// Validate a full application configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_htmx(&config.htmx, &mut errors);
    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    finish(errors)
}

fn check_htmx(config: &HtmxConfig, errors: &mut Vec<ValidationError>) {
    if !REDIRECT_STATUSES.contains(&config.redirect_status) {
        errors.push(ValidationError::RedirectStatus(config.redirect_status));
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field,
            value: value.to_string(),
        });
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Unified error handling with Sentry integration.
//!
//! Fetch failures never surface here: they stay in the session history and
//! are rendered inline. `AppError` covers what stops the host itself.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shopify::CatalogError;

/// Application-level error type for the storefront host.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A direct catalog call (outside a session) failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A session command could not be understood.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl AppError {
    /// Capture the error to Sentry and log it.
    ///
    /// Invalid commands are the shopper's mistake and are only logged.
    pub fn report(&self) {
        if matches!(self, Self::InvalidCommand(_)) {
            tracing::debug!(error = %self, "Invalid command");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Storefront error"
        );
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of
/// navigation leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("navigation", "Pushed URL", Some(&[("path", "/products/abc")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

//! Storefront configuration loaded from environment variables.
//!
//! Configuration is read once at process start and never re-read.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_URL` - Storefront GraphQL endpoint
//!   (e.g., `https://your-store.myshopify.com/api/2026-01/graphql.json`)
//! - `STOREFRONT_ACCESS_TOKEN` - Storefront API access token
//!
//! ## Optional
//! - `STOREFRONT_FEATURED_COLLECTION` - Collection handle shown on the home page
//!   (default: the shop's own product listing)
//! - `STOREFRONT_PAGE_SIZE` - Products per page (default: 20)
//! - `STOREFRONT_IMAGE_COUNT` - Images fetched per product (default: 5)
//! - `STOREFRONT_VARIANT_COUNT` - Variants fetched per product (default: 25)
//! - `STOREFRONT_PHONE_MAX_WIDTH` - Widest phone viewport (default: 600)
//! - `STOREFRONT_TABLET_MAX_WIDTH` - Widest tablet viewport (default: 1200)
//! - `STOREFRONT_DESKTOP_MAX_WIDTH` - Widest desktop viewport (default: 1800)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::collections::HashMap;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::device::Breakpoints;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const MAX_PAGE_SIZE: i64 = 250;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Shopfront application configuration.
#[derive(Debug, Clone)]
pub struct ShopfrontConfig {
    /// Storefront API connection settings
    pub api: StorefrontApiConfig,
    /// What the home page shows and how much of it is fetched
    pub catalog: CatalogConfig,
    /// Viewport breakpoints for device classification
    pub breakpoints: Breakpoints,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
}

/// Storefront API connection settings.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct StorefrontApiConfig {
    /// GraphQL endpoint
    pub api_url: Url,
    /// Storefront API access token
    pub access_token: SecretString,
}

impl std::fmt::Debug for StorefrontApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApiConfig")
            .field("api_url", &self.api_url.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Where the home page products come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeSource {
    /// The shop's own product listing.
    ShopFront,
    /// A featured collection, looked up by handle.
    Collection(String),
}

/// Home page catalog settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Source of the home page products
    pub home: HomeSource,
    /// Products per page
    pub page_size: i64,
    /// Images fetched per product
    pub image_count: i64,
    /// Variants fetched per product
    pub variant_count: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            home: HomeSource::ShopFront,
            page_size: 20,
            image_count: 5,
            variant_count: 25,
        }
    }
}

impl ShopfrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let api = StorefrontApiConfig::load(&env)?;
        let catalog = CatalogConfig::load(&env)?;
        let breakpoints = load_breakpoints(&env)?;
        let json_logs = env
            .optional("LOG_FORMAT")
            .is_some_and(|format| format.eq_ignore_ascii_case("json"));

        Ok(Self {
            api,
            catalog,
            breakpoints,
            json_logs,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed_or("SENTRY_SAMPLE_RATE", 1.0)?,
        })
    }
}

impl StorefrontApiConfig {
    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw_url = env.required("STOREFRONT_API_URL")?;
        let api_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_API_URL".to_string(), e.to_string())
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_API_URL".to_string(),
                format!("unsupported scheme '{}'", api_url.scheme()),
            ));
        }

        Ok(Self {
            api_url,
            access_token: get_validated_secret(env, "STOREFRONT_ACCESS_TOKEN")?,
        })
    }
}

impl CatalogConfig {
    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let home = env
            .optional("STOREFRONT_FEATURED_COLLECTION")
            .map(|handle| handle.trim().to_string())
            .filter(|handle| !handle.is_empty())
            .map_or(HomeSource::ShopFront, HomeSource::Collection);

        Ok(Self {
            home,
            page_size: get_page_size(env, "STOREFRONT_PAGE_SIZE", defaults.page_size)?,
            image_count: get_page_size(env, "STOREFRONT_IMAGE_COUNT", defaults.image_count)?,
            variant_count: get_page_size(env, "STOREFRONT_VARIANT_COUNT", defaults.variant_count)?,
        })
    }
}

fn load_breakpoints(env: &Env<'_>) -> Result<Breakpoints, ConfigError> {
    let defaults = Breakpoints::default();
    let breakpoints = Breakpoints {
        phone_max_width: env.parsed_or("STOREFRONT_PHONE_MAX_WIDTH", defaults.phone_max_width)?,
        tablet_max_width: env.parsed_or("STOREFRONT_TABLET_MAX_WIDTH", defaults.tablet_max_width)?,
        desktop_max_width: env
            .parsed_or("STOREFRONT_DESKTOP_MAX_WIDTH", defaults.desktop_max_width)?,
    };

    if !breakpoints.is_increasing() {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_*_MAX_WIDTH".to_string(),
            format!(
                "breakpoints must be strictly increasing (got {}, {}, {})",
                breakpoints.phone_max_width,
                breakpoints.tablet_max_width,
                breakpoints.desktop_max_width
            ),
        ));
    }
    Ok(breakpoints)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup used while loading.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a variable parsed as `T`, or `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Get a page size in `1..=250`.
fn get_page_size(env: &Env<'_>, key: &str, default: i64) -> Result<i64, ConfigError> {
    let value = env.parsed_or(key, default)?;
    if (1..=MAX_PAGE_SIZE).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 1 and {MAX_PAGE_SIZE} (got {value})"),
        ))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real access tokens are random hex/base62 strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the token from the Shopify admin."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret.
fn get_validated_secret(env: &Env<'_>, key: &str) -> Result<SecretString, ConfigError> {
    let value = env.required(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    const TOKEN: &str = "3f9a1c7e5b2d8046af1e9c3b7d5a2f60";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                "STOREFRONT_API_URL",
                "https://pineapple.myshopify.com/api/2026-01/graphql.json",
            ),
            ("STOREFRONT_ACCESS_TOKEN", TOKEN),
        ]
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-access-token-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_hex_token() {
        assert!(validate_secret_strength(TOKEN, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = ShopfrontConfig::from_lookup(lookup(&minimal())).unwrap();

        assert_eq!(config.catalog, CatalogConfig::default());
        assert_eq!(config.breakpoints, Breakpoints::default());
        assert!(!config.json_logs);
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.api.access_token.expose_secret(), TOKEN);
    }

    #[test]
    fn test_missing_token() {
        let vars = [(
            "STOREFRONT_API_URL",
            "https://pineapple.myshopify.com/api/2026-01/graphql.json",
        )];
        let err = ShopfrontConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingEnvVar(ref key) if key == "STOREFRONT_ACCESS_TOKEN")
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let vars = [
            ("STOREFRONT_API_URL", "not a url"),
            ("STOREFRONT_ACCESS_TOKEN", TOKEN),
        ];
        let err = ShopfrontConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));

        let vars = [
            ("STOREFRONT_API_URL", "ftp://pineapple.example/graphql"),
            ("STOREFRONT_ACCESS_TOKEN", TOKEN),
        ];
        let err = ShopfrontConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_featured_collection_and_page_size() {
        let mut vars = minimal();
        vars.push(("STOREFRONT_FEATURED_COLLECTION", " frontpage "));
        vars.push(("STOREFRONT_PAGE_SIZE", "12"));
        vars.push(("LOG_FORMAT", "JSON"));

        let config = ShopfrontConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            config.catalog.home,
            HomeSource::Collection("frontpage".to_string())
        );
        assert_eq!(config.catalog.page_size, 12);
        assert!(config.json_logs);
    }

    #[test]
    fn test_page_size_out_of_range() {
        let mut vars = minimal();
        vars.push(("STOREFRONT_PAGE_SIZE", "0"));
        assert!(ShopfrontConfig::from_lookup(lookup(&vars)).is_err());

        let mut vars = minimal();
        vars.push(("STOREFRONT_VARIANT_COUNT", "251"));
        assert!(ShopfrontConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_breakpoints_must_increase() {
        let mut vars = minimal();
        vars.push(("STOREFRONT_TABLET_MAX_WIDTH", "500"));
        let err = ShopfrontConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_api_config_debug_redacts_token() {
        let config = ShopfrontConfig::from_lookup(lookup(&minimal())).unwrap();
        let debug_output = format!("{:?}", config.api);

        assert!(debug_output.contains("pineapple.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(TOKEN));
    }
}

//! Configuration validation for site deployments.
//!
//! This module checks the invariants the synthesizer relies on: non-empty
//! names, well-formed DNS labels, a present certificate id, a recognized
//! price class, and an existing asset directory. All issues are collected
//! before the first error is turned into a fatal result.

use crate::error::{ConfigError, Result, SiteDeployError};
use std::path::PathBuf;
use tracing::debug;

use super::spec::{PriceClass, SiteConfig};

/// Validator for site deployment configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator {
    /// Working directory for asset resolution, if filesystem checks are wanted.
    working_dir: Option<PathBuf>,
}

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator without filesystem checks.
    #[must_use]
    pub const fn new() -> Self {
        Self { working_dir: None }
    }

    /// Enables asset-directory checks relative to the given working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Validates a site configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self, config: &SiteConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        Self::validate_names(config, &mut result);
        Self::validate_certificate(config, &mut result);
        Self::validate_price_class(config, &mut result);
        self.validate_assets(config, &mut result);

        if result.errors.is_empty() {
            debug!("Configuration validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(SiteDeployError::Config(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }))
        }
    }

    /// Validates stack name, domain and subdomain.
    fn validate_names(config: &SiteConfig, result: &mut ValidationResult) {
        if config.stack_name.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("stack_name"),
                message: String::from("Stack name cannot be empty"),
            });
        }

        if config.domain.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("domain"),
                message: String::from("Domain cannot be empty"),
            });
        } else if !is_valid_domain(&config.domain) {
            result.errors.push(ValidationError {
                field: String::from("domain"),
                message: format!(
                    "Domain '{}' is invalid. Must be dot-separated lowercase labels.",
                    config.domain
                ),
            });
        } else if !config.domain.contains('.') {
            result.warnings.push(format!(
                "domain: '{}' has no dot; expected an apex domain like example.com",
                config.domain
            ));
        }

        if config.subdomain.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("subdomain"),
                message: String::from("Subdomain cannot be empty"),
            });
        } else if !is_valid_label(&config.subdomain) {
            result.errors.push(ValidationError {
                field: String::from("subdomain"),
                message: format!(
                    "Subdomain '{}' is invalid. Must be a lowercase alphanumeric label.",
                    config.subdomain
                ),
            });
        }
    }

    /// Validates that a certificate id is configured.
    ///
    /// Issuing a certificate is out of scope, so an absent id can never be
    /// satisfied later in the run.
    fn validate_certificate(config: &SiteConfig, result: &mut ValidationResult) {
        let missing = config
            .acm_id
            .as_ref()
            .is_none_or(|id| id.trim().is_empty());

        if missing {
            result.errors.push(ValidationError {
                field: String::from("acm_id"),
                message: String::from(
                    "Certificate creation is not supported; \
                     set acm_id to an existing ACM certificate id",
                ),
            });
        }
    }

    /// Validates the price class tier, when configured.
    fn validate_price_class(config: &SiteConfig, result: &mut ValidationResult) {
        if let Some(raw) = config.price_class.as_deref()
            && PriceClass::parse(raw).is_none() {
                result.errors.push(ValidationError {
                    field: String::from("price_class"),
                    message: format!(
                        "Unrecognized price_class '{raw}': expected one of 100, 200, ALL"
                    ),
                });
            }
    }

    /// Validates that the asset directory exists, if a working directory
    /// was supplied.
    fn validate_assets(&self, config: &SiteConfig, result: &mut ValidationResult) {
        if config.source.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("source"),
                message: String::from("Asset source cannot be empty"),
            });
            return;
        }

        if let Some(cwd) = &self.working_dir
            && let Err(e) = config.resolve_assets(cwd) {
                result.errors.push(ValidationError {
                    field: String::from("source"),
                    message: e.to_string(),
                });
            }
    }
}

/// Validates a single DNS label.
/// Labels must be lowercase alphanumeric with hyphens, starting with a
/// letter or digit and not ending with a hyphen.
fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }

    let mut chars = label.chars();

    if let Some(first) = chars.next()
        && !first.is_ascii_lowercase()
        && !first.is_ascii_digit() {
            return false;
        }

    for c in chars {
        if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
            return false;
        }
    }

    !label.ends_with('-')
}

/// Validates a dot-separated domain name.
fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty() && domain.split('.').all(is_valid_label)
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SiteConfig {
        SiteConfig {
            stack_name: String::from("MelSite"),
            domain: String::from("example.com"),
            subdomain: String::from("mel"),
            source: String::from("src"),
            acm_id: Some(String::from("92fca839-f71e-41ce-bfe0-458a09ae60e9")),
            price_class: None,
            redirect_apex: true,
            include_apex: false,
            ipv6_support: false,
            region: String::from("us-east-1"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let validator = ConfigValidator::new();
        let result = validator.validate(&valid_config()).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_empty_domain_fails() {
        let mut config = valid_config();
        config.domain = String::new();

        let validator = ConfigValidator::new();
        assert!(validator.validate(&config).is_err());
    }

    #[test]
    fn test_empty_subdomain_fails() {
        let mut config = valid_config();
        config.subdomain = String::new();

        let validator = ConfigValidator::new();
        assert!(validator.validate(&config).is_err());
    }

    #[test]
    fn test_missing_certificate_fails_with_unsupported_message() {
        let mut config = valid_config();
        config.acm_id = None;

        let validator = ConfigValidator::new();
        let err = validator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("Certificate creation is not supported"));
    }

    #[test]
    fn test_unrecognized_price_class_fails() {
        let mut config = valid_config();
        config.price_class = Some(String::from("500"));

        let validator = ConfigValidator::new();
        let err = validator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("price_class"));
    }

    #[test]
    fn test_missing_assets_fail_when_working_dir_set() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deploy");
        std::fs::create_dir(&nested).unwrap();

        let validator = ConfigValidator::new().with_working_dir(&nested);
        let err = validator.validate(&valid_config()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_assets_found_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deploy");
        std::fs::create_dir(&nested).unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();

        let validator = ConfigValidator::new().with_working_dir(&nested);
        let result = validator.validate(&valid_config()).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_valid_label() {
        assert!(is_valid_label("mel"));
        assert!(is_valid_label("my-site-123"));
        assert!(is_valid_label("a"));
    }

    #[test]
    fn test_invalid_label() {
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("Mel")); // uppercase
        assert!(!is_valid_label("mel_site")); // underscore
        assert!(!is_valid_label("mel-")); // ends with hyphen
    }

    #[test]
    fn test_valid_domain() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("my-site.example.co.uk"));
        assert!(!is_valid_domain("example..com"));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain("Example.com"));
    }
}

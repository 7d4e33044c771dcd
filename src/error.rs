//! Error types for the sitedeploy provisioning tool.
//!
//! Every failure in the tool is fatal: the configuration is either complete
//! and resolvable or the run stops with a human-readable diagnostic. There
//! are no retries and no partial-failure semantics.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for sitedeploy operations.
#[derive(Debug, Error)]
pub enum SiteDeployError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Topology synthesis errors.
    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },

    /// The asset source directory exists at none of the candidate locations.
    #[error("Asset directory '{source_name}' not found; looked in {}", format_candidates(.searched))]
    AssetsNotFound {
        /// The configured source name.
        source_name: String,
        /// Candidate paths that were checked.
        searched: Vec<PathBuf>,
    },

    /// The configured price class is not one of the recognized tiers.
    #[error("Invalid price_class '{value}': expected one of 100, 200, ALL")]
    InvalidPriceClass {
        /// The unrecognized value.
        value: String,
    },
}

/// Topology synthesis errors.
#[derive(Debug, Error)]
pub enum SynthError {
    /// No certificate id was configured. Issuing a new certificate is not
    /// supported, so this is fatal rather than a trigger for creation.
    #[error(
        "Certificate creation is not supported: set acm_id to the id of an \
         existing ACM certificate in {region}"
    )]
    CertificateCreationUnsupported {
        /// Region the certificate would have been issued in.
        region: String,
    },

    /// A resource id was produced twice.
    #[error("Duplicate resource id in topology: {id}")]
    DuplicateResourceId {
        /// The colliding id.
        id: String,
    },

    /// A directive references a resource that was never declared.
    #[error("Resource '{id}' references undeclared dependency '{dependency}'")]
    UnknownDependency {
        /// The referencing resource.
        id: String,
        /// The missing dependency id.
        dependency: String,
    },
}

/// Result type alias for sitedeploy operations.
pub type Result<T> = std::result::Result<T, SiteDeployError>;

fn format_candidates(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" and ")
}

impl SiteDeployError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a validation error without a specific field.
    #[must_use]
    pub fn validation_general(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: None,
        }
    }
}

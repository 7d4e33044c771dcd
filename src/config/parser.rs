//! Configuration parser for loading the deployment definition.
//!
//! This module handles loading configuration from YAML files and environment
//! variables, with proper precedence and error handling.

use crate::error::{ConfigError, Result, SiteDeployError};
use std::path::Path;
use tracing::{debug, info};

use super::spec::SiteConfig;

/// Configuration parser for loading the site deployment definition.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving relative paths.
    base_path: Option<std::path::PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<SiteConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(SiteDeployError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SiteDeployError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<SiteConfig> {
        debug!("Parsing YAML configuration");

        let config: SiteConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            SiteDeployError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        debug!("Successfully parsed configuration for stack: {}", config.stack_name);
        Ok(config)
    }

    /// Loads configuration with environment variable overrides.
    ///
    /// Environment variables are checked in the format:
    /// `SITEDEPLOY_<KEY>` (e.g., `SITEDEPLOY_DOMAIN`)
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_with_env(&self, path: impl AsRef<Path>) -> Result<SiteConfig> {
        let mut config = self.load_file(path)?;

        Self::apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(config: &mut SiteConfig) {
        if let Ok(domain) = std::env::var("SITEDEPLOY_DOMAIN") {
            debug!("Overriding domain from environment");
            config.domain = domain;
        }

        if let Ok(subdomain) = std::env::var("SITEDEPLOY_SUBDOMAIN") {
            debug!("Overriding subdomain from environment");
            config.subdomain = subdomain;
        }

        if let Ok(region) = std::env::var("SITEDEPLOY_REGION") {
            debug!("Overriding region from environment");
            config.region = region;
        }

        if let Ok(acm_id) = std::env::var("SITEDEPLOY_ACM_ID") {
            debug!("Overriding acm_id from environment");
            config.acm_id = Some(acm_id);
        }
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| std::path::PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                SiteDeployError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }

    /// Gets the AWS account id from the environment.
    ///
    /// Checks `AWS_ACCOUNT` first, then `CDK_DEFAULT_ACCOUNT`. The account
    /// is interpolated into the certificate ARN, so an unset value is fatal
    /// rather than an empty string in the directive set.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn get_aws_account() -> Result<String> {
        std::env::var("AWS_ACCOUNT")
            .or_else(|_| std::env::var("CDK_DEFAULT_ACCOUNT"))
            .map_err(|_| {
                SiteDeployError::Config(ConfigError::MissingEnvVar {
                    name: String::from("AWS_ACCOUNT"),
                })
            })
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "sitedeploy.yaml",
    "sitedeploy.yml",
    "site.yaml",
    "site.yml",
];

/// Finds the configuration file in the current directory or parent directories.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(SiteDeployError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }))
}

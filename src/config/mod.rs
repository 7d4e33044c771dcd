//! Configuration module for the sitedeploy tool.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing `sitedeploy.yaml`
//! - Validation of configuration values
//! - Computing configuration fingerprints for the manifest

mod spec;
mod parser;
mod validator;
mod hash;

pub use spec::{PriceClass, SiteConfig};
pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, find_config_file};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
pub use hash::ConfigHasher;

//! Configuration specification types for a static-site deployment.
//!
//! This module defines the structs that map to the `sitedeploy.yaml` file.
//! The configuration is a single immutable value object: it is deserialized
//! once at process start and only read afterwards. Typed accessors replace
//! ad-hoc string lookups everywhere downstream.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// The root configuration for a static-site deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    /// Name of the provisioning stack.
    pub stack_name: String,
    /// Apex domain the site lives under (e.g., `example.com`).
    pub domain: String,
    /// Subdomain label serving the site (e.g., `www`).
    pub subdomain: String,
    /// Asset source directory, relative to the working directory.
    pub source: String,
    /// Id of an existing ACM certificate. Certificate creation is not
    /// supported, so an absent id is fatal at synthesis time.
    #[serde(default)]
    pub acm_id: Option<String>,
    /// CloudFront price class tier: "100", "200" or "ALL".
    #[serde(default)]
    pub price_class: Option<String>,
    /// Whether to serve an apex-to-subdomain redirect.
    #[serde(default = "default_redirect_apex")]
    pub redirect_apex: bool,
    /// Whether to create DNS records for the apex domain.
    #[serde(default)]
    pub include_apex: bool,
    /// Whether to mirror every A record with an AAAA record.
    #[serde(default)]
    pub ipv6_support: bool,
    /// AWS region the certificate and stack live in.
    #[serde(default = "default_region")]
    pub region: String,
}

/// CloudFront price class tiers.
///
/// Controls which edge locations serve the distribution. The narrowest
/// tier is the default when the configuration leaves the field unset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PriceClass {
    /// North America and Europe only.
    #[default]
    #[serde(rename = "PRICE_CLASS_100")]
    Class100,
    /// North America, Europe, Asia, Middle East and Africa.
    #[serde(rename = "PRICE_CLASS_200")]
    Class200,
    /// All edge locations.
    #[serde(rename = "PRICE_CLASS_ALL")]
    ClassAll,
}

const fn default_redirect_apex() -> bool {
    true
}

fn default_region() -> String {
    String::from("us-east-1")
}

impl PriceClass {
    /// Parses a configured tier string ("100", "200" or "ALL").
    ///
    /// Returns `None` for anything else; the caller decides whether that
    /// is reported as an error or defaulted.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "100" => Some(Self::Class100),
            "200" => Some(Self::Class200),
            "ALL" => Some(Self::ClassAll),
            _ => None,
        }
    }
}

impl std::fmt::Display for PriceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Class100 => "PRICE_CLASS_100",
            Self::Class200 => "PRICE_CLASS_200",
            Self::ClassAll => "PRICE_CLASS_ALL",
        };
        write!(f, "{s}")
    }
}

impl SiteConfig {
    /// Returns the fully qualified domain name the site is served from.
    #[must_use]
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.subdomain, self.domain)
    }

    /// Resolves the configured price class tier.
    ///
    /// An unset field resolves to the narrowest tier. An unrecognized
    /// value is reported as an error rather than silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPriceClass`] for unrecognized values.
    pub fn price_class(&self) -> Result<PriceClass, ConfigError> {
        match self.price_class.as_deref() {
            None => Ok(PriceClass::default()),
            Some(raw) => PriceClass::parse(raw).ok_or_else(|| ConfigError::InvalidPriceClass {
                value: raw.to_string(),
            }),
        }
    }

    /// Builds the fully qualified ARN of the configured certificate.
    ///
    /// Returns `None` when no certificate id is configured; the synthesizer
    /// turns that into a fatal unsupported-operation error.
    #[must_use]
    pub fn certificate_arn(&self, account: &str) -> Option<String> {
        self.acm_id.as_ref().map(|id| {
            format!(
                "arn:aws:acm:{region}:{account}:certificate/{id}",
                region = self.region
            )
        })
    }

    /// Resolves the asset source directory.
    ///
    /// Checks `<cwd>/<source>` and then `<cwd>/../<source>`. The parent
    /// fallback matches the common layout where the deployment definition
    /// sits in a subdirectory next to the site sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AssetsNotFound`] with both candidate paths
    /// when neither is an existing directory.
    pub fn resolve_assets(&self, cwd: &Path) -> Result<PathBuf, ConfigError> {
        let candidates = [cwd.join(&self.source), cwd.join("..").join(&self.source)];

        for candidate in &candidates {
            if candidate.is_dir() {
                return Ok(candidate.clone());
            }
        }

        Err(ConfigError::AssetsNotFound {
            source_name: self.source.clone(),
            searched: candidates.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
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
    fn test_fqdn() {
        assert_eq!(test_config().fqdn(), "mel.example.com");
    }

    #[test]
    fn test_price_class_parse() {
        assert_eq!(PriceClass::parse("100"), Some(PriceClass::Class100));
        assert_eq!(PriceClass::parse("200"), Some(PriceClass::Class200));
        assert_eq!(PriceClass::parse("ALL"), Some(PriceClass::ClassAll));
        assert_eq!(PriceClass::parse("all"), None);
        assert_eq!(PriceClass::parse("300"), None);
        assert_eq!(PriceClass::parse(""), None);
    }

    #[test]
    fn test_price_class_defaults_to_narrowest() {
        let config = test_config();
        assert_eq!(config.price_class().unwrap(), PriceClass::Class100);
    }

    #[test]
    fn test_price_class_unrecognized_is_reported() {
        let mut config = test_config();
        config.price_class = Some(String::from("150"));
        let err = config.price_class().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPriceClass { value } if value == "150"));
    }

    #[test]
    fn test_certificate_arn() {
        let config = test_config();
        assert_eq!(
            config.certificate_arn("123456789012").as_deref(),
            Some(
                "arn:aws:acm:us-east-1:123456789012:certificate/\
                 92fca839-f71e-41ce-bfe0-458a09ae60e9"
            )
        );
    }

    #[test]
    fn test_certificate_arn_absent_without_id() {
        let mut config = test_config();
        config.acm_id = None;
        assert!(config.certificate_arn("123456789012").is_none());
    }

    #[test]
    fn test_resolve_assets_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();

        let config = test_config();
        let resolved = config.resolve_assets(dir.path()).unwrap();
        assert_eq!(resolved, dir.path().join("src"));
    }

    #[test]
    fn test_resolve_assets_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::create_dir(dir.path().join("deploy")).unwrap();

        let config = test_config();
        let resolved = config.resolve_assets(&dir.path().join("deploy")).unwrap();
        assert_eq!(resolved, dir.path().join("deploy").join("..").join("src"));
    }

    #[test]
    fn test_resolve_assets_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();

        let config = test_config();
        let err = config.resolve_assets(dir.path()).unwrap_err();
        match err {
            ConfigError::AssetsNotFound {
                source_name,
                searched,
            } => {
                assert_eq!(source_name, "src");
                assert_eq!(searched.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

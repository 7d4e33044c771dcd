//! Configuration fingerprinting.
//!
//! This module provides deterministic hashing of the deployment
//! configuration. The fingerprint is embedded in the synthesized manifest
//! so a consumer can tell which configuration a directive set came from.

use sha2::{Digest, Sha256};

use super::spec::SiteConfig;

/// Hasher for computing configuration fingerprints.
#[derive(Debug, Default)]
pub struct ConfigHasher;

impl ConfigHasher {
    /// Creates a new configuration hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes a hash of the entire site configuration.
    ///
    /// This hash changes when any part of the configuration changes.
    #[must_use]
    pub fn hash_config(&self, config: &SiteConfig) -> String {
        let mut hasher = Sha256::new();

        hasher.update(config.stack_name.as_bytes());
        hasher.update(config.domain.as_bytes());
        hasher.update(config.subdomain.as_bytes());
        hasher.update(config.source.as_bytes());
        hasher.update(config.region.as_bytes());

        if let Some(acm_id) = &config.acm_id {
            hasher.update(acm_id.as_bytes());
        }
        if let Some(price_class) = &config.price_class {
            hasher.update(price_class.as_bytes());
        }

        hasher.update([
            u8::from(config.redirect_apex),
            u8::from(config.include_apex),
            u8::from(config.ipv6_support),
        ]);

        hex::encode(hasher.finalize())
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
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
    fn test_hash_deterministic() {
        let hasher = ConfigHasher::new();
        let config = test_config();

        assert_eq!(hasher.hash_config(&config), hasher.hash_config(&config));
    }

    #[test]
    fn test_flag_changes_hash() {
        let hasher = ConfigHasher::new();
        let config = test_config();
        let mut flipped = test_config();
        flipped.ipv6_support = true;

        assert_ne!(hasher.hash_config(&config), hasher.hash_config(&flipped));
    }

    #[test]
    fn test_domain_changes_hash() {
        let hasher = ConfigHasher::new();
        let config = test_config();
        let mut other = test_config();
        other.domain = String::from("example.org");

        assert_ne!(hasher.hash_config(&config), hasher.hash_config(&other));
    }

    #[test]
    fn test_short_hash() {
        let hasher = ConfigHasher::new();
        let short = hasher.short_hash("abcdef1234567890abcdef1234567890");

        assert_eq!(short, "abcdef12");
        assert_eq!(short.len(), 8);
    }
}

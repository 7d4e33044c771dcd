//! Topology synthesis from a validated site configuration.
//!
//! This is the resolver core: a straight-line walk over the configuration
//! flags that declares every resource the stack needs, in dependency order.
//! Nothing here talks to a provider; the output is a directive set for an
//! external engine.
//!
//! The decision table:
//!
//! | condition | effect |
//! |---|---|
//! | always | site bucket + OAI + asset deployment + site distribution + subdomain record |
//! | `redirect_apex` | redirect website bucket + redirect distribution; apex records target it |
//! | `!redirect_apex` | apex records target the site distribution |
//! | `include_apex` | apex A (and AAAA) records are declared |
//! | `ipv6_support` | every A record gets an AAAA twin with the same name and target |

use std::path::Path;
use tracing::debug;

use crate::config::{ConfigHasher, SiteConfig};
use crate::error::{Result, SynthError};

use super::resources::{
    DistributionOrigin, RecordType, RemovalPolicy, ResourceKind, SecurityPolicy, SslMethod,
    Topology,
};

/// Resource id of the certificate reference.
const ID_CERTIFICATE: &str = "certificate";
/// Resource id of the hosted zone lookup.
const ID_ZONE: &str = "hosted-zone";
/// Resource id of the site origin bucket.
const ID_SITE_BUCKET: &str = "site-bucket";
/// Resource id of the asset deployment.
const ID_SITE_ASSETS: &str = "site-assets";
/// Resource id of the origin access identity.
const ID_SITE_OAI: &str = "site-oai";
/// Resource id of the site distribution.
const ID_SITE_DISTRIBUTION: &str = "site-distribution";
/// Resource id of the apex redirect bucket.
const ID_REDIRECT_BUCKET: &str = "redirect-bucket";
/// Resource id of the apex redirect distribution.
const ID_REDIRECT_DISTRIBUTION: &str = "redirect-distribution";

/// Synthesizer deriving a [`Topology`] from a site configuration.
#[derive(Debug)]
pub struct Synthesizer {
    /// AWS account id, interpolated into the certificate ARN.
    account: String,
}

impl Synthesizer {
    /// Creates a synthesizer for the given AWS account.
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    /// Derives the full resource topology for a site.
    ///
    /// `assets` is the already-resolved asset directory (see
    /// [`SiteConfig::resolve_assets`]).
    ///
    /// # Errors
    ///
    /// Returns an error when no certificate id is configured (certificate
    /// creation is unsupported) or the price class is unrecognized.
    pub fn synthesize(&self, config: &SiteConfig, assets: &Path) -> Result<Topology> {
        let price_class = config.price_class()?;

        // Certificate issuance is out of scope: an existing id is mandatory.
        let certificate_arn = config.certificate_arn(&self.account).ok_or_else(|| {
            SynthError::CertificateCreationUnsupported {
                region: config.region.clone(),
            }
        })?;

        let hasher = ConfigHasher::new();
        let config_hash = hasher.hash_config(config);

        debug!(
            stack = %config.stack_name,
            fqdn = %config.fqdn(),
            redirect_apex = config.redirect_apex,
            include_apex = config.include_apex,
            ipv6 = config.ipv6_support,
            "Synthesizing topology"
        );

        let mut topology = Topology::new(
            &config.stack_name,
            &config.region,
            &self.account,
            config_hash,
        );

        topology.declare(
            ID_CERTIFICATE,
            ResourceKind::Certificate {
                arn: certificate_arn,
            },
            vec![],
        )?;

        topology.declare(
            ID_ZONE,
            ResourceKind::HostedZoneLookup {
                domain: config.domain.clone(),
            },
            vec![],
        )?;

        // Site origin: private bucket behind an OAI, assets uploaded into it.
        topology.declare(
            ID_SITE_BUCKET,
            ResourceKind::Bucket {
                website_redirect: None,
                removal_policy: RemovalPolicy::Destroy,
            },
            vec![],
        )?;

        topology.declare(
            ID_SITE_ASSETS,
            ResourceKind::BucketDeployment {
                source: assets.to_path_buf(),
                bucket: ID_SITE_BUCKET.to_string(),
            },
            vec![ID_SITE_BUCKET.to_string()],
        )?;

        topology.declare(ID_SITE_OAI, ResourceKind::OriginAccessIdentity, vec![])?;

        let mut site_aliases = vec![config.fqdn()];
        if config.include_apex && !config.redirect_apex {
            // Without a redirect the site distribution answers for the apex
            // directly.
            site_aliases.push(config.domain.clone());
        }

        topology.declare(
            ID_SITE_DISTRIBUTION,
            ResourceKind::Distribution {
                origin: DistributionOrigin::S3Origin {
                    bucket: ID_SITE_BUCKET.to_string(),
                    origin_access_identity: ID_SITE_OAI.to_string(),
                },
                aliases: site_aliases,
                certificate: ID_CERTIFICATE.to_string(),
                price_class,
                security_policy: SecurityPolicy::TlsV122018,
                ssl_method: SslMethod::Sni,
                ipv6_enabled: config.ipv6_support,
            },
            vec![
                ID_SITE_BUCKET.to_string(),
                ID_SITE_OAI.to_string(),
                ID_CERTIFICATE.to_string(),
            ],
        )?;

        if config.redirect_apex {
            // Apex traffic is answered by a website-redirect bucket fronted
            // by its own distribution.
            topology.declare(
                ID_REDIRECT_BUCKET,
                ResourceKind::Bucket {
                    website_redirect: Some(config.fqdn()),
                    removal_policy: RemovalPolicy::Destroy,
                },
                vec![],
            )?;

            topology.declare(
                ID_REDIRECT_DISTRIBUTION,
                ResourceKind::Distribution {
                    origin: DistributionOrigin::WebsiteOrigin {
                        bucket: ID_REDIRECT_BUCKET.to_string(),
                    },
                    aliases: vec![config.domain.clone()],
                    certificate: ID_CERTIFICATE.to_string(),
                    price_class,
                    security_policy: SecurityPolicy::TlsV122018,
                    ssl_method: SslMethod::Sni,
                    ipv6_enabled: config.ipv6_support,
                },
                vec![
                    ID_REDIRECT_BUCKET.to_string(),
                    ID_CERTIFICATE.to_string(),
                ],
            )?;
        }

        Self::declare_records(&mut topology, config)?;

        debug!(resources = topology.resource_count(), "Topology synthesized");
        Ok(topology)
    }

    /// Declares the DNS record sets.
    fn declare_records(topology: &mut Topology, config: &SiteConfig) -> Result<()> {
        Self::declare_record_pair(
            topology,
            "subdomain",
            &config.fqdn(),
            ID_SITE_DISTRIBUTION,
            config.ipv6_support,
        )?;

        if config.include_apex {
            let apex_target = if config.redirect_apex {
                ID_REDIRECT_DISTRIBUTION
            } else {
                ID_SITE_DISTRIBUTION
            };

            Self::declare_record_pair(
                topology,
                "apex",
                &config.domain,
                apex_target,
                config.ipv6_support,
            )?;
        }

        Ok(())
    }

    /// Declares an A record and, when IPv6 is on, its AAAA twin.
    fn declare_record_pair(
        topology: &mut Topology,
        id_prefix: &str,
        name: &str,
        target: &str,
        ipv6: bool,
    ) -> Result<()> {
        topology.declare(
            format!("{id_prefix}-a"),
            ResourceKind::RecordSet {
                name: name.to_string(),
                record_type: RecordType::A,
                target: target.to_string(),
                zone: ID_ZONE.to_string(),
            },
            vec![ID_ZONE.to_string(), target.to_string()],
        )?;

        if ipv6 {
            topology.declare(
                format!("{id_prefix}-aaaa"),
                ResourceKind::RecordSet {
                    name: name.to_string(),
                    record_type: RecordType::Aaaa,
                    target: target.to_string(),
                    zone: ID_ZONE.to_string(),
                },
                vec![ID_ZONE.to_string(), target.to_string()],
            )?;
        }

        Ok(())
    }
}

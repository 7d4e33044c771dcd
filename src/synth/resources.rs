//! Provisioning directive types.
//!
//! A [`Topology`] is the output of a run: an ordered set of resource
//! declarations handed to an external infrastructure engine. The tool never
//! executes these directives itself. Ordering matters only insofar as later
//! directives reference earlier ones by id, and [`Topology::declare`]
//! enforces exactly that.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::PriceClass;
use crate::error::SynthError;

/// A complete directive set for one stack.
#[derive(Debug, Clone, Serialize)]
pub struct Topology {
    /// Name of the provisioning stack.
    pub stack_name: String,
    /// AWS region the stack is declared in.
    pub region: String,
    /// AWS account id the stack is declared in.
    pub account: String,
    /// When the topology was synthesized.
    pub synthesized_at: DateTime<Utc>,
    /// Fingerprint of the configuration this topology was derived from.
    pub config_hash: String,
    /// Resource declarations in dependency order.
    pub resources: Vec<Resource>,
}

/// A single resource declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    /// Unique id of the resource within the topology.
    pub id: String,
    /// What kind of resource this declares.
    #[serde(flatten)]
    pub kind: ResourceKind,
    /// Ids of resources this declaration references.
    pub depends_on: Vec<String>,
}

/// Resource kinds understood by the provisioning engine.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceKind {
    /// Reference to an existing ACM certificate.
    Certificate {
        /// Fully qualified certificate ARN.
        arn: String,
    },
    /// Lookup of the hosted zone serving a domain.
    HostedZoneLookup {
        /// Apex domain of the zone.
        domain: String,
    },
    /// An S3 bucket.
    Bucket {
        /// Redirect target for website-redirect buckets.
        website_redirect: Option<String>,
        /// What happens to the bucket when the stack is torn down.
        removal_policy: RemovalPolicy,
    },
    /// Upload of local assets into a bucket.
    BucketDeployment {
        /// Resolved local asset directory.
        source: PathBuf,
        /// Id of the destination bucket.
        bucket: String,
    },
    /// Identity restricting direct bucket access to the CDN.
    OriginAccessIdentity,
    /// A CloudFront distribution.
    Distribution {
        /// Where the distribution pulls content from.
        origin: DistributionOrigin,
        /// Domain aliases served by the distribution.
        aliases: Vec<String>,
        /// Id of the viewer certificate resource.
        certificate: String,
        /// Edge-location tier.
        price_class: PriceClass,
        /// Minimum viewer TLS policy.
        security_policy: SecurityPolicy,
        /// How TLS is negotiated.
        ssl_method: SslMethod,
        /// Whether the distribution answers over IPv6.
        ipv6_enabled: bool,
    },
    /// A Route53 alias record.
    RecordSet {
        /// Fully qualified record name.
        name: String,
        /// Record type.
        record_type: RecordType,
        /// Id of the distribution the record points at.
        target: String,
        /// Id of the hosted zone lookup the record lives in.
        zone: String,
    },
}

/// Origin configuration of a distribution.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionOrigin {
    /// Private S3 bucket reached through an origin access identity.
    S3Origin {
        /// Id of the origin bucket.
        bucket: String,
        /// Id of the origin access identity.
        origin_access_identity: String,
    },
    /// S3 website-hosting bucket (used for the apex redirect).
    WebsiteOrigin {
        /// Id of the website bucket.
        bucket: String,
    },
}

/// Removal policy of a resource.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Delete the resource with the stack.
    Destroy,
    /// Keep the resource when the stack is torn down.
    Retain,
}

/// Minimum viewer TLS policy.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SecurityPolicy {
    /// TLS 1.2, 2018 cipher suite.
    #[serde(rename = "TLSv1.2_2018")]
    TlsV122018,
}

/// TLS negotiation method.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SslMethod {
    /// Server Name Indication.
    Sni,
}

/// DNS record types emitted by the synthesizer.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RecordType {
    /// IPv4 alias record.
    A,
    /// IPv6 alias record.
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl Topology {
    /// Creates an empty topology for a stack.
    #[must_use]
    pub fn new(
        stack_name: impl Into<String>,
        region: impl Into<String>,
        account: impl Into<String>,
        config_hash: impl Into<String>,
    ) -> Self {
        Self {
            stack_name: stack_name.into(),
            region: region.into(),
            account: account.into(),
            synthesized_at: Utc::now(),
            config_hash: config_hash.into(),
            resources: Vec::new(),
        }
    }

    /// Declares a resource.
    ///
    /// Ids must be unique, and every id in `depends_on` must already be
    /// declared; this keeps the resource vector in dependency order by
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate id or an undeclared dependency.
    pub fn declare(
        &mut self,
        id: impl Into<String>,
        kind: ResourceKind,
        depends_on: Vec<String>,
    ) -> Result<String, SynthError> {
        let id = id.into();

        if self.contains(&id) {
            return Err(SynthError::DuplicateResourceId { id });
        }

        for dependency in &depends_on {
            if !self.contains(dependency) {
                return Err(SynthError::UnknownDependency {
                    id,
                    dependency: dependency.clone(),
                });
            }
        }

        self.resources.push(Resource {
            id: id.clone(),
            kind,
            depends_on,
        });

        Ok(id)
    }

    /// Returns true if a resource with the given id is declared.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.resources.iter().any(|r| r.id == id)
    }

    /// Looks up a resource by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Returns all distribution declarations.
    #[must_use]
    pub fn distributions(&self) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| matches!(r.kind, ResourceKind::Distribution { .. }))
            .collect()
    }

    /// Returns all record set declarations.
    #[must_use]
    pub fn record_sets(&self) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| matches!(r.kind, ResourceKind::RecordSet { .. }))
            .collect()
    }

    /// Returns all bucket declarations.
    #[must_use]
    pub fn buckets(&self) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| matches!(r.kind, ResourceKind::Bucket { .. }))
            .collect()
    }

    /// Returns the record sets whose name equals the given domain.
    #[must_use]
    pub fn records_named(&self, name: &str) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| {
                matches!(&r.kind, ResourceKind::RecordSet { name: n, .. } if n == name)
            })
            .collect()
    }

    /// Returns the number of declared resources.
    #[must_use]
    pub const fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

impl Resource {
    /// Returns a short kind name for display.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ResourceKind::Certificate { .. } => "certificate",
            ResourceKind::HostedZoneLookup { .. } => "hosted_zone",
            ResourceKind::Bucket { .. } => "bucket",
            ResourceKind::BucketDeployment { .. } => "bucket_deployment",
            ResourceKind::OriginAccessIdentity => "origin_access_identity",
            ResourceKind::Distribution { .. } => "distribution",
            ResourceKind::RecordSet { .. } => "record_set",
        }
    }

    /// Returns a one-line human-readable summary of the declaration.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.kind {
            ResourceKind::Certificate { arn } => arn.clone(),
            ResourceKind::HostedZoneLookup { domain } => domain.clone(),
            ResourceKind::Bucket {
                website_redirect, ..
            } => website_redirect
                .as_ref()
                .map_or_else(String::new, |target| format!("redirect -> {target}")),
            ResourceKind::BucketDeployment { source, bucket } => {
                format!("{} -> {bucket}", source.display())
            }
            ResourceKind::OriginAccessIdentity => String::new(),
            ResourceKind::Distribution {
                aliases,
                price_class,
                ipv6_enabled,
                ..
            } => {
                let mut summary = aliases.join(", ");
                summary.push_str(&format!(" [{price_class}"));
                if *ipv6_enabled {
                    summary.push_str(", ipv6");
                }
                summary.push(']');
                summary
            }
            ResourceKind::RecordSet {
                name,
                record_type,
                target,
                ..
            } => format!("{name} {record_type} -> {target}"),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind_name(), self.id)?;
        let summary = self.summary();
        if !summary.is_empty() {
            write!(f, " ({summary})")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Stack {} ({} resources):",
            self.stack_name,
            self.resources.len()
        )?;
        for (i, resource) in self.resources.iter().enumerate() {
            writeln!(f, "  {i}. {resource}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_enforces_unique_ids() {
        let mut topology = Topology::new("MelSite", "us-east-1", "123456789012", "abc");
        topology
            .declare("site-bucket", ResourceKind::OriginAccessIdentity, vec![])
            .unwrap();

        let err = topology
            .declare("site-bucket", ResourceKind::OriginAccessIdentity, vec![])
            .unwrap_err();
        assert!(matches!(err, SynthError::DuplicateResourceId { id } if id == "site-bucket"));
    }

    #[test]
    fn test_declare_rejects_undeclared_dependency() {
        let mut topology = Topology::new("MelSite", "us-east-1", "123456789012", "abc");

        let err = topology
            .declare(
                "site-deploy",
                ResourceKind::OriginAccessIdentity,
                vec![String::from("site-bucket")],
            )
            .unwrap_err();
        assert!(matches!(err, SynthError::UnknownDependency { .. }));
    }

    #[test]
    fn test_declare_accepts_forward_order() {
        let mut topology = Topology::new("MelSite", "us-east-1", "123456789012", "abc");
        topology
            .declare(
                "site-bucket",
                ResourceKind::Bucket {
                    website_redirect: None,
                    removal_policy: RemovalPolicy::Destroy,
                },
                vec![],
            )
            .unwrap();
        topology
            .declare(
                "site-deploy",
                ResourceKind::BucketDeployment {
                    source: PathBuf::from("/work/src"),
                    bucket: String::from("site-bucket"),
                },
                vec![String::from("site-bucket")],
            )
            .unwrap();

        assert_eq!(topology.resource_count(), 2);
        assert!(topology.get("site-deploy").is_some());
    }

    #[test]
    fn test_record_type_display() {
        assert_eq!(RecordType::A.to_string(), "A");
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
    }

    #[test]
    fn test_manifest_serializes_record_type_tags() {
        let mut topology = Topology::new("MelSite", "us-east-1", "123456789012", "abc");
        topology
            .declare("zone", ResourceKind::HostedZoneLookup {
                domain: String::from("example.com"),
            }, vec![])
            .unwrap();
        topology
            .declare(
                "apex-aaaa",
                ResourceKind::RecordSet {
                    name: String::from("example.com"),
                    record_type: RecordType::Aaaa,
                    target: String::from("zone"),
                    zone: String::from("zone"),
                },
                vec![String::from("zone")],
            )
            .unwrap();

        let json = serde_json::to_string(&topology).unwrap();
        assert!(json.contains("\"record_type\":\"AAAA\""));
        assert!(json.contains("\"type\":\"hosted_zone_lookup\""));
    }
}

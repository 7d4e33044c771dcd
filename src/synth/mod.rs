//! Topology synthesis module.
//!
//! This module turns a validated configuration into the ordered set of
//! provisioning directives an external infrastructure engine consumes.

mod resources;
mod synthesizer;

pub use resources::{
    DistributionOrigin, RecordType, RemovalPolicy, Resource, ResourceKind, SecurityPolicy,
    SslMethod, Topology,
};
pub use synthesizer::Synthesizer;

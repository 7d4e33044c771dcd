// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning

// ============================================================================
// Crate Documentation
// ============================================================================

//! # sitedeploy
//!
//! Declarative provisioning for a static website served from an S3 origin
//! through CloudFront, with an ACM certificate and Route53 DNS records.
//!
//! ## Overview
//!
//! sitedeploy reads a single `sitedeploy.yaml`, validates it once into an
//! immutable configuration value, and deterministically derives the resource
//! topology the site needs:
//!
//! - an S3 origin bucket locked behind an origin access identity
//! - a CloudFront distribution serving `subdomain.domain`
//! - an optional apex-redirect bucket and distribution
//! - Route53 A (and AAAA) alias records
//!
//! The output is a directive manifest consumed by an external infrastructure
//! engine; sitedeploy never provisions anything itself. Each run is a fresh,
//! single-threaded, run-to-completion process: any misconfiguration is fatal
//! with a human-readable message.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing and validation
//! - [`synth`]: Topology derivation and directive types
//! - [`cli`]: Command-line interface
//! - [`error`]: Error hierarchy
//!
//! ## Example
//!
//! ```yaml
//! stack_name: MelSite
//! domain: example.com
//! subdomain: mel
//! source: src
//! acm_id: 92fca839-f71e-41ce-bfe0-458a09ae60e9
//! price_class: "100"
//! redirect_apex: true
//! include_apex: true
//! ipv6_support: true
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod synth;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigHasher, ConfigParser, ConfigValidator, PriceClass, SiteConfig};
pub use error::{Result, SiteDeployError};
pub use synth::{Synthesizer, Topology};

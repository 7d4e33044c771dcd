//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::config::ValidationResult;
use crate::synth::{ResourceKind, Topology};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a synthesized topology for display.
    #[must_use]
    pub fn format_topology(&self, topology: &Topology) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(topology).unwrap_or_default(),
            OutputFormat::Text => Self::format_topology_text(topology),
        }
    }

    /// Formats a topology as text.
    fn format_topology_text(topology: &Topology) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\nStack: {} ({}, account {})\n",
            topology.stack_name, topology.region, topology.account
        );
        let _ = write!(
            output,
            "   Config hash: {}\n\n",
            &topology.config_hash[..8.min(topology.config_hash.len())]
        );

        let rows: Vec<ResourceRow> = topology
            .resources
            .iter()
            .enumerate()
            .map(|(i, r)| ResourceRow {
                index: i + 1,
                kind: Self::format_kind(&r.kind),
                id: r.id.clone(),
                details: Self::truncate(&r.summary(), 48),
            })
            .collect();

        if !rows.is_empty() {
            let table = Table::new(rows).to_string();
            output.push_str(&table);
            output.push('\n');
        }

        let _ = write!(
            output,
            "\nTopology: {} buckets, {} distributions, {} records ({} resources total)\n",
            topology.buckets().len().to_string().green(),
            topology.distributions().len().to_string().green(),
            topology.record_sets().len().to_string().green(),
            topology.resource_count()
        );

        output
    }

    /// Formats a validation result for display.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": result.is_valid(),
                    "errors": result.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "warnings": result.warnings,
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = String::new();

                if result.is_valid() {
                    let _ = writeln!(output, "{} Configuration is valid.", "✓".green());
                } else {
                    let _ = writeln!(
                        output,
                        "{} Configuration has {} error(s):",
                        "✗".red(),
                        result.error_count()
                    );
                    for error in &result.errors {
                        let _ = writeln!(output, "   - {error}");
                    }
                }

                if show_warnings && !result.warnings.is_empty() {
                    let _ = writeln!(output, "\n{} Warnings:", "⚠".yellow());
                    for warning in &result.warnings {
                        let _ = writeln!(output, "   - {warning}");
                    }
                }

                output
            }
        }
    }

    /// Formats a resource kind with color.
    fn format_kind(kind: &ResourceKind) -> String {
        match kind {
            ResourceKind::Certificate { .. } => "certificate".cyan().to_string(),
            ResourceKind::HostedZoneLookup { .. } => "hosted_zone".cyan().to_string(),
            ResourceKind::Bucket { .. } => "bucket".green().to_string(),
            ResourceKind::BucketDeployment { .. } => "deployment".green().to_string(),
            ResourceKind::OriginAccessIdentity => "oai".dimmed().to_string(),
            ResourceKind::Distribution { .. } => "distribution".yellow().to_string(),
            ResourceKind::RecordSet { .. } => "record_set".blue().to_string(),
        }
    }

    /// Truncates a string to a maximum length.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.len() <= max_len {
            s.to_string()
        } else {
            format!("{}...", &s[..max_len - 3])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{RemovalPolicy, ResourceKind};

    fn sample_topology() -> Topology {
        let mut topology = Topology::new("MelSite", "us-east-1", "123456789012", "abcdef1234");
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
    }

    #[test]
    fn test_text_topology_mentions_stack_and_counts() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let output = formatter.format_topology(&sample_topology());

        assert!(output.contains("MelSite"));
        assert!(output.contains("site-bucket"));
        assert!(output.contains("(1 resources total)"));
    }

    #[test]
    fn test_json_topology_is_valid_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_topology(&sample_topology());

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["stack_name"], "MelSite");
        assert_eq!(value["resources"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(
            OutputFormatter::truncate("a-much-longer-string", 10),
            "a-much-..."
        );
    }
}

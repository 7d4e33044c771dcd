//! sitedeploy CLI entrypoint.
//!
//! This is the main entrypoint for the sitedeploy command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sitedeploy::cli::{Cli, Commands, OutputFormatter};
use sitedeploy::config::{ConfigParser, ConfigValidator, SiteConfig, find_config_file};
use sitedeploy::error::Result;
use sitedeploy::synth::Synthesizer;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Dispatches the parsed command.
fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Validate {
            warnings,
            no_assets,
        } => cmd_validate(cli.config.as_ref(), warnings, no_assets, &formatter),
        Commands::Synth { out } => cmd_synth(cli.config.as_ref(), out.as_deref(), &formatter),
    }
}

/// Initialize a new project.
fn cmd_init(path: &PathBuf, force: bool) -> Result<()> {
    info!("Initializing new sitedeploy project in: {}", path.display());

    let config_path = path.join("sitedeploy.yaml");
    let env_path = path.join(".env.example");
    let gitignore_path = path.join(".gitignore");

    // Check if files exist
    if !force && config_path.exists() {
        eprintln!("Configuration file already exists: {}", config_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    // Create directory if needed
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    // Write config template
    let config_template = include_str!("../templates/sitedeploy.yaml");
    std::fs::write(&config_path, config_template)?;
    eprintln!("Created: {}", config_path.display());

    // Write .env.example
    let env_template = include_str!("../templates/.env.example");
    std::fs::write(&env_path, env_template)?;
    eprintln!("Created: {}", env_path.display());

    // Write/update .gitignore
    let gitignore_content = ".env\nsite.out/\n";
    if gitignore_path.exists() {
        let existing = std::fs::read_to_string(&gitignore_path)?;
        if !existing.contains(".env") || !existing.contains("site.out") {
            let mut file = std::fs::OpenOptions::new()
                .append(true)
                .open(&gitignore_path)?;
            writeln!(file, "\n# sitedeploy")?;
            if !existing.contains(".env") {
                writeln!(file, ".env")?;
            }
            if !existing.contains("site.out") {
                writeln!(file, "site.out/")?;
            }
            eprintln!("Updated: {}", gitignore_path.display());
        }
    } else {
        std::fs::write(&gitignore_path, gitignore_content)?;
        eprintln!("Created: {}", gitignore_path.display());
    }

    eprintln!("\nProject initialized successfully!");
    eprintln!("Next steps:");
    eprintln!("  1. Copy .env.example to .env and set your AWS account id");
    eprintln!("  2. Edit sitedeploy.yaml with your domain and certificate id");
    eprintln!("  3. Run 'sitedeploy validate' to check your configuration");
    eprintln!("  4. Run 'sitedeploy synth' to emit the provisioning manifest");

    Ok(())
}

/// Validate configuration.
fn cmd_validate(
    config_path: Option<&PathBuf>,
    show_warnings: bool,
    no_assets: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let (config, result) = load_and_validate(config_path, no_assets)?;

    eprintln!("{}", formatter.format_validation(&result, show_warnings));

    // Show summary
    eprintln!("Configuration summary:");
    eprintln!("  Stack: {}", config.stack_name);
    eprintln!("  Site: {}", config.fqdn());
    eprintln!("  Apex records: {}", config.include_apex);
    eprintln!("  Apex redirect: {}", config.redirect_apex);
    eprintln!("  IPv6: {}", config.ipv6_support);

    Ok(())
}

/// Derive the topology and emit the manifest.
fn cmd_synth(
    config_path: Option<&PathBuf>,
    out: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let (config, _) = load_and_validate(config_path, false)?;

    let cwd = std::env::current_dir()?;
    let assets = config.resolve_assets(&cwd)?;

    let account = ConfigParser::get_aws_account()?;
    let synthesizer = Synthesizer::new(account);
    let topology = synthesizer.synthesize(&config, &assets)?;

    if let Some(out_path) = out {
        if let Some(parent) = out_path.parent()
            && !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        let manifest = serde_json::to_string_pretty(&topology)
            .map_err(|e| sitedeploy::error::SiteDeployError::internal(e.to_string()))?;
        std::fs::write(out_path, manifest)?;
        eprintln!(
            "Wrote manifest with {} resources to: {}",
            topology.resource_count(),
            out_path.display()
        );
    } else {
        eprintln!("{}", formatter.format_topology(&topology));
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves the configuration file path.
fn resolve_config_path(config_path: Option<&PathBuf>) -> Result<PathBuf> {
    config_path.map_or_else(|| find_config_file("."), |path| Ok(path.clone()))
}

/// Loads, parses and validates the configuration.
fn load_and_validate(
    config_path: Option<&PathBuf>,
    no_assets: bool,
) -> Result<(SiteConfig, sitedeploy::config::ValidationResult)> {
    let config_file = resolve_config_path(config_path)?;
    info!("Using configuration: {}", config_file.display());

    let parser = ConfigParser::new().with_base_path(
        config_file
            .parent()
            .unwrap_or_else(|| Path::new(".")),
    );
    parser.load_dotenv()?;

    let config = parser.load_with_env(&config_file)?;

    let mut validator = ConfigValidator::new();
    if !no_assets {
        validator = validator.with_working_dir(std::env::current_dir()?);
    }
    let result = validator.validate(&config)?;

    Ok((config, result))
}

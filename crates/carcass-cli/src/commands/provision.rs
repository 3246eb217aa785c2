//! Provision and update-plugins command implementations

use std::path::{Path, PathBuf};

use colored::Colorize;

use carcass_artifacts::{ClientConfig, PaperClient};
use carcass_core::{Provisioner, RunMode, RunReport, ServerReport};
use carcass_meta::{ConfigFile, Overrides, ProvisioningConfig, load_config_file};

use crate::error::{CliError, Result};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "carcass.toml";

/// Resolve the full configuration from an optional file and CLI overrides.
///
/// An explicit `config` path must exist; the default file is optional.
pub fn load_config(
    cwd: &Path,
    config: Option<PathBuf>,
    overrides: Overrides,
) -> Result<ProvisioningConfig> {
    let file = match config {
        Some(path) => load_config_file(&path)?,
        None => {
            let default_path = cwd.join(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                tracing::debug!(path = %default_path.display(), "Using default config file");
                load_config_file(&default_path)?
            } else {
                ConfigFile::default()
            }
        }
    };

    Ok(ProvisioningConfig::resolve(file, overrides)?)
}

fn paper_client(config: &ProvisioningConfig) -> Result<PaperClient> {
    let client_config = ClientConfig::new(&config.http.base_url)
        .with_timeouts(config.http.connect_timeout, config.http.request_timeout);
    Ok(PaperClient::new(client_config)?)
}

/// Run the provision command
///
/// Wipes and recreates every backend and the proxy under the output root.
pub async fn run_provision(config: &ProvisioningConfig) -> Result<()> {
    println!(
        "{} Provisioning {} backend(s) and proxy {} into {}",
        "=>".blue().bold(),
        config.backends.len(),
        config.proxy.name.cyan(),
        config.root.as_str().cyan()
    );

    let client = paper_client(config)?;
    let report = Provisioner::new(config, &client).provision().await?;
    finish(&report)
}

/// Run the update-plugins command
///
/// Replaces the `plugins/` directory of every existing backend.
pub async fn run_update_plugins(config: &ProvisioningConfig) -> Result<()> {
    println!(
        "{} Updating plugins of {} backend(s) in {}",
        "=>".blue().bold(),
        config.backends.len(),
        config.root.as_str().cyan()
    );

    let client = paper_client(config)?;
    let report = Provisioner::new(config, &client).update_plugins().await?;
    finish(&report)
}

fn print_server(server: &ServerReport) {
    match &server.failure {
        None => println!(
            "{} {} ({}), {} plugin(s) staged",
            "OK".green().bold(),
            server.name.cyan(),
            server.role.to_string().dimmed(),
            server.plugins_staged
        ),
        Some(failure) => println!(
            "{} {} ({}): {}",
            "FAILED".red().bold(),
            server.name.cyan(),
            server.role.to_string().dimmed(),
            failure
        ),
    }
    for warning in &server.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }
}

fn finish(report: &RunReport) -> Result<()> {
    for server in &report.servers {
        print_server(server);
    }
    println!();

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} of {} server(s) failed",
            report.servers.len()
        )));
    }

    let done = match report.mode {
        RunMode::Provision => "Network provisioned.",
        RunMode::UpdatePlugins => "Plugins updated.",
    };
    let warnings = report.warning_count();
    if warnings > 0 {
        println!(
            "{} {done} {} plugin warning(s).",
            "OK".green().bold(),
            warnings.to_string().yellow()
        );
    } else {
        println!("{} {done}", "OK".green().bold());
    }
    Ok(())
}

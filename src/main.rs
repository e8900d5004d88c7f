// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use health_probe::{config, HealthProbe, ProbeConfig};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "health-probe",
    version,
    about = "Check a service's /health endpoint once"
)]
struct Cli {
    /// Config file (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the target host for the probed service
    #[arg(long)]
    base_url: Option<String>,

    /// Comma-separated status values that count as healthy
    #[arg(long, value_delimiter = ',')]
    accept: Option<Vec<String>>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Reject bodies with keys other than `status`
    #[arg(long, conflicts_with = "no_strict_body")]
    strict_body: bool,

    /// Accept extra body keys even if the config enables strict mode
    #[arg(long)]
    no_strict_body: bool,

    /// Print the report as JSON on success
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, mut config: ProbeConfig) -> Result<ProbeConfig> {
        if let Some(base_url) = &self.base_url {
            config = config
                .with_base_url(base_url)
                .with_context(|| format!("Invalid --base-url '{}'", base_url))?;
        }
        if let Some(accept) = &self.accept {
            config = config.with_accepted_statuses(accept.iter().map(|s| s.trim()));
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if self.strict_body {
            config.strict_body = true;
        } else if self.no_strict_body {
            config.strict_body = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("health_probe=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        info!("Loading configuration from: {}", path.display());
    }
    let config = cli.apply(config::load_config(cli.config.as_deref())?)?;

    let probe = HealthProbe::new(config)?;
    info!("Checking {}", probe.target());

    match probe.check().await {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string(&report)?);
            }
            Ok(())
        }
        Err(e) => {
            error!(kind = %e.kind(), "Health check failed: {}", e);
            std::process::exit(1);
        }
    }
}

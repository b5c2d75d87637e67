use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_DRY_RUN, ENV_ENDPOINT_URL, ENV_HIGH_RESOLUTION_METRICS, ENV_INPUT,
    ENV_METRIC_BATCH_SIZE, ENV_NAMESPACE, ENV_TIMEOUT_SECS, ENV_WRITE_STATISTICS,
};

#[derive(Parser)]
#[command(name = "cwsink")]
#[command(version, about = "Write metrics to CloudWatch", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Namespace for all written datums
    #[arg(long, short = 'n', global = true, env = ENV_NAMESPACE)]
    pub namespace: Option<String>,

    /// Use one-second storage resolution instead of sixty
    #[arg(long, global = true, env = ENV_HIGH_RESOLUTION_METRICS)]
    pub high_resolution_metrics: Option<bool>,

    /// Fold _min/_max/_sum/_count fields into statistic sets
    #[arg(long, global = true, env = ENV_WRITE_STATISTICS)]
    pub write_statistics: Option<bool>,

    /// Endpoint to send requests to (local emulator or signing proxy)
    #[arg(long, global = true, env = ENV_ENDPOINT_URL)]
    pub endpoint_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    /// Print submissions to stdout instead of sending them
    #[arg(long, global = true, env = ENV_DRY_RUN)]
    pub dry_run: bool,

    /// Read metrics from this file instead of stdin
    #[arg(long, short = 'i', global = true, env = ENV_INPUT)]
    pub input: Option<PathBuf>,

    /// Number of metrics per write cycle
    #[arg(long, global = true, env = ENV_METRIC_BATCH_SIZE)]
    pub metric_batch_size: Option<usize>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Read metrics and write them (default command)
    Run,
    /// Print a sample configuration file
    SampleConfig,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub namespace: Option<String>,
    pub high_resolution_metrics: Option<bool>,
    pub write_statistics: Option<bool>,
    pub endpoint_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub dry_run: bool,
    pub input: Option<PathBuf>,
    pub metric_batch_size: Option<usize>,
}

pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        namespace: cli.namespace,
        high_resolution_metrics: cli.high_resolution_metrics,
        write_statistics: cli.write_statistics,
        endpoint_url: cli.endpoint_url,
        timeout_secs: cli.timeout_secs,
        dry_run: cli.dry_run,
        input: cli.input,
        metric_batch_size: cli.metric_batch_size,
    };
    (config, cli.command)
}

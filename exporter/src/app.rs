//! Core application

use std::future::Future;

use anyhow::{Context, Result};
use cwsink::{CloudWatchOutput, WriteSummary};
use tokio::io::{AsyncBufRead, BufReader};

use crate::client;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::{AppConfig, SAMPLE_CONFIG};
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::input::MetricReader;

pub struct CoreApp {
    pub config: AppConfig,
    pub output: CloudWatchOutput,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::SampleConfig) => {
                println!("{}", SAMPLE_CONFIG);
                return Ok(());
            }
            Some(Commands::Run) | None => {}
        }

        let app = Self::init(&cli_config)?;
        app.start().await
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let client = client::connect(&config.client)?;
        let output = CloudWatchOutput::new(config.output.clone(), client)
            .context("Failed to initialize output")?;

        Ok(Self { config, output })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        // stdout carries dry-run output, so logs go to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start(self) -> Result<()> {
        let input: Box<dyn AsyncBufRead + Unpin + Send> = match &self.config.input.path {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open input: {}", path.display()))?;
                tracing::info!(path = %path.display(), "Reading metrics from file");
                Box::new(BufReader::new(file))
            }
            None => {
                tracing::info!("Reading metrics from stdin");
                Box::new(BufReader::new(tokio::io::stdin()))
            }
        };

        let mut reader = MetricReader::new(input);
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown requested, flushing buffered metrics");
        };

        let summary = pump(
            &self.output,
            &mut reader,
            self.config.input.metric_batch_size,
            shutdown,
        )
        .await?;

        tracing::info!(
            namespace = %self.output.config().namespace,
            metrics = summary.metrics,
            datums = summary.datums,
            requests = summary.partitions,
            skipped_lines = reader.skipped_lines(),
            "Finished writing metrics"
        );
        Ok(())
    }
}

/// Feed write cycles of up to `batch_size` metrics into `output` until the
/// input ends or `shutdown` resolves. On shutdown the buffered metrics are
/// written as a final cycle.
pub async fn pump<R, F>(
    output: &CloudWatchOutput,
    reader: &mut MetricReader<R>,
    batch_size: usize,
    shutdown: F,
) -> Result<WriteSummary>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut summary = WriteSummary::default();
    tokio::pin!(shutdown);

    loop {
        let next = tokio::select! {
            biased;
            _ = &mut shutdown => None,
            batch = reader.next_batch(batch_size) => Some(batch.context("Failed to read input")?),
        };

        let batch = match next {
            Some(Some(batch)) => batch,
            Some(None) => break,
            None => {
                let pending = reader.take_pending();
                if !pending.is_empty() {
                    summary.add(output.write(&pending).await?);
                }
                break;
            }
        };

        summary.add(output.write(&batch).await?);
    }

    Ok(summary)
}

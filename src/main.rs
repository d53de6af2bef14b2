use clap::Parser;
use kal_core::config::{LatencyFormat, ReferenceDate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kal", about = "kube-apiserver log analyzer — request lines to CSV")]
struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Apiserver log to analyze (`-` for stdin).
    #[arg(long)]
    log_file: Option<String>,

    /// CSV file to write (`-` for stdout).
    #[arg(long)]
    output_file: Option<String>,

    /// Number of extraction workers.
    #[arg(long)]
    n_workers: Option<usize>,

    /// Flush output and report progress every N rows.
    #[arg(long)]
    flush_every: Option<u64>,

    /// Queue capacity per worker.
    #[arg(long)]
    queue_factor: Option<usize>,

    /// Calendar day (YYYY-MM-DD) for the time-of-day in each log line.
    #[arg(long)]
    reference_date: Option<ReferenceDate>,

    /// Latency column format: `text` (5ms) or `nanos` (5000000).
    #[arg(long)]
    latency_format: Option<LatencyFormat>,

    /// Skip `watch=true` requests.
    #[arg(long)]
    exclude_watch: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<kal::Config> {
        let mut config = kal::Config::load(self.config.as_deref())?;
        if let Some(path) = self.log_file {
            config.input.path = path;
        }
        if let Some(path) = self.output_file {
            config.output.path = path;
        }
        if let Some(workers) = self.n_workers {
            config.pipeline.workers = workers;
        }
        if let Some(n) = self.flush_every {
            config.pipeline.flush_every = n;
        }
        if let Some(factor) = self.queue_factor {
            config.pipeline.queue_factor = factor;
        }
        if let Some(date) = self.reference_date {
            config.reference_date = date;
        }
        if let Some(format) = self.latency_format {
            config.pipeline.latency_format = format;
        }
        config.pipeline.exclude_watch |= self.exclude_watch;
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = cli.into_config()?;
    let summary = kal::run(&config).await?;
    tracing::info!(
        lines = summary.lines_read,
        records = summary.records_written,
        "finished writing {}",
        config.output.path
    );
    Ok(())
}

//! CLI entry point for the antifraud payment classifier.
//!
//! Builds the trust graph from a batch file, classifies a stream file into
//! one output file per feature, and writes a JSON run summary to stdout.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use antifraud_stream::{DetectorConfig, TrustPipeline};

#[derive(Parser)]
#[command(name = "antifraud")]
#[command(about = "Label payments by the social distance between payer and payee")]
struct Cli {
    /// Historical payments used to build the initial graph.
    batch: PathBuf,

    /// Payments to classify, in arrival order.
    stream: PathBuf,

    /// One output file per configured feature, in feature order.
    #[arg(required = true, num_args = 1..)]
    outputs: Vec<PathBuf>,

    /// Config file prefix (default: antifraud).
    #[arg(short, long, default_value = "antifraud")]
    config: String,

    /// Override the maximum search depth.
    #[arg(long)]
    max_depth: Option<u32>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let mut config = DetectorConfig::load(&cli.config)?;
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }

    let pipeline = TrustPipeline::new(config)?;
    let summary = pipeline.run(&cli.batch, &cli.stream, &cli.outputs)?;
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}

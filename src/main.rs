use clap::Parser;
use replinode::{load_config, try_create_raft_client};
use slog::Drain;
use std::error::Error;

/// Run one node of a replinode cluster.
#[derive(Parser, Debug)]
#[command(name = "replinode", version)]
struct Cli {
    /// Path to the YAML cluster configuration.
    #[arg(short, long, default_value = "config/cluster.yaml")]
    config: String,

    /// Which member of `cluster.members` this process is.
    #[arg(short, long)]
    node_id: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let logger = create_root_logger(config.log_level()?);

    slog::info!(logger, "Starting node {} from {}", cli.node_id, cli.config);
    let client = try_create_raft_client(config.client_config(cli.node_id, logger.clone())?).await?;

    tokio::signal::ctrl_c().await?;
    slog::info!(logger, "Shutting down");
    client.shutdown().await;

    Ok(())
}

fn create_root_logger(level: slog::Level) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();

    slog::Logger::root(drain, slog::o!())
}

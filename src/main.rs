//! Demo entry point for the PanLex client

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panlex_client::PanlexClient;

/// PanLex client demo - translate one expression between language varieties
#[derive(Parser, Debug)]
#[command(name = "panlex", version, about, long_about = None)]
struct Args {
    /// Expression to translate
    #[arg(default_value = "tree")]
    expr: String,

    /// Source language variety (PanLex UID)
    #[arg(default_value = "eng-000")]
    from: String,

    /// Target language variety (PanLex UID)
    #[arg(default_value = "cmn-000")]
    to: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("panlex_client={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = PanlexClient::from_env()?;

    match client.translate(&args.expr, &args.from, &args.to).await? {
        Some(translation) => println!("{}", translation),
        None => println!("no translation of {} found in {}", args.expr, args.to),
    }

    Ok(())
}

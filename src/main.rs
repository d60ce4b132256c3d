use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

mod classifier;
use classifier::classify;

mod config;
use config::PrwatchConfig;

mod webhooks;
use webhooks::build_rocket;

#[derive(Parser)]
#[clap(version = "0.1")]
struct Opts {
    /// Configuration file for prwatch, built-in rules are used when omitted
    #[clap(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a single webhook payload and print the result as JSON
    Classify {
        /// File holding the payload, stdin is read when omitted or `-`
        #[clap(parse(from_os_str))]
        payload: Option<PathBuf>,
    },
    /// Serve the webhook endpoint
    Serve,
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for classification output
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let opts = Opts::parse();
    let config = match &opts.config {
        Some(path) => PrwatchConfig::load(path)?,
        None => {
            debug!("no config file given, using built-in rules");
            PrwatchConfig::default()
        }
    };

    match opts.command {
        Command::Classify { payload } => {
            let payload = read_payload(payload).await?;
            let classification = classify(&payload, &config);
            info!(
                "classified payload as {}",
                classification.notification_type
            );

            let output = serde_json::to_string_pretty(&classification)
                .context("couldn't serialize classification")?;
            println!("{}", output);
            Ok(())
        }
        Command::Serve => {
            let rocket = build_rocket(config);
            rocket.launch().await.map_err(|err| anyhow::anyhow!(err))?;
            Ok(())
        }
    }
}

async fn read_payload(path: Option<PathBuf>) -> anyhow::Result<Value> {
    let content = match path {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("couldn't read payload {}:", path.display()))?,
        _ => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("couldn't read payload from stdin")?;
            content
        }
    };

    serde_json::from_str(&content).context("payload isn't valid JSON")
}

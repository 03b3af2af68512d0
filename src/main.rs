use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use smartcoil_bridge::{Config, DirectiveRequest, SmartcoilBridge, discover};
use smartcoil_bridge::directive::Header;

/// `SmartCoil` bridge - Alexa Smart Home directive adapter
#[derive(Parser)]
#[command(name = "smartcoil-bridge", version, about)]
struct Cli {
    /// Backend base URL (e.g. `https://abemo.pagekite.me`)
    #[arg(long, env = "SMARTCOIL_ENDPOINT")]
    endpoint: Option<String>,

    /// Shared secret the backend validates
    #[arg(long, env = "SMARTCOIL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SMARTCOIL_TIMEOUT_SECS", default_value = "8")]
    timeout: u64,

    /// Directive JSON file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the discovery payload without contacting the backend
    Discover,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,smartcoil_bridge=info",
        1 => "info,smartcoil_bridge=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(Command::Discover) = cli.command {
        return cmd_discover();
    }

    let endpoint = cli
        .endpoint
        .context("backend endpoint required (--endpoint or SMARTCOIL_ENDPOINT)")?;
    let token = cli
        .token
        .context("shared secret required (--token or SMARTCOIL_TOKEN)")?;

    let mut config = Config::new(endpoint, SecretString::from(token));
    config.timeout = Duration::from_secs(cli.timeout);

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading directive from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading directive from stdin")?;
            buffer
        }
    };

    let request: DirectiveRequest =
        serde_json::from_str(&input).context("parsing directive JSON")?;

    let bridge = SmartcoilBridge::new(&config)?;
    let response = bridge.handle(&request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Print the discovery response for a synthetic Discover directive
fn cmd_discover() -> anyhow::Result<()> {
    let header: Header = serde_json::from_value(serde_json::json!({
        "namespace": "Alexa.Discovery",
        "name": "Discover",
        "payloadVersion": "3",
        "messageId": "smartcoil-bridge-local"
    }))?;

    let response = discover(&header);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

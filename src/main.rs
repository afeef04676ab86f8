//! Standalone harness for exercising the backend against a real
//! `tailscale` binary. Prints results as JSON.

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tailnet_launcher_backend::{
    ActivationOutcome, BackendError, Config, Engine, ItemAction, TailscaleCli,
};

#[derive(Parser)]
#[command(name = "tailnet-backend", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the self node's online state
    Status,
    /// Print the normalized node list
    List,
    /// Render display rows for a query
    Render {
        #[arg(long)]
        query: Option<String>,
        /// Override the configured result limit
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Toggle the connection and render the refreshed list
    Toggle,
    /// Decode a raw activation payload and dispatch it
    Activate {
        /// JSON payload as the host would deliver it, e.g.
        /// '{"action": "toggle", "query": "nas"}'
        #[arg(long)]
        payload: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), BackendError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load().await;

    match cli.command {
        Cmd::Status => {
            let source = TailscaleCli::new(&config);
            let online = source.fetch_self_online().await;
            println!("{}", json!({ "online": online }));
        }
        Cmd::List => {
            let source = TailscaleCli::new(&config);
            let nodes = source.fetch_nodes().await;
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        }
        Cmd::Render { query, limit } => {
            if let Some(limit) = limit {
                config.result_limit = limit;
            }
            let source = TailscaleCli::new(&config);
            let mut engine = Engine::new(config, source);
            let items = engine.handle_query(query.as_deref()).await;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Cmd::Toggle => {
            let source = TailscaleCli::new(&config);
            let mut engine = Engine::new(config, source);
            // Prime the online flag so the toggle runs the right command.
            engine.handle_query(None).await;
            dispatch(&mut engine, ItemAction::Toggle { query: None }).await?;
        }
        Cmd::Activate { payload } => {
            let value: Value = serde_json::from_str(&payload)?;
            let source = TailscaleCli::new(&config);
            let mut engine = Engine::new(config, source);
            match ItemAction::from_payload(&value) {
                Some(action) => {
                    if matches!(action, ItemAction::Toggle { .. }) {
                        engine.handle_query(None).await;
                    }
                    dispatch(&mut engine, action).await?;
                }
                None => {
                    warn!(payload = %value, "Unrecognized activation payload, ignoring");
                    println!("{}", json!({ "ignored": true }));
                }
            }
        }
    }

    Ok(())
}

async fn dispatch(
    engine: &mut Engine<TailscaleCli>,
    action: ItemAction,
) -> Result<(), BackendError> {
    match engine.handle_activation(action).await {
        ActivationOutcome::Rendered(items) => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        ActivationOutcome::Clipboard(value) => {
            println!("{}", json!({ "clipboard": value }));
        }
    }
    Ok(())
}

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{config::load_settings, OperationState, OperationStore};
use futures::StreamExt;
use shared::protocol::{RunScriptInput, ScriptInput};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Backend base URL; overrides client.toml and SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Print the wallet private key instead of redacting it.
    #[arg(long, global = true)]
    reveal_private_key: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreateWallet,
    RunScript {
        #[arg(long)]
        script_sig: String,
        #[arg(long)]
        script_pub_key: String,
        #[arg(long)]
        signed_data: String,
    },
    CompileScript {
        #[arg(long)]
        script_sig: String,
        #[arg(long)]
        script_pub_key: String,
    },
    ParseScript {
        #[arg(long)]
        script_sig: String,
        #[arg(long)]
        script_pub_key: String,
    },
    ShowState,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings()?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = client_core::config::normalize_server_url(&server_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let store = OperationStore::connect(&settings.server_url)?;
    let watcher = tokio::spawn(log_transitions(WatchStream::new(store.subscribe())));

    match cli.command {
        Command::CreateWallet => store.create_wallet().await,
        Command::RunScript {
            script_sig,
            script_pub_key,
            signed_data,
        } => {
            store
                .run_script(&RunScriptInput {
                    script_sig,
                    script_pub_key,
                    signed_data,
                })
                .await
        }
        Command::CompileScript {
            script_sig,
            script_pub_key,
        } => {
            store
                .compile_script(&ScriptInput {
                    script_sig,
                    script_pub_key,
                })
                .await
        }
        Command::ParseScript {
            script_sig,
            script_pub_key,
        } => {
            store
                .parse_script(&ScriptInput {
                    script_sig,
                    script_pub_key,
                })
                .await
        }
        Command::ShowState => {}
    }

    watcher.abort();

    let state = store.snapshot();
    println!("{}", render_state(&state, cli.reveal_private_key)?);

    Ok(if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn log_transitions(mut states: WatchStream<OperationState>) {
    while let Some(state) = states.next().await {
        debug!(loading = state.loading, error = ?state.error, "store state changed");
    }
}

fn render_state(state: &OperationState, reveal_private_key: bool) -> Result<String> {
    let mut value = serde_json::to_value(state)?;
    if !reveal_private_key {
        if let Some(wallet) = value.get_mut("wallet").and_then(|w| w.as_object_mut()) {
            wallet.insert("privateKey".into(), "<redacted>".into());
        }
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

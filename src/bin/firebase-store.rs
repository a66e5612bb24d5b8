//! Command line access to a keyed Firebase store.
//!
//! Useful for checking database rules and inspecting what a client manager
//! has persisted under its namespace.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use firebase_store::config::{self, ManagerOptions, PluginOptions};
use firebase_store::logging;
use firebase_store::storage::{HttpTransport, KeyedStore};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "firebase-store",
    about = "Read and write keyed values in a Firebase Realtime Database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL, e.g. https://my-app.firebaseio.com
    #[arg(long, global = true, env = config::ENV_DATABASE_URL)]
    url: Option<String>,

    /// Client identifier used as the namespace root
    #[arg(long, global = true, env = config::ENV_CLIENT_ID)]
    client_id: Option<String>,

    /// Report read and delete failures instead of treating them as absent
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Store a value (JSON, or a bare string)
    Set { key: String, value: String },
    /// Print the value under a key
    Get { key: String },
    /// Append a value to the array under a key
    Push { key: String, value: String },
    /// Remove the value under a key
    Delete { key: String },
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    config::load_dotenv();
    logging::init_logging_with("warn");

    let cli = Cli::parse();

    let mut plugin_options = PluginOptions::from_env()?;
    if cli.url.is_some() {
        plugin_options.database_url = cli.url.clone();
    }
    let database_url = plugin_options.validated_url()?;

    let mut manager_options = ManagerOptions::from_env()?;
    if cli.client_id.is_some() {
        manager_options.client_id = cli.client_id.clone();
    }
    // an explicit command always runs
    manager_options.disable_database = false;

    let transport = HttpTransport::new(plugin_options.storage.clone())?;
    let store = KeyedStore::new(transport, database_url, &manager_options);

    match cli.command {
        Command::Set { key, value } => {
            store.set(&key, &parse_value(&value)).await?;
        }
        Command::Get { key } => {
            let value = if cli.strict {
                store.fetch(&key).await?
            } else {
                store.get(&key).await?
            };
            println!("{}", serde_json::to_string_pretty(&value.unwrap_or(Value::Null))?);
        }
        Command::Push { key, value } => {
            store.push(&key, &parse_value(&value)).await?;
        }
        Command::Delete { key } => {
            if !store.delete(&key).await? && cli.strict {
                return Err(eyre!("failed to delete {key}"));
            }
        }
    }

    Ok(())
}

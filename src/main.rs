// src/main.rs
//
// iREITs command-line client
//
// ```bash
// # Against a local replica (values usually come from dfx's .env)
// DFX_NETWORK=local \
// CANISTER_ID_TEST_IREITS_BACKEND=bkyz2-fmaaa-aaaaa-qaaaq-cai \
// CANISTER_ID_INTERNET_IDENTITY=be2us-64aaa-aaaaa-qaabq-cai \
// ireits login
//
// ireits marketplace
// ireits tokens buy 7 5
// ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ireits::application::commands;
use ireits::application::dto::*;
use ireits::config::{
    ENV_BACKEND_CANISTER, ENV_HOST, ENV_IDENTITY_CANISTER, ENV_NETWORK, ENV_SESSION_FILE,
};
use ireits::{initialize, BootstrapOptions, ClientConfig};

const ENV_IDENTITY_FILE: &str = "IREITS_IDENTITY_FILE";

/// Client for the iREITs property tokenization canister
#[derive(Debug, Parser)]
#[command(name = "ireits", version, about)]
struct Cli {
    /// Network to talk to: "local" or "ic"
    #[arg(long, env = ENV_NETWORK, global = true)]
    network: Option<String>,

    /// Property/token/transaction canister id
    #[arg(long, env = ENV_BACKEND_CANISTER, global = true)]
    backend_canister: Option<String>,

    /// Internet Identity canister id (local network only)
    #[arg(long, env = ENV_IDENTITY_CANISTER, global = true)]
    identity_canister: Option<String>,

    /// Replica URL, overriding the network default
    #[arg(long, env = ENV_HOST, global = true)]
    host: Option<String>,

    /// Where the login session is kept between runs
    #[arg(long, env = ENV_SESSION_FILE, global = true)]
    session_file: Option<PathBuf>,

    /// PEM key used by `login` (defaults to dfx's default identity)
    #[arg(long, env = ENV_IDENTITY_FILE, global = true)]
    identity: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Authorize with the identity key and keep the session
    Login,
    /// Forget the current session
    Logout,
    /// Show the current session
    Whoami,
    /// Check whether a page may be shown with the current session
    Navigate { path: String },
    /// Property directory
    #[command(subcommand)]
    Properties(PropertyCommand),
    /// Property transactions
    #[command(subcommand)]
    Tx(TransactionCommand),
    /// Property tokens
    #[command(subcommand)]
    Tokens(TokenCommand),
    /// Available tokens and your holdings
    Marketplace,
}

#[derive(Debug, Subcommand)]
enum PropertyCommand {
    List,
    Get { id: u64 },
    /// Properties owned by the logged-in principal
    Mine,
    Owner { principal: String },
    Search { query: String },
    Popular,
    Create {
        #[arg(long)]
        price: f64,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: String,
    },
    /// Attach a document by content hash, or hash a local file
    AddDocument {
        property_id: u64,
        #[arg(long)]
        kind: String,
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        hash: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    AssignAgent { property_id: u64, agent: String },
}

#[derive(Debug, Subcommand)]
enum TransactionCommand {
    Initiate { property_id: u64 },
    Get { id: u64 },
    Complete { id: u64 },
}

#[derive(Debug, Subcommand)]
enum TokenCommand {
    Get { id: u64 },
    Owned { principal: String },
    Buy { token_id: u64, amount: String },
    Distribute {
        token_id: u64,
        amount: String,
        /// Pay out in ckUSDT instead of ckUSDC
        #[arg(long)]
        usdt: bool,
    },
}

impl Cli {
    /// Command-line values win over the environment; clap already folds
    /// the environment into each flag
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            ENV_NETWORK => self.network.clone(),
            ENV_BACKEND_CANISTER => self.backend_canister.clone(),
            ENV_IDENTITY_CANISTER => self.identity_canister.clone(),
            ENV_HOST => self.host.clone(),
            ENV_SESSION_FILE => self
                .session_file
                .as_ref()
                .map(|p| p.display().to_string()),
            _ => None,
        }
    }

    fn identity_file(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.identity {
            return Ok(path.clone());
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join(".config")
            .join("dfx")
            .join("identity")
            .join("default")
            .join("identity.pem"))
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries command output only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. LOGGING
    init_logging();

    // 2. CONFIGURATION
    let config = ClientConfig::from_lookup(|key| cli.lookup(key))
        .context("Invalid client configuration")?;

    // 3. WIRING
    let state = initialize(
        config,
        BootstrapOptions {
            identity_file: cli.identity_file()?,
            restore_session: true,
        },
    )
    .await?;

    tracing::debug!(
        network = %state.config.network,
        authenticated = state.session.is_authenticated(),
        "Client ready"
    );

    // 4. DISPATCH
    match cli.command {
        Command::Login => print_json(&commands::login(&state).await?)?,
        Command::Logout => print_json(&commands::logout(&state).await?)?,
        Command::Whoami => print_json(&commands::current_session(&state))?,
        Command::Navigate { path } => print_json(&commands::navigate(&state, &path)?)?,
        Command::Marketplace => print_json(&commands::load_marketplace(&state).await?)?,

        Command::Properties(command) => match command {
            PropertyCommand::List => print_json(&commands::list_properties(&state).await?)?,
            PropertyCommand::Get { id } => print_json(&commands::get_property(&state, id).await?)?,
            PropertyCommand::Mine => print_json(&commands::get_my_properties(&state).await?)?,
            PropertyCommand::Owner { principal } => {
                print_json(&commands::get_user_properties(&state, &principal).await?)?
            }
            PropertyCommand::Search { query } => {
                print_json(&commands::search_properties(&state, &query).await?)?
            }
            PropertyCommand::Popular => print_json(&commands::popular_searches(&state))?,
            PropertyCommand::Create {
                price,
                location,
                description,
            } => print_json(
                &commands::list_property(
                    &state,
                    ListPropertyDto {
                        price,
                        location,
                        description,
                    },
                )
                .await?,
            )?,
            PropertyCommand::AddDocument {
                property_id,
                kind,
                hash,
                file,
            } => {
                let outcome = match (hash, file) {
                    (_, Some(file)) => {
                        commands::add_document_from_file(&state, property_id, &kind, &file).await?
                    }
                    (Some(content_hash), None) => {
                        commands::add_document(
                            &state,
                            AddDocumentDto {
                                property_id,
                                kind,
                                content_hash,
                            },
                        )
                        .await?
                    }
                    (None, None) => anyhow::bail!("Either --hash or --file is required"),
                };
                print_json(&outcome)?
            }
            PropertyCommand::AssignAgent { property_id, agent } => {
                print_json(&commands::assign_agent(&state, property_id, &agent).await?)?
            }
        },

        Command::Tx(command) => match command {
            TransactionCommand::Initiate { property_id } => {
                print_json(&commands::initiate_transaction(&state, property_id).await?)?
            }
            TransactionCommand::Get { id } => {
                print_json(&commands::get_transaction(&state, id).await?)?
            }
            TransactionCommand::Complete { id } => {
                print_json(&commands::complete_transaction(&state, id).await?)?
            }
        },

        Command::Tokens(command) => match command {
            TokenCommand::Get { id } => print_json(&commands::get_token(&state, id).await?)?,
            TokenCommand::Owned { principal } => {
                print_json(&commands::get_user_tokens(&state, &principal).await?)?
            }
            TokenCommand::Buy { token_id, amount } => print_json(
                &commands::purchase_tokens(&state, PurchaseTokensDto { token_id, amount }).await?,
            )?,
            TokenCommand::Distribute {
                token_id,
                amount,
                usdt,
            } => print_json(
                &commands::distribute_token_income(
                    &state,
                    DistributeIncomeDto {
                        token_id,
                        amount,
                        use_usdt: usdt,
                    },
                )
                .await?,
            )?,
        },
    }

    Ok(())
}

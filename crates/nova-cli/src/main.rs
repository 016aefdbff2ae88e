use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod session;
    pub mod version;
}
mod config;
mod prompt;
mod session;

use commands::session::{build_headless_session, build_session};
use config::{config_path, Config, Overrides};
use prompt::InputType;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base url (can also be set via NOVA_BASE_URL environment variable)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (can also be set via NOVA_TOKEN environment variable)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Config file to read instead of ~/.config/nova/config.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive session (the default)
    Session,

    /// Send a single message and print the reply
    Ask {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Extract text from a PDF
    Pdf { path: PathBuf },

    /// Extract text from an image
    Image { path: PathBuf },

    /// Print the version
    Version,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let path = match cli.config {
        Some(path) => path,
        None => config_path()?,
    };
    let config = Config::resolve(
        &path,
        Overrides {
            base_url: cli.base_url,
            token: cli.token,
        },
    )?;

    match cli.command.unwrap_or(Command::Session) {
        Command::Session => build_session(&config)?.start().await,
        Command::Ask { text } => {
            build_headless_session(&config)?
                .headless_start(&text.join(" "))
                .await
        }
        Command::Pdf { path } => {
            build_headless_session(&config)?
                .headless_upload(InputType::Pdf, &path)
                .await
        }
        Command::Image { path } => {
            build_headless_session(&config)?
                .headless_upload(InputType::Image, &path)
                .await
        }
        Command::Version => commands::version::execute(&config.assistant_name),
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "barista")]
#[command(about = "Barista - terminal client for the cafe AI chat backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Log in with a username or email
    Login {
        /// Username or email
        username: String,
    },
    /// Create an account and log in
    Register,
    /// Clear the stored credentials
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// Show your order history
    Orders,
    /// List the model catalog
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat => commands::chat::run().await?,
        Commands::Login { username } => commands::auth::login(&username).await?,
        Commands::Register => commands::auth::register().await?,
        Commands::Logout => commands::auth::logout()?,
        Commands::Whoami => commands::auth::whoami()?,
        Commands::Orders => commands::orders::run().await?,
        Commands::Models => commands::chat::list_models().await?,
    }

    Ok(())
}

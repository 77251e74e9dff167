use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod config;
mod session_store;

use app::App;
use commands::{
    AuthCommand, ConfigCommand, ListCommand, MeadowCommand, SetupCommand, StatusCommand,
    TreeCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "bk")]
#[command(version)]
#[command(about = "Tree and meadow inventory with optional cloud sync", long_about = None)]
#[command(
    after_help = "With several devices on one backend, the last save of a record wins."
)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to or out of the cloud backend
    Auth(AuthCommand),

    /// Show sync status
    Status(StatusCommand),

    /// List meadows and trees
    List(ListCommand),

    /// Manage trees
    Tree(TreeCommand),

    /// Manage meadows
    Meadow(MeadowCommand),

    /// Print the backend setup script
    Setup(SetupCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        Some(Commands::Setup(cmd)) => cmd.run(&config)?,
        Some(command) => {
            let app = App::new(config);
            match command {
                Commands::Auth(cmd) => cmd.run(&app).await?,
                Commands::Status(cmd) => cmd.run(&app).await?,
                Commands::List(cmd) => cmd.run(&app).await?,
                Commands::Tree(cmd) => cmd.run(&app).await?,
                Commands::Meadow(cmd) => cmd.run(&app).await?,
                Commands::Config(_) | Commands::Setup(_) => {}
            }
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

//! Sign-in against the cloud backend.

use baumkataster_core::AuthError;
use chrono::Utc;
use clap::{Args, Subcommand};
use std::io::{self, Write};

use crate::app::App;

/// Authentication commands
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Log in with email and password
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Log out and forget the saved session
    Logout,
    /// Show authentication status
    Status,
}

impl AuthCommand {
    pub async fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AuthSubcommand::Login { email } => login(app, email.as_deref()).await,
            AuthSubcommand::Logout => logout(app).await,
            AuthSubcommand::Status => status(app),
        }
    }
}

async fn login(app: &App, email: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let client = app.client().ok_or(AuthError::NotConfigured)?;

    let email = match email {
        Some(email) => email.trim().to_string(),
        None => prompt("Email: ")?,
    };
    if email.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "Email cannot be empty").into());
    }
    let password = prompt("Password: ")?;

    let session = client.sign_in(&email, &password).await?;
    app.sessions().save(&session)?;

    println!(
        "Logged in as {}",
        session.user.email.as_deref().unwrap_or(&email)
    );
    Ok(())
}

async fn logout(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(client) = app.client() {
        if let Some(session) = app.sessions().load()? {
            client.restore_session(session).await;
            if let Err(e) = client.sign_out().await {
                tracing::warn!("server sign-out failed: {}", e);
            }
        }
    }

    app.sessions().clear()?;
    println!("Logged out.");
    Ok(())
}

fn status(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    if app.client().is_none() {
        println!("Local mode: no cloud backend configured, no login needed.");
        return Ok(());
    }

    match app.sessions().load()? {
        Some(session) => {
            let who = session.user.email.clone().unwrap_or_else(|| session.user_id().to_string());
            println!("Logged in as {}", who);
            if session.is_expired(Utc::now()) {
                println!("Access token expired; it will be refreshed on next use.");
            } else {
                println!("Access token valid until {}", session.expires_at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        None => println!("Not logged in. Run 'bk auth login' to authenticate."),
    }
    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# baumkataster configuration

# Where snapshots and the login session are stored
# (default: platform data dir, e.g. ~/.local/share/baumkataster)
# data_dir: ~/.local/share/baumkataster

# Cloud sync. Without url and anon_key everything stays on this device.
# remote:
#   url: https://your-project.supabase.co
#   anon_key: your-public-anon-key
#   image_bucket: tree-images
#   # Accept plain http:// URLs (local development backends only)
#   allow_insecure: false
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        let remote = &config.remote;
                        println!(
                            "remote.url: {}",
                            remote.url.as_deref().unwrap_or("(not set)")
                        );
                        println!(
                            "remote.anon_key: {}",
                            if remote.anon_key.is_some() {
                                "(set)"
                            } else {
                                "(not set)"
                            }
                        );
                        println!("remote.image_bucket: {}", remote.endpoint().image_bucket);
                        println!("remote.allow_insecure: {}", remote.allow_insecure);
                        println!(
                            "  mode: {}",
                            if remote.is_configured() {
                                "cloud sync"
                            } else {
                                "local only"
                            }
                        );
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'bk config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}

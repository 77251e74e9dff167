use baumkataster_core::SETUP_SQL;
use clap::Args;

use crate::config::Config;

/// Print the SQL that prepares a new cloud backend
#[derive(Args)]
pub struct SetupCommand {
    /// Print only the SQL, without instructions
    #[arg(long)]
    sql_only: bool,
}

impl SetupCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        if self.sql_only {
            print!("{}", SETUP_SQL);
            return Ok(());
        }

        println!("Database setup");
        println!("==============\n");
        match &config.remote.url {
            Some(url) => println!("Backend: {}", url),
            None => println!("Backend: not configured (set remote.url first)"),
        }
        println!();
        println!("Open the SQL editor of your backend project and run the script below.");
        println!("It creates the trees and meadows tables, access policies for signed-in");
        println!("users and the public '{}' photo bucket.", config.remote.endpoint().image_bucket);
        println!("It is safe to run more than once.");
        println!();
        println!("Concurrent edits from several devices are not merged: the last save wins.");
        println!();
        println!("{}", "-".repeat(72));
        print!("{}", SETUP_SQL);
        println!("{}", "-".repeat(72));
        Ok(())
    }
}

pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
pub use toml_config::AppConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-polls")]
#[command(about = "A minimal polling web application")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Overrides database.url, e.g. sqlite://polls.db or memory
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Create a poll with its choices
    CreatePoll {
        #[arg(short, long)]
        question: String,

        /// One choice per flag, in display order
        #[arg(short = 'c', long = "choice", required = true)]
        choices: Vec<String>,
    },

    /// Print every poll with its current results
    ListPolls,

    /// Delete a poll and its choices
    DeletePoll {
        #[arg(long)]
        id: i64,
    },
}

impl Cli {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if self.verbose {
            config.logging.verbose = true;
        }
        if let Command::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for docqa-relay
#[derive(Parser, Debug)]
#[command(name = "docqa-relay")]
#[command(author, version, about = "Chat relay for a Humata document Q&A assistant")]
#[command(long_about = r#"
docqa-relay answers chat questions from one fixed document through the
Humata API. It keeps a single upstream conversation open, reassembles
streamed answers into clean text and serves them over HTTP.

Credentials come from the environment:
  HUMATA_API_KEY       API key (Bearer token)
  HUMATA_DOCUMENT_ID   Document the questions are answered from

Configuration files are loaded from (in priority order):
1. DOCQA_RELAY_<SECTION>__<KEY>            Environment overrides
2. --config <path>                         Explicit config file
3. ./docqa-relay.toml                      Project-level config
4. ~/.config/docqa-relay/config.toml       Global config

Example:
  docqa-relay serve --port 8080
  docqa-relay ask "Who can donate stem cells?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP relay (default)
    Serve {
        /// Address to bind, overrides server.host
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides server.port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        question: String,
    },
}

impl Cli {
    /// The command to run, `serve` when none was given.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            host: None,
            port: None,
        })
    }
}

//! Command-line interface for the brick assistant.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP API
//! - `chat` - Send one message through the full routing pipeline
//! - `extract` - Print the entities found in a text
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! brick serve
//!
//! # Ask something without a running server
//! brick chat "do you have anything vegan?" --locale en
//!
//! # Generate shell completions
//! brick completions bash > ~/.bash_completion.d/brick
//! ```

pub mod chat;
pub mod completions;
pub mod config;
pub mod extract;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::BrickConfig;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Brick - restaurant ordering assistant
#[derive(Parser, Debug)]
#[command(
    name = "brick",
    version,
    about = "Restaurant ordering assistant with generative fallback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve(ServeArgs),
    /// Answer one message and print the replies
    Chat(ChatArgs),
    /// Print the entities extracted from a text
    Extract(ExtractArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "brick.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "BRICK_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "BRICK_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BRICK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Treat the dialogue service as healthy without probing it
    #[arg(long)]
    pub no_health_check: bool,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Customer message
    pub message: String,

    /// Session to continue (a new one is created if omitted)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Reply language
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Output replies as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "brick.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Text to analyze
    pub text: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "brick.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load `path` if it exists (defaults otherwise) and apply environment
/// overrides.
pub fn load_config(path: &Path) -> anyhow::Result<BrickConfig> {
    let config = if path.exists() {
        BrickConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        BrickConfig::default()
    };
    Ok(config.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["brick", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("brick.toml"));
                assert!(!args.no_health_check);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_config() {
        let cli = Cli::try_parse_from(["brick", "serve", "-c", "custom.toml"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.config, PathBuf::from("custom.toml")),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_chat() {
        let cli = Cli::try_parse_from([
            "brick", "chat", "I want a dosa", "--session", "s1", "--locale", "es", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Chat(args) => {
                assert_eq!(args.message, "I want a dosa");
                assert_eq!(args.session.as_deref(), Some("s1"));
                assert_eq!(args.locale, "es");
                assert!(args.json);
            }
            _ => panic!("Expected Chat command"),
        }
    }

    #[test]
    fn test_cli_parse_chat_requires_message() {
        assert!(Cli::try_parse_from(["brick", "chat"]).is_err());
    }

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::try_parse_from(["brick", "extract", "2 burgers"]).unwrap();
        assert!(matches!(cli.command, Commands::Extract(ref a) if a.text == "2 burgers"));
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let config = load_config(Path::new("definitely-not-here.toml")).unwrap();
        assert_eq!(config.history.context_window, 5);
    }
}

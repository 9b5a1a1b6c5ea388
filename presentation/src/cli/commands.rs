//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for finchat
#[derive(Parser, Debug)]
#[command(name = "finchat")]
#[command(author, version, about = "Personal-finance chatbot backed by a hosted language model")]
#[command(long_about = r#"
finchat answers personal-finance questions through a hosted text-generation
model. Questions outside personal finance get a fixed refusal and never reach
the model.

Configuration is loaded from (in priority order):
1. FINCHAT_* environment variables (e.g. FINCHAT_PROVIDER__MODEL)
2. --config <path>     Explicit config file
3. ./finchat.toml      Project-level config
4. ~/.config/finchat/config.toml   Global config

The provider API key is read from HUGGINGFACE_API_KEY (or OPENAI_API_KEY),
and a .env file in the working directory is loaded first.

Example:
  finchat serve --port 5000
  finchat ask "How much should I keep in an emergency fund?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long, global = true)]
    pub show_config: bool,

    /// Interface to bind (overrides server.host)
    #[arg(long, value_name = "HOST", global = true)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long, value_name = "PORT", global = true)]
    pub port: Option<u16>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Answer a single message and exit
    Ask {
        /// The message to answer
        message: String,
    },
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_serve() {
        let cli = Cli::try_parse_from(["finchat"]).unwrap();
        assert_eq!(cli.command_or_default(), Command::Serve);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["finchat", "serve", "--port", "8080", "-vv"]).unwrap();
        assert_eq!(cli.command_or_default(), Command::Serve);
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_ask() {
        let cli = Cli::try_parse_from([
            "finchat",
            "--config",
            "custom.toml",
            "ask",
            "Should I pay off debt first?",
        ])
        .unwrap();
        assert_eq!(
            cli.command_or_default(),
            Command::Ask {
                message: "Should I pay off debt first?".to_string()
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_ask_requires_message() {
        assert!(Cli::try_parse_from(["finchat", "ask"]).is_err());
    }

    #[test]
    fn test_show_config_after_subcommand() {
        for args in [
            ["finchat", "serve", "--show-config"],
            ["finchat", "--show-config", "serve"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(cli.show_config, "{args:?}");
            assert_eq!(cli.command_or_default(), Command::Serve);
        }
    }
}

//! Command-line interface.
//!
//! Without a subcommand the binary launches the TUI; the subcommands are small
//! non-interactive helpers.

mod common;
pub mod completions;
pub mod walkthrough;

pub use common::*;
pub use walkthrough::{run_walkthrough, StepOutcome, WalkthroughReport};

use crate::flow::{CodeSource, FixedCodeSource, PairingCode, RandomCodeSource};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indoc::indoc;
use tracing::info;

/// Walk through pairing a fitness app with a health-data bridge
#[derive(Parser, Debug)]
#[command(
    name = "fambridge",
    version,
    about = "Walk through pairing a fitness app with a health-data bridge",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Resolve verification, permission and loading delays immediately
    #[arg(long, global = true)]
    pub instant: bool,

    /// Color theme for this run: dark, light or nocolor
    #[arg(long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pairing flow headlessly and print every step
    Walkthrough {
        /// Pairing code to use instead of a random one
        #[arg(long)]
        code: Option<String>,
    },
    /// Inspect the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Print the path of the log file
    Logs,
    /// Generate shell completions
    Completions {
        /// Shell to generate for (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the path of the config file
    Path,
    /// Print the effective configuration as TOML
    Show,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Walkthrough { code }) => Self::cmd_walkthrough(code),
            Some(Commands::Config { command }) => Self::cmd_config(command),
            Some(Commands::Logs) => Self::cmd_logs(),
            Some(Commands::Completions { shell }) => completions::generate(shell),
            None => {
                // No command provided, launch TUI
                Ok(())
            }
        }
    }

    fn cmd_walkthrough(code: Option<String>) -> Result<()> {
        info!("CLI: walkthrough command executed");
        let codes: Box<dyn CodeSource> = match code {
            Some(code) => {
                let code: PairingCode = code.parse().context("Invalid --code")?;
                Box::new(FixedCodeSource::single(code))
            }
            None => Box::new(RandomCodeSource::new()),
        };

        print!(
            "{}",
            indoc! {"
                Fam App x Bridge Health pairing walkthrough
                -------------------------------------------
            "}
        );

        let report = run_walkthrough(codes)?;
        for step in &report.steps {
            print_success(&format!("{:<36} -> {}", step.label, step.screen));
            if let Some(note) = &step.note {
                print_warning(&format!("  {}", note));
            }
        }

        println!();
        print_info(&format!("Pairing code was {}", report.code));
        if report.code_cleared {
            print_success("Back on the Fam App with the pairing code cleared");
        } else {
            print_error("Pairing code is still set after exiting");
        }
        Ok(())
    }

    fn cmd_config(command: ConfigCommand) -> Result<()> {
        match command {
            ConfigCommand::Path => {
                println!("{}", crate::utils::get_config_path().display());
            }
            ConfigCommand::Show => {
                let ctx = CliContext::load()?;
                let content = toml::to_string_pretty(&ctx.config)
                    .context("Failed to serialize config")?;
                println!("# {}", ctx.config_path.display());
                print!("{}", content);

                let invalid = ctx.config.keymap.invalid_overrides();
                if !invalid.is_empty() {
                    println!();
                    for binding in invalid {
                        print_warning(&format!("Unrecognized key in override: {:?}", binding.key));
                    }
                }
            }
        }
        Ok(())
    }

    fn cmd_logs() -> Result<()> {
        println!("{}", crate::utils::get_log_path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_walkthrough_code() {
        let cli = Cli::parse_from(["fambridge", "walkthrough", "--code", "482913"]);
        match cli.command {
            Some(Commands::Walkthrough { code }) => assert_eq!(code.as_deref(), Some("482913")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tui_flags() {
        let cli = Cli::parse_from(["fambridge", "--instant", "--theme", "light"]);
        assert!(cli.instant);
        assert_eq!(cli.theme.as_deref(), Some("light"));
        assert!(cli.command.is_none());
    }
}

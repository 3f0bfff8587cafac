//! CLI argument definitions for Plumbline.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plumbline - completion tracking for dwelling survey state.
///
/// Every command reads a saved state file and reports on it against the
/// standard task-list schema.
#[derive(Parser, Debug)]
#[command(name = "plumb")]
#[command(author, version, about = "Track completion of dwelling survey state", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Read configuration from this file instead of ./.plumbline/config.kdl
    #[arg(long = "config", global = true, env = "PLUMB_CONFIG")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the status of every task, group and section
    Status {
        /// Saved dwelling state (JSON)
        state: PathBuf,

        /// Report only this schema node (e.g. infiltrationAndVentilation)
        #[arg(long)]
        node: Option<String>,
    },

    /// List the tasks of one section, as shown on its task-list page
    Tasks {
        /// Saved dwelling state (JSON)
        state: PathBuf,

        /// Section id (e.g. dwellingDetails)
        section: String,
    },

    /// Re-check completed forms and clear flags that no longer validate
    Revalidate {
        /// Saved dwelling state (JSON)
        state: PathBuf,

        /// Write the corrected state back to the file
        #[arg(long)]
        write: bool,
    },

    /// Print only the data of completed forms
    Resolve {
        /// Saved dwelling state (JSON)
        state: PathBuf,
    },

    /// Post the state to the compliance API (best effort)
    Submit {
        /// Saved dwelling state (JSON)
        state: PathBuf,

        /// Endpoint URL (overrides PLUMB_SUBMIT_URL and config files)
        #[arg(long)]
        url: Option<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration values and where they came from
    Show,
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
    fn test_parse_status_with_node() {
        let cli = Cli::try_parse_from(["plumb", "-H", "status", "state.json", "--node", "pvAndBatteries"])
            .unwrap();
        assert!(cli.human_readable);
        match cli.command {
            Commands::Status { state, node } => {
                assert_eq!(state, PathBuf::from("state.json"));
                assert_eq!(node.as_deref(), Some("pvAndBatteries"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["plumb", "config", "show", "--human"]).unwrap();
        assert!(cli.human_readable);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show
            }
        ));
    }

    #[test]
    fn test_tasks_requires_section() {
        assert!(Cli::try_parse_from(["plumb", "tasks", "state.json"]).is_err());
    }
}

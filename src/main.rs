//! Plumbline CLI - completion tracking for dwelling survey state.

use clap::Parser;
use plumbline::cli::{Cli, Commands, ConfigCommands};
use plumbline::commands::{self, Output};
use plumbline::config::{ConfigOverrides, OutputFormat, ResolvedConfig, resolve_config};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `plumbline=debug`.
const LOG_ENV: &str = "PLUMB_LOG";

fn main() {
    let cli = Cli::parse();

    let mut overrides = ConfigOverrides::new();
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }
    if let Commands::Submit { url: Some(ref url), .. } = cli.command {
        overrides = overrides.with_submit_url(url.clone());
    }
    if let Some(ref path) = cli.config_path {
        overrides = overrides.with_config_path(path);
    }

    let config = match resolve_config(&overrides) {
        Ok(config) => config,
        Err(e) => fail(&e, cli.human_readable),
    };
    init_logging(config.log_level());

    let human = config.output_format() == OutputFormat::Human;
    if let Err(e) = run_command(cli.command, &config, human) {
        fail(&e, human);
    }
}

/// Install the stderr subscriber, so stdout stays machine-readable.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(e: &plumbline::Error, human: bool) -> ! {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!(
            r#"{{"error": {}}}"#,
            serde_json::Value::String(e.to_string())
        );
    }
    process::exit(1);
}

fn run_command(
    command: Commands,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), plumbline::Error> {
    match command {
        Commands::Status { state, node } => {
            let result = commands::status(&state, node.as_deref())?;
            output(&result, human);
        }
        Commands::Tasks { state, section } => {
            let result = commands::tasks(&state, &section)?;
            output(&result, human);
        }
        Commands::Revalidate { state, write } => {
            let result = commands::revalidate(&state, write)?;
            output(&result, human);
        }
        Commands::Resolve { state } => {
            let result = commands::resolve(&state)?;
            output(&result, human);
        }
        Commands::Submit { state, .. } => {
            let result = commands::submit(&state, config)?;
            output(&result, human);
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let result = commands::config_show(config);
                output(&result, human);
            }
        },
    }
    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

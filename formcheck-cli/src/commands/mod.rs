mod angle;
mod config_cmd;
mod ranges;
mod replay;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

pub use angle::AngleCommand;
pub use ranges::RangesCommand;
pub use replay::ReplayCommand;

#[derive(Parser)]
#[command(name = "formcheck")]
#[command(about = "Joint-angle form checker and repetition counter", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "FORMCHECK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded landmark stream through a counting session
    Replay(ReplayCommand),

    /// Compute the angle at a vertex from three points
    Angle(AngleCommand),

    /// Show the target angle range for every exercise and side
    Ranges(RangesCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file location
    Path,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();

        match self.command {
            Commands::Replay(cmd) => cmd.execute(config_path).await,
            Commands::Angle(cmd) => cmd.execute(config_path).await,
            Commands::Ranges(cmd) => cmd.execute(config_path).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path).await,
                ConfigSubcommands::Init { force } => {
                    config_cmd::init_config(config_path, force).await
                }
                ConfigSubcommands::Path => config_cmd::config_path(config_path).await,
            },
            Commands::Completions { shell } => {
                let mut cmd = Cli::command();
                let bin_name = cmd.get_name().to_string();
                clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
                Ok(())
            }
        }
    }
}

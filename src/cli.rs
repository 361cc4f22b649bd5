use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quote Wizard - collect interior-design quote requests from the terminal
#[derive(Parser, Debug)]
#[command(name = "quotewizard")]
#[command(about = "A step-by-step interior design quote wizard with mobile verification")]
#[command(version)]
pub struct Cli {
    /// Write logs to this file instead of stderr.
    ///
    /// The interactive wizard discards logs unless a file is given, so
    /// output does not corrupt the terminal UI.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive wizard
    Run {
        /// Application configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the submitted quote to this JSON file
        #[arg(long)]
        save_results: Option<PathBuf>,
    },
    /// Submit a quote headlessly from an answers file
    Submit {
        /// Answers file (JSON)
        #[arg(short, long)]
        answers: PathBuf,

        /// Application configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the submitted quote to this JSON file
        #[arg(long)]
        save_results: Option<PathBuf>,
    },
    /// Print the room-count limits for each BHK type
    Limits,
    /// Check contact details against the form rules
    Check {
        /// Mobile number (10 digits, starting with 6-9)
        #[arg(short, long)]
        mobile: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Validate an application configuration file
    ValidateConfig {
        /// Path to configuration file to validate
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_launches_wizard() {
        let cli = Cli::try_parse_from(["quotewizard"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_submit_args() {
        let cli = Cli::try_parse_from([
            "quotewizard",
            "--log-file",
            "wizard.log",
            "submit",
            "--answers",
            "lead.json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Submit { answers, config, .. }) => {
                assert_eq!(answers, PathBuf::from("lead.json"));
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.log_file, Some(PathBuf::from("wizard.log")));
    }

    #[test]
    fn test_submit_requires_answers() {
        assert!(Cli::try_parse_from(["quotewizard", "submit"]).is_err());
    }

    #[test]
    fn test_validate_config_subcommand_name() {
        let cli = Cli::try_parse_from(["quotewizard", "validate-config", "app.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ValidateConfig { .. })));
    }
}

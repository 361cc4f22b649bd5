//! Quote Wizard - Main entry point
//!
//! Interactive wizard by default; `submit`, `limits`, `check` and
//! `validate-config` run without a terminal UI.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotewizard::cli::{Cli, Commands};
use quotewizard::{
    AppConfig, Answers, JsonResultsFile, QuoteSnapshot, QuoteWizardError, ResultsSink, VerificationWorker,
    WizardController, app::App, contact::ContactFormValidator, estimate_summary, is_valid_email,
    is_valid_mobile, limit_table,
};

/// Initialize logging.
///
/// `RUST_LOG` overrides the default `info` level. With a log file everything
/// goes there; otherwise CLI commands log to stderr and the interactive
/// wizard discards logs so they cannot draw over the screen.
fn init_logging(log_file: Option<&Path>, is_tui_mode: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {:?}", path))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if is_tui_mode {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let is_tui_mode = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(cli.log_file.as_deref(), is_tui_mode)?;
    info!("Quote Wizard starting up");
    debug!("CLI arguments parsed: {:?}", cli.command);

    match cli.command {
        None => {
            info!("No command specified, launching the wizard");
            run_tui(None, None)?;
        }
        Some(Commands::Run {
            config,
            save_results,
        }) => {
            run_tui(config.as_deref(), save_results)?;
        }
        Some(Commands::Submit {
            answers,
            config,
            save_results,
        }) => {
            run_submit(&answers, config.as_deref(), save_results)?;
        }
        Some(Commands::Limits) => {
            println!("{:<10} ROOM COUNT", "BHK TYPE");
            for (label, limits) in limit_table() {
                println!("{:<10} {}", label, limits);
            }
        }
        Some(Commands::Check { mobile, email }) => {
            if mobile.is_none() && email.is_none() {
                eprintln!("✗ Nothing to check: pass --mobile and/or --email");
                std::process::exit(2);
            }
            let mut ok = true;
            if let Some(mobile) = mobile {
                ok &= report_check("mobile", &mobile, is_valid_mobile(&mobile));
            }
            if let Some(email) = email {
                ok &= report_check("email", &email, is_valid_email(&email));
            }
            if !ok {
                std::process::exit(1);
            }
        }
        Some(Commands::ValidateConfig { config }) => {
            info!("Validating configuration file: {:?}", config);
            match AppConfig::load_from_file(&config).and_then(|c| c.validate().map(|_| c)) {
                Ok(config) => {
                    info!("Configuration validation successful");
                    println!("✓ Configuration file is valid: {:?}", config);
                }
                Err(e) => {
                    error!("Configuration validation failed: {:#}", e);
                    eprintln!("✗ Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn report_check(field: &str, value: &str, valid: bool) -> bool {
    if valid {
        println!("✓ {} {:?} is valid", field, value);
    } else {
        println!("✗ {} {:?} is not valid", field, value);
    }
    valid
}

/// Sink from the command line, falling back to the config's results path
fn results_sink(config: &AppConfig, save_results: Option<PathBuf>) -> Option<Box<dyn ResultsSink>> {
    save_results
        .or_else(|| config.results_path.clone())
        .map(|path| Box::new(JsonResultsFile::new(path)) as Box<dyn ResultsSink>)
}

/// Run the interactive wizard
fn run_tui(config_path: Option<&Path>, save_results: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load_or_default(config_path)?;
    let sink = results_sink(&config, save_results);
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| QuoteWizardError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        QuoteWizardError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = run_app(&config, sink);

    // Always attempt cleanup, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Some(snapshot) = result? {
        for line in estimate_summary(&snapshot) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Create the terminal and drive the app until it quits
fn run_app(config: &AppConfig, sink: Option<Box<dyn ResultsSink>>) -> Result<Option<QuoteSnapshot>> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| QuoteWizardError::terminal(format!("Failed to create terminal: {}", e)))?;

    let mut app = App::new(config, sink);
    app.run(&mut terminal)?;
    Ok(app.state().wizard.results().cloned())
}

/// Play an answers file through the wizard without a terminal UI
fn run_submit(answers_path: &Path, config_path: Option<&Path>, save_results: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load_or_default(config_path)?;
    let answers = Answers::load_from_file(answers_path)?;
    info!("Submitting answers from {:?}", answers_path);

    let (delivery, confirmation) = config.capabilities();
    let worker = VerificationWorker::new(delivery, confirmation);
    let mut wizard = WizardController::with_contact(ContactFormValidator::new(config.code_length));

    let snapshot = match answers.run(&mut wizard, &worker) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Submission failed: {:#}", e);
            eprintln!("✗ Submission failed: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("✓ {}", quotewizard::theme::UiText::SUBMITTED);
    for line in estimate_summary(&snapshot) {
        println!("{}", line);
    }
    if let Some(sink) = results_sink(&config, save_results) {
        sink.deliver(&snapshot)?;
    }
    Ok(())
}

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use studyflow::{
    cli::{Cli, Commands},
    config::Config,
    scheduler::{HttpScheduler, Scheduler},
    wizard::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "studyflow=info");
    }

    let config = Config::from_env()?.with_endpoint(cli.endpoint.clone());
    config.validate()?;

    let file_appender = log_appender(&config.log_file)?;

    match cli.command {
        Some(command) => {
            // Initialize logging to both console and file
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_filter(EnvFilter::from_default_env()),
                )
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_filter(EnvFilter::from_default_env()),
                )
                .init();

            handle_cli_command(command, &config).await
        }
        None => {
            // The wizard owns the terminal, so it only logs to file
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_filter(EnvFilter::from_default_env()),
                )
                .init();

            run_wizard(config).await
        }
    }
}

fn log_appender(log_file: &Path) -> Result<tracing_appender::rolling::RollingFileAppender> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", log_file.display()))?;

    Ok(tracing_appender::rolling::never(directory, file_name))
}

/// Handle CLI mode commands - print output and exit
async fn handle_cli_command(command: Commands, config: &Config) -> Result<()> {
    let submission = match command.to_draft().into_submission() {
        Ok(submission) => submission,
        Err(errors) => {
            eprintln!("Cannot submit: {}", errors);
            for (field, message) in errors.iter() {
                eprintln!("  {:<16} {}", field.label(), message);
            }
            std::process::exit(1);
        }
    };

    let scheduler = HttpScheduler::new(config)?;
    info!("Submitting study request to {}", scheduler.endpoint());

    match scheduler.generate(&submission).await {
        Ok(schedule) => {
            if schedule.is_empty() {
                println!("The scheduler returned no sessions.");
            } else {
                println!("Your Weekly Plan ({} sessions)", schedule.len());
                println!("{}", "-".repeat(40));
                for entry in &schedule {
                    println!("{}", entry);
                }
            }
        }
        Err(e) => {
            error!("Schedule generation failed: {}", e);
            eprintln!("{}", e.alert().message);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_wizard(config: Config) -> Result<()> {
    info!("Starting StudyFlow wizard against {}", config.endpoint);

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("StudyFlow wizard exited successfully");
        }
        Err(e) => {
            error!("StudyFlow wizard encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

//! actiond - scripted action loop daemon
//!
//! CLI entry point for launching and controlling action loops.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use actiond::action::{ActionManager, plan_iteration, render_timeline};
use actiond::cli::{Cli, Command, OutputFormat};
use actiond::config::Config;
use actiond::journal::TracingJournal;
use actiond::random::ThreadRandomness;
use actiond::sink::ConsoleSink;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("actiond")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("actiond.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("actiond loaded config: {} actions", config.actions.len());

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Run => cmd_run(&config).await,
        Command::Check => cmd_check(&config),
        Command::Actions { format } => cmd_actions(&config, format),
        Command::Plan { trigger, steady, format } => cmd_plan(&config, &trigger, steady, format),
    }
}

/// Spawn every configured action and drive the stdin control loop
async fn cmd_run(config: &Config) -> Result<()> {
    config.validate()?;
    if config.actions.is_empty() {
        eyre::bail!("no actions configured");
    }

    let mut manager = ActionManager::new();
    for definition in &config.actions {
        let sink = ConsoleSink::new(definition.channels.clone());
        let id = manager.create(definition.clone(), sink, TracingJournal)?;
        println!("{} {} ({id})", "started".green(), definition.trigger.bold());
    }

    println!(
        "{}",
        "commands: pause, resume, pause!, resume!, quit (Ctrl-C to exit)".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read control input")? {
                    Some(line) => match line.trim() {
                        "pause" => {
                            manager.pause_all(false);
                            println!("paused");
                        }
                        "resume" => {
                            manager.resume_all(false);
                            println!("resumed");
                        }
                        "pause!" => {
                            manager.pause_all(true);
                            println!("paused (forced)");
                        }
                        "resume!" => {
                            manager.resume_all(true);
                            println!("resumed (forced)");
                        }
                        "quit" | "exit" => break,
                        "" => {}
                        other => println!("unknown command: {other}"),
                    },
                    // stdin closed
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    info!(actions = manager.len(), "shutting down action loops");
    manager.shutdown().await;
    Ok(())
}

/// Load and validate the configuration, reporting each action
fn cmd_check(config: &Config) -> Result<()> {
    config.validate()?;

    println!("{} {} actions", "ok:".green(), config.actions.len());
    for action in &config.actions {
        println!(
            "  {} ({} steps, loop-time {}s{})",
            action.trigger.bold(),
            action.sequence.len(),
            action.loop_time_secs,
            if action.run_always { ", run-always" } else { "" },
        );
    }
    Ok(())
}

/// List configured actions
fn cmd_actions(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config.actions)?);
        }
        OutputFormat::Text => {
            for action in &config.actions {
                println!(
                    "{}  channels: [{}]  loop-time: {}s  probability: {}",
                    action.trigger.bold(),
                    action.channels.join(", "),
                    action.loop_time_secs,
                    action.execution_probability,
                );
            }
        }
    }
    Ok(())
}

/// Dry-run one iteration's timeline for a configured action
fn cmd_plan(config: &Config, trigger: &str, steady: bool, format: OutputFormat) -> Result<()> {
    let definition = config
        .find_action(trigger)
        .ok_or_else(|| eyre::eyre!("no action with trigger '{trigger}'"))?;
    definition
        .validate()
        .wrap_err_with(|| format!("invalid action '{trigger}'"))?;

    let mut rng = ThreadRandomness;
    let steps = plan_iteration(definition, !steady, &mut rng);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
        OutputFormat::Text => {
            println!("{} {}", trigger.bold(), render_timeline(&steps));
        }
    }
    Ok(())
}

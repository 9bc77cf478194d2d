//! Demonstration CLI for the output engine.
//!
//! `shellout demo` walks through every kind of output: a spinner operation,
//! a gauge-driven operation, a skipped step, warnings, errors and a result.
//! `shellout config` prints the effective settings.

use anyhow::Result;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use shellout::output::{EndOperationStatus, Output, ProgressGauge};
use shellout::{Settings, ShelloutError, TerminalMode, kv, term};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Terminal-aware console output
#[derive(Parser)]
#[command(
    name = "shellout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Leveled, structured, terminal-aware console output",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom shellout.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity ceiling (0 shows only default-level messages)
    #[arg(short, long, global = true, value_name = "N")]
    verbose: Option<i32>,

    /// Tracing directives for library logs, e.g. "my_crate=debug"
    #[arg(long, global = true)]
    log_filter: Option<String>,

    /// Force timestamped line output
    #[arg(long, global = true, conflicts_with = "interactive")]
    plain: bool,

    /// Force the spinner renderer
    #[arg(long, global = true)]
    interactive: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Show every kind of output
    #[command(about = "Run operations, a progress gauge and messages")]
    Demo {
        /// Number of gauge steps
        #[arg(short, long, default_value_t = 10)]
        steps: i64,

        /// Delay per step in milliseconds
        #[arg(short, long, default_value_t = 150)]
        delay: u64,
    },

    /// Print the effective settings as TOML
    Config,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        if let Some(err) = e.downcast_ref::<ShelloutError>() {
            for suggestion in err.recovery_suggestions() {
                eprintln!("  - {suggestion}");
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    // CLI overrides
    let verbosity_given = cli.verbose.is_some();
    if let Some(verbose) = cli.verbose {
        settings.verbosity = verbose;
    }
    if cli.log_filter.is_some() {
        settings.log_filter = cli.log_filter.clone();
    }
    if cli.plain {
        settings.terminal = TerminalMode::Plain;
    } else if cli.interactive {
        settings.terminal = TerminalMode::Interactive;
    }

    let output = term::configure_output(&settings, verbosity_given)?;

    match cli.command {
        Commands::Demo { steps, delay } => {
            run_demo(output.as_ref(), steps, Duration::from_millis(delay))
        }
        Commands::Config => {
            output.result(settings.to_toml()?.trim_end());
            Ok(())
        }
    }
}

fn run_demo(output: &dyn Output, steps: i64, delay: Duration) -> Result<()> {
    output.start_operation("preparing workspace");
    thread::sleep(delay * 3);
    output
        .v(1)
        .with_values(kv!["steps" => steps, "delay" => format!("{delay:?}")])
        .info("workspace ready");
    output.end_operation(true);

    let gauge = Arc::new(ProgressGauge::with_capacity("copying files", steps));
    output.start_operation_with_progress(gauge.clone());
    for step in 0..steps {
        thread::sleep(delay);
        gauge.inc();
        tracing::debug!(target: "demo", step, "copied file");
    }
    output.end_operation(true);
    log::info!(target: "demo", "file copy finished");

    output.start_operation("optional cleanup");
    thread::sleep(delay);
    output.end_operation_with_status(&EndOperationStatus::skipped());

    output.start_operation("contacting registry");
    thread::sleep(delay * 2);
    output.end_operation(false);

    let err = std::io::Error::other("connection refused");
    output.error(Some(&err), "registry unavailable");
    output.warn("continuing with the cached index");
    output.v(2).info("only shown with --verbose 2");

    let mut results = output.result_writer();
    writeln!(results, "demo finished after {steps} steps")?;
    Ok(())
}

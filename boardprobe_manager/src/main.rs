use boardprobe_core::{BoardConfig, BoardResult};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use boardprobe_manager::commands;

#[derive(Parser)]
#[command(name = "boardprobe")]
#[command(about = "Detect the carrier board of a flight computer and bring it online")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase output verbosity (show debug messages)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Only report errors
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    /// Configuration file (defaults apply when missing)
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        default_value = "/etc/boardprobe/boardprobe.yaml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the attached board and apply its overlays
    Detect {
        /// Print a JSON report
        #[arg(long = "json")]
        json: bool,

        /// Stop after detection, leave the full overlay set unapplied
        #[arg(long = "no-setup")]
        no_setup: bool,
    },

    /// Show the serial port mapping of a board
    Serials {
        /// Board variant (NavigatorPi4, NavigatorPi5, Argonot)
        board: String,

        /// OS release codename (defaults to the installed one)
        #[arg(short = 'r', long = "release")]
        release: Option<String>,
    },

    /// Build and install the spi0-led overlay if missing
    LedOverlay,

    /// List board candidates in detection order
    Candidates,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    log::debug!("boardprobe v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_command(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_command(cli: &Cli) -> BoardResult<()> {
    let config = BoardConfig::load_or_default(Some(&cli.config))?;

    match &cli.command {
        Commands::Detect { json, no_setup } => commands::detect::run_detect(
            &config,
            commands::detect::DetectOptions {
                setup: !no_setup,
                json: *json,
            },
        ),
        Commands::Serials { board, release } => {
            commands::serial::run_serials(&config, board, release.as_deref())
        }
        Commands::LedOverlay => commands::led_overlay::run_led_overlay(&config),
        Commands::Candidates => commands::candidates::run_candidates(&config, cli.verbose),
    }
}

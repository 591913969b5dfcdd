//! Board detection command
//!
//! Detects the attached carrier board, brings its peripherals online and
//! reports the serial arguments the autopilot should start with.

use boardprobe_core::board::{serial_cmdlines, BoardCandidate, BoardDetector};
use boardprobe_core::hardware::{
    CommandOverlayLoader, LedOverlayBuilder, OverlayState, SystemInfo,
};
use boardprobe_core::utils::SystemCommandRunner;
use boardprobe_core::{BoardConfig, BoardResult};
use colored::*;

/// Options for `boardprobe detect`
#[derive(Debug, Clone, Copy)]
pub struct DetectOptions {
    /// Apply the full overlay set of the detected board
    pub setup: bool,
    /// Print a JSON report instead of text
    pub json: bool,
}

/// Run detection on this host
pub fn run_detect(config: &BoardConfig, options: DetectOptions) -> BoardResult<()> {
    let system = SystemInfo::load(config)?;
    let overlays = OverlayState::new(CommandOverlayLoader::new(
        SystemCommandRunner,
        config.use_sudo,
    ));
    let detector = BoardDetector::from_config(config)?;

    let board = detect_on_host(config, &system, &overlays, &detector)?;

    if options.setup {
        if needs_led_overlay(board) {
            LedOverlayBuilder::new(config.led_overlay.clone(), SystemCommandRunner)
                .ensure_built()?;
        }
        board.setup_board(&overlays, &config.baseline_modules)?;
    }

    let release = system.os_release()?;
    let serials = board.serial_ports(release)?;
    let cmdline = serial_cmdlines(&serials);

    if options.json {
        let report = serde_json::json!({
            "board": board.info(),
            "os_release": release.codename(),
            "setup": options.setup,
            "serial_ports": serials,
            "cmdline": cmdline,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Carrier Board".cyan().bold());
    println!("  {} {}", "Detected:".dimmed(), board.to_string().green());
    println!("  {} {}", "Manufacturer:".dimmed(), board.manufacturer());
    println!("  {} {:?}", "Platform:".dimmed(), board.platform());
    println!("  {} {}", "OS release:".dimmed(), release);
    if options.setup {
        let applied = overlays.applied();
        println!(
            "  {} {} overlays, {} params",
            "Applied:".dimmed(),
            applied.overlays.len(),
            applied.params.len()
        );
    }
    println!();

    println!("{}", "Serial Ports".cyan().bold());
    for mapping in &serials {
        println!(
            "  {} {}",
            format!("-{}", mapping.port).yellow(),
            mapping.endpoint
        );
    }
    println!();
    println!("{} {}", "Autopilot arguments:".dimmed(), cmdline);

    Ok(())
}

/// Whether the board's full overlay set loads the LED overlay
pub fn needs_led_overlay(board: BoardCandidate) -> bool {
    board
        .descriptor()
        .full_overlays
        .iter()
        .any(|token| token.split_whitespace().next() == Some("spi0-led"))
}

#[cfg(target_os = "linux")]
fn detect_on_host(
    config: &BoardConfig,
    system: &SystemInfo,
    overlays: &OverlayState,
    detector: &BoardDetector,
) -> BoardResult<BoardCandidate> {
    use boardprobe_core::board::Host;
    use boardprobe_core::hardware::I2cProber;

    let prober = I2cProber::from_config(config);
    let host = Host {
        system,
        overlays,
        prober: &prober,
        baseline_modules: &config.baseline_modules,
    };
    detector.detect_boards(&host)
}

#[cfg(not(target_os = "linux"))]
fn detect_on_host(
    _config: &BoardConfig,
    _system: &SystemInfo,
    _overlays: &OverlayState,
    _detector: &BoardDetector,
) -> BoardResult<BoardCandidate> {
    Err(boardprobe_core::BoardError::unsupported(
        "board detection needs Linux I2C device nodes",
    ))
}

//! LED overlay command
//!
//! Builds and installs the `spi0-led` overlay when it is missing.

use boardprobe_core::hardware::LedOverlayBuilder;
use boardprobe_core::utils::SystemCommandRunner;
use boardprobe_core::{BoardConfig, BoardResult};
use colored::*;

pub fn run_led_overlay(config: &BoardConfig) -> BoardResult<()> {
    let builder = LedOverlayBuilder::new(config.led_overlay.clone(), SystemCommandRunner);

    if builder.ensure_built()? {
        let path = builder
            .installed()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!("{} spi0-led already installed at {}", "✓".green(), path);
    } else {
        println!(
            "{} spi0-led built into {}",
            "✓".green(),
            config.led_overlay.legacy_path.display()
        );
    }
    Ok(())
}

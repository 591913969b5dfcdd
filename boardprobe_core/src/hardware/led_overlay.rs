//! On-demand build of the `spi0-led` overlay.
//!
//! The LED overlay is not shipped by the OS image. When it is missing from
//! both install locations it is compiled from the embedded device-tree
//! source with `dtc` and installed so that a later `dtoverlay spi0-led`
//! works without a reboot.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::LedOverlayConfig;
use crate::error::BoardResult;
use crate::utils::command::{elevated, CommandRunner};

/// Device-tree source of the LED overlay
pub const SPI0_LED_DTS: &str = include_str!("overlay_source/spi0-led.dts");

/// Builds and installs the LED overlay blob
pub struct LedOverlayBuilder<R: CommandRunner> {
    config: LedOverlayConfig,
    runner: R,
}

impl<R: CommandRunner> LedOverlayBuilder<R> {
    pub fn new(config: LedOverlayConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// First install location holding the compiled overlay, if any
    pub fn installed(&self) -> Option<&Path> {
        [&self.config.legacy_path, &self.config.firmware_path]
            .into_iter()
            .map(PathBuf::as_path)
            .find(|path| path.exists())
    }

    /// Make sure the overlay blob is installed.
    ///
    /// Returns `true` when the build was skipped because the blob already
    /// exists, `false` after a fresh build. A failing compiler or copy is
    /// an error.
    pub fn ensure_built(&self) -> BoardResult<bool> {
        if let Some(found) = self.installed() {
            log::info!("spi0-led overlay found at {}", found.display());
            return Ok(true);
        }

        let mut source = tempfile::Builder::new()
            .prefix("spi0-led")
            .suffix(".dts")
            .tempfile()?;
        source.write_all(SPI0_LED_DTS.as_bytes())?;
        source.flush()?;

        let legacy = self.config.legacy_path.display().to_string();
        log::info!("Compiling spi0-led overlay into {}", legacy);
        let (program, args) = elevated(
            self.config.use_sudo,
            &self.config.dtc,
            vec![
                "-@".to_string(),
                "-Hepapr".to_string(),
                "-I".to_string(),
                "dts".to_string(),
                "-O".to_string(),
                "dtb".to_string(),
                "-o".to_string(),
                legacy.clone(),
                source.path().display().to_string(),
            ],
        );
        self.runner.run(&program, &args)?;

        if self.config.firmware_dir.is_dir() {
            let target = self.config.firmware_path.display().to_string();
            log::info!("Installing spi0-led overlay into {}", target);
            let (program, args) = elevated(self.config.use_sudo, "cp", vec![legacy, target]);
            self.runner.run(&program, &args)?;
        } else {
            log::debug!(
                "{} not present, skipping firmware partition install",
                self.config.firmware_dir.display()
            );
        }

        Ok(false)
    }
}

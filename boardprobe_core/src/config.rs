//! boardprobe Configuration
//!
//! Typed configuration for `boardprobe.yaml`. Every key is optional; missing
//! keys fall back to the paths used on a stock Raspberry Pi OS image.
//!
//! # Example boardprobe.yaml
//!
//! ```yaml
//! cpuinfo_path: /proc/cpuinfo
//! os_release_path: /etc/os-release
//! i2c_device_prefix: /dev/i2c-
//! use_sudo: true
//!
//! # Kernel modules loaded together with every overlay request
//! baseline_modules:
//!   - i2c_dev
//!
//! # Detection order (first match wins)
//! candidates:
//!   - Argonot
//!   - NavigatorPi4
//!   - NavigatorPi5
//!
//! led_overlay:
//!   legacy_path: /boot/overlays/spi0-led.dtbo
//!   firmware_path: /boot/firmware/overlays/spi0-led.dtbo
//!   firmware_dir: /boot/firmware
//!   dtc: dtc
//!   use_sudo: true
//! ```

use crate::error::BoardResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// boardprobe configuration from boardprobe.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// CPU identification file used for the SoC generation check
    pub cpuinfo_path: PathBuf,

    /// OS identification file used to pick the serial port table
    pub os_release_path: PathBuf,

    /// Bus device prefix, the bus number is appended
    pub i2c_device_prefix: String,

    /// Modules requested alongside every overlay application
    pub baseline_modules: Vec<String>,

    /// Candidate names in detection order (defaults to the built-in order)
    pub candidates: Option<Vec<String>>,

    /// Run the runtime overlay tools (`dtparam`, `dtoverlay`, `modprobe`) through sudo
    #[serde(default = "default_true")]
    pub use_sudo: bool,

    /// LED overlay build settings
    pub led_overlay: LedOverlayConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cpuinfo_path: PathBuf::from("/proc/cpuinfo"),
            os_release_path: PathBuf::from("/etc/os-release"),
            i2c_device_prefix: "/dev/i2c-".to_string(),
            baseline_modules: vec!["i2c_dev".to_string()],
            candidates: None,
            use_sudo: true,
            led_overlay: LedOverlayConfig::default(),
        }
    }
}

/// LED overlay section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedOverlayConfig {
    /// Install location read by older firmware (Pi4 and earlier images)
    pub legacy_path: PathBuf,

    /// Install location on images with a separate firmware partition
    pub firmware_path: PathBuf,

    /// The firmware partition; the blob is copied only when it exists
    pub firmware_dir: PathBuf,

    /// Device-tree compiler executable
    pub dtc: String,

    /// Run the compiler and the copy through sudo
    #[serde(default = "default_true")]
    pub use_sudo: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LedOverlayConfig {
    fn default() -> Self {
        Self {
            legacy_path: PathBuf::from("/boot/overlays/spi0-led.dtbo"),
            firmware_path: PathBuf::from("/boot/firmware/overlays/spi0-led.dtbo"),
            firmware_dir: PathBuf::from("/boot/firmware"),
            dtc: "dtc".to_string(),
            use_sudo: true,
        }
    }
}

impl BoardConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> BoardResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> BoardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load from `path` when given and present, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> BoardResult<Self> {
        match path {
            Some(path) if path.exists() => {
                log::debug!("loading config from {:?}", path);
                Self::from_file(path)
            }
            Some(path) => {
                log::debug!("config {:?} not found, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Device path for a numbered bus
    pub fn i2c_device_path(&self, bus: u8) -> String {
        format!("{}{}", self.i2c_device_prefix, bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.cpuinfo_path, PathBuf::from("/proc/cpuinfo"));
        assert_eq!(config.baseline_modules, vec!["i2c_dev"]);
        assert!(config.candidates.is_none());
        assert!(config.led_overlay.use_sudo);
        assert_eq!(config.i2c_device_path(4), "/dev/i2c-4");
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
os_release_path: /tmp/os-release
candidates:
  - NavigatorPi5
led_overlay:
  use_sudo: false
"#;
        let config = BoardConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.os_release_path, PathBuf::from("/tmp/os-release"));
        assert_eq!(config.cpuinfo_path, PathBuf::from("/proc/cpuinfo"));
        assert_eq!(config.candidates, Some(vec!["NavigatorPi5".to_string()]));
        assert!(!config.led_overlay.use_sudo);
        assert_eq!(config.led_overlay.dtc, "dtc");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = BoardConfig::from_yaml("candidates: [unterminated").unwrap_err();
        assert!(matches!(err, crate::error::BoardError::Config(_)));
    }

    #[test]
    fn test_load_or_default() {
        let missing = BoardConfig::load_or_default(Some(Path::new("/nonexistent/boardprobe.yaml")))
            .unwrap();
        assert_eq!(missing.i2c_device_prefix, "/dev/i2c-");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "i2c_device_prefix: /dev/i2c_test-").unwrap();
        let loaded = BoardConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(loaded.i2c_device_path(1), "/dev/i2c_test-1");
    }
}

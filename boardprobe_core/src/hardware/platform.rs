//! Host identification for board detection.
//!
//! Reads the CPU identification file and the OS identification file once
//! and answers the two questions the board candidates ask: which SoC
//! generation is this, and which OS release is installed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};

/// Model strings of BCM2712 boards
const PI5_MODEL_MARKERS: [&str; 2] = ["Raspberry Pi 5", "Raspberry Pi Compute Module 5"];

/// SoC generation of the host computer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocGeneration {
    /// Raspberry Pi 4 and earlier (BCM2711 family)
    Pi4OrOlder,
    /// Raspberry Pi 5 and Compute Module 5 (BCM2712 + RP1)
    Pi5,
}

impl SocGeneration {
    /// Parse the content of the CPU identification file
    pub fn parse(cpuinfo: &str) -> Self {
        if PI5_MODEL_MARKERS.iter().any(|marker| cpuinfo.contains(marker)) {
            SocGeneration::Pi5
        } else {
            SocGeneration::Pi4OrOlder
        }
    }

    pub fn is_pi5(&self) -> bool {
        matches!(self, SocGeneration::Pi5)
    }
}

/// Known OS releases. Serial device naming changed between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsRelease {
    Bullseye,
    Bookworm,
}

impl OsRelease {
    /// Every known release, newest first. Parsing tests markers in this order.
    pub const ALL: [OsRelease; 2] = [OsRelease::Bookworm, OsRelease::Bullseye];

    /// Get the release codename as it appears in the OS identification file
    pub fn codename(&self) -> &'static str {
        match self {
            OsRelease::Bullseye => "bullseye",
            OsRelease::Bookworm => "bookworm",
        }
    }

    /// Parse the content of the OS identification file.
    ///
    /// Content with no known marker is an error: an unknown release would
    /// otherwise be handed the wrong serial table.
    pub fn parse(os_release: &str) -> BoardResult<Self> {
        let content = os_release.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|release| content.contains(release.codename()))
            .ok_or(BoardError::UnknownOsRelease)
    }

    /// Parse a release given by name, e.g. on the command line
    pub fn from_name(name: &str) -> BoardResult<Self> {
        Self::ALL
            .into_iter()
            .find(|release| release.codename().eq_ignore_ascii_case(name.trim()))
            .ok_or(BoardError::UnknownOsRelease)
    }
}

impl std::fmt::Display for OsRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.codename())
    }
}

/// Identification content of the host, read once per process
#[derive(Debug, Clone, Default)]
pub struct SystemInfo {
    cpuinfo: String,
    os_release: String,
}

impl SystemInfo {
    /// Build from already-read file contents
    pub fn new(cpuinfo: impl Into<String>, os_release: impl Into<String>) -> Self {
        Self {
            cpuinfo: cpuinfo.into(),
            os_release: os_release.into(),
        }
    }

    /// Read both identification files from the configured paths.
    ///
    /// A missing OS identification file is not fatal here; it surfaces as
    /// [`BoardError::UnknownOsRelease`] when the serial table is requested.
    pub fn load(config: &BoardConfig) -> BoardResult<Self> {
        let cpuinfo = fs::read_to_string(&config.cpuinfo_path)?;
        let os_release = read_optional(&config.os_release_path);
        Ok(Self::new(cpuinfo, os_release))
    }

    pub fn soc_generation(&self) -> SocGeneration {
        SocGeneration::parse(&self.cpuinfo)
    }

    pub fn is_pi5(&self) -> bool {
        self.soc_generation().is_pi5()
    }

    pub fn os_release(&self) -> BoardResult<OsRelease> {
        OsRelease::parse(&self.os_release)
    }
}

fn read_optional(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PI5_CPUINFO: &str = "processor\t: 0\nBogoMIPS\t: 108.00\n\
        Revision\t: d04170\nModel\t\t: Raspberry Pi 5 Model B Rev 1.0\n";
    const PI4_CPUINFO: &str = "processor\t: 0\nHardware\t: BCM2835\n\
        Model\t\t: Raspberry Pi 4 Model B Rev 1.4\n";

    const BOOKWORM: &str = "PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n\
        VERSION_CODENAME=bookworm\nID=debian\n";
    const BULLSEYE: &str = "PRETTY_NAME=\"Raspbian GNU/Linux 11 (bullseye)\"\n\
        VERSION_CODENAME=bullseye\nID=raspbian\n";

    #[test]
    fn test_soc_generation() {
        assert_eq!(SocGeneration::parse(PI5_CPUINFO), SocGeneration::Pi5);
        assert_eq!(SocGeneration::parse(PI4_CPUINFO), SocGeneration::Pi4OrOlder);
        assert_eq!(SocGeneration::parse(""), SocGeneration::Pi4OrOlder);
    }

    #[test]
    fn test_compute_modules() {
        let cm5 = "Model\t\t: Raspberry Pi Compute Module 5 Rev 1.0\n";
        let cm4 = "Model\t\t: Raspberry Pi Compute Module 4 Rev 1.0\n";
        assert!(SocGeneration::parse(cm5).is_pi5());
        assert!(!SocGeneration::parse(cm4).is_pi5());
    }

    #[test]
    fn test_parse_os_release() {
        assert_eq!(OsRelease::parse(BOOKWORM).unwrap(), OsRelease::Bookworm);
        assert_eq!(OsRelease::parse(BULLSEYE).unwrap(), OsRelease::Bullseye);
    }

    #[test]
    fn test_bookworm_marker_wins() {
        let upgraded = format!("{}# upgraded from bullseye\n", BOOKWORM);
        assert_eq!(OsRelease::parse(&upgraded).unwrap(), OsRelease::Bookworm);
    }

    #[test]
    fn test_unknown_release_is_error() {
        let trixie = "PRETTY_NAME=\"Debian GNU/Linux 13 (trixie)\"\nVERSION_CODENAME=trixie\n";
        assert!(matches!(
            OsRelease::parse(trixie),
            Err(BoardError::UnknownOsRelease)
        ));
        assert!(OsRelease::parse("").is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(OsRelease::from_name("Bookworm").unwrap(), OsRelease::Bookworm);
        assert_eq!(OsRelease::from_name(" bullseye ").unwrap(), OsRelease::Bullseye);
        assert!(OsRelease::from_name("buster").is_err());
    }

    #[test]
    fn test_load_from_files() {
        let mut cpuinfo = tempfile::NamedTempFile::new().unwrap();
        write!(cpuinfo, "{}", PI5_CPUINFO).unwrap();
        let mut os_release = tempfile::NamedTempFile::new().unwrap();
        write!(os_release, "{}", BOOKWORM).unwrap();

        let config = BoardConfig {
            cpuinfo_path: cpuinfo.path().to_path_buf(),
            os_release_path: os_release.path().to_path_buf(),
            ..Default::default()
        };
        let info = SystemInfo::load(&config).unwrap();
        assert!(info.is_pi5());
        assert_eq!(info.os_release().unwrap(), OsRelease::Bookworm);
    }

    #[test]
    fn test_missing_os_release_defers_error() {
        let mut cpuinfo = tempfile::NamedTempFile::new().unwrap();
        write!(cpuinfo, "{}", PI4_CPUINFO).unwrap();

        let config = BoardConfig {
            cpuinfo_path: cpuinfo.path().to_path_buf(),
            os_release_path: "/nonexistent/os-release".into(),
            ..Default::default()
        };
        let info = SystemInfo::load(&config).unwrap();
        assert!(!info.is_pi5());
        assert!(matches!(info.os_release(), Err(BoardError::UnknownOsRelease)));
    }

    #[test]
    #[ignore] // Reads the real host files
    fn test_host_system_info() {
        match SystemInfo::load(&BoardConfig::default()) {
            Ok(info) => println!(
                "SoC: {:?}, release: {:?}",
                info.soc_generation(),
                info.os_release()
            ),
            Err(e) => println!("Failed to read host identification: {}", e),
        }
    }
}

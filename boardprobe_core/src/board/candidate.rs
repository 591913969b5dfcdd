//! Supported board variants and the detection capability they share.

use serde::{Deserialize, Serialize};

use super::descriptor::HardwareDescriptor;
use super::navigator::{ARGONOT, NAVIGATOR_PI4, NAVIGATOR_PI5};
use super::serial::{navigator_serial_ports, serial_cmdlines, OsRelease, SerialMapping};
use crate::error::{BoardError, BoardResult};
use crate::hardware::{BusProber, OverlayState, SystemInfo};

/// Platform tag consumed by the rest of the flight-controller manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Navigator,
    Argonot,
    Undefined,
}

/// Everything a candidate touches while detecting: the host identification,
/// the process-wide overlay state and the bus prober.
pub struct Host<'a> {
    pub system: &'a SystemInfo,
    pub overlays: &'a OverlayState,
    pub prober: &'a dyn BusProber,
    /// Modules requested with every overlay application (`i2c_dev`)
    pub baseline_modules: &'a [String],
}

/// A supported board variant.
///
/// Variants carry no state beyond their static descriptor; two values are
/// equal exactly when they name the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardCandidate {
    /// Placeholder that never matches
    Unsupported,
    NavigatorPi4,
    NavigatorPi5,
    Argonot,
}

/// Summary of the chosen board handed to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightControllerInfo {
    pub name: String,
    pub manufacturer: String,
    pub platform: Platform,
    pub variant: BoardCandidate,
}

impl BoardCandidate {
    pub const ALL: [BoardCandidate; 4] = [
        BoardCandidate::Unsupported,
        BoardCandidate::NavigatorPi4,
        BoardCandidate::NavigatorPi5,
        BoardCandidate::Argonot,
    ];

    /// Variant identifier, also used in configuration files
    pub fn id(&self) -> &'static str {
        match self {
            BoardCandidate::Unsupported => "Unsupported",
            BoardCandidate::NavigatorPi4 => "NavigatorPi4",
            BoardCandidate::NavigatorPi5 => "NavigatorPi5",
            BoardCandidate::Argonot => "Argonot",
        }
    }

    /// Board name as shown to users
    pub fn name(&self) -> &'static str {
        match self {
            BoardCandidate::Unsupported => "Unsupported",
            BoardCandidate::NavigatorPi4 | BoardCandidate::NavigatorPi5 => "Navigator",
            BoardCandidate::Argonot => "Argonot",
        }
    }

    pub fn manufacturer(&self) -> &'static str {
        match self {
            BoardCandidate::Unsupported => "Unknown",
            BoardCandidate::NavigatorPi4 | BoardCandidate::NavigatorPi5 => "Blue Robotics",
            BoardCandidate::Argonot => "SymbyTech",
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            BoardCandidate::Unsupported => Platform::Undefined,
            BoardCandidate::NavigatorPi4 | BoardCandidate::NavigatorPi5 => Platform::Navigator,
            BoardCandidate::Argonot => Platform::Argonot,
        }
    }

    pub fn descriptor(&self) -> &'static HardwareDescriptor {
        match self {
            BoardCandidate::Unsupported => &HardwareDescriptor::EMPTY,
            BoardCandidate::NavigatorPi4 => &NAVIGATOR_PI4,
            BoardCandidate::NavigatorPi5 => &NAVIGATOR_PI5,
            BoardCandidate::Argonot => &ARGONOT,
        }
    }

    /// Look a variant up by its identifier (case insensitive)
    pub fn from_name(name: &str) -> BoardResult<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| BoardError::config(format!("unknown board candidate '{}'", name)))
    }

    pub fn info(&self) -> FlightControllerInfo {
        FlightControllerInfo {
            name: self.name().to_string(),
            manufacturer: self.manufacturer().to_string(),
            platform: self.platform(),
            variant: *self,
        }
    }

    /// Cheap check of the host, independent of any overlay
    pub fn precondition(&self, system: &SystemInfo) -> bool {
        match self {
            BoardCandidate::Unsupported => false,
            BoardCandidate::NavigatorPi4 | BoardCandidate::Argonot => !system.is_pi5(),
            BoardCandidate::NavigatorPi5 => system.is_pi5(),
        }
    }

    /// Probe the host for this variant.
    ///
    /// Kernel state is only touched when the precondition holds. Every
    /// expected device must answer. Overlay failures are returned as errors.
    pub fn detect(&self, host: &Host<'_>) -> BoardResult<bool> {
        if !self.precondition(host.system) {
            log::debug!("{}: precondition not met", self.id());
            return Ok(false);
        }

        let descriptor = self.descriptor();
        log::info!("{}: setting up hardware for detection", self.id());
        host.overlays.apply(
            descriptor.kernel_params,
            descriptor.detection_overlays,
            host.baseline_modules,
        )?;

        Ok(descriptor.expected_devices.iter().all(|device| {
            let present = host.prober.probe(device.bus, device.address);
            if !present {
                log::info!(
                    "{}: {} not found at {}",
                    self.id(),
                    device.name,
                    host.prober.describe(device.bus, device.address)
                );
            }
            present
        }))
    }

    /// Enable every peripheral of the chosen board
    pub fn setup_board(&self, overlays: &OverlayState, baseline_modules: &[String]) -> BoardResult<()> {
        if matches!(self, BoardCandidate::Unsupported) {
            return Err(BoardError::unsupported("cannot set up an unsupported board"));
        }
        let descriptor = self.descriptor();
        log::info!("{}: loading runtime overlays", self.id());
        overlays.apply(
            descriptor.kernel_params,
            descriptor.full_overlays,
            baseline_modules,
        )
    }

    /// Serial table of this board for an OS release
    pub fn serial_ports(&self, release: OsRelease) -> BoardResult<Vec<SerialMapping>> {
        match self {
            BoardCandidate::Unsupported => Err(BoardError::unsupported(
                "no serial mapping for an unsupported board",
            )),
            BoardCandidate::NavigatorPi4
            | BoardCandidate::NavigatorPi5
            | BoardCandidate::Argonot => Ok(navigator_serial_ports(release)),
        }
    }

    /// Autopilot startup arguments for the serial table
    pub fn serial_cmdlines(&self, release: OsRelease) -> BoardResult<String> {
        Ok(serial_cmdlines(&self.serial_ports(release)?))
    }

    /// Serial table for the release installed on this host
    pub fn host_serial_ports(&self, system: &SystemInfo) -> BoardResult<Vec<SerialMapping>> {
        self.serial_ports(system.os_release()?)
    }
}

impl std::fmt::Display for BoardCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

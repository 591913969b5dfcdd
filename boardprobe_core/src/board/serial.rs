//! Logical serial port to device path mapping.
//!
//! The autopilot addresses its serial ports by letter (`-C`, `-B`, ...).
//! Which `/dev/tty*` node backs each letter depends on the OS release,
//! because the kernel renamed the UARTs between releases.

use serde::{Deserialize, Serialize};

pub use crate::hardware::OsRelease;

/// One logical port and the device backing it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerialMapping {
    /// Port letter as understood by the autopilot
    pub port: char,
    /// Device path
    pub endpoint: String,
}

impl SerialMapping {
    pub fn new(port: char, endpoint: impl Into<String>) -> Self {
        Self {
            port,
            endpoint: endpoint.into(),
        }
    }

    /// Startup argument for this port, e.g. `-C /dev/ttyS0`
    pub fn cmdline(&self) -> String {
        format!("-{} {}", self.port, self.endpoint)
    }
}

// port mapping available at https://ardupilot.org/dev/docs/sitl-serial-mapping.html
const NAVIGATOR_BULLSEYE: [(char, &str); 4] = [
    ('C', "/dev/ttyS0"),
    ('B', "/dev/ttyAMA1"),
    ('E', "/dev/ttyAMA2"),
    ('F', "/dev/ttyAMA3"),
];

// validated on Pi5; Pi4 uses the same naming on this release
const NAVIGATOR_BOOKWORM: [(char, &str); 4] = [
    ('C', "/dev/ttyAMA0"),
    ('B', "/dev/ttyAMA2"),
    ('E', "/dev/ttyAMA3"),
    ('F', "/dev/ttyAMA4"),
];

/// Serial table of the Navigator family for an OS release
pub fn navigator_serial_ports(release: OsRelease) -> Vec<SerialMapping> {
    let table = match release {
        OsRelease::Bullseye => &NAVIGATOR_BULLSEYE,
        OsRelease::Bookworm => &NAVIGATOR_BOOKWORM,
    };
    table
        .iter()
        .map(|(port, endpoint)| SerialMapping::new(*port, *endpoint))
        .collect()
}

/// Join the mappings into the autopilot startup argument string
pub fn serial_cmdlines(mappings: &[SerialMapping]) -> String {
    mappings
        .iter()
        .map(SerialMapping::cmdline)
        .collect::<Vec<_>>()
        .join(" ")
}

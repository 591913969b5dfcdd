//! # Board detection
//!
//! Static descriptions of the supported carrier boards and the logic that
//! picks the one attached to this computer.
//!
//! ```rust,ignore
//! use boardprobe_core::board::{BoardDetector, Host};
//!
//! let detector = BoardDetector::with_default_candidates();
//! let board = detector.detect_boards(&host)?;
//! board.setup_board(host.overlays, host.baseline_modules)?;
//! println!("{}", board.serial_cmdlines(host.system.os_release()?)?);
//! ```

mod candidate;
mod descriptor;
mod detector;
pub mod navigator;
mod serial;

pub use candidate::{BoardCandidate, FlightControllerInfo, Host, Platform};
pub use descriptor::{ExpectedDevice, HardwareDescriptor, OverlaySpec};
pub use detector::{BoardDetector, DEFAULT_CANDIDATES};
pub use serial::{navigator_serial_ports, serial_cmdlines, OsRelease, SerialMapping};

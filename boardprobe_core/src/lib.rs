//! # boardprobe core
//!
//! Identifies the carrier board attached to an embedded Linux flight
//! computer and brings its peripherals online at runtime, without a reboot.
//!
//! - **Board detection**: ordered trial of the supported variants, each
//!   gated by a cheap host check and confirmed by probing its sensors
//! - **Overlay state**: one append-only handle onto the kernel's
//!   device-tree and module state
//! - **Serial mapping**: autopilot port letters to `/dev/tty*` nodes for the
//!   installed OS release
//! - **LED overlay**: on-demand compilation of the `spi0-led` overlay
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use boardprobe_core::board::{BoardDetector, Host};
//! use boardprobe_core::hardware::{CommandOverlayLoader, I2cProber, OverlayState, SystemInfo};
//! use boardprobe_core::utils::SystemCommandRunner;
//! use boardprobe_core::BoardConfig;
//!
//! # fn main() -> boardprobe_core::BoardResult<()> {
//! let config = BoardConfig::default();
//! let system = SystemInfo::load(&config)?;
//! let overlays = OverlayState::new(CommandOverlayLoader::new(SystemCommandRunner, false));
//! let prober = I2cProber::from_config(&config);
//! let host = Host {
//!     system: &system,
//!     overlays: &overlays,
//!     prober: &prober,
//!     baseline_modules: &config.baseline_modules,
//! };
//!
//! let board = BoardDetector::from_config(&config)?.detect_boards(&host)?;
//! board.setup_board(&overlays, &config.baseline_modules)?;
//! println!("{}", board.serial_cmdlines(system.os_release()?)?);
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod hardware;
pub mod utils;

pub use board::{BoardCandidate, BoardDetector, FlightControllerInfo, Host, Platform, SerialMapping};
pub use config::BoardConfig;
pub use error::{BoardError, BoardResult};
pub use hardware::{OsRelease, OverlayState, SystemInfo};

//! # Host hardware access
//!
//! Everything that touches the running system lives here:
//!
//! - **Platform identification**: SoC generation and OS release
//! - **Bus probing**: best-effort presence checks on I2C addresses
//! - **Overlay state**: the process-wide handle onto runtime device-tree state
//! - **LED overlay**: on-demand compilation of the `spi0-led` overlay

mod led_overlay;
mod overlay;
mod platform;
mod probe;

#[cfg(target_os = "linux")]
mod i2c;

pub use led_overlay::{LedOverlayBuilder, SPI0_LED_DTS};
pub use overlay::{AppliedOverlays, CommandOverlayLoader, OverlayLoader, OverlayState};
pub use platform::{OsRelease, SocGeneration, SystemInfo};
pub use probe::{device_spec, BusProber};

#[cfg(target_os = "linux")]
pub use i2c::I2cProber;

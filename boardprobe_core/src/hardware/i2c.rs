//! I2C presence probing for boardprobe (Linux only).
//!
//! Opens the bus character device for every probe and performs one SMBus
//! byte read at register 0. The handle is dropped when the probe returns.

use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

use super::probe::{device_spec, BusProber};
use crate::config::BoardConfig;

/// Bus prober backed by the kernel `i2c-dev` interface
#[derive(Debug, Clone)]
pub struct I2cProber {
    /// Device prefix, the bus number is appended (`/dev/i2c-`)
    device_prefix: String,
}

impl I2cProber {
    /// Create a prober for the standard `/dev/i2c-N` nodes
    pub fn new() -> Self {
        Self::with_prefix("/dev/i2c-")
    }

    /// Create a prober with a custom device prefix
    pub fn with_prefix(device_prefix: impl Into<String>) -> Self {
        Self {
            device_prefix: device_prefix.into(),
        }
    }

    /// Create a prober using the configured device prefix
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::with_prefix(config.i2c_device_prefix.clone())
    }

    fn device_path(&self, bus: u8) -> String {
        format!("{}{}", self.device_prefix, bus)
    }
}

impl Default for I2cProber {
    fn default() -> Self {
        Self::new()
    }
}

impl BusProber for I2cProber {
    fn probe(&self, bus: u8, address: u8) -> bool {
        let path = self.device_path(bus);
        let mut dev = match LinuxI2CDevice::new(&path, u16::from(address)) {
            Ok(dev) => dev,
            Err(e) => {
                log::debug!("{}: open failed: {}", device_spec(&path, address), e);
                return false;
            }
        };

        match dev.smbus_read_byte_data(0) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("{}: no answer: {}", device_spec(&path, address), e);
                false
            }
        }
    }

    fn describe(&self, bus: u8, address: u8) -> String {
        device_spec(&self.device_path(bus), address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bus_reports_absent() {
        let prober = I2cProber::with_prefix("/nonexistent/i2c-");
        assert!(!prober.probe(1, 0x48));
    }

    #[test]
    fn test_device_path_from_config() {
        let config = BoardConfig {
            i2c_device_prefix: "/dev/i2c_mock-".into(),
            ..Default::default()
        };
        let prober = I2cProber::from_config(&config);
        assert_eq!(prober.device_path(3), "/dev/i2c_mock-3");
        assert_eq!(prober.describe(3, 0x40), "/dev/i2c_mock-3@0x40");
    }

    #[test]
    #[ignore] // Requires I2C hardware and possibly root
    fn test_probe_bus_1() {
        let prober = I2cProber::new();
        for address in [0x0C, 0x40, 0x48, 0x76, 0x77] {
            println!("0x{:02X}: {}", address, prober.probe(1, address));
        }
    }
}

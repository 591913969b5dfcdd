//! Static hardware description of one board variant.

use serde::Serialize;

use crate::error::{BoardError, BoardResult};

/// Opaque token understood by the overlay primitive, e.g.
/// `"i2c1-pi5 baudrate=400000"`. Order matters: later tokens may rely on
/// earlier ones.
pub type OverlaySpec = &'static str;

/// A sensor that must answer on the bus for the board to be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ExpectedDevice {
    /// Part name, for logs
    pub name: &'static str,
    /// Bus number (`/dev/i2c-<bus>`)
    pub bus: u8,
    /// 7-bit address
    pub address: u8,
}

impl ExpectedDevice {
    pub const fn new(name: &'static str, bus: u8, address: u8) -> Self {
        Self { name, bus, address }
    }
}

/// Immutable per-variant hardware tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareDescriptor {
    /// Kernel parameters applied with every overlay request
    pub kernel_params: &'static [&'static str],
    /// Minimal overlays needed to reach the expected devices
    pub detection_overlays: &'static [OverlaySpec],
    /// Every overlay needed for normal operation
    pub full_overlays: &'static [OverlaySpec],
    /// Devices that must all answer for a positive detection
    pub expected_devices: &'static [ExpectedDevice],
}

impl HardwareDescriptor {
    /// Descriptor of a variant that has no hardware to look for
    pub const EMPTY: HardwareDescriptor = HardwareDescriptor {
        kernel_params: &[],
        detection_overlays: &[],
        full_overlays: &[],
        expected_devices: &[],
    };

    /// Reject tables that would make detection meaningless.
    ///
    /// Without expected devices every probe run would trivially match, and
    /// without detection overlays the buses may not exist yet.
    pub fn validate(&self, variant: &str) -> BoardResult<()> {
        if self.expected_devices.is_empty() {
            return Err(BoardError::config(format!(
                "{} has no expected devices and would always match",
                variant
            )));
        }
        if self.detection_overlays.is_empty() {
            return Err(BoardError::config(format!(
                "{} has no detection overlays",
                variant
            )));
        }
        if self.full_overlays.is_empty() {
            return Err(BoardError::config(format!(
                "{} has no runtime overlays",
                variant
            )));
        }
        if let Some(token) = self
            .detection_overlays
            .iter()
            .chain(self.full_overlays)
            .chain(self.kernel_params)
            .find(|token| token.trim().is_empty())
        {
            return Err(BoardError::config(format!(
                "{} has a blank overlay token {:?}",
                variant, token
            )));
        }
        Ok(())
    }

    /// Buses the detection step needs, deduplicated, in table order
    pub fn buses(&self) -> Vec<u8> {
        let mut buses = Vec::new();
        for device in self.expected_devices {
            if !buses.contains(&device.bus) {
                buses.push(device.bus);
            }
        }
        buses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICES: &[ExpectedDevice] = &[
        ExpectedDevice::new("ADS1115", 1, 0x48),
        ExpectedDevice::new("PCA9685", 4, 0x40),
        ExpectedDevice::new("BME280", 1, 0x76),
    ];

    const VALID: HardwareDescriptor = HardwareDescriptor {
        kernel_params: &["i2c_vc=on"],
        detection_overlays: &["i2c1"],
        full_overlays: &["uart1"],
        expected_devices: DEVICES,
    };

    #[test]
    fn test_valid_descriptor() {
        assert!(VALID.validate("test").is_ok());
        assert_eq!(VALID.buses(), vec![1, 4]);
    }

    #[test]
    fn test_empty_descriptor_is_rejected() {
        let err = HardwareDescriptor::EMPTY.validate("placeholder").unwrap_err();
        assert!(err.to_string().contains("always match"));
    }

    #[test]
    fn test_missing_detection_overlays_is_rejected() {
        let descriptor = HardwareDescriptor {
            detection_overlays: &[],
            ..VALID
        };
        assert!(descriptor.validate("test").is_err());
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let descriptor = HardwareDescriptor {
            full_overlays: &["uart1", "  "],
            ..VALID
        };
        assert!(matches!(
            descriptor.validate("test"),
            Err(BoardError::Config(_))
        ));
    }
}

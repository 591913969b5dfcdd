//! Device presence probing.

/// Answers whether a device responds at an address on a numbered bus.
///
/// Implementations must swallow their own I/O failures (absent device,
/// busy bus, NACK) and report them as `false`. Each call is a single,
/// independent read with no retry.
pub trait BusProber {
    fn probe(&self, bus: u8, address: u8) -> bool;

    /// Human-readable location of a device, for logs
    fn describe(&self, bus: u8, address: u8) -> String {
        device_spec(&format!("i2c-{}", bus), address)
    }
}

impl<P: BusProber + ?Sized> BusProber for &P {
    fn probe(&self, bus: u8, address: u8) -> bool {
        (**self).probe(bus, address)
    }

    fn describe(&self, bus: u8, address: u8) -> String {
        (**self).describe(bus, address)
    }
}

impl<P: BusProber + ?Sized> BusProber for Box<P> {
    fn probe(&self, bus: u8, address: u8) -> bool {
        (**self).probe(bus, address)
    }

    fn describe(&self, bus: u8, address: u8) -> String {
        (**self).describe(bus, address)
    }
}

/// Format a bus device and an address, e.g. `/dev/i2c-1@0x0C`
pub fn device_spec(bus_device: &str, address: u8) -> String {
    format!("{}@0x{:02X}", bus_device, address)
}

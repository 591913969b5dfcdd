//! Hardware tables for the Navigator board family.
//!
//! Sensor map shared by every Navigator revision:
//!
//! | part    | bus (Pi4) | bus (Pi5) | address |
//! |---------|-----------|-----------|---------|
//! | ADS1115 | 1         | 1         | 0x48    |
//! | AK09915 | 1         | 1         | 0x0C    |
//! | BME280  | 1         | 1         | 0x76    |
//! | PCA9685 | 4         | 3         | 0x40    |
//!
//! The PCA9685 bus number follows the SoC: the Pi5 routes GPIO 6/7 to its
//! own `i2c3` controller.

use super::descriptor::{ExpectedDevice, HardwareDescriptor};

pub const ADS1115: &str = "ADS1115";
pub const AK09915: &str = "AK09915";
pub const BME280: &str = "BME280";
pub const PCA9685: &str = "PCA9685";
pub const SWAP_MULTIPLEXER: &str = "SwapMultiplexer";

pub const NAVIGATOR_PI4: HardwareDescriptor = HardwareDescriptor {
    kernel_params: &["i2c_vc=on", "i2c_arm_baudrate=1000000", "spi=on"],
    detection_overlays: &[
        // i2c1: ADS1115, AK09915, BME280
        "i2c1",
        // i2c4: PCA
        "i2c4 pins_6_7 baudrate=1000000",
    ],
    full_overlays: &[
        // serial ports
        "enable_uart=1",
        "uart1",
        "uart3",
        "uart4",
        "uart5",
        // i2c6: bar30 and friends
        "i2c6 pins_22_23 baudrate=400000",
        "spi0-led",
        // SPI1: MMC5983
        "spi1-3cs",
        "gpio=11,24,25=op,pu,dh",
        "gpio=37=op,pd,dl",
        "dwc2 dr_mode=otg",
    ],
    expected_devices: &[
        ExpectedDevice::new(ADS1115, 1, 0x48),
        ExpectedDevice::new(AK09915, 1, 0x0C),
        ExpectedDevice::new(BME280, 1, 0x76),
        ExpectedDevice::new(PCA9685, 4, 0x40),
    ],
};

pub const NAVIGATOR_PI5: HardwareDescriptor = HardwareDescriptor {
    kernel_params: &["i2c_arm=on", "i2c_arm_baudrate=1000000"],
    detection_overlays: &[
        // i2c1: ADS1115, AK09915, BME280
        "i2c1-pi5 baudrate=400000",
        // i2c3: PCA
        "i2c3-pi5 baudrate=400000",
    ],
    full_overlays: &[
        "uart0-pi5", // Navigator serial1
        "uart3-pi5", // Navigator serial4
        "uart4-pi5", // Navigator serial5
        "uart2-pi5", // Navigator serial3
        // i2c6: bar30 and friends
        "i2c-gpio i2c_gpio_sda=22 i2c_gpio_scl=23 bus=6 i2c_gpio_delay_us=0",
        "i2c1-pi5 baudrate=400000",
        "i2c3-pi5 baudrate=400000",
        // SPI1: MMC5983
        "spi1-3cs",
        // SPI0: LED
        "spi0-led",
    ],
    expected_devices: &[
        ExpectedDevice::new(ADS1115, 1, 0x48),
        ExpectedDevice::new(AK09915, 1, 0x0C),
        ExpectedDevice::new(BME280, 1, 0x76),
        ExpectedDevice::new(PCA9685, 3, 0x40),
    ],
};

/// Argonot reuses the Navigator Pi4 bring-up; it is told apart by the swap
/// multiplexer on bus 1.
pub const ARGONOT: HardwareDescriptor = HardwareDescriptor {
    expected_devices: &[ExpectedDevice::new(SWAP_MULTIPLEXER, 1, 0x77)],
    ..NAVIGATOR_PI4
};

//! Candidate listing command
//!
//! Shows the detection order and what each candidate probes for.

use boardprobe_core::board::BoardDetector;
use boardprobe_core::hardware::device_spec;
use boardprobe_core::{BoardConfig, BoardResult};
use colored::*;

pub fn run_candidates(config: &BoardConfig, verbose: bool) -> BoardResult<()> {
    let detector = BoardDetector::from_config(config)?;

    println!("{}", "Detection Order".cyan().bold());
    for (i, candidate) in detector.candidates().iter().enumerate() {
        let descriptor = candidate.descriptor();
        println!(
            "  {}. {} [{}]",
            i + 1,
            candidate.id().yellow(),
            candidate.manufacturer().dimmed()
        );
        for device in descriptor.expected_devices {
            println!(
                "      {} {}",
                device.name,
                device_spec(&config.i2c_device_path(device.bus), device.address).dimmed()
            );
        }
        if verbose {
            println!(
                "      {} {}",
                "Detection overlays:".dimmed(),
                descriptor.detection_overlays.join(", ")
            );
            println!(
                "      {} {}",
                "Kernel params:".dimmed(),
                descriptor.kernel_params.join(", ")
            );
        }
    }
    Ok(())
}

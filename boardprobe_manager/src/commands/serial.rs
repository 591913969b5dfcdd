//! Serial port mapping command
//!
//! Prints the port letter to device table for a board without detecting it.

use std::path::Path;

use boardprobe_core::board::serial_cmdlines;
use boardprobe_core::{BoardCandidate, BoardConfig, BoardResult, OsRelease};
use colored::*;

/// Print the serial mapping of `board` for `release`, or for the installed
/// release when none is given.
pub fn run_serials(config: &BoardConfig, board: &str, release: Option<&str>) -> BoardResult<()> {
    let board = BoardCandidate::from_name(board)?;
    let release = resolve_release(release, &config.os_release_path)?;
    let serials = board.serial_ports(release)?;

    println!(
        "{} {} on {}",
        "Serial Ports".cyan().bold(),
        board.id(),
        release.to_string().yellow()
    );
    for mapping in &serials {
        println!(
            "  {} {}",
            format!("-{}", mapping.port).yellow(),
            mapping.endpoint
        );
    }
    println!();
    println!("{}", serial_cmdlines(&serials));

    Ok(())
}

/// Release named on the command line, else the one in `os_release_path`
pub fn resolve_release(name: Option<&str>, os_release_path: &Path) -> BoardResult<OsRelease> {
    match name {
        Some(name) => OsRelease::from_name(name),
        None => OsRelease::parse(&std::fs::read_to_string(os_release_path)?),
    }
}

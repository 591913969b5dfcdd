//! External command execution.

use std::process::Command;

use crate::error::{BoardError, BoardResult};

/// Runs an external program to completion.
///
/// A non-zero exit status is an error; callers never have to inspect it.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> BoardResult<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> BoardResult<()> {
        (**self).run(program, args)
    }
}

/// Runs commands on the host with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> BoardResult<()> {
        let line = command_line(program, args);
        log::debug!("running: {}", line);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| BoardError::command_failed(format!("{}: {}", line, e)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(BoardError::command_failed(format!(
            "{} ({}): {}",
            line,
            output.status,
            stderr.trim()
        )))
    }
}

/// Render a program and its arguments as one printable line
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix `program args` with sudo when requested
pub fn elevated(use_sudo: bool, program: &str, args: Vec<String>) -> (String, Vec<String>) {
    if use_sudo {
        let mut sudo_args = Vec::with_capacity(args.len() + 1);
        sudo_args.push(program.to_string());
        sudo_args.extend(args);
        ("sudo".to_string(), sudo_args)
    } else {
        (program.to_string(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_line() {
        assert_eq!(command_line("dtoverlay", &args(&["i2c1"])), "dtoverlay i2c1");
        assert_eq!(command_line("true", &[]), "true");
    }

    #[test]
    fn test_elevated() {
        let (program, rest) = elevated(true, "cp", args(&["a", "b"]));
        assert_eq!(program, "sudo");
        assert_eq!(rest, args(&["cp", "a", "b"]));

        let (program, rest) = elevated(false, "cp", args(&["a", "b"]));
        assert_eq!(program, "cp");
        assert_eq!(rest, args(&["a", "b"]));
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_status_is_checked() {
        assert!(SystemCommandRunner.run("true", &[]).is_ok());
        let err = SystemCommandRunner.run("false", &[]).unwrap_err();
        assert!(matches!(err, BoardError::CommandFailed(_)));
    }

    #[test]
    fn test_missing_program_is_error() {
        let err = SystemCommandRunner
            .run("boardprobe-no-such-program", &[])
            .unwrap_err();
        assert!(err.to_string().contains("boardprobe-no-such-program"));
    }
}

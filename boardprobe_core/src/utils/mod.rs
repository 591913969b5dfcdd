pub mod command;

pub use command::{command_line, elevated, CommandRunner, SystemCommandRunner};

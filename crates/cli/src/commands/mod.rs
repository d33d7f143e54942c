//! Subcommand implementations.
//!
//! Each command drives one store action or API call and prints the result as
//! pretty JSON on stdout. Notifications go to the log.

pub mod account;
pub mod cart;
pub mod orders;
pub mod products;
pub mod route;

use serde::Serialize;

/// Boxed error returned by every command.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

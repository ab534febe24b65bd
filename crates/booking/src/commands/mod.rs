//! Command dispatch: bridges CLI args -> core client -> output formatting.

pub mod appointments;
pub mod availabilities;
pub mod book;
pub mod config_cmd;
pub mod directory;
pub mod util;

use booking_core::BookingClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &BookingClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Practitioners => directory::practitioners(client, global).await,
        Command::Patients => directory::patients(client, global).await,
        Command::Availabilities(args) => availabilities::handle(client, args, global).await,
        Command::Appointments => appointments::handle(client, global).await,
        Command::Book(args) => book::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

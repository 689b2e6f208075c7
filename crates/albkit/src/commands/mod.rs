//! Command handlers.

pub mod config_cmd;
pub mod kinds;
pub mod resources;
pub mod util;

use albkit_api::AviClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &AviClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => resources::list(client, args, global).await,
        Command::Get(args) => resources::get(client, args, global).await,
        Command::Create(args) => resources::create(client, args, global).await,
        Command::Update(args) => resources::update(client, args, global).await,
        Command::Patch(args) => resources::patch(client, args, global).await,
        Command::Delete(args) => resources::delete(client, args, global).await,
        Command::Version => resources::version(client, global).await,
        // Kinds, Config and Completions are handled before dispatch
        Command::Kinds(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

mod animals;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FamilyCommands;
use crate::context::AppContext;

/// Handle `refuge family`.
pub async fn handle(action: &FamilyCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FamilyCommands::Get { id } => get::run(*id, ctx, flags).await,
        FamilyCommands::List { limit } => list::run(*limit, ctx, flags).await,
        FamilyCommands::Animals { id } => animals::run(*id, ctx, flags).await,
    }
}

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Intake(args) => commands::intake::handle(&args, ctx, flags).await,
        Commands::List(args) => commands::list::handle(&args, ctx, flags).await,
        Commands::Get { id } => commands::get::handle(id, ctx, flags).await,
        Commands::Status { id, status } => commands::status::handle(id, &status, ctx, flags).await,
        Commands::Relink(args) => commands::relink::handle(&args, ctx, flags).await,
        Commands::Family { action } => commands::family::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
    }
}

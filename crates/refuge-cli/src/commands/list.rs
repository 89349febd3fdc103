use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::context::AppContext;
use crate::output::output;

/// Handle `refuge list`.
pub async fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(args.limit, flags.limit, ctx.config.general.default_limit);
    let animals = match args.species.as_deref() {
        Some(species) => ctx.service.find_by_species(species).await?,
        None => ctx.service.find_all().await?,
    };
    output(&apply_limit(animals, limit)?, flags.format)
}

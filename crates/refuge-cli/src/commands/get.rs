use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `refuge get`.
pub async fn handle(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let animal = ctx.service.get_animal(id).await?;
    output(&animal, flags.format)
}

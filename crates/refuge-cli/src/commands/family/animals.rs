use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(family_id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let animals = ctx.service.list_family_animals(family_id).await?;
    output(&animals, flags.format)
}

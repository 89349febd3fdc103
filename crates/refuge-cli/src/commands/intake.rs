use refuge_core::entities::NewAnimal;
use refuge_core::validate::age_from_i64;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IntakeArgs;
use crate::commands::shared::family::family_details;
use crate::context::AppContext;
use crate::output::output;

/// Handle `refuge intake`.
pub async fn handle(args: &IntakeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let animal = new_animal(args, &ctx.config.general.intake_status)?;
    let family = family_details(&args.family)?;

    let created = ctx.service.intake(&animal, &family).await?;
    output(&created, flags.format)
}

fn new_animal(args: &IntakeArgs, default_status: &str) -> anyhow::Result<NewAnimal> {
    Ok(NewAnimal {
        name: args.name.clone(),
        species: args.species.clone(),
        age: age_from_i64(args.age, "age")?,
        description: args.description.clone(),
        status: args
            .status
            .clone()
            .unwrap_or_else(|| default_status.to_string()),
    })
}

use refuge_core::enums::EntityType;
use refuge_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RelinkArgs;
use crate::commands::shared::family::family_details;
use crate::context::AppContext;
use crate::output::output;

/// Handle `refuge relink`. An unknown id is reported as not found.
pub async fn handle(args: &RelinkArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let family = family_details(&args.family)?;
    let animal = ctx
        .service
        .relink(args.id, &family)
        .await?
        .ok_or(DatabaseError::NotFound {
            entity_type: EntityType::Animal,
            id: args.id,
        })?;
    output(&animal, flags.format)
}

use refuge_core::enums::EntityType;
use refuge_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `refuge status`. An unknown id is reported as not found.
pub async fn handle(id: i64, status: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let animal = ctx
        .service
        .update_status(id, status)
        .await?
        .ok_or(DatabaseError::NotFound {
            entity_type: EntityType::Animal,
            id,
        })?;
    output(&animal, flags.format)
}

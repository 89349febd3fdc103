use refuge_core::entities::FamilyDetails;
use refuge_core::validate::age_from_i64;

use crate::cli::root_commands::FamilyArgs;

/// Convert `--family/--family-age/--family-city` into resolver input.
pub fn family_details(args: &FamilyArgs) -> anyhow::Result<FamilyDetails> {
    let age = age_from_i64(args.family_age, "family age")?;
    Ok(FamilyDetails::new(args.family.as_str(), age, args.family_city.as_str()))
}

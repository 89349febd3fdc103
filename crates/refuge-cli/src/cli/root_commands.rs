use clap::{Args, Subcommand};

use crate::cli::subcommands::FamilyCommands;

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Register an animal and link it to a foster family.
    Intake(IntakeArgs),
    /// List animals, optionally by species.
    List(ListArgs),
    /// Show one animal with its family.
    Get { id: i64 },
    /// Replace an animal's status label.
    Status { id: i64, status: String },
    /// Move an animal to another foster family.
    Relink(RelinkArgs),
    /// Foster family lookups.
    Family {
        #[command(subcommand)]
        action: FamilyCommands,
    },
    /// Query the audit trail.
    Audit(AuditArgs),
}

/// Family reference shared by `intake` and `relink`.
///
/// An existing family with this name gets its age and city overwritten.
#[derive(Clone, Debug, Args)]
pub struct FamilyArgs {
    /// Family name (the lookup key).
    #[arg(long)]
    pub family: String,
    #[arg(long, allow_negative_numbers = true)]
    pub family_age: i64,
    #[arg(long)]
    pub family_city: String,
}

#[derive(Clone, Debug, Args)]
pub struct IntakeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub species: String,
    #[arg(long, allow_negative_numbers = true)]
    pub age: i64,
    #[arg(long)]
    pub description: Option<String>,
    /// Initial status (defaults to `general.intake_status`).
    #[arg(long)]
    pub status: Option<String>,
    #[command(flatten)]
    pub family: FamilyArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct RelinkArgs {
    pub id: i64,
    #[command(flatten)]
    pub family: FamilyArgs,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<i64>,
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}

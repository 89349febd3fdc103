use clap::Subcommand;

/// Foster family commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FamilyCommands {
    /// Get a family by ID.
    Get { id: i64 },
    /// List families.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List the animals a family is fostering.
    Animals { id: i64 },
}

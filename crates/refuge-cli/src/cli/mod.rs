use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `refuge` binary.
#[derive(Debug, Parser)]
#[command(name = "refuge", version, about = "Refuge - shelter animals and their foster families")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (overrides `database.path`)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::FamilyCommands;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "refuge", "--format", "table", "--limit", "10", "--verbose", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["refuge", "get", "3", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Get { id: 3 }));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["refuge", "--format", "xml", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn intake_parses_animal_and_family() {
        let cli = Cli::try_parse_from([
            "refuge",
            "intake",
            "--name",
            "Paco",
            "--species",
            "Podenco",
            "--age",
            "14",
            "--family",
            "Guerrero",
            "--family-age",
            "36",
            "--family-city",
            "Sevilla",
        ])
        .expect("cli should parse");

        let Commands::Intake(args) = cli.command else {
            panic!("expected intake");
        };
        assert_eq!(args.name, "Paco");
        assert_eq!(args.age, 14);
        assert_eq!(args.status, None);
        assert_eq!(args.family.family, "Guerrero");
        assert_eq!(args.family.family_age, 36);
        assert_eq!(args.family.family_city, "Sevilla");
    }

    #[test]
    fn intake_requires_family() {
        let parsed = Cli::try_parse_from([
            "refuge", "intake", "--name", "Paco", "--species", "Podenco", "--age", "14",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn negative_age_reaches_validation() {
        let cli = Cli::try_parse_from([
            "refuge",
            "relink",
            "1",
            "--family",
            "Guerrero",
            "--family-age",
            "-3",
            "--family-city",
            "Sevilla",
        ])
        .expect("cli should parse");
        let Commands::Relink(args) = cli.command else {
            panic!("expected relink");
        };
        assert_eq!(args.family.family_age, -3);
    }

    #[test]
    fn family_subcommands_parse() {
        let cli = Cli::try_parse_from(["refuge", "family", "animals", "7"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Family {
                action: FamilyCommands::Animals { id: 7 }
            }
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["refuge", "--db", "/tmp/refuge.db", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/refuge.db"));
    }
}

// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

use std::path::PathBuf;

use breather_rs::prelude::Units;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Select groups of atoms in LAMMPS data files and export discrete breather displacements."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data file or project file to summarize (only without a subcommand)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Settings file in YAML format
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a selection recipe on a data file or project and save the resulting project.
    Apply(ApplyArgs),
    /// Write LAMMPS commands displacing the grouped atoms.
    Export(ExportArgs),
    /// Write ids of the grouped atoms, one per line.
    Ids(IdsArgs),
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// LAMMPS data file or project file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Selection recipe in YAML format
    #[arg(short, long, value_name = "YAML")]
    pub recipe: PathBuf,

    /// Output project file
    #[arg(short, long, value_name = "OUT.bpj")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project file
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Output file with the LAMMPS commands
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Number of decimal places of the displacements
    #[arg(short, long, value_name = "INT")]
    pub precision: Option<u32>,

    /// Name of the temporary LAMMPS group
    #[arg(long, value_name = "ID")]
    pub tmp_group: Option<String>,

    /// Units of the displace_atoms command
    #[arg(long, value_enum)]
    pub units: Option<Units>,

    /// Write commands also for atoms with zero displacement
    #[arg(long)]
    pub emit_zero: bool,

    /// Displace also atoms outside of the circle mask
    #[arg(long)]
    pub include_masked: bool,

    /// Maximal number of atom ids per line (0 = no wrapping)
    #[arg(long, value_name = "INT")]
    pub ids_per_line: Option<usize>,
}

#[derive(Args, Debug)]
pub struct IdsArgs {
    /// Project file
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Write only the atoms of this group
    #[arg(short, long, value_name = "NAME")]
    pub group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_export() {
        let cli = Cli::try_parse_from([
            "breather",
            "-vv",
            "export",
            "graphene.bpj",
            "-o",
            "displace.in",
            "--precision",
            "4",
            "--units",
            "lattice",
            "--emit-zero",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Export(args)) => {
                assert_eq!(args.precision, Some(4));
                assert_eq!(args.units, Some(Units::Lattice));
                assert!(args.emit_zero);
                assert!(!args.include_masked);
            }
            other => panic!("Unexpected command `{:?}`.", other),
        }
    }

    #[test]
    fn parse_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "breather",
            "-v",
            "-c",
            "settings.yaml",
            "ids",
            "graphene.bpj",
            "-o",
            "ids.txt",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, Some(PathBuf::from("settings.yaml")));
        assert!(cli.path.is_none());
        assert!(matches!(cli.command, Some(Commands::Ids(_))));

        let cli =
            Cli::try_parse_from(["breather", "export", "graphene.bpj", "-o", "x.in", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Export(_))));
    }

    #[test]
    fn parse_summary() {
        let cli = Cli::try_parse_from(["breather", "graphene.data", "-q"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.quiet);
        assert_eq!(cli.path, Some(PathBuf::from("graphene.data")));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["breather", "-q", "-v", "graphene.data"]).is_err());
    }
}

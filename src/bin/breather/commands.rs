// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

use std::error::Error;
use std::path::Path;

use breather_rs::prelude::*;
use colored::Colorize;

use crate::cli::{ApplyArgs, ExportArgs, IdsArgs};
use crate::recipe::Recipe;

pub type CommandResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Load a data file or a project file and print its summary.
pub fn summary(path: &Path, settings: &Settings) -> CommandResult {
    let project = Project::from_file(path, &settings.columns)?.with_settings(settings);
    print_summary(&project);
    Ok(())
}

/// Apply a recipe and save the resulting project.
pub fn apply(args: ApplyArgs, settings: &Settings) -> CommandResult {
    let mut project = Project::from_file(&args.input, &settings.columns)?.with_settings(settings);
    let recipe = Recipe::from_file(&args.recipe)?;

    recipe.apply(&mut project)?;
    project.write_bpj(&args.output)?;

    print_summary(&project);
    println!("Project saved into '{}'.", args.output.display());
    Ok(())
}

/// Export the displacement block of a project.
pub fn export(args: ExportArgs, settings: &Settings) -> CommandResult {
    let project = Project::read_bpj(&args.project)?;
    let export_settings = export_settings(&args, &settings.export);

    let summary = project.export_lammps(&args.output, &export_settings)?;
    println!(
        "Wrote {} displace_atoms command(s) for {} atom(s) into '{}'.",
        summary.n_buckets(),
        summary.n_atoms(),
        args.output.display()
    );

    if summary.n_zero() > 0 {
        println!(
            "{} atom(s) with zero displacement were skipped.",
            summary.n_zero().to_string().yellow()
        );
    }

    Ok(())
}

/// Write ids of the grouped atoms.
pub fn ids(args: IdsArgs) -> CommandResult {
    let project = Project::read_bpj(&args.project)?;
    let scope = match args.group {
        Some(name) => IdScope::Group(name),
        None => IdScope::All,
    };

    project.write_ids(&args.output, &scope)?;
    println!("Ids written into '{}'.", args.output.display());
    Ok(())
}

/// Command line flags override the settings file.
fn export_settings(args: &ExportArgs, defaults: &ExportSettings) -> ExportSettings {
    ExportSettings {
        precision: args.precision.unwrap_or(defaults.precision),
        tmp_group: args
            .tmp_group
            .clone()
            .unwrap_or_else(|| defaults.tmp_group.clone()),
        units: args.units.unwrap_or(defaults.units),
        emit_zero: args.emit_zero || defaults.emit_zero,
        include_masked: args.include_masked || defaults.include_masked,
        ids_per_line: args.ids_per_line.unwrap_or(defaults.ids_per_line),
    }
}

fn print_summary(project: &Project) {
    let atoms = project.get_atoms();
    let simbox = atoms.get_box();

    println!("{} {}", "Atoms:".bold(), atoms.get_n_atoms());
    println!(
        "{} x [{}, {}]  y [{}, {}]  z [{}, {}]",
        "Box:".bold(),
        simbox.xlo,
        simbox.xhi,
        simbox.ylo,
        simbox.yhi,
        simbox.zlo,
        simbox.zhi
    );

    let breather = project.get_breather();
    println!(
        "{} A = {}  beta = {}  center = ({}, {})  localizing {}",
        "Breather:".bold(),
        breather.get_amplitude(),
        breather.get_beta(),
        breather.get_center()[0],
        breather.get_center()[1],
        if project.get_apply_localizing() { "on" } else { "off" }
    );

    if let Some(mask) = project.get_circle_mask() {
        println!(
            "{} center = ({}, {})  radius = {}  {}",
            "Mask:".bold(),
            mask.get_center()[0],
            mask.get_center()[1],
            mask.get_radius(),
            if mask.is_enabled() { "enabled" } else { "disabled" }
        );
    }

    println!("{} {}", "Groups:".bold(), project.get_n_groups());
    for (name, group) in project.get_groups() {
        let Rgba(r, g, b, _) = group.get_color();
        let direction = group.get_direction();
        println!(
            "  {} {:>6} atom(s)  direction ({:.3}, {:.3}, {:.3}){}",
            name.truecolor(r, g, b).bold(),
            group.get_n_atoms(),
            direction.x,
            direction.y,
            direction.z,
            if group.get_localizing().is_some() {
                "  own localizing"
            } else {
                ""
            }
        );
    }

    println!("{} {}", "Unassigned:".bold(), project.unassigned().len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn export_args(output: PathBuf) -> ExportArgs {
        ExportArgs {
            project: PathBuf::from("test_files/chain.bpj"),
            output,
            precision: None,
            tmp_group: None,
            units: None,
            emit_zero: false,
            include_masked: false,
            ids_per_line: None,
        }
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings::from_file("test_files/settings.yaml").unwrap();
        let mut args = export_args(PathBuf::from("out.in"));
        args.precision = Some(3);
        args.include_masked = true;

        let merged = export_settings(&args, &settings.export);
        assert_eq!(merged.precision, 3);
        assert_eq!(merged.tmp_group, "breather");
        assert_eq!(merged.units, Units::Lattice);
        assert!(merged.emit_zero);
        assert!(merged.include_masked);
        assert_eq!(merged.ids_per_line, 8);
    }

    #[test]
    fn apply_then_export() {
        let project_file = NamedTempFile::new().unwrap();
        let args = ApplyArgs {
            input: PathBuf::from("test_files/grid.data"),
            recipe: PathBuf::from("test_files/recipe.yaml"),
            output: project_file.path().to_path_buf(),
        };
        apply(args, &Settings::default()).unwrap();

        let output = NamedTempFile::new().unwrap();
        let mut args = export_args(output.path().to_path_buf());
        args.project = project_file.path().to_path_buf();
        export(args, &Settings::default()).unwrap();

        let block = fs::read_to_string(output.path()).unwrap();
        assert!(block.starts_with("# Discrete breather displacements"));
        assert!(block.contains("group dbi_tmp delete"));
    }

    #[test]
    fn ids_of_group() {
        let output = NamedTempFile::new().unwrap();
        let args = IdsArgs {
            project: PathBuf::from("test_files/chain.bpj"),
            output: output.path().to_path_buf(),
            group: Some("Left".to_owned()),
        };
        ids(args).unwrap();

        assert_eq!(fs::read_to_string(output.path()).unwrap(), "1\n2\n");
    }

    #[test]
    fn export_nonexistent_project() {
        let args = export_args(PathBuf::from("out.in"));
        let args = ExportArgs {
            project: PathBuf::from("test_files/nonexistent.bpj"),
            ..args
        };
        assert!(export(args, &Settings::default()).is_err());
    }
}

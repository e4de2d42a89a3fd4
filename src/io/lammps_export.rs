// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the export of displacements as LAMMPS `displace_atoms` commands.

use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::Path;

use getset::{CopyGetters, Getters};

use crate::auxiliary::{format_quantized, lammps_id_is_valid, quantize, MAX_PRECISION};
use crate::config::{ExportSettings, Units};
use crate::errors::ExportError;
use crate::files::AtomicWriter;
use crate::project::general::Project;
use crate::structures::atom::AtomId;

/// Atoms sharing the same quantized displacement.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct DisplacementBucket {
    /// Displacement in units of `10^-precision`.
    #[getset(get_copy = "pub")]
    key: [i64; 3],
    /// Ids of the atoms in ascending order.
    #[getset(get = "pub")]
    atoms: Vec<AtomId>,
}

/// Information about an exported block of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct ExportSummary {
    /// Number of `displace_atoms` commands.
    #[getset(get_copy = "pub")]
    n_buckets: usize,
    /// Number of displaced atoms.
    #[getset(get_copy = "pub")]
    n_atoms: usize,
    /// Number of atoms not written because their displacement rounds to zero.
    #[getset(get_copy = "pub")]
    n_zero: usize,
}

impl DisplacementBucket {
    /// Returns `true` if the quantized displacement is zero.
    pub fn is_zero(&self) -> bool {
        self.key == [0, 0, 0]
    }

    /// Displacement vector of the bucket.
    pub fn vector(&self, precision: u32) -> [f64; 3] {
        let scale = 10f64.powi(-(precision as i32));
        self.key.map(|k| k as f64 * scale)
    }
}

impl Units {
    fn as_str(&self) -> &'static str {
        match self {
            Units::Box => "box",
            Units::Lattice => "lattice",
        }
    }
}

/// ## Methods for exporting displacements into LAMMPS input scripts.
impl Project {
    /// Group atoms by their quantized displacements.
    ///
    /// ## Returns
    /// - Buckets in ascending order of their keys. Zero buckets are included.
    /// - `ExportError::InvalidPrecision` if the precision is larger than 12.
    /// - `ExportError::DisplacementTooLarge` if a quantized displacement component exceeds 2^53.
    ///
    /// ## Notes
    /// - Each component of a displacement `v` is quantized as `round(v / 10^-precision)`.
    /// - Atoms outside of an enabled circle mask are skipped unless `include_masked` is set.
    pub fn displacement_buckets(
        &self,
        precision: u32,
        include_masked: bool,
    ) -> Result<Vec<DisplacementBucket>, ExportError> {
        if precision > MAX_PRECISION {
            return Err(ExportError::InvalidPrecision(precision));
        }

        let mut buckets: BTreeMap<[i64; 3], Vec<AtomId>> = BTreeMap::new();
        for (id, displacement) in self.displacements(include_masked) {
            let key = match (
                quantize(displacement.x, precision),
                quantize(displacement.y, precision),
                quantize(displacement.z, precision),
            ) {
                (Some(x), Some(y), Some(z)) => [x, y, z],
                _ => return Err(ExportError::DisplacementTooLarge(id)),
            };
            buckets.entry(key).or_default().push(id);
        }

        Ok(buckets
            .into_iter()
            .map(|(key, atoms)| DisplacementBucket { key, atoms })
            .collect())
    }

    /// Construct the block of LAMMPS commands displacing the atoms of all groups.
    ///
    /// ## Returns
    /// - `String` containing the commands if successful.
    /// - `ExportError::InvalidPrecision` if the precision is larger than 12.
    /// - `ExportError::DisplacementTooLarge` if a displacement cannot be written exactly with the precision.
    /// - `ExportError::InvalidTmpGroup` if the name of the temporary group is not a valid LAMMPS group id.
    /// - `ExportError::NothingToExport` if no atom is to be displaced.
    /// - `ExportError::AllZero` if all displacements are zero and `emit_zero` is not set.
    ///
    /// ## Notes
    /// - A single temporary group is defined, used, and deleted for each distinct displacement
    ///   so the script never exceeds the LAMMPS limit on the number of groups.
    pub fn lammps_block(&self, settings: &ExportSettings) -> Result<String, ExportError> {
        self.render_block(settings).map(|(block, _)| block)
    }

    /// Write the block of LAMMPS commands displacing the atoms of all groups into a file.
    ///
    /// ## Returns
    /// `ExportSummary` if successful. Otherwise `ExportError` (see [`Project::lammps_block`]).
    ///
    /// ## Example
    /// ```no_run
    /// # use breather_rs::prelude::*;
    /// let project = Project::read_bpj("graphene.bpj").unwrap();
    ///
    /// if let Err(e) = project.export_lammps("displace.in", &ExportSettings::default()) {
    ///     eprintln!("{}", e);
    ///     return;
    /// }
    /// ```
    ///
    /// ## Notes
    /// - The target file is only replaced if the whole block has been written successfully.
    pub fn export_lammps(
        &self,
        filename: impl AsRef<Path>,
        settings: &ExportSettings,
    ) -> Result<ExportSummary, ExportError> {
        let (block, summary) = self.render_block(settings)?;

        let mut writer = AtomicWriter::create(&filename)
            .map_err(|_| ExportError::CouldNotCreate(Box::from(filename.as_ref())))?;

        writer
            .write_all(block.as_bytes())
            .map_err(|_| ExportError::CouldNotWrite(Box::from(filename.as_ref())))?;

        writer
            .commit()
            .map_err(|_| ExportError::CouldNotWrite(Box::from(filename.as_ref())))?;

        log::info!(
            "Exported {} displacement command(s) for {} atom(s) into '{}'.",
            summary.n_buckets,
            summary.n_atoms,
            filename.as_ref().display()
        );

        Ok(summary)
    }

    /// Construct the block of commands and collect information about it.
    fn render_block(
        &self,
        settings: &ExportSettings,
    ) -> Result<(String, ExportSummary), ExportError> {
        if !lammps_id_is_valid(&settings.tmp_group) {
            return Err(ExportError::InvalidTmpGroup(settings.tmp_group.clone()));
        }

        let buckets = self.displacement_buckets(settings.precision, settings.include_masked)?;
        if buckets.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let (written, zero): (Vec<_>, Vec<_>) = buckets
            .into_iter()
            .partition(|bucket| settings.emit_zero || !bucket.is_zero());

        if written.is_empty() {
            return Err(ExportError::AllZero);
        }

        let summary = ExportSummary {
            n_buckets: written.len(),
            n_atoms: written.iter().map(|b| b.atoms.len()).sum(),
            n_zero: zero.iter().map(|b| b.atoms.len()).sum(),
        };

        log::debug!(
            "Displacements grouped into {} bucket(s); {} atom(s) with zero displacement skipped.",
            summary.n_buckets,
            summary.n_zero
        );

        let block = format_block(&written, &summary, settings);
        Ok((block, summary))
    }
}

/// Format buckets as LAMMPS commands.
fn format_block(
    buckets: &[DisplacementBucket],
    summary: &ExportSummary,
    settings: &ExportSettings,
) -> String {
    let tmp = &settings.tmp_group;
    let units = settings.units.as_str();
    let mut block = String::new();

    // writing into a String never fails
    let _ = writeln!(
        block,
        "# Discrete breather displacements generated by breather_rs {}",
        crate::BREATHER_VERSION
    );
    let _ = writeln!(
        block,
        "# {} displacement command(s), {} atom(s), units {}",
        summary.n_buckets, summary.n_atoms, units
    );

    for bucket in buckets {
        let [dx, dy, dz] = bucket.key.map(|k| format_quantized(k, settings.precision));

        block.push('\n');
        let _ = writeln!(block, "group {} id {}", tmp, format_ids(&bucket.atoms, settings.ids_per_line));
        let _ = writeln!(
            block,
            "displace_atoms {} move {} {} {} units {}",
            tmp, dx, dy, dz, units
        );
        let _ = writeln!(block, "group {} delete", tmp);
    }

    block
}

/// Format ids, wrapping lines with `&` after every `per_line` ids (0 = no wrapping).
fn format_ids(ids: &[AtomId], per_line: usize) -> String {
    let chunk = if per_line == 0 {
        ids.len().max(1)
    } else {
        per_line
    };

    ids.chunks(chunk)
        .map(|chunk| {
            chunk
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" &\n    ")
}

/******************************/
/*         UNIT TESTS         */
/******************************/


#[cfg(test)]
mod tests_export {
    use super::*;
    use crate::config::ColumnLayout;
    use crate::store::general::AtomStore;
    use crate::structures::{group::Direction, localizing::LocalizingParams, mask::CircleMask};
    use std::fs::{self, File};
    use tempfile::NamedTempFile;

    fn chain() -> Project {
        let mut project =
            Project::new(AtomStore::from_file("test_files/chain.data", &ColumnLayout::Auto).unwrap());
        project.group_create("Left", None, Direction::Vector([1.0, 0.0, 0.0])).unwrap();
        project.group_create("Right", None, Direction::Angle(90.0)).unwrap();
        project.group_assign("Left", [1, 2]).unwrap();
        project.group_assign("Right", [3]).unwrap();
        project
            .group_set_localizing("Left", LocalizingParams::new(2.0, 0.0, [0.0, 0.0]).unwrap())
            .unwrap();
        project
            .group_set_localizing("Right", LocalizingParams::new(-0.5, 0.0, [0.0, 0.0]).unwrap())
            .unwrap();
        project
    }

    #[test]
    fn export_matches_expected() {
        let project = chain();
        let output = NamedTempFile::new().unwrap();
        let path_to_output = output.path();

        let summary = project
            .export_lammps(path_to_output, &ExportSettings::default())
            .unwrap();
        assert_eq!(summary.n_buckets(), 2);
        assert_eq!(summary.n_atoms(), 3);
        assert_eq!(summary.n_zero(), 0);

        let mut result = File::open(path_to_output).unwrap();
        let mut expected = File::open("test_files/chain_expected.in").unwrap();

        assert!(file_diff::diff_files(&mut result, &mut expected));
    }

    #[test]
    fn one_temporary_group_at_a_time() {
        let mut project =
            Project::new(AtomStore::from_file("test_files/grid.data", &ColumnLayout::Auto).unwrap());
        project.set_apply_localizing(false);

        // more groups than LAMMPS supports
        for i in 0..25u64 {
            let name = format!("G{}", i);
            project
                .group_create(&name, None, Direction::Angle(7.0 * i as f64))
                .unwrap();
            project.group_assign(&name, [i + 1]).unwrap();
        }

        let block = project.lammps_block(&ExportSettings::default()).unwrap();
        let mut defined = 0i32;
        let mut commands = 0;
        for line in block.lines() {
            if line.starts_with("group dbi_tmp id") {
                defined += 1;
            } else if line == "group dbi_tmp delete" {
                defined -= 1;
            } else if line.starts_with("displace_atoms dbi_tmp move") {
                assert_eq!(defined, 1);
                commands += 1;
            }
            assert!(defined == 0 || defined == 1);
        }

        assert_eq!(defined, 0);
        assert_eq!(commands, 25);
        assert!(!block.contains("G1"));
    }

    #[test]
    fn forty_groups_five_vectors() {
        let mut project =
            Project::new(AtomStore::from_file("test_files/grid.data", &ColumnLayout::Auto).unwrap());
        project.set_apply_localizing(false);

        for i in 0..40u64 {
            let name = format!("G{}", i);
            project
                .group_create(&name, None, Direction::Angle(30.0 * (i % 5) as f64))
                .unwrap();
            if i < 25 {
                project.group_assign(&name, [i + 1]).unwrap();
            }
        }

        let block = project.lammps_block(&ExportSettings::default()).unwrap();
        assert_eq!(block.matches("displace_atoms").count(), 5);
        assert_eq!(block.matches("group dbi_tmp id").count(), 5);
        assert_eq!(block.matches("group dbi_tmp delete").count(), 5);
    }

    #[test]
    fn settings_applied() {
        let project = chain();
        let settings = ExportSettings {
            precision: 2,
            tmp_group: "seed".to_owned(),
            units: Units::Lattice,
            ids_per_line: 1,
            ..Default::default()
        };

        let block = project.lammps_block(&settings).unwrap();
        assert!(block.contains("group seed id 1 &\n    2\n"));
        assert!(block.contains("displace_atoms seed move 2.00 0.00 0.00 units lattice\n"));
        assert!(block.contains("displace_atoms seed move 0.00 -0.50 0.00 units lattice\n"));
        assert!(!block.contains("-0.00 "));
    }

    #[test]
    fn zero_displacements() {
        let mut project = chain();
        project
            .group_set_localizing("Right", LocalizingParams::new(0.0, 0.0, [0.0, 0.0]).unwrap())
            .unwrap();

        let block = project.lammps_block(&ExportSettings::default()).unwrap();
        assert_eq!(block.matches("displace_atoms").count(), 1);

        let settings = ExportSettings {
            emit_zero: true,
            ..Default::default()
        };
        let block = project.lammps_block(&settings).unwrap();
        assert_eq!(block.matches("displace_atoms").count(), 2);
        assert!(block.contains("move 0.000000 0.000000 0.000000 units box"));
    }

    #[test]
    fn all_zero_fails() {
        let mut project = chain();
        for name in ["Left", "Right"] {
            project
                .group_set_localizing(name, LocalizingParams::new(1e-9, 0.0, [0.0, 0.0]).unwrap())
                .unwrap();
        }

        assert_eq!(
            project.lammps_block(&ExportSettings::default()),
            Err(ExportError::AllZero)
        );
    }

    #[test]
    fn nothing_to_export() {
        let mut project =
            Project::new(AtomStore::from_file("test_files/chain.data", &ColumnLayout::Auto).unwrap());
        assert_eq!(
            project.lammps_block(&ExportSettings::default()),
            Err(ExportError::NothingToExport)
        );

        project.group_create("Empty", None, Direction::default()).unwrap();
        assert_eq!(
            project.lammps_block(&ExportSettings::default()),
            Err(ExportError::NothingToExport)
        );
    }

    #[test]
    fn masked_atoms() {
        let mut project = chain();
        project.set_circle_mask(Some(CircleMask::new([0.0, 0.0], 0.5).unwrap()));

        let block = project.lammps_block(&ExportSettings::default()).unwrap();
        assert!(block.contains("group dbi_tmp id 1\n"));
        assert_eq!(block.matches("displace_atoms").count(), 1);

        let settings = ExportSettings {
            include_masked: true,
            ..Default::default()
        };
        let block = project.lammps_block(&settings).unwrap();
        assert!(block.contains("group dbi_tmp id 1 2\n"));
    }

    #[test]
    fn invalid_tmp_group() {
        let settings = ExportSettings {
            tmp_group: "tmp group".to_owned(),
            ..Default::default()
        };
        assert_eq!(
            chain().lammps_block(&settings),
            Err(ExportError::InvalidTmpGroup("tmp group".to_owned()))
        );
    }

    #[test]
    fn failed_export_keeps_file() {
        let mut project = chain();
        let output = NamedTempFile::new().unwrap();
        fs::write(output.path(), "previous\n").unwrap();

        project.group_remove_atoms("Left", [1, 2]).unwrap();
        project.group_remove_atoms("Right", [3]).unwrap();
        assert_eq!(
            project.export_lammps(output.path(), &ExportSettings::default()),
            Err(ExportError::NothingToExport)
        );
        assert_eq!(fs::read_to_string(output.path()).unwrap(), "previous\n");
    }

    #[test]
    fn too_large_keeps_file() {
        let mut project = chain();
        project
            .group_set_localizing("Right", LocalizingParams::new(1.0e8, 0.0, [0.0, 0.0]).unwrap())
            .unwrap();
        let output = NamedTempFile::new().unwrap();
        fs::write(output.path(), "previous\n").unwrap();

        let settings = ExportSettings {
            precision: 12,
            ..Default::default()
        };
        assert_eq!(
            project.export_lammps(output.path(), &settings),
            Err(ExportError::DisplacementTooLarge(3))
        );
        assert_eq!(fs::read_to_string(output.path()).unwrap(), "previous\n");
    }

    #[test]
    fn export_fails() {
        match chain().export_lammps("Xhfguiedhqueiowhd/nonexistent.in", &ExportSettings::default()) {
            Err(ExportError::CouldNotCreate(e)) => {
                assert_eq!(e, Box::from(Path::new("Xhfguiedhqueiowhd/nonexistent.in")))
            }
            Ok(_) => panic!("Writing should have failed, but it did not."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn ids_wrapping() {
        assert_eq!(format_ids(&[1, 2, 3, 4, 5], 2), "1 2 &\n    3 4 &\n    5");
        assert_eq!(format_ids(&[1, 2, 3], 0), "1 2 3");
        assert_eq!(format_ids(&[1, 2, 3], 3), "1 2 3");
    }
}

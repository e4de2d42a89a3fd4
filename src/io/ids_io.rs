// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of functions for writing lists of atom ids.

use std::io::Write;
use std::path::Path;

use crate::errors::WriteIdsError;
use crate::files::AtomicWriter;
use crate::project::general::Project;
use crate::structures::atom::AtomId;

/// Atoms whose ids are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdScope {
    /// Atoms of all groups.
    All,
    /// Atoms of a single group.
    Group(String),
}

/// ## Methods for writing atom ids.
impl Project {
    /// Get the ids of the grouped atoms in ascending order.
    ///
    /// ## Returns
    /// `WriteIdsError::GroupNotFound` if the scope names a group that does not exist.
    pub fn grouped_ids(&self, scope: &IdScope) -> Result<Vec<AtomId>, WriteIdsError> {
        match scope {
            IdScope::Group(name) => self
                .get_group(name)
                .map(|group| group.get_atoms().iter().copied().collect())
                .map_err(|_| WriteIdsError::GroupNotFound(name.clone())),
            IdScope::All => {
                let mut ids: Vec<AtomId> = self
                    .get_groups()
                    .values()
                    .flat_map(|group| group.get_atoms().iter().copied())
                    .collect();
                ids.sort_unstable();
                Ok(ids)
            }
        }
    }

    /// Write the ids of the grouped atoms into a file, one id per line, in ascending order.
    ///
    /// ## Returns
    /// `Ok` if successful, `WriteIdsError` otherwise. Nothing is written if there are no ids.
    ///
    /// ## Example
    /// ```no_run
    /// # use breather_rs::prelude::*;
    /// let project = Project::read_bpj("graphene.bpj").unwrap();
    /// project.write_ids("edge.txt", &IdScope::Group("Edge".to_owned())).unwrap();
    /// ```
    pub fn write_ids(
        &self,
        filename: impl AsRef<Path>,
        scope: &IdScope,
    ) -> Result<(), WriteIdsError> {
        let path = filename.as_ref();

        let ids = self.grouped_ids(scope)?;
        if ids.is_empty() {
            return Err(WriteIdsError::Empty);
        }

        let mut writer =
            AtomicWriter::create(path).map_err(|_| WriteIdsError::CouldNotCreate(Box::from(path)))?;

        for id in &ids {
            writeln!(writer, "{}", id).map_err(|_| WriteIdsError::CouldNotWrite(Box::from(path)))?;
        }

        writer
            .commit()
            .map_err(|_| WriteIdsError::CouldNotWrite(Box::from(path)))?;

        log::info!("Wrote {} atom id(s) into '{}'.", ids.len(), path.display());
        Ok(())
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnLayout;
    use crate::store::general::AtomStore;
    use crate::structures::group::Direction;
    use std::fs;
    use tempfile::NamedTempFile;

    fn project() -> Project {
        let mut project =
            Project::new(AtomStore::from_file("test_files/grid.data", &ColumnLayout::Auto).unwrap());
        project.group_create("A", None, Direction::default()).unwrap();
        project.group_create("B", None, Direction::default()).unwrap();
        project.group_create("Empty", None, Direction::default()).unwrap();
        project.group_assign("A", [17, 3, 9]).unwrap();
        project.group_assign("B", [4, 20]).unwrap();
        project
    }

    #[test]
    fn write_group() {
        let output = NamedTempFile::new().unwrap();
        project()
            .write_ids(output.path(), &IdScope::Group("A".to_owned()))
            .unwrap();

        assert_eq!(fs::read_to_string(output.path()).unwrap(), "3\n9\n17\n");
    }

    #[test]
    fn write_all() {
        let output = NamedTempFile::new().unwrap();
        project().write_ids(output.path(), &IdScope::All).unwrap();

        assert_eq!(
            fs::read_to_string(output.path()).unwrap(),
            "3\n4\n9\n17\n20\n"
        );
    }

    #[test]
    fn write_empty() {
        let output = NamedTempFile::new().unwrap();
        fs::write(output.path(), "previous\n").unwrap();

        assert_eq!(
            project().write_ids(output.path(), &IdScope::Group("Empty".to_owned())),
            Err(WriteIdsError::Empty)
        );
        assert_eq!(fs::read_to_string(output.path()).unwrap(), "previous\n");
    }

    #[test]
    fn write_nonexistent_group() {
        let output = NamedTempFile::new().unwrap();
        assert_eq!(
            project().write_ids(output.path(), &IdScope::Group("C".to_owned())),
            Err(WriteIdsError::GroupNotFound("C".to_owned()))
        );
    }

    #[test]
    fn write_fails() {
        match project().write_ids("Xhfguiedhqueiowhd/ids.txt", &IdScope::All) {
            Err(WriteIdsError::CouldNotCreate(e)) => {
                assert_eq!(e, Box::from(Path::new("Xhfguiedhqueiowhd/ids.txt")))
            }
            Ok(_) => panic!("Writing should have failed, but it did not."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }
}

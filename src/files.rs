// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! File types recognized by `breather_rs` and all-or-nothing file writing.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Types of files that can be opened by `breather_rs`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FileType {
    /// Saved breather project (`.bpj`, or `.json`).
    Project,
    /// Anything else is treated as a LAMMPS data file.
    LammpsData,
}

impl FileType {
    /// Identify file type from the name of the file (based on file extension).
    pub fn from_name(filename: impl AsRef<Path>) -> FileType {
        match filename.as_ref().extension().and_then(|x| x.to_str()) {
            Some("bpj") | Some("json") => FileType::Project,
            _ => FileType::LammpsData,
        }
    }
}

/// Writer placing all output into a temporary file in the target directory.
/// The target file is only replaced once `commit` succeeds, so a failed write
/// never leaves a partially written file behind.
pub(crate) struct AtomicWriter {
    writer: BufWriter<NamedTempFile>,
    target: Box<Path>,
}

impl AtomicWriter {
    /// Create a temporary file next to `target`.
    pub(crate) fn create(target: impl AsRef<Path>) -> io::Result<Self> {
        let target = target.as_ref();
        let directory = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let file = NamedTempFile::new_in(directory)?;

        Ok(AtomicWriter {
            writer: BufWriter::new(file),
            target: Box::from(target),
        })
    }

    /// Flush the output and move the temporary file over the target.
    pub(crate) fn commit(self) -> io::Result<File> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.as_file().sync_all()?;
        file.persist(&self.target).map_err(|e| e.error)
    }
}

impl Write for AtomicWriter {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn identify_project() {
        assert_eq!(FileType::from_name("session.bpj"), FileType::Project);
        assert_eq!(FileType::from_name("dir/session.json"), FileType::Project);
    }

    #[test]
    fn identify_data() {
        assert_eq!(FileType::from_name("graphene.data"), FileType::LammpsData);
        assert_eq!(FileType::from_name("data.lmp"), FileType::LammpsData);
        assert_eq!(FileType::from_name("data"), FileType::LammpsData);
    }

    #[test]
    fn commit_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        fs::write(&target, "old content\n").unwrap();

        let mut writer = AtomicWriter::create(&target).unwrap();
        writeln!(writer, "new content").unwrap();

        // target untouched until commit
        assert_eq!(fs::read_to_string(&target).unwrap(), "old content\n");

        writer.commit().unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new content\n");
    }

    #[test]
    fn dropped_writer_keeps_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        fs::write(&target, "old content\n").unwrap();

        {
            let mut writer = AtomicWriter::create(&target).unwrap();
            writeln!(writer, "partial").unwrap();
        }

        assert_eq!(fs::read_to_string(&target).unwrap(), "old content\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn create_fails_in_missing_directory() {
        assert!(AtomicWriter::create("Xhfguiedhqueiowhd/nonexistent.txt").is_err());
    }
}

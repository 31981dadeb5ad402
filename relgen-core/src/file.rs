//! Generated-file write plumbing.
//!
//! Every artifact the generator produces implements [`GeneratedFile`].
//! Generation has no incremental mode: files are overwritten
//! unconditionally, and the first write failure aborts the whole run,
//! leaving earlier output on disk.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Trait for types that represent one generated source file.
pub trait GeneratedFile {
    /// The file path relative to the output base directory.
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content.
    fn render(&self) -> String;

    /// Write the file to disk, creating parent directories as needed.
    fn write(&self, base: &Path) -> Result<PathBuf> {
        let path = self.path(base);
        write_file(&path, &self.render())?;
        Ok(path)
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Probe;

    impl GeneratedFile for Probe {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("vendor").join("models").join("probe.go")
        }

        fn render(&self) -> String {
            "package models\n".to_string()
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("out.go");

        write_file(&path, "package main\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "package main\n");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_generated_file_write() {
        let temp = TempDir::new().unwrap();

        let written = Probe.write(temp.path()).unwrap();

        assert_eq!(written, temp.path().join("vendor/models/probe.go"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "package models\n");
    }

    #[test]
    fn test_generated_file_write_replaces_stale_output() {
        let temp = TempDir::new().unwrap();
        let path = Probe.path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        Probe.write(temp.path()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "package models\n");
    }
}

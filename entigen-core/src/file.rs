use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated source file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.path(base), self.render())
            .with_rules(self.rules())
            .write()
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
    /// File already had identical content
    Unchanged,
}

/// A file to be generated
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: always overwrite)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        match self.rules.overwrite {
            Overwrite::Always => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if self.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&self.path, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
            Overwrite::IfChanged => {
                if self.exists() && std::fs::read_to_string(&self.path)? == self.content {
                    Ok(WriteResult::Unchanged)
                } else {
                    write_file(&self.path, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    /// Rules for fully regenerated files
    pub fn always_overwrite() -> Self {
        Self {
            overwrite: Overwrite::Always,
        }
    }

    /// Rules for files the user may have edited
    pub fn if_missing() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
        }
    }

    /// Rules for incrementally merged files
    pub fn if_changed() -> Self {
        Self {
            overwrite: Overwrite::IfChanged,
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Always overwrite (fully generated code)
    #[default]
    Always,
    /// Only create if the file doesn't exist (stubs, entity files on update)
    IfMissing,
    /// Only write when the content differs (merged container file)
    IfChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_always() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cs");
        let file = File::new(&path, "one");
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        let file = File::new(&path, "two");
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn test_write_if_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cs");
        let file = File::new(&path, "one").with_rules(FileRules::if_missing());
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        let file = File::new(&path, "two").with_rules(FileRules::if_missing());
        assert_eq!(file.write().unwrap(), WriteResult::Skipped);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one");
    }

    #[test]
    fn test_write_if_changed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cs");
        let file = File::new(&path, "one").with_rules(FileRules::if_changed());
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        let file = File::new(&path, "one").with_rules(FileRules::if_changed());
        assert_eq!(file.write().unwrap(), WriteResult::Unchanged);
        let file = File::new(&path, "two").with_rules(FileRules::if_changed());
        assert_eq!(file.write().unwrap(), WriteResult::Written);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("a.cs");
        assert_eq!(File::new(&path, "x").write().unwrap(), WriteResult::Written);
        assert!(path.exists());
    }
}

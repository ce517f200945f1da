//! In-memory filesystem backed by a sorted map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::FileSystem;

/// Filesystem adapter holding all files in memory.
///
/// Directories are implicit: a directory "exists" when some stored file
/// path has it as an ancestor, matching how the marker store and the
/// checks actually use the port.
#[derive(Default)]
pub struct InMemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl InMemoryFileSystem {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory filesystem pre-seeded with files.
    #[must_use]
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let map = files
            .iter()
            .map(|(path, contents)| (PathBuf::from(path), (*contents).to_string()))
            .collect();
        Self { files: Mutex::new(map) }
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .expect("fs mutex poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no such file: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .expect("fs mutex poisoned")
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().expect("fs mutex poisoned");
        files.contains_key(path) || files.keys().any(|p| p.starts_with(path))
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().expect("fs mutex poisoned");
        let mut entries: Vec<String> = files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .filter_map(|n| n.to_str())
            .map(String::from)
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_back_what_was_written() {
        let fs = InMemoryFileSystem::new();
        fs.write(Path::new("/repo/mqtt_publisher.py"), "print()").unwrap();

        assert_eq!(fs.read_to_string(Path::new("/repo/mqtt_publisher.py")).unwrap(), "print()");
    }

    #[test]
    fn missing_file_is_an_error_but_not_a_panic() {
        let fs = InMemoryFileSystem::new();
        assert!(fs.read_to_string(Path::new("/nope")).is_err());
        assert!(!fs.exists(Path::new("/nope")));
    }

    #[test]
    fn ancestor_directories_exist_implicitly() {
        let fs = InMemoryFileSystem::with_files(&[("/repo/.test_markers/a.txt", "x")]);
        assert!(fs.exists(Path::new("/repo/.test_markers")));
        assert_eq!(fs.list_dir(Path::new("/repo/.test_markers")).unwrap(), vec!["a.txt"]);
    }
}

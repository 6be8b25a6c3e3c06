// src/fs/mock.rs

use super::FileSystem;
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory [`FileSystem`] used by tests.
///
/// Only files are stored; a directory exists as long as some file lives
/// below it. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    /// Read back a file as UTF-8, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let files = self.files.lock().unwrap();
        files
            .get(path.as_ref())
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }

    fn is_dir(files: &BTreeMap<PathBuf, Vec<u8>>, path: &Path) -> bool {
        files.keys().any(|f| f != path && f.starts_with(path))
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(bytes) => String::from_utf8(bytes.clone())
                .map_err(|e| anyhow!("invalid UTF-8 in {:?}: {}", path, e)),
            None if Self::is_dir(&files, path) => Err(anyhow!("is a directory: {:?}", path)),
            None => Err(anyhow!("file not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path) || Self::is_dir(&files, path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let files = self.files.lock().unwrap();
        if !Self::is_dir(&files, path) {
            return Err(anyhow!("not a directory or not found: {:?}", path));
        }

        // Immediate children only, files and subdirectories alike.
        let mut children: Vec<PathBuf> = files
            .keys()
            .filter_map(|f| f.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| path.join(first))
            .collect();
        children.dedup();
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_immediate_children_of_a_directory() {
        let fs = MockFileSystem::new();
        fs.add_file("runs/output_0", "a");
        fs.add_file("runs/output_1", "b");
        fs.add_file("runs/nested/deep", "c");

        let entries = fs.read_dir(Path::new("runs")).unwrap();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("runs/nested"),
                PathBuf::from("runs/output_0"),
                PathBuf::from("runs/output_1"),
            ]
        );
        assert!(fs.exists(Path::new("runs/nested")));
        assert!(!fs.is_file(Path::new("runs/nested")));
        assert!(fs.read_to_string(Path::new("runs")).is_err());
    }
}

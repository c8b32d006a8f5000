//! Staged virtual files: everything a generation run produces is held in
//! memory and only written to disk by an explicit flush.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Lifecycle state of a staged entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Present but untouched by this run
    Normal,
    /// Written or rewritten by this run
    Modified,
    /// Removed by this run
    Deleted,
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileState::Normal => "normal",
            FileState::Modified => "modified",
            FileState::Deleted => "deleted",
        };
        write!(f, "{}", name)
    }
}

/// A single staged file
///
/// `contents: None` marks an entry with no content: a directory marker, or
/// a deleted file whose bytes are gone.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: String,
    pub contents: Option<Vec<u8>>,
    pub state: FileState,
}

/// Capability interface over a staged-file set
///
/// All virtual-filesystem operations go through this trait so they work
/// against any backing store. `add` is an upsert keyed by path.
pub trait StagedFiles {
    fn each(&self, visitor: &mut dyn FnMut(&FileEntry));
    fn get(&self, path: &str) -> Option<&FileEntry>;
    fn add(&mut self, entry: FileEntry);
}

/// In-memory staged-file store, insertion-ordered
#[derive(Debug, Default)]
pub struct MemStore {
    entries: Vec<FileEntry>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage file contents at a path, marking the entry modified
    pub fn write(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.add(FileEntry {
            path: path.into(),
            contents: Some(contents.into()),
            state: FileState::Modified,
        });
    }

    /// Drop a staged file's contents and mark it deleted
    pub fn delete(&mut self, path: impl Into<String>) {
        self.add(FileEntry {
            path: path.into(),
            contents: None,
            state: FileState::Deleted,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StagedFiles for MemStore {
    fn each(&self, visitor: &mut dyn FnMut(&FileEntry)) {
        for entry in &self.entries {
            visitor(entry);
        }
    }

    fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    fn add(&mut self, entry: FileEntry) {
        match self.entries.iter_mut().find(|e| e.path == entry.path) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}

/// Write every live staged entry to disk under `root`
///
/// Entries with no contents or in the deleted state are skipped: nothing
/// existed on disk before the run, so a deletion has nothing to remove.
/// Returns the paths written.
pub async fn flush(store: &dyn StagedFiles, root: &Path) -> Result<Vec<PathBuf>> {
    let mut live: Vec<(String, Vec<u8>)> = Vec::new();
    store.each(&mut |entry| {
        if entry.state != FileState::Deleted {
            if let Some(contents) = &entry.contents {
                live.push((entry.path.clone(), contents.clone()));
            }
        }
    });

    let mut written = Vec::new();
    for (path, contents) in live {
        let target = root.join(path.trim_start_matches('/'));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target, &contents)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        written.push(target);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_get() {
        let mut store = MemStore::new();
        store.write("/a/b/c.txt", "hello");

        let entry = store.get("/a/b/c.txt").unwrap();
        assert_eq!(entry.contents.as_deref(), Some(b"hello".as_slice()));
        assert_eq!(entry.state, FileState::Modified);
    }

    #[test]
    fn test_write_is_upsert() {
        let mut store = MemStore::new();
        store.write("/a.txt", "one");
        store.write("/a.txt", "two");

        assert_eq!(store.len(), 1);
        let entry = store.get("/a.txt").unwrap();
        assert_eq!(entry.contents.as_deref(), Some(b"two".as_slice()));
    }

    #[test]
    fn test_delete_clears_contents() {
        let mut store = MemStore::new();
        store.write("/a.txt", "one");
        store.delete("/a.txt");

        let entry = store.get("/a.txt").unwrap();
        assert!(entry.contents.is_none());
        assert_eq!(entry.state, FileState::Deleted);
        // The entry stays in the store so the deletion is still visible.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_each_preserves_insertion_order() {
        let mut store = MemStore::new();
        store.write("/b.txt", "");
        store.write("/a.txt", "");

        let mut seen = Vec::new();
        store.each(&mut |e| seen.push(e.path.clone()));
        assert_eq!(seen, vec!["/b.txt", "/a.txt"]);
    }

    #[tokio::test]
    async fn test_flush_writes_live_entries_only() {
        let mut store = MemStore::new();
        store.write("pom.xml", "<project/>");
        store.write("src/main/java/Demo.java", "class Demo {}");
        store.write("gone.txt", "x");
        store.delete("gone.txt");

        let dir = tempfile::tempdir().unwrap();
        let written = flush(&store, dir.path()).await.unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join("pom.xml").exists());
        assert!(dir.path().join("src/main/java/Demo.java").exists());
        assert!(!dir.path().join("gone.txt").exists());
    }
}

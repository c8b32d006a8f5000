//! Operations over a staged-file store: existence checks and recursive
//! copy/move of not-yet-flushed files.
//!
//! Matching is a literal string-prefix test on entry paths, not a
//! path-segment test: `/abc` matches `/abcdef`. Callers pass prefixes they
//! staged themselves, where the loose match is what they want. None of the
//! operations guard against `to` falling inside `from`; overlapping
//! copies/moves produce overlapping results.

use super::store::{FileEntry, FileState, StagedFiles};

/// True when anything staged under `path` still has contents
///
/// An entry counts when its path starts with `path`, it carries contents,
/// and it has not been deleted.
pub fn exists_in_memory(store: &dyn StagedFiles, path: &str) -> bool {
    let mut found = false;
    store.each(&mut |entry| {
        if entry.path.starts_with(path)
            && entry.contents.is_some()
            && entry.state != FileState::Deleted
        {
            found = true;
        }
    });
    found
}

/// Compute the destination path for a copied/moved entry
///
/// An exact match is a single-file operation: the file lands directly under
/// `to` keeping its base name. A prefix match keeps the remainder of the
/// source path below `to`.
fn destination(entry_path: &str, from: &str, to: &str) -> String {
    if entry_path == from {
        let base = entry_path.rsplit('/').next().unwrap_or(entry_path);
        format!("{}/{}", to, base)
    } else {
        format!("{}{}", to, &entry_path[from.len()..])
    }
}

/// Collect the live entries matching `from`
fn matching_entries(store: &dyn StagedFiles, from: &str) -> Vec<(String, Vec<u8>)> {
    let mut matches = Vec::new();
    store.each(&mut |entry| {
        if entry.path.starts_with(from) && entry.state != FileState::Deleted {
            if let Some(contents) = &entry.contents {
                matches.push((entry.path.clone(), contents.clone()));
            }
        }
    });
    matches
}

/// Duplicate every staged file under `from` to `to`
///
/// Only contents are duplicated; destinations are staged as fresh modified
/// entries regardless of the source's lifecycle state. No-content and
/// deleted entries are skipped.
pub fn in_memory_copy(store: &mut dyn StagedFiles, from: &str, to: &str) {
    for (path, contents) in matching_entries(store, from) {
        store.add(FileEntry {
            path: destination(&path, from, to),
            contents: Some(contents),
            state: FileState::Modified,
        });
    }
}

/// Relocate every staged file under `from` to `to`
///
/// Same matching and destination rule as [`in_memory_copy`], but each
/// source entry is cleared after its contents land at the destination, so
/// the old path no longer satisfies [`exists_in_memory`].
pub fn in_memory_move(store: &mut dyn StagedFiles, from: &str, to: &str) {
    for (path, contents) in matching_entries(store, from) {
        store.add(FileEntry {
            path: destination(&path, from, to),
            contents: Some(contents),
            state: FileState::Modified,
        });
        store.add(FileEntry {
            path,
            contents: None,
            state: FileState::Deleted,
        });
    }
}

/// Print every staged entry and its lifecycle state to stdout
pub fn dump_file_names(store: &dyn StagedFiles) {
    dump_file_names_with(store, |line| println!("{}", line));
}

/// Feed every staged entry, regardless of state, to a diagnostic sink
pub fn dump_file_names_with(store: &dyn StagedFiles, mut sink: impl FnMut(String)) {
    store.each(&mut |entry| {
        sink(format!("{} [{}]", entry.path, entry.state));
    });
}

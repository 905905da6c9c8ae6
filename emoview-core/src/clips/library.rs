use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use walkdir::WalkDir;

use crate::foundation::error::{EmoviewError, EmoviewResult};

/// File extension of animation clip assets.
pub const CLIP_EXTENSION: &str = "anim";

/// One discovered clip: display name (file stem) and its path.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ClipEntry {
    /// File stem, also used as the output image name.
    pub name: String,
    /// Path to the clip file.
    pub path: PathBuf,
}

/// Clips discovered under a folder, keyed by name.
///
/// Iteration is name-sorted so logs and outputs are reproducible. Names are unique:
/// when two files share a stem, the one visited last during the scan wins.
#[derive(Clone, Debug, Default)]
pub struct ClipLibrary {
    entries: BTreeMap<String, PathBuf>,
}

impl ClipLibrary {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursively collect every `*.anim` file below `root`.
    #[tracing::instrument]
    pub fn scan(root: &Path) -> EmoviewResult<Self> {
        if !root.is_dir() {
            return Err(EmoviewError::validation(format!(
                "clip folder '{}' is not a directory",
                root.display()
            )));
        }

        let mut lib = Self::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("scan clip folder '{}'", root.display()))?;
            if !entry.file_type().is_file() || !is_clip_file(entry.path()) {
                continue;
            }
            let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %entry.path().display(), "skipping clip with non-UTF-8 name");
                continue;
            };
            lib.insert(stem, entry.path());
        }

        tracing::debug!(count = lib.len(), "clip scan finished");
        Ok(lib)
    }

    /// Insert or replace the clip registered under `name`.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.entries.insert(name.into(), path.into());
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no clip is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every clip.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Path registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = ClipEntry> + '_ {
        self.entries.iter().map(|(name, path)| ClipEntry {
            name: name.clone(),
            path: path.clone(),
        })
    }
}

fn is_clip_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CLIP_EXTENSION))
}

#[cfg(test)]
#[path = "../../tests/unit/clips/library.rs"]
mod tests;

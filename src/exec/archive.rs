// src/exec/archive.rs

//! Audit archive for command output.
//!
//! Every invocation is written to `<root>/<dir>/<timestamp>.txt`. Timestamps
//! have millisecond resolution; when two records land in the same
//! millisecond the later one gets a `-1`, `-2`, ... suffix instead of
//! replacing the earlier file.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::fs::FileSystem;

/// Destination for archive records.
pub trait ArchiveSink: Send + Sync + Debug {
    /// Persist `content` under `dir` and return the path written.
    fn record(&self, dir: &Path, content: &str) -> Result<PathBuf>;
}

/// Archive sink backed by a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FsArchiveSink<F: FileSystem> {
    fs: F,
    root: PathBuf,
}

impl<F: FileSystem> FsArchiveSink<F> {
    pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// First `<stamp>[-n].txt` name in `dir` that is not taken yet.
    fn unique_path(&self, dir: &Path, stamp: &str) -> PathBuf {
        let mut candidate = dir.join(format!("{stamp}.txt"));
        let mut n = 1u32;
        while self.fs.exists(&candidate) {
            candidate = dir.join(format!("{stamp}-{n}.txt"));
            n += 1;
        }
        candidate
    }
}

impl<F: FileSystem> ArchiveSink for FsArchiveSink<F> {
    fn record(&self, dir: &Path, content: &str) -> Result<PathBuf> {
        let dir = self.root.join(dir);
        self.fs.create_dir_all(&dir)?;

        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let path = self.unique_path(&dir, &stamp);
        self.fs.write(&path, content.as_bytes())?;

        debug!(path = %path.display(), "archived command output");
        Ok(path)
    }
}

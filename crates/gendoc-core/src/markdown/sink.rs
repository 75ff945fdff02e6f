//! Output destinations for rendered pages
//!
//! Paths handed to a sink are relative to its root.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where rendered pages go
pub trait OutputSink {
    /// Clear the output root and recreate it empty
    fn reset(&mut self) -> Result<()>;

    /// Make sure a directory exists under the root
    fn ensure_dir(&mut self, relative: &Path) -> Result<()>;

    /// Write a page, replacing any previous content
    fn write_page(&mut self, relative: &Path, content: &str) -> Result<()>;
}

/// Writes pages below a directory on disk
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FsSink {
    fn reset(&mut self) -> Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => debug!(root = %self.root.display(), "Removed previous output"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&self.root, e)),
        }
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))
    }

    fn ensure_dir(&mut self, relative: &Path) -> Result<()> {
        let dir = self.root.join(relative);
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))
    }

    fn write_page(&mut self, relative: &Path, content: &str) -> Result<()> {
        let path = self.root.join(relative);
        fs::write(&path, content).map_err(|e| Error::io(&path, e))
    }
}

/// Keeps pages in memory; used for previews and tests
///
/// Like a filesystem, writing into a directory that was never ensured fails.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pages: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, relative: impl AsRef<Path>) -> Option<&str> {
        self.pages.get(relative.as_ref()).map(String::as_str)
    }

    /// Pages in path order
    pub fn pages(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.pages.iter().map(|(p, c)| (p.as_path(), c.as_str()))
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn reset(&mut self) -> Result<()> {
        self.pages.clear();
        self.dirs.clear();
        Ok(())
    }

    fn ensure_dir(&mut self, relative: &Path) -> Result<()> {
        for dir in relative.ancestors() {
            if !dir.as_os_str().is_empty() {
                self.dirs.insert(dir.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_page(&mut self, relative: &Path, content: &str) -> Result<()> {
        if let Some(parent) = relative.parent() {
            if !parent.as_os_str().is_empty() && !self.dirs.contains(parent) {
                return Err(Error::io(
                    relative,
                    io::Error::new(io::ErrorKind::NotFound, "parent directory does not exist"),
                ));
            }
        }
        self.pages.insert(relative.to_path_buf(), content.to_string());
        Ok(())
    }
}

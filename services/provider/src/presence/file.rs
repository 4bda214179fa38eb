use super::DataPresence;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Sentinel-file oracle: data exists while the file exists.
#[derive(Debug, Clone)]
pub struct FileDataPresence {
    path: PathBuf,
}

impl FileDataPresence {
    /// Track presence through the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the sentinel file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataPresence for FileDataPresence {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn set_present(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // create(true) without truncate leaves an existing marker untouched
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        Ok(())
    }

    fn set_absent(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

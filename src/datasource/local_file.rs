//! Local-file data source: userdata read from a path on the local filesystem.

use crate::datasource::DataSource;
use crate::error::SourceError;
use std::path::{Path, PathBuf};

/// Data source backed by a single local file holding the userdata payload.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for LocalFile {
    fn is_available(&self) -> bool {
        self.path.exists()
    }

    // The file may appear or disappear at any point during the run.
    fn availability_changes(&self) -> bool {
        true
    }

    fn config_root(&self) -> String {
        String::new()
    }

    fn fetch_metadata(&self) -> Result<Vec<u8>, SourceError> {
        Ok(Vec::new())
    }

    fn fetch_userdata(&self) -> Result<Vec<u8>, SourceError> {
        Ok(std::fs::read(&self.path)?)
    }

    fn fetch_network_config(&self, _name: &str) -> Result<Option<Vec<u8>>, SourceError> {
        Ok(None)
    }

    fn kind(&self) -> &'static str {
        "local-file"
    }
}

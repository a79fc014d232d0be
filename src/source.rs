// Customer Dashboard - Data Sources
// Where `customer.json` comes from: a local file or an HTTP GET

use crate::error::LoadError;
use crate::model::Dataset;
use std::fs;
use std::path::{Path, PathBuf};

/// Fetches and parses the dataset. Implementations never touch dashboard state.
pub trait DataSource: Send + Sync {
    fn fetch(&self) -> Result<Dataset, LoadError>;

    /// Human-readable location for logs
    fn location(&self) -> String;
}

// ============================================================================
// FILE SOURCE
// ============================================================================

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<Dataset, LoadError> {
        let text = fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            location: self.location(),
            source,
        })?;

        Ok(Dataset::from_json(&text)?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// HTTP SOURCE
// ============================================================================

#[cfg(feature = "fetch")]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    fn network_error(&self, message: impl ToString) -> LoadError {
        LoadError::Network {
            location: self.url.clone(),
            message: message.to_string(),
        }
    }
}

#[cfg(feature = "fetch")]
impl DataSource for HttpSource {
    // The blocking client owns a runtime of its own, so it is built per call
    // and must not be used from inside an async task.
    fn fetch(&self) -> Result<Dataset, LoadError> {
        let response = reqwest::blocking::Client::new()
            .get(&self.url)
            .send()
            .map_err(|e| self.network_error(e))?;

        if !response.status().is_success() {
            return Err(self.network_error(format!("HTTP {}", response.status())));
        }

        let text = response.text().map_err(|e| self.network_error(e))?;
        Ok(Dataset::from_json(&text)?)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Pick a source for a `--source` argument: URLs go over HTTP, anything else
/// is a file path.
pub fn open(location: &str) -> Result<Box<dyn DataSource>, LoadError> {
    if is_url(location) {
        return open_url(location);
    }

    Ok(Box::new(FileSource::new(location)))
}

#[cfg(feature = "fetch")]
fn open_url(url: &str) -> Result<Box<dyn DataSource>, LoadError> {
    Ok(Box::new(HttpSource::new(url)))
}

#[cfg(not(feature = "fetch"))]
fn open_url(url: &str) -> Result<Box<dyn DataSource>, LoadError> {
    Err(LoadError::UnsupportedLocation(url.to_string()))
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

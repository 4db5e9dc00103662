//! Resolving `-f` inputs (files, directories, URLs) into resources.

mod document;
mod fetch;
mod resource;

pub use document::{parse_by_extension, parse_json, parse_yaml};
pub use fetch::is_url;
pub use resource::Resource;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while resolving manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to parse YAML from {source_ref}: {source}")]
    Yaml {
        source_ref: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON from {source_ref}: {source}")]
    Json {
        source_ref: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fetch cancelled by user for URL: {url}")]
    Declined { url: String },

    #[error("failed to fetch URL {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch URL {url}: status {status}")]
    Status { url: String, status: u16 },

    #[error("reading manifests from stdin is not supported")]
    Stdin,
}

const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Resolve one `-f` value into the resources it declares.
///
/// Directories contribute their `.yaml`, `.yml` and `.json` files, nested ones
/// only when `recursive` is set. `confirm_remote` is asked before any URL is
/// fetched.
pub fn resolve(
    source: &str,
    recursive: bool,
    confirm_remote: &mut dyn FnMut(&str) -> bool,
) -> Result<Vec<Resource>, ManifestError> {
    if source == "-" {
        return Err(ManifestError::Stdin);
    }

    if is_url(source) {
        let content = fetch::fetch_url(source, confirm_remote)?;
        return parse_by_extension(&content, source);
    }

    let path = Path::new(source);
    if path.is_dir() {
        let mut resources = Vec::new();
        for file in manifest_files(path, recursive)? {
            resources.extend(parse_file(&file)?);
        }
        return Ok(resources);
    }

    parse_file(path)
}

fn parse_file(path: &Path) -> Result<Vec<Resource>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_by_extension(&content, &path.to_string_lossy())
}

/// Manifest files under `dir`, in a stable order.
fn manifest_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, ManifestError> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    // Symlinked manifests count like regular files; a dangling link is an error.
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && has_manifest_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

//! Copies the report stylesheet and filter script into a consumer's
//! static-asset directory.
//!
//! Files land flat under `<target_dir>/<namespace>/`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bundled assets: (file name, contents)
const EMBEDDED_ASSETS: &[(&str, &str)] = &[
    ("reports.css", include_str!("../assets/css/reports.css")),
    ("report-filter.js", include_str!("../assets/js/report-filter.js")),
];

/// Glob patterns, relative to a source directory, that select assets
const ASSET_PATTERNS: [&str; 2] = ["css/*.css", "js/*.js"];

/// Where assets are copied from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// A directory containing `css/` and `js/`
    Directory(PathBuf),
    /// The files compiled into this crate
    Embedded,
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to create target directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list source files: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// `<target_dir>/<namespace>`
    pub destination: PathBuf,
    /// Files written, in copy order
    pub copied: Vec<PathBuf>,
}

/// Copy every `css/*.css` and `js/*.js` from `source` into
/// `<target_dir>/<namespace>/`.
///
/// Unreadable source files are logged and skipped. Failing to create the
/// destination or to write a file aborts the copy.
pub fn copy_assets(source: &AssetSource, target_dir: &Path, namespace: &str) -> Result<CopyReport, AssetError> {
    let destination = target_dir.join(namespace);
    std::fs::create_dir_all(&destination).map_err(|source| AssetError::CreateDir {
        path: destination.clone(),
        source,
    })?;

    let mut report = CopyReport {
        destination,
        copied: Vec::new(),
    };

    match source {
        AssetSource::Embedded => {
            for (name, contents) in EMBEDDED_ASSETS {
                write_asset(&mut report, name, contents.as_bytes())?;
            }
        }
        AssetSource::Directory(dir) => {
            // The directory itself may contain glob metacharacters
            let base = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()));
            for pattern in ASSET_PATTERNS {
                let pattern = base.join(pattern);
                for entry in glob::glob(&pattern.to_string_lossy())? {
                    let path = match entry {
                        Ok(path) => path,
                        Err(e) => {
                            log::warn!("Skipping unreadable asset entry: {}", e);
                            continue;
                        }
                    };
                    let data = match std::fs::read(&path) {
                        Ok(data) => data,
                        Err(e) => {
                            log::warn!("Failed to read {}: {}", path.display(), e);
                            continue;
                        }
                    };
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        write_asset(&mut report, name, &data)?;
                    }
                }
            }
        }
    }

    if report.copied.is_empty() {
        log::info!("No assets found to copy for {:?}", source);
    } else {
        log::info!("Copied {} assets to {}", report.copied.len(), report.destination.display());
    }
    Ok(report)
}

fn write_asset(report: &mut CopyReport, name: &str, data: &[u8]) -> Result<(), AssetError> {
    let path = report.destination.join(name);
    std::fs::write(&path, data).map_err(|source| AssetError::Write {
        path: path.clone(),
        source,
    })?;
    report.copied.push(path);
    Ok(())
}

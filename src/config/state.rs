// Application state module
// Immutable per-process state shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ConfigError;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical public root; every served file must resolve below it
    pub public_root: PathBuf,
}

impl AppState {
    /// Create `AppState`, resolving the public root once at startup
    ///
    /// A relative `public_dir` is looked up in the working directory first, then next to
    /// the executable.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let public_dir = Path::new(&config.static_files.public_dir);

        let mut first_error = None;
        for candidate in root_candidates(public_dir, exe_dir.as_deref()) {
            match open_root(&candidate) {
                Ok(public_root) => {
                    return Ok(Self {
                        config,
                        public_root,
                    })
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        Err(ConfigError::PublicDir {
            path: config.static_files.public_dir.clone(),
            source: first_error
                .unwrap_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound)),
        })
    }

    pub const fn max_body_size(&self) -> u64 {
        self.config.calculate.max_body_size
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}

/// Places a configured public directory may live, in lookup order
fn root_candidates(public_dir: &Path, exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![public_dir.to_path_buf()];
    if public_dir.is_relative() {
        if let Some(exe_dir) = exe_dir {
            candidates.push(exe_dir.join(public_dir));
        }
    }
    candidates
}

/// Canonicalize `path` and require a directory
fn open_root(path: &Path) -> std::io::Result<PathBuf> {
    let root = std::fs::canonicalize(path)?;
    if root.is_dir() {
        Ok(root)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a directory",
        ))
    }
}

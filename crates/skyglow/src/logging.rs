//! File logging.
//!
//! The terminal belongs to the animation, so log lines go to
//! `skyglow.log` in the platform data directory. `SKYGLOW_LOG` takes an
//! `EnvFilter` directive and defaults to `info`.

use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use color_eyre::eyre::eyre;
use skyglow_config::{LOG_FILE, data_dir};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SKYGLOW_LOG";

/// Install the global subscriber. Returns the log file path, or `None` when
/// there is no usable data directory and logging stays off.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Ok(dir) = data_dir() else {
        return Ok(None);
    };
    let Ok((path, file)) = open_log_file(&dir) else {
        return Ok(None);
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;
    Ok(Some(path))
}

/// Create `dir` if needed and open the log file inside it for appending.
fn open_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_file_created_in_nested_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("skyglow").join("data");
        let (path, _file) = open_log_file(&nested).unwrap();
        assert_eq!(path, nested.join(LOG_FILE));
        assert!(path.is_file());
    }

    #[test]
    fn test_unusable_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        assert!(open_log_file(&blocker.join("logs")).is_err());
    }
}

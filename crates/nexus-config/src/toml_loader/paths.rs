//! Where the console keeps its config file, and first-run creation of it.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use nexus_common::ConfigError;
use tracing::{debug, info};

use super::template::default_config_toml;

pub const CONFIG_DIR_NAME: &str = "nexus";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `<platform config dir>/nexus/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory for this user".into()))
}

/// Write the commented template to `path` unless a file is already there.
///
/// Returns `true` when the template was written. The file may later hold
/// `api.api_key`, so on Unix it is created readable by the owner only.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!("cannot create {}: {e}", parent.display()))
        })?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("config already present at {}, not overwriting", path.display());
            return Ok(false);
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot create {}: {e}",
                path.display()
            )))
        }
    };
    file.write_all(default_config_toml().as_bytes()).map_err(|e| {
        ConfigError::ParseError(format!("cannot write {}: {e}", path.display()))
    })?;

    info!("wrote config template to {}", path.display());
    Ok(true)
}

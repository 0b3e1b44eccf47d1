mod session;
mod settings;

pub use session::Session;
pub use settings::{ApiSettings, Config, DisplaySettings, DocumentSettings, API_URL_ENV};

use crate::error::{GinumError, Result};
use directories::ProjectDirs;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (XDG config dir, falling back to ~/.ginum/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "ginum") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        GinumError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".ginum"))
}

/// Fail early with a helpful message when `ginum init` has not been run
pub fn ensure_initialized(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(GinumError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

pub fn drafts_dir(cfg_dir: &Path) -> PathBuf {
    cfg_dir.join("drafts")
}

fn session_file(cfg_dir: &Path) -> PathBuf {
    cfg_dir.join("session.toml")
}

/// Load config.toml, with environment overrides applied
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(GinumError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| GinumError::ConfigParse { path, source: e })?;
    config.apply_env();
    debug!(base_url = %config.api.base_url, "loaded config");
    Ok(config)
}

/// Load session.toml (anonymous session if missing)
pub fn load_session(cfg_dir: &Path) -> Result<Session> {
    let path = session_file(cfg_dir);
    if !path.exists() {
        return Ok(Session::anonymous());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| GinumError::ConfigParse { path, source: e })
}

pub fn save_session(cfg_dir: &Path, session: &Session) -> Result<()> {
    write_toml(&session_file(cfg_dir), session)
}

/// Forget the stored session. Returns whether one existed.
pub fn clear_session(cfg_dir: &Path) -> Result<bool> {
    let path = session_file(cfg_dir);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(&path)?;
    debug!(path = %path.display(), "cleared session");
    Ok(true)
}

pub(crate) fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = toml::to_string_pretty(value).map_err(|e| GinumError::ConfigWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
base_url = "http://localhost:8081"   # overridden by GINUM_API_URL
timeout_secs = 10

[display]
currency_symbol = "$"

[documents]
default_tax_percent = 0   # applied to new quotation and purchase drafts
"#;

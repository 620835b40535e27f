//! Application configuration loading for CLI defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use locker_core::TransferConfig;
use serde::Deserialize;

use crate::cli::Args;

/// TOML-backed file configuration for locker-dl defaults.
///
/// Every key is optional; CLI flags override whatever is set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default output directory for downloads.
    pub output_dir: Option<PathBuf>,
    /// Site used when `--site` is not given (skips the prompt).
    pub site: Option<String>,
    /// Size of each disk write in KiB.
    pub chunk_size_kib: Option<u32>,
    /// Mirror prefix used to build qiwi direct links.
    pub qiwi_mirror: Option<String>,
    /// Maximum pages fetched per link.
    pub max_hops: Option<u8>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(kib) = self.chunk_size_kib
            && !(1..=65_536).contains(&kib)
        {
            bail!("Invalid config value for `chunk_size_kib`: {kib}. Expected range: 1..=65536");
        }
        if let Some(hops) = self.max_hops
            && !(1..=50).contains(&hops)
        {
            bail!("Invalid config value for `max_hops`: {hops}. Expected range: 1..=50");
        }
        if let Some(mirror) = &self.qiwi_mirror
            && url::Url::parse(mirror).is_err()
        {
            bail!("Invalid config value for `qiwi_mirror`: {mirror:?} is not a URL");
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists.
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    /// The file config, or all defaults when no file was loaded.
    #[must_use]
    pub fn file_config(&self) -> FileConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/locker-dl/config.toml`
/// 2. `$HOME/.config/locker-dl/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    config_path_from(env_var_non_empty_os("XDG_CONFIG_HOME"), env_var_non_empty_os("HOME"))
}

fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("locker-dl")
                .join("config.toml"),
        );
    }
    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("locker-dl")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    FileConfig::from_toml_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// Merges CLI flags over file values over library defaults.
#[must_use]
pub fn build_transfer_config(args: &Args, file: &FileConfig) -> TransferConfig {
    let mut config = TransferConfig::default();

    if let Some(dir) = args.output_dir.as_ref().or(file.output_dir.as_ref()) {
        config = config.with_download_root(dir.clone());
    }
    if let Some(kib) = args.chunk_size_kib.or(file.chunk_size_kib) {
        config = config.with_chunk_size(kib as usize * 1024);
    }
    if let Some(mirror) = args.qiwi_mirror.as_ref().or(file.qiwi_mirror.as_ref()) {
        config = config.with_qiwi_mirror(mirror.clone());
    }
    if let Some(hops) = args.max_hops.or(file.max_hops) {
        config = config.with_max_hops(usize::from(hops));
    }
    if let Some(secs) = file.connect_timeout_secs {
        config.connect_timeout_secs = secs;
    }
    if let Some(secs) = file.read_timeout_secs {
        config.read_timeout_secs = secs;
    }
    config
}

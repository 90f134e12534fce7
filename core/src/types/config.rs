use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CmsResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CmsSettings {
    /// Store snapshot location. Empty means `<config_dir>/store.json`.
    #[serde(default)]
    pub data_file: PathBuf,
    /// Indentation unit for tree listings. Default: `". . "`.
    #[serde(default = "default_option_spacer")]
    pub option_spacer: String,
    /// Revisions kept per layout field. Default: 25.
    #[serde(default = "default_revisions_limit")]
    pub revisions_limit: usize,
    /// Roots scanned for `layouts/**/*.html.*` application layouts.
    #[serde(default)]
    pub view_paths: Vec<PathBuf>,
}

fn default_option_spacer() -> String {
    ". . ".into()
}

fn default_revisions_limit() -> usize {
    25
}

impl Default for CmsSettings {
    fn default() -> Self {
        CmsSettings {
            data_file: PathBuf::new(),
            option_spacer: default_option_spacer(),
            revisions_limit: default_revisions_limit(),
            view_paths: Vec::new(),
        }
    }
}

impl CmsSettings {
    /// Load settings from YAML. Returns defaults if the file doesn't exist.
    pub fn from_yaml_file(path: &Path) -> CmsResult<CmsSettings> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_yaml(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CmsSettings::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_yaml(raw: &str) -> CmsResult<CmsSettings> {
        if raw.trim().is_empty() {
            return Ok(CmsSettings::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Snapshot path, falling back to `store.json` under `config_dir`.
    pub fn data_file_in(&self, config_dir: &Path) -> PathBuf {
        if self.data_file.as_os_str().is_empty() {
            config_dir.join("store.json")
        } else if self.data_file.is_relative() {
            config_dir.join(&self.data_file)
        } else {
            self.data_file.clone()
        }
    }
}

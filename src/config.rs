use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".lokeyrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path to the hierarchical key document (the source of truth for
    /// which keys exist). Missing or unparsable documents abort the run.
    #[serde(default = "default_key_document")]
    pub key_document: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// File extensions treated as source files.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory names pruned from the walk at any depth.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    /// Extra glob patterns for files to skip.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Path substrings that mark a file as a test file.
    #[serde(default = "default_test_indicators")]
    pub test_indicators: Vec<String>,
}

fn default_key_document() -> String {
    "./messages/en.json".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].map(String::from).to_vec()
}

fn default_exclude_dirs() -> Vec<String> {
    [
        "node_modules",
        ".git",
        "dist",
        "build",
        ".next",
        ".turbo",
        ".expo",
        "coverage",
    ]
    .map(String::from)
    .to_vec()
}

fn default_test_indicators() -> Vec<String> {
    ["test", "__tests__", ".test.", ".spec.", "__mocks__"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_document: default_key_document(),
            source_root: default_source_root(),
            extensions: default_extensions(),
            exclude_dirs: default_exclude_dirs(),
            ignores: Vec::new(),
            test_indicators: default_test_indicators(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

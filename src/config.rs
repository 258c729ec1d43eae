use crate::domain::TagFormat;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "releaselines.toml";
const NOTES_REF_PREFIX: &str = "refs/notes/";

/// Represents the complete configuration for release-lines.
///
/// Contains the release branch topology, the tag template, and the notes ref
/// holding per-tag channel metadata.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_branches")]
    pub branches: Vec<BranchEntry>,

    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default = "default_notes_ref")]
    pub notes_ref: String,
}

/// One `branches` entry: a bare name or glob, or a table with options
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum BranchEntry {
    Name(String),
    Detailed(BranchConfig),
}

/// Options for a configured branch pattern.
///
/// String values may contain `${name}`, replaced with the matched branch name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BranchConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<PrereleaseConfig>,
}

/// `channel = "next"` or `channel = false` for the default channel
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChannelConfig {
    Enabled(bool),
    Named(String),
}

/// `prerelease = "rc"`, or `prerelease = true` to use the branch name
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PrereleaseConfig {
    Enabled(bool),
    Named(String),
}

impl BranchEntry {
    pub fn to_branch_config(&self) -> BranchConfig {
        match self {
            BranchEntry::Name(name) => BranchConfig {
                name: name.clone(),
                ..BranchConfig::default()
            },
            BranchEntry::Detailed(config) => config.clone(),
        }
    }
}

/// Returns the default branch topology.
fn default_branches() -> Vec<BranchEntry> {
    let mut branches: Vec<BranchEntry> = ["[0-9]*.x", "master", "main", "next", "next-major"]
        .iter()
        .map(|name| BranchEntry::Name(name.to_string()))
        .collect();

    for name in ["beta", "alpha"] {
        branches.push(BranchEntry::Detailed(BranchConfig {
            name: name.to_string(),
            prerelease: Some(PrereleaseConfig::Enabled(true)),
            ..BranchConfig::default()
        }));
    }
    branches
}

fn default_tag_format() -> String {
    "v${version}".to_string()
}

fn default_notes_ref() -> String {
    "semantic-release".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branches: default_branches(),
            tag_format: default_tag_format(),
            notes_ref: default_notes_ref(),
        }
    }
}

impl Config {
    /// Branch entries with bare names expanded to option tables
    pub fn branch_configs(&self) -> Vec<BranchConfig> {
        self.branches.iter().map(BranchEntry::to_branch_config).collect()
    }

    /// Validated tag template
    pub fn tag_format(&self) -> Result<TagFormat> {
        TagFormat::new(self.tag_format.clone())
    }

    /// Fully qualified notes reference
    pub fn notes_ref(&self) -> String {
        if self.notes_ref.starts_with(NOTES_REF_PREFIX) {
            self.notes_ref.clone()
        } else {
            format!("{}{}", NOTES_REF_PREFIX, self.notes_ref)
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaselines.toml` in current directory
/// 3. `.releaselines.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

use std::fmt;

use thiserror::Error;

/// Unified error type for release-lines operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Invalid semantic version: {0}")]
    Version(#[from] semver::Error),

    #[error("Configuration file is not valid TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Tag format '{format}' must contain the ${{version}} placeholder exactly once")]
    TagNoVersion { format: String },

    #[error("Tag format '{format}' does not produce a valid git tag name")]
    InvalidTagFormat { format: String },

    #[error("Invalid branch configuration: {0}")]
    InvalidBranches(BranchErrors),

    #[error(
        "Version {version} is not in the range {range} of branch '{branch}'; {release_type} releases are accepted on: {}",
        display_list(.valid_branches)
    )]
    InvalidNextVersion {
        version: String,
        release_type: String,
        branch: String,
        range: String,
        valid_branches: Vec<String>,
    },

    #[error("Branch '{branch}' is not configured as a release branch")]
    NotReleaseBranch { branch: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-lines
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a branch lookup error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        ReleaseError::Branch(msg.into())
    }

    /// Stable error code for errors that are reported to the user by code
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ReleaseError::TagNoVersion { .. } => Some("ETAGNOVERSION"),
            ReleaseError::InvalidTagFormat { .. } => Some("EINVALIDTAGFORMAT"),
            ReleaseError::InvalidNextVersion { .. } => Some("EINVALIDNEXTVERSION"),
            ReleaseError::NotReleaseBranch { .. } => Some("ENOTRELEASEBRANCH"),
            _ => None,
        }
    }
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// A single violated branch invariant, detected while classifying branches
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BranchError {
    #[error("The maintenance branch '{branch}' has an invalid range '{range}'")]
    InvalidMaintenanceBranch { branch: String, range: String },

    #[error("The maintenance branches must have distinct ranges: {}", .branches.join(", "))]
    DuplicateMaintenanceRanges { branches: Vec<String> },

    #[error("The prerelease branch '{branch}' has an invalid prerelease identifier '{prerelease}'")]
    InvalidPrereleaseBranch { branch: String, prerelease: String },

    #[error("The prerelease branches must have distinct identifiers: {}", .branches.join(", "))]
    DuplicatePrereleaseIds { branches: Vec<String> },

    #[error(
        "Between 1 and 3 release branches are required, found {}: {}",
        .branches.len(),
        display_list(.branches)
    )]
    ReleaseBranchCount { branches: Vec<String> },

    #[error("Branches are configured more than once: {}", .duplicates.join(", "))]
    DuplicateBranches { duplicates: Vec<String> },

    #[error("'{branch}' is not a valid git branch name")]
    InvalidBranchName { branch: String },
}

impl BranchError {
    /// Stable error code identifying the violated invariant
    pub fn code(&self) -> &'static str {
        match self {
            BranchError::InvalidMaintenanceBranch { .. } => "EMAINTENANCEBRANCH",
            BranchError::DuplicateMaintenanceRanges { .. } => "EMAINTENANCEBRANCHES",
            BranchError::InvalidPrereleaseBranch { .. } => "EPRERELEASEBRANCH",
            BranchError::DuplicatePrereleaseIds { .. } => "EPRERELEASEBRANCHES",
            BranchError::ReleaseBranchCount { .. } => "ERELEASEBRANCHES",
            BranchError::DuplicateBranches { .. } => "EDUPLICATEBRANCHES",
            BranchError::InvalidBranchName { .. } => "EINVALIDBRANCHNAME",
        }
    }
}

/// Every branch invariant violated in one classification pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchErrors(Vec<BranchError>);

impl BranchErrors {
    pub fn new() -> Self {
        BranchErrors(Vec::new())
    }

    pub fn push(&mut self, error: BranchError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BranchError> {
        self.0.iter()
    }

    /// Codes of all collected errors, in detection order
    pub fn codes(&self) -> Vec<&'static str> {
        self.0.iter().map(BranchError::code).collect()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.code() == code)
    }
}

impl fmt::Display for BranchErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.code(), error)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a BranchErrors {
    type Item = &'a BranchError;
    type IntoIter = std::slice::Iter<'a, BranchError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

use serde::Serialize;
use std::fmt;

/// Non-fatal problems met while reading tag history from the repository.
/// The offending tag is skipped or read with defaults, and the warning is
/// reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryWarning {
    /// Tag matches the template prefix but its version text is not a semantic version
    UnparsableTag { tag: String, reason: String },
    /// Tag note exists but is not the expected JSON; the default channel is assumed
    MalformedNote { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::MalformedNote { tag, reason } => {
                write!(
                    f,
                    "Ignoring malformed release note on tag '{}': {}",
                    tag, reason
                )
            }
        }
    }
}

//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod channel;
pub mod range;
pub mod release;
pub mod tag;
pub mod version;

pub use branch::{Branch, BranchInput, BranchKind, BranchType, PrereleaseSetting};
pub use channel::Channel;
pub use range::VersionRange;
pub use release::{LastRelease, Release, ReleaseToAdd};
pub use tag::{ReleaseTag, TagFormat};
pub use version::ReleaseType;

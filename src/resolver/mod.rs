//! Release decisions for a normalized branch

pub mod last_release;
pub mod next_version;
pub mod release_to_add;

pub use last_release::last_release;
pub use next_version::{next_release, next_version};
pub use release_to_add::release_to_add;

use crate::domain::{Branch, Release};
use crate::error::{ReleaseError, Result};

/// Reject a next release that falls outside `branch`'s range.
///
/// The error lists the non-prerelease branches that accept the release type.
/// Prerelease branches have no range and accept any version.
pub fn check_next_release(branch: &Branch, branches: &[Branch], release: &Release) -> Result<()> {
    let Some(range) = branch.range() else {
        return Ok(());
    };

    if range.satisfies(&release.version) {
        return Ok(());
    }

    Err(ReleaseError::InvalidNextVersion {
        version: release.version.to_string(),
        release_type: release.release_type.to_string(),
        branch: branch.name.clone(),
        range: range.to_string(),
        valid_branches: branches
            .iter()
            .filter(|b| !b.is_prerelease() && b.accepts(release.release_type))
            .map(|b| b.name.clone())
            .collect(),
    })
}

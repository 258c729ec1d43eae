//! Branch topology: expansion, classification, validation, and normalization
//!
//! [resolve] is the entry point for the core. It takes configured branches
//! already annotated with their tag history and returns the flat,
//! priority-ordered list of normalized branches: maintenance branches first,
//! then release branches, then prerelease branches.

pub mod classify;
pub mod expand;
pub mod normalize;

pub use classify::{branch_type, classify, validate, Classified};
pub use expand::expand;

use crate::domain::{Branch, BranchInput};
use crate::error::{ReleaseError, Result};
use tracing::debug;

/// Classify, validate, and normalize branches.
///
/// Every violated invariant is reported at once in
/// [`ReleaseError::InvalidBranches`]; no branch is returned in that case.
pub fn resolve(inputs: Vec<BranchInput>) -> Result<Vec<Branch>> {
    let classified = classify(inputs);

    let errors = validate(&classified);
    if !errors.is_empty() {
        return Err(ReleaseError::InvalidBranches(errors));
    }

    let Classified {
        maintenance,
        release,
        prerelease,
    } = classified;

    // Maintenance bounds depend on the primary release branch's history
    let release = normalize::release(release);
    let mut branches = normalize::maintenance(maintenance, &release);
    branches.extend(release);
    branches.extend(normalize::prerelease(prerelease));

    debug!(count = branches.len(), "resolved branches");
    Ok(branches)
}

//! Release planning workflow
//!
//! Reads the branch snapshot from the repository, runs the branch and
//! version logic over it, and assembles everything the user needs to know
//! about the active branch. Nothing here creates tags or publishes.

use serde::Serialize;
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::branches;
use crate::config::Config;
use crate::domain::{Branch, LastRelease, Release, ReleaseToAdd, ReleaseType};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::resolver;
use crate::tags::resolve_tags;

/// Arguments for the planning workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanArgs {
    /// Branch to plan for; the checked-out branch when unset
    pub branch: Option<String>,

    /// Release type of the pending changes, if known
    pub release_type: Option<ReleaseType>,
}

/// Normalized branches read from a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchSnapshot {
    pub branches: Vec<Branch>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Everything decided for the active branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleasePlan {
    pub branch: Branch,
    pub last_release: Option<LastRelease>,
    pub release_to_add: Option<ReleaseToAdd>,
    pub next_release: Option<Release>,
    pub branches: Vec<Branch>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Expand configured branches, resolve their tags, and normalize them
pub fn load_branches<R: Repository + ?Sized>(repo: &R, config: &Config) -> Result<BranchSnapshot> {
    let format = config.tag_format()?;
    let notes_ref = config.notes_ref();

    let available = repo.list_branches()?;
    let mut inputs = branches::expand(&config.branch_configs(), &available);
    debug!(configured = inputs.len(), available = available.len(), "expanded branches");

    let mut warnings = Vec::new();
    for input in &mut inputs {
        let resolution = resolve_tags(repo, &input.name, &format, &notes_ref)?;
        input.tags = resolution.tags;
        warnings.extend(resolution.warnings);
    }

    Ok(BranchSnapshot {
        branches: branches::resolve(inputs)?,
        warnings,
    })
}

/// Plan the release for one branch
///
/// 1. Load and normalize every configured branch
/// 2. Select the active branch (explicit or checked out)
/// 3. Find a version to add to its channel
/// 4. Find its last release and, given a release type, its next release
///
/// # Arguments
///
/// * `repo` - Repository to read branches, tags and notes from
/// * `config` - release-lines configuration
/// * `args` - Workflow arguments (branch, release type)
///
/// # Returns
///
/// The release plan, or `ENOTRELEASEBRANCH` when the active branch is not
/// configured, or `EINVALIDNEXTVERSION` when the next version falls outside
/// the branch's range
pub fn plan_release<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    args: &PlanArgs,
) -> Result<ReleasePlan> {
    let format = config.tag_format()?;
    let BranchSnapshot { branches, warnings } = load_branches(repo, config)?;

    let name = match &args.branch {
        Some(name) => name.clone(),
        None => repo
            .current_branch()?
            .ok_or_else(|| ReleaseError::branch("HEAD is not on a branch; pass --branch"))?,
    };
    let branch = branches
        .iter()
        .find(|b| b.name == name)
        .cloned()
        .ok_or(ReleaseError::NotReleaseBranch { branch: name })?;

    let mut release_to_add = resolver::release_to_add(&branch, &branches, &format);
    if let Some(to_add) = release_to_add.as_mut() {
        if let Some(sha) = repo.resolve_tag_head(&to_add.current_release.git_tag)? {
            to_add.current_release.git_head = Some(sha.clone());
            to_add.next_release.git_head = Some(sha);
        }
        if let Some(last) = to_add.last_release.as_mut() {
            if let Some(sha) = repo.resolve_tag_head(&last.git_tag)? {
                last.git_head = sha;
            }
        }
    }

    let mut last_release = resolver::last_release(&branch, None);
    if let Some(last) = last_release.as_mut() {
        if let Some(sha) = repo.resolve_tag_head(&last.git_tag)? {
            last.git_head = sha;
        }
    }

    let next_release = match args.release_type {
        Some(release_type) => {
            let release =
                resolver::next_release(&branch, release_type, last_release.as_ref(), &format)?;
            resolver::check_next_release(&branch, &branches, &release)?;
            Some(release)
        }
        None => None,
    };

    Ok(ReleasePlan {
        branch,
        last_release,
        release_to_add,
        next_release,
        branches,
        warnings,
    })
}

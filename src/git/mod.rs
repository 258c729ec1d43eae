//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository reads
//! release-lines needs, allowing for a real git2-backed implementation and an
//! in-memory mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! The branch and version logic never touches this trait. Only tag resolution
//! and release planning read from it, and they materialize everything they
//! need before classification starts.
//!
//! ```rust
//! # use release_lines::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_lines::Result<()> {
//! for branch in repo.list_branches()? {
//!     let tags = repo.list_branch_tags(&branch)?;
//!     println!("{}: {} tags", branch, tags.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Read-only repository access used to build the branch snapshot
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::ReleaseError].
/// Lookups of things that may legitimately be absent (a note, a detached
/// HEAD) return `Ok(None)` rather than an error.
pub trait Repository {
    /// Names of local branches
    fn list_branches(&self) -> Result<Vec<String>>;

    /// Name of the checked-out branch, or `None` on a detached or unborn HEAD
    fn current_branch(&self) -> Result<Option<String>>;

    /// Tags whose target commit is reachable from the head of `branch`
    ///
    /// # Arguments
    /// * `branch` - Local branch name (e.g., "master", "1.x")
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names, in no particular order
    /// * `Err` - If the branch doesn't exist or if there's a Git error
    fn list_branch_tags(&self, branch: &str) -> Result<Vec<String>>;

    /// Raw note attached to `tag` under `notes_ref`, if any
    ///
    /// # Arguments
    /// * `tag` - Tag name (e.g., "v1.0.0")
    /// * `notes_ref` - Fully qualified notes reference (e.g., "refs/notes/semantic-release")
    fn read_tag_note(&self, tag: &str, notes_ref: &str) -> Result<Option<String>>;

    /// Full SHA of the commit `tag` points to, or `None` when the tag doesn't exist
    fn resolve_tag_head(&self, tag: &str) -> Result<Option<String>>;
}

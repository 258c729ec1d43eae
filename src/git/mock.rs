use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    branches: Vec<String>,
    branch_tags: HashMap<String, Vec<String>>,
    current_branch: Option<String>,
    notes: HashMap<(String, String), String>,
    tag_heads: HashMap<String, String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a branch and the tags reachable from it
    pub fn add_branch(&mut self, name: impl Into<String>, tags: &[&str]) {
        let name = name.into();
        if !self.branches.contains(&name) {
            self.branches.push(name.clone());
        }
        self.branch_tags
            .insert(name, tags.iter().map(|t| t.to_string()).collect());
    }

    /// Set the checked-out branch
    pub fn set_current_branch(&mut self, name: impl Into<String>) {
        self.current_branch = Some(name.into());
    }

    /// Attach a note to a tag under `notes_ref`
    pub fn add_note(
        &mut self,
        notes_ref: impl Into<String>,
        tag: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.notes
            .insert((notes_ref.into(), tag.into()), text.into());
    }

    /// Record the commit a tag points to
    pub fn set_tag_head(&mut self, tag: impl Into<String>, sha: impl Into<String>) {
        self.tag_heads.insert(tag.into(), sha.into());
    }
}

impl Repository for MockRepository {
    fn list_branches(&self) -> Result<Vec<String>> {
        Ok(self.branches.clone())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.current_branch.clone())
    }

    fn list_branch_tags(&self, branch: &str) -> Result<Vec<String>> {
        self.branch_tags
            .get(branch)
            .cloned()
            .ok_or_else(|| ReleaseError::branch(format!("Branch not found: {}", branch)))
    }

    fn read_tag_note(&self, tag: &str, notes_ref: &str) -> Result<Option<String>> {
        Ok(self
            .notes
            .get(&(notes_ref.to_string(), tag.to_string()))
            .cloned())
    }

    fn resolve_tag_head(&self, tag: &str) -> Result<Option<String>> {
        Ok(self.tag_heads.get(tag).cloned())
    }
}

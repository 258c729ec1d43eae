use crate::error::{ReleaseError, Result};
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn branch_head(&self, branch_name: &str) -> Result<Oid> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|e| {
                ReleaseError::branch(format!("Cannot find branch '{}': {}", branch_name, e))
            })?;

        let commit = branch.get().peel_to_commit().map_err(|e| {
            ReleaseError::branch(format!("Branch '{}' has no commit: {}", branch_name, e))
        })?;

        Ok(commit.id())
    }

    /// Commit a tag points to; tags on trees or blobs yield `None`
    fn tag_commit(&self, tag: &str) -> Result<Option<Oid>> {
        let reference = match self.repo.find_reference(&format!("refs/tags/{}", tag)) {
            Ok(reference) => reference,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(reference.peel_to_commit().ok().map(|commit| commit.id()))
    }
}

impl super::Repository for Git2Repository {
    fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(String::from)),
            Ok(_) => Ok(None),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list_branch_tags(&self, branch: &str) -> Result<Vec<String>> {
        let head = self.branch_head(branch)?;
        let tag_names = self.repo.tag_names(None)?;

        let mut reachable = Vec::new();
        for tag in tag_names.iter().flatten() {
            let Some(commit) = self.tag_commit(tag)? else {
                continue;
            };
            if commit == head || self.repo.graph_descendant_of(head, commit)? {
                reachable.push(tag.to_string());
            }
        }

        Ok(reachable)
    }

    fn read_tag_note(&self, tag: &str, notes_ref: &str) -> Result<Option<String>> {
        let object = match self.repo.revparse_single(&format!("refs/tags/{}", tag)) {
            Ok(object) => object,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match self.repo.find_note(Some(notes_ref), object.id()) {
            Ok(note) => Ok(note.message().map(String::from)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_tag_head(&self, tag: &str) -> Result<Option<String>> {
        Ok(self.tag_commit(tag)?.map(|oid| oid.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::{RepositoryInitOptions, Signature};
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let repo = Git2Repo::init_opts(dir.path(), &opts).unwrap();
        (dir, repo)
    }

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn tag(repo: &Git2Repo, name: &str, oid: Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    #[test]
    fn test_unborn_head_has_no_current_branch() {
        let (_dir, repo) = init_repo();
        let repo = Git2Repository::from_git2(repo);
        assert_eq!(repo.current_branch().unwrap(), None);
        assert!(repo.list_branches().unwrap().is_empty());
    }

    #[test]
    fn test_branch_tags_are_limited_to_reachable_commits() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, "first");
        tag(&repo, "v1.0.0", first);

        {
            let first_commit = repo.find_commit(first).unwrap();
            repo.branch("next", &first_commit, false).unwrap();
        }

        let second = commit(&repo, "second");
        tag(&repo, "v1.0.1", second);

        let repo = Git2Repository::from_git2(repo);
        let mut master_tags = repo.list_branch_tags("master").unwrap();
        master_tags.sort();
        assert_eq!(master_tags, vec!["v1.0.0", "v1.0.1"]);
        assert_eq!(repo.list_branch_tags("next").unwrap(), vec!["v1.0.0"]);
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("master"));

        let mut branches = repo.list_branches().unwrap();
        branches.sort();
        assert_eq!(branches, vec!["master", "next"]);

        assert_eq!(
            repo.resolve_tag_head("v1.0.1").unwrap(),
            Some(second.to_string())
        );
        assert_eq!(repo.resolve_tag_head("v9.9.9").unwrap(), None);
        assert!(repo.list_branch_tags("missing").is_err());
    }

    #[test]
    fn test_read_tag_note() {
        let (_dir, repo) = init_repo();
        let oid = commit(&repo, "first");
        tag(&repo, "v1.0.0", oid);
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.note(
            &sig,
            &sig,
            Some("refs/notes/semantic-release"),
            oid,
            r#"{"channels":["next"]}"#,
            false,
        )
        .unwrap();

        let repo = Git2Repository::from_git2(repo);
        assert_eq!(
            repo.read_tag_note("v1.0.0", "refs/notes/semantic-release")
                .unwrap()
                .as_deref(),
            Some(r#"{"channels":["next"]}"#)
        );
        assert_eq!(repo.read_tag_note("v1.0.0", "refs/notes/other").unwrap(), None);
        assert_eq!(
            repo.read_tag_note("v2.0.0", "refs/notes/semantic-release").unwrap(),
            None
        );
    }
}

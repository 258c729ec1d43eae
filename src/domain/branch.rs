use crate::domain::channel::Channel;
use crate::domain::range::VersionRange;
use crate::domain::tag::{self, ReleaseTag};
use crate::domain::version::ReleaseType;
use semver::Version;
use serde::Serialize;
use std::fmt;

/// How a prerelease branch names its identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrereleaseSetting {
    /// Use the branch name (`prerelease = true`)
    BranchName,
    Identifier(String),
}

/// A configured branch before classification, annotated with its tag history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInput {
    pub name: String,
    pub range: Option<String>,
    /// `None` when no channel was configured; `Some(Channel::DEFAULT)` is an explicit default
    pub channel: Option<Channel>,
    pub prerelease: Option<PrereleaseSetting>,
    pub tags: Vec<ReleaseTag>,
}

impl BranchInput {
    pub fn new(name: impl Into<String>) -> Self {
        BranchInput {
            name: name.into(),
            range: None,
            channel: None,
            prerelease: None,
            tags: Vec::new(),
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_prerelease(mut self, prerelease: PrereleaseSetting) -> Self {
        self.prerelease = Some(prerelease);
        self
    }

    pub fn with_tags(mut self, tags: Vec<ReleaseTag>) -> Self {
        self.tags = tags;
        self
    }

    /// Prerelease identifier after resolving `BranchName` to the branch name
    pub fn prerelease_id(&self) -> Option<&str> {
        match &self.prerelease {
            Some(PrereleaseSetting::BranchName) => Some(&self.name),
            Some(PrereleaseSetting::Identifier(id)) => Some(id),
            None => None,
        }
    }

    /// Declared maintenance range: the `range` option, else the branch name
    pub fn declared_range(&self) -> &str {
        self.range.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    Release,
    Maintenance,
    Prerelease,
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BranchType::Release => "release",
            BranchType::Maintenance => "maintenance",
            BranchType::Prerelease => "prerelease",
        };
        write!(f, "{}", name)
    }
}

/// Role-specific data computed by normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BranchKind {
    Release {
        range: VersionRange,
        accept: Vec<ReleaseType>,
        main: bool,
    },
    Maintenance {
        range: VersionRange,
        accept: Vec<ReleaseType>,
        merge_range: VersionRange,
    },
    Prerelease {
        prerelease: String,
    },
}

/// A fully normalized branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
    pub channel: Channel,
    #[serde(flatten)]
    pub kind: BranchKind,
    pub tags: Vec<ReleaseTag>,
}

impl Branch {
    pub fn branch_type(&self) -> BranchType {
        match self.kind {
            BranchKind::Release { .. } => BranchType::Release,
            BranchKind::Maintenance { .. } => BranchType::Maintenance,
            BranchKind::Prerelease { .. } => BranchType::Prerelease,
        }
    }

    pub fn range(&self) -> Option<&VersionRange> {
        match &self.kind {
            BranchKind::Release { range, .. } | BranchKind::Maintenance { range, .. } => {
                Some(range)
            }
            BranchKind::Prerelease { .. } => None,
        }
    }

    /// Release types the branch may publish; prerelease branches take any
    pub fn accept(&self) -> &[ReleaseType] {
        match &self.kind {
            BranchKind::Release { accept, .. } | BranchKind::Maintenance { accept, .. } => accept,
            BranchKind::Prerelease { .. } => &ReleaseType::ALL,
        }
    }

    pub fn accepts(&self, release_type: ReleaseType) -> bool {
        self.accept().contains(&release_type)
    }

    pub fn merge_range(&self) -> Option<&VersionRange> {
        match &self.kind {
            BranchKind::Maintenance { merge_range, .. } => Some(merge_range),
            _ => None,
        }
    }

    pub fn prerelease(&self) -> Option<&str> {
        match &self.kind {
            BranchKind::Prerelease { prerelease } => Some(prerelease),
            _ => None,
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self.kind, BranchKind::Release { main: true, .. })
    }

    pub fn is_prerelease(&self) -> bool {
        self.branch_type() == BranchType::Prerelease
    }

    pub fn versions(&self) -> Vec<Version> {
        tag::versions(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    fn release_branch() -> Branch {
        Branch {
            name: "master".to_string(),
            channel: Channel::DEFAULT,
            kind: BranchKind::Release {
                range: VersionRange::new(v("1.0.0"), Some(v("1.1.0"))),
                accept: vec![ReleaseType::Patch],
                main: true,
            },
            tags: vec![ReleaseTag::new("v1.0.0", v("1.0.0"), vec![Channel::DEFAULT])],
        }
    }

    #[test]
    fn test_prerelease_id() {
        let input = BranchInput::new("beta").with_prerelease(PrereleaseSetting::BranchName);
        assert_eq!(input.prerelease_id(), Some("beta"));

        let input = BranchInput::new("beta")
            .with_prerelease(PrereleaseSetting::Identifier("rc".to_string()));
        assert_eq!(input.prerelease_id(), Some("rc"));

        assert_eq!(BranchInput::new("master").prerelease_id(), None);
    }

    #[test]
    fn test_declared_range() {
        assert_eq!(BranchInput::new("1.x").declared_range(), "1.x");
        assert_eq!(
            BranchInput::new("legacy").with_range("1.1.x").declared_range(),
            "1.1.x"
        );
    }

    #[test]
    fn test_release_branch_accessors() {
        let branch = release_branch();
        assert_eq!(branch.branch_type(), BranchType::Release);
        assert!(branch.is_main());
        assert!(branch.accepts(ReleaseType::Patch));
        assert!(!branch.accepts(ReleaseType::Minor));
        assert_eq!(branch.range().unwrap().to_string(), ">=1.0.0 <1.1.0");
        assert!(branch.merge_range().is_none());
        assert_eq!(branch.versions(), vec![v("1.0.0")]);
    }

    #[test]
    fn test_prerelease_branch_accepts_everything() {
        let branch = Branch {
            name: "beta".to_string(),
            channel: Channel::new("beta"),
            kind: BranchKind::Prerelease {
                prerelease: "beta".to_string(),
            },
            tags: vec![],
        };
        assert!(branch.is_prerelease());
        assert_eq!(branch.accept(), &ReleaseType::ALL);
        assert!(branch.range().is_none());
        assert_eq!(branch.prerelease(), Some("beta"));
    }

    #[test]
    fn test_branch_serializes_flat() {
        let json = serde_json::to_value(release_branch()).unwrap();
        assert_eq!(json["type"], "release");
        assert_eq!(json["range"], ">=1.0.0 <1.1.0");
        assert_eq!(json["accept"], serde_json::json!(["patch"]));
        assert_eq!(json["channel"], serde_json::Value::Null);
        assert_eq!(json["tags"][0]["git_tag"], "v1.0.0");
    }
}

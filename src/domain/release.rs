use crate::domain::channel::Channel;
use crate::domain::tag::ReleaseTag;
use crate::domain::version::ReleaseType;
use semver::Version;
use serde::Serialize;

/// Most recent release already published on a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastRelease {
    pub version: Version,
    pub git_tag: String,
    pub channels: Vec<Channel>,
    /// Commit of the release; the tag reference until resolved against a repository
    pub git_head: String,
    pub name: String,
}

impl LastRelease {
    pub fn from_tag(tag: &ReleaseTag) -> Self {
        LastRelease {
            version: tag.version.clone(),
            git_tag: tag.git_tag.clone(),
            channels: tag.channels.clone(),
            git_head: tag.git_tag.clone(),
            name: tag.git_tag.clone(),
        }
    }
}

/// A release to create or to add to a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    #[serde(rename = "type")]
    pub release_type: ReleaseType,
    pub version: Version,
    pub channels: Vec<Channel>,
    pub git_tag: String,
    pub name: String,
    pub git_head: Option<String>,
}

/// A version published upstream that still has to be added to this branch's channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseToAdd {
    pub last_release: Option<LastRelease>,
    pub current_release: Release,
    pub next_release: Release,
}

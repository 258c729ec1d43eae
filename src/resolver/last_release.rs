use crate::domain::{Branch, LastRelease, ReleaseTag};
use semver::Version;

fn matches_identifier(version: &Version, identifier: &str) -> bool {
    let pre = version.pre.as_str();
    pre == identifier
        || pre
            .strip_prefix(identifier)
            .is_some_and(|rest| rest.starts_with('.'))
}

fn is_candidate(branch: &Branch, tag: &ReleaseTag) -> bool {
    if tag.version.pre.is_empty() {
        return true;
    }
    match branch.prerelease() {
        Some(identifier) => {
            tag.is_on(&branch.channel) && matches_identifier(&tag.version, identifier)
        }
        None => false,
    }
}

/// Highest release on `branch` below `before`.
///
/// Stable versions always count. Prerelease branches also count their own
/// prereleases: same identifier, published on the branch's channel.
pub fn last_release(branch: &Branch, before: Option<&Version>) -> Option<LastRelease> {
    branch
        .tags
        .iter()
        .filter(|tag| is_candidate(branch, tag))
        .filter(|tag| before.map_or(true, |ceiling| tag.version < *ceiling))
        .fold(None, |best: Option<&ReleaseTag>, tag| match best {
            Some(best) if best.version >= tag.version => Some(best),
            _ => Some(tag),
        })
        .map(LastRelease::from_tag)
}

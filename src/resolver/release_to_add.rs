use crate::domain::version::release_diff;
use crate::domain::{Branch, Channel, Release, ReleaseTag, ReleaseToAdd, ReleaseType, TagFormat};
use crate::resolver::last_release::last_release;
use tracing::{debug, info};

/// Find the version published on a higher branch's channel that was merged
/// into `branch` but never added to `branch`'s own channel.
///
/// `branches` is the full priority-ordered list; only non-prerelease branches
/// after `branch` count as higher. Maintenance branches only pick up versions
/// inside their merge range floor. Nothing is returned when `branch` already
/// published something at or above the candidate on its own channel.
pub fn release_to_add(
    branch: &Branch,
    branches: &[Branch],
    format: &TagFormat,
) -> Option<ReleaseToAdd> {
    let start = branches
        .iter()
        .position(|b| b.name == branch.name)
        .map_or(0, |idx| idx + 1);
    let higher_channels: Vec<&Channel> = branches[start..]
        .iter()
        .filter(|b| !b.is_prerelease())
        .map(|b| &b.channel)
        .collect();
    let merge_floor = branch.merge_range().map(|range| &range.min);

    let candidate = branch
        .tags
        .iter()
        .filter(|tag| !tag.is_on(&branch.channel))
        .filter(|tag| tag.channels.iter().any(|c| higher_channels.contains(&c)))
        .filter(|tag| merge_floor.map_or(true, |floor| tag.version >= *floor))
        .fold(None, |best: Option<&ReleaseTag>, tag| match best {
            Some(best) if best.version >= tag.version => Some(best),
            _ => Some(tag),
        })?;

    let published = branch
        .tags
        .iter()
        .filter(|tag| tag.is_on(&branch.channel))
        .map(|tag| &tag.version)
        .max();
    if published.is_some_and(|latest| *latest >= candidate.version) {
        debug!(
            branch = %branch.name,
            candidate = %candidate.version,
            "channel already has a newer release"
        );
        return None;
    }

    let last = last_release(branch, Some(&candidate.version));
    let release_type = match &last {
        Some(last) => release_diff(&last.version, &candidate.version).unwrap_or(ReleaseType::Patch),
        None => ReleaseType::Major,
    };

    info!(
        branch = %branch.name,
        version = %candidate.version,
        %release_type,
        "found release to add to channel {}",
        branch.channel
    );

    let git_tag = format.render(&candidate.version, None);
    Some(ReleaseToAdd {
        last_release: last,
        current_release: Release {
            release_type,
            version: candidate.version.clone(),
            channels: candidate.channels.clone(),
            git_tag: candidate.git_tag.clone(),
            name: candidate.git_tag.clone(),
            git_head: Some(candidate.git_tag.clone()),
        },
        next_release: Release {
            release_type,
            version: candidate.version.clone(),
            channels: vec![branch.channel.clone()],
            name: git_tag.clone(),
            git_tag,
            git_head: Some(candidate.git_tag.clone()),
        },
    })
}

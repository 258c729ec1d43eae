use crate::domain::version::{
    increment, increment_prerelease, latest_version, with_prerelease, FIRST_PRERELEASE,
    FIRST_RELEASE,
};
use crate::domain::{Branch, LastRelease, Release, ReleaseType, TagFormat};
use crate::error::Result;
use semver::Version;
use std::cmp;
use tracing::info;

/// Version the next `release_type` release on `branch` gets.
///
/// On a prerelease branch that already published a prerelease on its own
/// channel, the existing counter is bumped unless the release type moves the
/// base version past it, in which case numbering restarts at 1. The higher of
/// the two wins.
pub fn next_version(
    branch: &Branch,
    release_type: ReleaseType,
    last_release: Option<&LastRelease>,
) -> Result<Version> {
    let Some(last) = last_release else {
        return match branch.prerelease() {
            Some(identifier) => with_prerelease(&FIRST_RELEASE, identifier, FIRST_PRERELEASE),
            None => Ok(FIRST_RELEASE),
        };
    };

    let Some(identifier) = branch.prerelease() else {
        return Ok(increment(&last.version, release_type));
    };

    if !last.version.pre.is_empty() && last.channels.contains(&branch.channel) {
        let continued = increment_prerelease(&last.version)?;
        let latest =
            latest_version(&branch.versions(), true).unwrap_or_else(|| last.version.clone());
        let restarted = with_prerelease(
            &increment(&latest, release_type),
            identifier,
            FIRST_PRERELEASE,
        )?;
        Ok(cmp::max(continued, restarted))
    } else {
        let base = Version::new(last.version.major, last.version.minor, last.version.patch);
        with_prerelease(&increment(&base, release_type), identifier, FIRST_PRERELEASE)
    }
}

/// The release to create on `branch` for a `release_type` change
pub fn next_release(
    branch: &Branch,
    release_type: ReleaseType,
    last_release: Option<&LastRelease>,
    format: &TagFormat,
) -> Result<Release> {
    let version = next_version(branch, release_type, last_release)?;
    let git_tag = format.render(&version, None);

    info!(
        branch = %branch.name,
        %release_type,
        version = %version,
        last = ?last_release.map(|l| l.version.to_string()),
        "computed next release"
    );

    Ok(Release {
        release_type,
        version,
        channels: vec![branch.channel.clone()],
        name: git_tag.clone(),
        git_tag,
        git_head: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BranchKind, Channel, ReleaseTag, VersionRange};

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    fn last(version: &str, channels: Vec<Channel>) -> LastRelease {
        LastRelease::from_tag(&ReleaseTag::new(format!("v{}", version), v(version), channels))
    }

    fn release_branch() -> Branch {
        Branch {
            name: "master".to_string(),
            channel: Channel::DEFAULT,
            kind: BranchKind::Release {
                range: VersionRange::new(v("1.0.0"), None),
                accept: ReleaseType::ALL.to_vec(),
                main: true,
            },
            tags: vec![],
        }
    }

    fn beta_branch(tags: &[&str]) -> Branch {
        Branch {
            name: "beta".to_string(),
            channel: Channel::new("beta"),
            kind: BranchKind::Prerelease {
                prerelease: "beta".to_string(),
            },
            tags: tags
                .iter()
                .map(|t| ReleaseTag::new(format!("v{}", t), v(t), vec![Channel::new("beta")]))
                .collect(),
        }
    }

    #[test]
    fn test_first_release() {
        assert_eq!(
            next_version(&release_branch(), ReleaseType::Minor, None).unwrap(),
            v("1.0.0")
        );
        assert_eq!(
            next_version(&beta_branch(&[]), ReleaseType::Major, None).unwrap(),
            v("1.0.0-beta.1")
        );
    }

    #[test]
    fn test_release_branch_increments() {
        let branch = release_branch();
        let previous = last("1.0.0", vec![Channel::DEFAULT]);
        assert_eq!(
            next_version(&branch, ReleaseType::Patch, Some(&previous)).unwrap(),
            v("1.0.1")
        );
        assert_eq!(
            next_version(&branch, ReleaseType::Minor, Some(&previous)).unwrap(),
            v("1.1.0")
        );
        assert_eq!(
            next_version(&branch, ReleaseType::Major, Some(&previous)).unwrap(),
            v("2.0.0")
        );
    }

    #[test]
    fn test_prerelease_counter_continues() {
        let branch = beta_branch(&["1.0.0-beta.1", "1.0.0-beta.2"]);
        let previous = last("1.0.0-beta.2", vec![Channel::new("beta")]);
        assert_eq!(
            next_version(&branch, ReleaseType::Minor, Some(&previous)).unwrap(),
            v("1.0.0-beta.3")
        );
    }

    #[test]
    fn test_prerelease_counter_restarts_on_new_base() {
        let branch = beta_branch(&["1.1.0-beta.1", "1.1.0-beta.2"]);
        let previous = last("1.1.0-beta.2", vec![Channel::new("beta")]);
        assert_eq!(
            next_version(&branch, ReleaseType::Major, Some(&previous)).unwrap(),
            v("2.0.0-beta.1")
        );
    }

    #[test]
    fn test_prerelease_after_stable_release() {
        let branch = beta_branch(&[]);
        let previous = last("1.0.0", vec![Channel::DEFAULT]);
        assert_eq!(
            next_version(&branch, ReleaseType::Minor, Some(&previous)).unwrap(),
            v("1.1.0-beta.1")
        );
    }

    #[test]
    fn test_prerelease_from_other_channel_starts_new_counter() {
        let branch = beta_branch(&[]);
        let previous = last("2.0.0-beta.4", vec![Channel::new("next")]);
        let next = next_version(&branch, ReleaseType::Major, Some(&previous)).unwrap();
        assert_eq!(next, v("3.0.0-beta.1"));
        assert!(next > previous.version);

        let previous = last("1.2.0-rc.3", vec![Channel::new("next")]);
        assert_eq!(
            next_version(&branch, ReleaseType::Patch, Some(&previous)).unwrap(),
            v("1.2.1-beta.1")
        );
    }

    #[test]
    fn test_next_release_carries_channel_and_tag() {
        let branch = beta_branch(&[]);
        let format = TagFormat::new("v${version}").unwrap();
        let release = next_release(&branch, ReleaseType::Minor, None, &format).unwrap();

        assert_eq!(release.version, v("1.0.0-beta.1"));
        assert_eq!(release.git_tag, "v1.0.0-beta.1");
        assert_eq!(release.name, "v1.0.0-beta.1");
        assert_eq!(release.channels, vec![Channel::new("beta")]);
        assert_eq!(release.release_type, ReleaseType::Minor);
        assert_eq!(release.git_head, None);
    }
}

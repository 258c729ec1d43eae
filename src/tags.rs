//! Tag resolution: the release history of one branch

use crate::boundary::BoundaryWarning;
use crate::domain::version::clean_version;
use crate::domain::{Channel, ReleaseTag, TagFormat};
use crate::error::Result;
use crate::git::Repository;
use serde::Deserialize;
use tracing::{debug, warn};

/// Tags of a branch plus anything odd found while reading them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagResolution {
    pub tags: Vec<ReleaseTag>,
    pub warnings: Vec<BoundaryWarning>,
}

#[derive(Debug, Deserialize)]
struct TagNote {
    #[serde(default)]
    channels: Option<Vec<Channel>>,
}

/// Channels recorded in a tag note; the default channel when nothing usable is recorded
pub fn parse_note(tag: &str, text: &str) -> (Vec<Channel>, Option<BoundaryWarning>) {
    match serde_json::from_str::<TagNote>(text) {
        Ok(TagNote {
            channels: Some(channels),
        }) if !channels.is_empty() => (channels, None),
        Ok(_) => (vec![Channel::DEFAULT], None),
        Err(e) => (
            vec![Channel::DEFAULT],
            Some(BoundaryWarning::MalformedNote {
                tag: tag.to_string(),
                reason: e.to_string(),
            }),
        ),
    }
}

/// Read every release tag reachable from `branch`, sorted ascending by
/// version with the raw tag name breaking ties.
pub fn resolve_tags<R: Repository + ?Sized>(
    repo: &R,
    branch: &str,
    format: &TagFormat,
    notes_ref: &str,
) -> Result<TagResolution> {
    let mut resolution = TagResolution::default();

    for git_tag in repo.list_branch_tags(branch)? {
        let Some(text) = format.extract(&git_tag) else {
            continue;
        };

        let version = match clean_version(text) {
            Ok(version) => version,
            Err(e) => {
                let warning = BoundaryWarning::UnparsableTag {
                    tag: git_tag.clone(),
                    reason: e.to_string(),
                };
                warn!(branch, "{}", warning);
                resolution.warnings.push(warning);
                continue;
            }
        };

        let channels = match repo.read_tag_note(&git_tag, notes_ref)? {
            Some(note) => {
                let (channels, warning) = parse_note(&git_tag, &note);
                if let Some(warning) = warning {
                    warn!(branch, "{}", warning);
                    resolution.warnings.push(warning);
                }
                channels
            }
            None => vec![Channel::DEFAULT],
        };

        resolution
            .tags
            .push(ReleaseTag::new(git_tag, version, channels));
    }

    resolution.tags.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.git_tag.cmp(&b.git_tag))
    });

    debug!(branch, count = resolution.tags.len(), "resolved branch tags");
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use semver::Version;

    const NOTES: &str = "refs/notes/semantic-release";

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    #[test]
    fn test_parse_note() {
        assert_eq!(
            parse_note("v1.0.0", r#"{"channels":["next", null]}"#),
            (vec![Channel::new("next"), Channel::DEFAULT], None)
        );
        assert_eq!(
            parse_note("v1.0.0", r#"{"other":true}"#),
            (vec![Channel::DEFAULT], None)
        );
        assert_eq!(
            parse_note("v1.0.0", r#"{"channels":[]}"#),
            (vec![Channel::DEFAULT], None)
        );

        let (channels, warning) = parse_note("v1.0.0", "not json");
        assert_eq!(channels, vec![Channel::DEFAULT]);
        assert!(matches!(
            warning,
            Some(BoundaryWarning::MalformedNote { ref tag, .. }) if tag == "v1.0.0"
        ));
    }

    #[test]
    fn test_resolve_tags_filters_and_sorts() {
        let mut repo = MockRepository::new();
        repo.add_branch(
            "master",
            &["v1.10.0", "v1.2.0", "other-1.0.0", "v1.0.0", "vfoo", "v2.0.0-beta.1"],
        );
        repo.add_note(NOTES, "v1.2.0", r#"{"channels":["next"]}"#);

        let format = TagFormat::new("v${version}").unwrap();
        let resolution = resolve_tags(&repo, "master", &format, NOTES).unwrap();

        let versions: Vec<Version> = resolution.tags.iter().map(|t| t.version.clone()).collect();
        assert_eq!(
            versions,
            vec![v("1.0.0"), v("1.2.0"), v("1.10.0"), v("2.0.0-beta.1")]
        );
        assert_eq!(resolution.tags[0].channels, vec![Channel::DEFAULT]);
        assert_eq!(resolution.tags[1].channels, vec![Channel::new("next")]);

        assert_eq!(
            resolution.warnings,
            vec![BoundaryWarning::UnparsableTag {
                tag: "vfoo".to_string(),
                reason: resolution_reason("foo"),
            }]
        );
    }

    fn resolution_reason(text: &str) -> String {
        clean_version(text).unwrap_err().to_string()
    }

    #[test]
    fn test_equal_versions_tie_break_on_tag_name() {
        let mut repo = MockRepository::new();
        repo.add_branch("master", &["vv1.0.0", "v1.0.0"]);

        let format = TagFormat::new("v${version}").unwrap();
        let tags = resolve_tags(&repo, "master", &format, NOTES).unwrap().tags;
        let names: Vec<&str> = tags.iter().map(|t| t.git_tag.as_str()).collect();
        assert_eq!(names, vec!["v1.0.0", "vv1.0.0"]);
    }

    #[test]
    fn test_custom_template() {
        let mut repo = MockRepository::new();
        repo.add_branch("master", &["pkg-1.0.0-final", "v1.1.0", "pkg-1.2.0-final"]);

        let format = TagFormat::new("pkg-${version}-final").unwrap();
        let tags = resolve_tags(&repo, "master", &format, NOTES).unwrap().tags;
        let versions: Vec<Version> = tags.into_iter().map(|t| t.version).collect();
        assert_eq!(versions, vec![v("1.0.0"), v("1.2.0")]);
    }

    #[test]
    fn test_channel_tags_read_back() {
        let format = TagFormat::new("v${version}").unwrap();
        let channel_tag = format.render(&v("1.2.3"), Some(&Channel::new("next")));

        let mut repo = MockRepository::new();
        repo.add_branch("next", &[channel_tag.as_str(), "v1.2.2"]);
        repo.add_note(NOTES, channel_tag.as_str(), r#"{"channels":["next"]}"#);

        let resolution = resolve_tags(&repo, "next", &format, NOTES).unwrap();
        assert!(resolution.warnings.is_empty());
        assert_eq!(resolution.tags.len(), 2);
        assert_eq!(resolution.tags[1].git_tag, "v1.2.3@next");
        assert_eq!(resolution.tags[1].version, v("1.2.3"));
        assert_eq!(resolution.tags[1].channels, vec![Channel::new("next")]);
    }

    #[test]
    fn test_malformed_note_is_reported() {
        let mut repo = MockRepository::new();
        repo.add_branch("master", &["v1.0.0"]);
        repo.add_note(NOTES, "v1.0.0", "{channels");

        let format = TagFormat::new("v${version}").unwrap();
        let resolution = resolve_tags(&repo, "master", &format, NOTES).unwrap();
        assert_eq!(resolution.tags[0].channels, vec![Channel::DEFAULT]);
        assert_eq!(resolution.warnings.len(), 1);
    }
}

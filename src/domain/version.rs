use crate::error::Result;
use semver::{Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version used for the first release on a branch with no history
pub const FIRST_RELEASE: Version = Version::new(1, 0, 0);

/// Counter used for the first prerelease of a base version
pub const FIRST_PRERELEASE: u64 = 1;

/// Kind of semantic-version bump, ordered patch < minor < major
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Patch,
    Minor,
    Major,
}

impl ReleaseType {
    pub const ALL: [ReleaseType; 3] = [ReleaseType::Patch, ReleaseType::Minor, ReleaseType::Major];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Patch => "patch",
            ReleaseType::Minor => "minor",
            ReleaseType::Major => "major",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "patch" => Ok(ReleaseType::Patch),
            "minor" => Ok(ReleaseType::Minor),
            "major" => Ok(ReleaseType::Major),
            other => Err(format!(
                "unknown release type '{}', expected patch, minor or major",
                other
            )),
        }
    }
}

/// The higher of two optional versions; an absent side loses
pub fn highest(a: Option<Version>, b: Option<Version>) -> Option<Version> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a >= b { a } else { b }),
        (a, b) => a.or(b),
    }
}

/// The lower of two optional versions; an absent side loses
pub fn lowest(a: Option<Version>, b: Option<Version>) -> Option<Version> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a <= b { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn candidates(versions: &[Version], with_prerelease: bool) -> impl Iterator<Item = &Version> {
    versions
        .iter()
        .filter(move |v| with_prerelease || v.pre.is_empty())
}

pub fn latest_version(versions: &[Version], with_prerelease: bool) -> Option<Version> {
    candidates(versions, with_prerelease).max().cloned()
}

pub fn earliest_version(versions: &[Version], with_prerelease: bool) -> Option<Version> {
    candidates(versions, with_prerelease).min().cloned()
}

/// Lowest version in `versions` above everything in `lower_versions`.
///
/// Falls back to the earliest stable version when `lower_versions` is empty.
pub fn first_version(versions: &[Version], lower_versions: &[Version]) -> Option<Version> {
    match lower_versions.iter().max() {
        Some(ceiling) => versions.iter().filter(|v| *v > ceiling).min().cloned(),
        None => earliest_version(versions, false),
    }
}

/// Standard increment. A prerelease of the exact target is promoted in place,
/// so `2.0.0-beta.3` bumped by `major` is `2.0.0`.
pub fn increment(version: &Version, release_type: ReleaseType) -> Version {
    let pre = !version.pre.is_empty();
    let (major, minor, patch) = (version.major, version.minor, version.patch);

    match release_type {
        ReleaseType::Major if pre && minor == 0 && patch == 0 => Version::new(major, 0, 0),
        ReleaseType::Major => Version::new(major + 1, 0, 0),
        ReleaseType::Minor if pre && patch == 0 => Version::new(major, minor, 0),
        ReleaseType::Minor => Version::new(major, minor + 1, 0),
        ReleaseType::Patch if pre => Version::new(major, minor, patch),
        ReleaseType::Patch => Version::new(major, minor, patch + 1),
    }
}

/// Bump the last numeric prerelease identifier, appending `.0` when there is
/// none. A stable version moves to the next patch's `-0` prerelease.
pub fn increment_prerelease(version: &Version) -> Result<Version> {
    if version.pre.is_empty() {
        let mut next = Version::new(version.major, version.minor, version.patch + 1);
        next.pre = Prerelease::new("0")?;
        return Ok(next);
    }

    let mut identifiers: Vec<String> = version.pre.as_str().split('.').map(String::from).collect();
    let position = identifiers
        .iter()
        .rposition(|id| id.bytes().all(|b| b.is_ascii_digit()));

    match position.and_then(|i| identifiers[i].parse::<u64>().ok().map(|n| (i, n))) {
        Some((i, n)) => identifiers[i] = (n + 1).to_string(),
        None => identifiers.push("0".to_string()),
    }

    let mut next = Version::new(version.major, version.minor, version.patch);
    next.pre = Prerelease::new(&identifiers.join("."))?;
    Ok(next)
}

/// `base` with the prerelease `{identifier}.{counter}`, build metadata dropped
pub fn with_prerelease(base: &Version, identifier: &str, counter: u64) -> Result<Version> {
    let mut version = Version::new(base.major, base.minor, base.patch);
    version.pre = Prerelease::new(&format!("{}.{}", identifier, counter))?;
    Ok(version)
}

/// Most significant component that grows from `from` to `to`.
///
/// `None` when `to` is not above `from` on the version triple.
pub fn release_diff(from: &Version, to: &Version) -> Option<ReleaseType> {
    if (to.major, to.minor, to.patch) <= (from.major, from.minor, from.patch) {
        return None;
    }

    if to.major != from.major {
        Some(ReleaseType::Major)
    } else if to.minor != from.minor {
        Some(ReleaseType::Minor)
    } else {
        Some(ReleaseType::Patch)
    }
}

/// Release types strictly below the kind of `diff`
pub fn accepted_release_types(diff: Option<ReleaseType>) -> Vec<ReleaseType> {
    match diff {
        Some(limit) => ReleaseType::ALL
            .iter()
            .copied()
            .filter(|t| *t < limit)
            .collect(),
        None => Vec::new(),
    }
}

/// Parse loosely written version text (`v1.2.3`, `=1.2.3`, surrounding whitespace)
pub fn clean_version(text: &str) -> std::result::Result<Version, semver::Error> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    Version::parse(trimmed)
}

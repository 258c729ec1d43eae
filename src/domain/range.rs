use regex::Regex;
use semver::Version;
use serde::{Serialize, Serializer};
use std::fmt;

fn matches(pattern: &str, text: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Whether `range` has the shape of a maintenance line (`1.x`, `1.x.x`, `1.2.x`, `1.2`)
pub fn is_maintenance_range(range: &str) -> bool {
    matches(r"(?i)^\d+\.(?:\d+|x)(?:\.x)?$", range)
}

/// Whether `range` covers a whole major line (`1.x`, `1.x.x`)
pub fn is_major_range(range: &str) -> bool {
    matches(r"(?i)^\d+\.x(?:\.x)?$", range)
}

/// Half-open interval `[min, max)` of publishable versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub min: Version,
    pub max: Option<Version>,
}

impl VersionRange {
    pub fn new(min: Version, max: Option<Version>) -> Self {
        VersionRange { min, max }
    }

    /// Parse `>=A`, `>=A <B`, or a partial range such as `1.x`, `1.2.x`, `2`
    pub fn parse(text: &str) -> Option<VersionRange> {
        let text = text.trim();
        if text.starts_with(">=") {
            parse_comparators(text)
        } else {
            parse_partial(text)
        }
    }

    pub fn satisfies(&self, version: &Version) -> bool {
        *version >= self.min && self.max.as_ref().map_or(true, |max| version < max)
    }

    /// True when no version can satisfy the range
    pub fn is_empty(&self) -> bool {
        self.max.as_ref().is_some_and(|max| *max <= self.min)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max {
            Some(max) => write!(f, ">={} <{}", self.min, max),
            None => write!(f, ">={}", self.min),
        }
    }
}

impl Serialize for VersionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn parse_comparators(text: &str) -> Option<VersionRange> {
    let mut parts = text.split_whitespace();
    let min = parts.next()?.strip_prefix(">=")?;
    let min = Version::parse(min.trim()).ok()?;

    let max = match parts.next() {
        Some(upper) => {
            let upper = upper.strip_prefix('<')?;
            let upper = upper.strip_suffix("-0").unwrap_or(upper);
            Some(Version::parse(upper).ok()?)
        }
        None => None,
    };

    if parts.next().is_some() {
        return None;
    }
    Some(VersionRange { min, max })
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

fn parse_partial(text: &str) -> Option<VersionRange> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    // Once a wildcard appears every later component must be a wildcard too
    let numbers: Vec<u64> = parts
        .iter()
        .take_while(|p| !is_wildcard(p))
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    if !parts[numbers.len()..].iter().all(|p| is_wildcard(p)) {
        return None;
    }

    match numbers.as_slice() {
        [] => Some(VersionRange::new(Version::new(0, 0, 0), None)),
        [major] => Some(VersionRange::new(
            Version::new(*major, 0, 0),
            Some(Version::new(major.checked_add(1)?, 0, 0)),
        )),
        [major, minor] => Some(VersionRange::new(
            Version::new(*major, *minor, 0),
            Some(Version::new(*major, minor.checked_add(1)?, 0)),
        )),
        _ => None,
    }
}

/// Exclusive upper bound of a range, or the version itself for an exact version
pub fn upper_bound(range: &str) -> Option<Version> {
    match Version::parse(range.trim()) {
        Ok(exact) => Some(exact),
        Err(_) => VersionRange::parse(range)?.max,
    }
}

/// Inclusive lower bound of a range, or the version itself for an exact version
pub fn lower_bound(range: &str) -> Option<Version> {
    match Version::parse(range.trim()) {
        Ok(exact) => Some(exact),
        Err(_) => VersionRange::parse(range).map(|r| r.min),
    }
}

//! Range, accept, and channel computation for classified branches

use crate::domain::range::{is_major_range, lower_bound, upper_bound, VersionRange};
use crate::domain::tag;
use crate::domain::version::{
    accepted_release_types, first_version, highest, increment, latest_version, lowest,
    release_diff, ReleaseType, FIRST_RELEASE,
};
use crate::domain::{Branch, BranchInput, BranchKind, Channel};
use semver::Version;
use tracing::debug;

/// Split the version line between release branches, lowest priority first.
///
/// Each branch may publish from its floor up to the first version its
/// successor carries that no branch up to this one has, or up to the next
/// breakpoint (`minor` then `major`) when the successor has nothing new.
pub fn release(branches: Vec<BranchInput>) -> Vec<Branch> {
    let breakpoints: &[ReleaseType] = if branches.len() > 2 {
        &[ReleaseType::Minor, ReleaseType::Major]
    } else {
        &[ReleaseType::Major]
    };

    let versions: Vec<Vec<Version>> = branches.iter().map(|b| tag::versions(&b.tags)).collect();
    let mut floor = versions
        .first()
        .and_then(|v| latest_version(v, false))
        .unwrap_or(FIRST_RELEASE);
    let mut carried: Vec<Version> = Vec::new();
    let mut normalized = Vec::with_capacity(branches.len());

    for (idx, input) in branches.into_iter().enumerate() {
        carried.extend(versions[idx].iter().cloned());

        let min = highest(latest_version(&versions[idx], false), Some(floor))
            .unwrap_or(FIRST_RELEASE);
        let bound = match (versions.get(idx + 1), breakpoints.get(idx)) {
            (Some(next), Some(breakpoint)) => lowest(
                first_version(next, &carried),
                Some(increment(&min, *breakpoint)),
            ),
            (Some(next), None) => first_version(next, &carried),
            (None, _) => None,
        };

        let accept = match &bound {
            Some(bound) => accepted_release_types(release_diff(&min, bound)),
            None => ReleaseType::ALL.to_vec(),
        };
        let channel = match (idx, input.channel) {
            (_, Some(channel)) => channel,
            (0, None) => Channel::DEFAULT,
            (_, None) => Channel::new(input.name.clone()),
        };

        floor = bound.clone().unwrap_or_else(|| min.clone());
        let range = VersionRange::new(min, bound);
        debug!(branch = %input.name, range = %range, ?accept, "normalized release branch");

        normalized.push(Branch {
            name: input.name,
            channel,
            kind: BranchKind::Release {
                range,
                accept,
                main: idx == 0,
            },
            tags: input.tags,
        });
    }

    normalized
}

struct Declared {
    input: BranchInput,
    text: String,
    range: VersionRange,
}

impl Declared {
    fn is_major(&self) -> bool {
        is_major_range(&self.text)
    }

    fn upper(&self) -> Version {
        self.range.max.clone().unwrap_or_else(|| self.range.min.clone())
    }
}

/// Compute maintenance branch ranges against the already normalized release branches.
///
/// Branches whose declared range does not parse are skipped; classification
/// reports them before normalization runs.
pub fn maintenance(branches: Vec<BranchInput>, release: &[Branch]) -> Vec<Branch> {
    let mut declared: Vec<Declared> = branches
        .into_iter()
        .filter_map(|input| {
            let text = input.declared_range().to_string();
            let range = VersionRange::new(lower_bound(&text)?, upper_bound(&text));
            Some(Declared { input, text, range })
        })
        .collect();

    // Narrow lines sort before the whole-major line of the same major
    declared.sort_by(|a, b| {
        (a.range.min.major, a.is_major(), &a.range.min, &a.text).cmp(&(
            b.range.min.major,
            b.is_major(),
            &b.range.min,
            &b.text,
        ))
    });

    let maintenance_versions: Vec<Version> = declared
        .iter()
        .flat_map(|d| tag::versions(&d.input.tags))
        .collect();
    let base = match release.first() {
        Some(primary) => {
            let primary_versions = primary.versions();
            first_version(&primary_versions, &maintenance_versions)
                .or_else(|| latest_version(&primary_versions, false))
                .unwrap_or(FIRST_RELEASE)
        }
        None => FIRST_RELEASE,
    };

    let mut normalized = Vec::with_capacity(declared.len());
    for idx in 0..declared.len() {
        let current = &declared[idx];
        let maintenance_min = match idx.checked_sub(1).map(|prev| &declared[prev]) {
            Some(prev) if current.is_major() && !prev.is_major() => prev.upper(),
            _ => current.range.min.clone(),
        };

        let own_versions = tag::versions(&current.input.tags);
        let min = highest(latest_version(&own_versions, false), Some(maintenance_min.clone()))
            .unwrap_or(FIRST_RELEASE);
        let max = lowest(Some(base.clone()), current.range.max.clone()).unwrap_or(FIRST_RELEASE);

        let accept = accepted_release_types(release_diff(&min, &max));
        let range = VersionRange::new(min, Some(max));
        let merge_range = VersionRange::new(maintenance_min, current.range.max.clone());
        debug!(
            branch = %current.input.name,
            range = %range,
            merge_range = %merge_range,
            ?accept,
            "normalized maintenance branch"
        );

        normalized.push((range, accept, merge_range));
    }

    declared
        .into_iter()
        .zip(normalized)
        .map(|(d, (range, accept, merge_range))| {
            let channel = d
                .input
                .channel
                .unwrap_or_else(|| Channel::new(d.input.name.clone()));
            Branch {
                name: d.input.name,
                channel,
                kind: BranchKind::Maintenance {
                    range,
                    accept,
                    merge_range,
                },
                tags: d.input.tags,
            }
        })
        .collect()
}

/// Prerelease branches keep their identifier and default their channel to their name
pub fn prerelease(branches: Vec<BranchInput>) -> Vec<Branch> {
    branches
        .into_iter()
        .map(|input| {
            let prerelease = input.prerelease_id().unwrap_or(&input.name).to_string();
            let channel = input
                .channel
                .unwrap_or_else(|| Channel::new(input.name.clone()));
            Branch {
                name: input.name,
                channel,
                kind: BranchKind::Prerelease { prerelease },
                tags: input.tags,
            }
        })
        .collect()
}

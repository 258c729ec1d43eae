use crate::domain::range::{is_maintenance_range, VersionRange};
use crate::domain::{BranchInput, BranchType};
use crate::error::{BranchError, BranchErrors};
use semver::Version;
use std::collections::{BTreeMap, HashSet};

/// Branch inputs partitioned by role, each group in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub maintenance: Vec<BranchInput>,
    pub release: Vec<BranchInput>,
    pub prerelease: Vec<BranchInput>,
}

impl Classified {
    pub fn iter(&self) -> impl Iterator<Item = &BranchInput> {
        self.maintenance
            .iter()
            .chain(self.release.iter())
            .chain(self.prerelease.iter())
    }
}

/// Role of a branch: maintenance wins over prerelease, release is the rest
pub fn branch_type(input: &BranchInput) -> BranchType {
    if input.range.is_some() || is_maintenance_range(&input.name) {
        BranchType::Maintenance
    } else if input.prerelease.is_some() {
        BranchType::Prerelease
    } else {
        BranchType::Release
    }
}

pub fn classify(inputs: Vec<BranchInput>) -> Classified {
    let mut classified = Classified::default();
    for input in inputs {
        match branch_type(&input) {
            BranchType::Maintenance => classified.maintenance.push(input),
            BranchType::Prerelease => classified.prerelease.push(input),
            BranchType::Release => classified.release.push(input),
        }
    }
    classified
}

/// Check every branch invariant, collecting all violations
pub fn validate(classified: &Classified) -> BranchErrors {
    let mut errors = BranchErrors::new();

    validate_maintenance(&classified.maintenance, &mut errors);
    validate_prerelease(&classified.prerelease, &mut errors);

    let count = classified.release.len();
    if !(1..=3).contains(&count) {
        errors.push(BranchError::ReleaseBranchCount {
            branches: classified.release.iter().map(|b| b.name.clone()).collect(),
        });
    }

    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for input in classified.iter() {
        *occurrences.entry(input.name.as_str()).or_default() += 1;
    }
    let duplicates: Vec<String> = occurrences
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    if !duplicates.is_empty() {
        errors.push(BranchError::DuplicateBranches { duplicates });
    }

    let mut seen = HashSet::new();
    for input in classified.iter() {
        if seen.insert(input.name.as_str()) && !is_valid_branch_name(&input.name) {
            errors.push(BranchError::InvalidBranchName {
                branch: input.name.clone(),
            });
        }
    }

    errors
}

fn is_valid_branch_name(name: &str) -> bool {
    git2::Reference::is_valid_name(&format!("refs/heads/{}", name))
}

fn validate_maintenance(branches: &[BranchInput], errors: &mut BranchErrors) {
    let mut by_range: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for input in branches {
        let declared = input.declared_range();
        match VersionRange::parse(declared) {
            Some(range) if is_maintenance_range(declared) => {
                by_range
                    .entry(range.to_string())
                    .or_default()
                    .push(input.name.clone());
            }
            _ => errors.push(BranchError::InvalidMaintenanceBranch {
                branch: input.name.clone(),
                range: declared.to_string(),
            }),
        }
    }

    let clashing = clashing_names(by_range);
    if !clashing.is_empty() {
        errors.push(BranchError::DuplicateMaintenanceRanges { branches: clashing });
    }
}

fn validate_prerelease(branches: &[BranchInput], errors: &mut BranchErrors) {
    let mut by_id: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for input in branches {
        let id = input.prerelease_id().unwrap_or_default();
        if is_valid_prerelease_id(id) {
            by_id.entry(id.to_string()).or_default().push(input.name.clone());
        } else {
            errors.push(BranchError::InvalidPrereleaseBranch {
                branch: input.name.clone(),
                prerelease: id.to_string(),
            });
        }
    }

    let clashing = clashing_names(by_id);
    if !clashing.is_empty() {
        errors.push(BranchError::DuplicatePrereleaseIds { branches: clashing });
    }
}

fn is_valid_prerelease_id(id: &str) -> bool {
    !id.is_empty() && Version::parse(&format!("1.0.0-{}.1", id)).is_ok()
}

fn clashing_names(groups: BTreeMap<String, Vec<String>>) -> Vec<String> {
    groups
        .into_values()
        .filter(|names| names.len() > 1)
        .flatten()
        .collect()
}

//! Pure formatting functions for UI output.
//!
//! Functions prefixed `describe_` build strings and are unit tested; the
//! `display_` functions only print.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{Branch, BranchKind, LastRelease, Release, ReleaseToAdd};
use crate::error::ReleaseError;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").for_stderr().red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!(
        "{} {}",
        style("⚠ WARNING:").for_stderr().yellow(),
        warning
    );
}

/// Print an error, listing each branch violation on its own line.
pub fn display_release_error(error: &ReleaseError) {
    match error {
        ReleaseError::InvalidBranches(errors) => {
            display_error("Invalid branch configuration");
            for branch_error in errors {
                eprintln!(
                    "  {} {}",
                    style(branch_error.code()).for_stderr().bold(),
                    branch_error
                );
            }
        }
        other => match other.code() {
            Some(code) => display_error(&format!("{}: {}", code, other)),
            None => display_error(&other.to_string()),
        },
    }
}

/// One-line summary of a normalized branch.
///
/// ```text
/// master (release, main) channel=default range=>=1.0.1 <1.1.0 accept=[patch]
/// ```
pub fn describe_branch(branch: &Branch) -> String {
    let accept = branch
        .accept()
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let detail = match &branch.kind {
        BranchKind::Release { range, main, .. } => {
            let role = if *main { ", main" } else { "" };
            format!("(release{}) channel={} range={}", role, branch.channel, range)
        }
        BranchKind::Maintenance {
            range, merge_range, ..
        } => format!(
            "(maintenance) channel={} range={} merge-range={}",
            branch.channel, range, merge_range
        ),
        BranchKind::Prerelease { prerelease } => {
            format!("(prerelease) channel={} prerelease={}", branch.channel, prerelease)
        }
    };

    format!("{} {} accept=[{}]", branch.name, detail, accept)
}

pub fn describe_last_release(last: Option<&LastRelease>) -> String {
    match last {
        Some(last) => format!("{} ({})", last.git_tag, last.version),
        None => "none, next release is the first".to_string(),
    }
}

pub fn describe_release(release: &Release) -> String {
    let channels = release
        .channels
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {} ({}) on [{}]",
        release.release_type, release.version, release.git_tag, channels
    )
}

pub fn describe_release_to_add(to_add: &ReleaseToAdd) -> String {
    format!(
        "add {} from [{}] to [{}]",
        to_add.next_release.version,
        to_add
            .current_release
            .channels
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        to_add
            .next_release
            .channels
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Display normalized branches in priority order.
pub fn display_branches(branches: &[Branch]) {
    println!("{}", style("Release branches:").bold());
    for branch in branches {
        println!("  - {}", describe_branch(branch));
    }
}

/// Display the release plan for the active branch.
pub fn display_plan(
    branch: &Branch,
    last_release: Option<&LastRelease>,
    release_to_add: Option<&ReleaseToAdd>,
    next_release: Option<&Release>,
) {
    println!("\n{}", style(format!("Branch '{}'", branch.name)).bold());
    println!("  {}", describe_branch(branch));
    println!("  Last release: {}", describe_last_release(last_release));

    match release_to_add {
        Some(to_add) => display_status(&describe_release_to_add(to_add)),
        None => display_success("Channel is up to date with higher branches"),
    }
    if let Some(next) = next_release {
        display_success(&format!("Next release: {}", describe_release(next)));
    }
}

use crate::config::{BranchConfig, ChannelConfig, PrereleaseConfig};
use crate::domain::{BranchInput, Channel, PrereleaseSetting};
use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use tracing::debug;

/// Match configured branch patterns against the repository's branches.
///
/// Entries are visited in configuration order and each repository branch is
/// claimed by the first entry that matches it. Entries matching nothing are
/// dropped. The returned inputs carry no tags yet.
pub fn expand(configs: &[BranchConfig], available: &[String]) -> Vec<BranchInput> {
    // `*` does not cross `/`
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut inputs = Vec::new();

    for config in configs {
        let pattern = Pattern::new(&config.name).ok();
        let matched: Vec<&String> = available
            .iter()
            .filter(|name| !claimed.contains(name.as_str()))
            .filter(|name| match &pattern {
                Some(pattern) => pattern.matches_with(name, options),
                None => **name == config.name,
            })
            .collect();

        if matched.is_empty() {
            debug!(pattern = %config.name, "no branch matches configured pattern");
        }

        for name in matched {
            claimed.insert(name.as_str());
            inputs.push(instantiate(config, name));
        }
    }

    inputs
}

fn substitute(value: &str, name: &str) -> String {
    value.replace("${name}", name)
}

/// Turn one configured entry into the typed input for branch `name`
pub fn instantiate(config: &BranchConfig, name: &str) -> BranchInput {
    let mut input = BranchInput::new(name);

    input.range = config
        .range
        .as_deref()
        .map(|range| substitute(range, name))
        .filter(|range| !range.is_empty());

    input.channel = match &config.channel {
        None | Some(ChannelConfig::Enabled(true)) => None,
        Some(ChannelConfig::Enabled(false)) => Some(Channel::DEFAULT),
        Some(ChannelConfig::Named(channel)) => Some(Channel::new(substitute(channel, name))),
    };

    input.prerelease = match &config.prerelease {
        None | Some(PrereleaseConfig::Enabled(false)) => None,
        Some(PrereleaseConfig::Enabled(true)) => Some(PrereleaseSetting::BranchName),
        Some(PrereleaseConfig::Named(id)) if id.is_empty() => None,
        Some(PrereleaseConfig::Named(id)) => {
            Some(PrereleaseSetting::Identifier(substitute(id, name)))
        }
    };

    input
}

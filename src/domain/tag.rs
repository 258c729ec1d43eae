use crate::domain::channel::Channel;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use semver::Version;
use serde::Serialize;

const VERSION_PLACEHOLDER: &str = "${version}";

/// Tag naming template (e.g., "v${version}", "release-${version}")
///
/// The template must contain the `${version}` placeholder exactly once and
/// must render to a valid git tag name.
#[derive(Debug, Clone)]
pub struct TagFormat {
    template: String,
    pattern: Regex,
}

impl TagFormat {
    /// Validate a template and build the pattern used to read versions back out of tags
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();

        if template.matches(VERSION_PLACEHOLDER).count() != 1 {
            return Err(ReleaseError::TagNoVersion { format: template });
        }

        let sample = template.replace(VERSION_PLACEHOLDER, "0.0.0");
        if !git2::Reference::is_valid_name(&format!("refs/tags/{}", sample)) {
            return Err(ReleaseError::InvalidTagFormat { format: template });
        }

        // A space can never appear in a valid tag, so it splits the template cleanly
        let rendered = template.replace(VERSION_PLACEHOLDER, " ");
        let (prefix, suffix) = rendered.split_once(' ').unwrap_or((rendered.as_str(), ""));
        // Channel tags carry an `@channel` after the rendered template
        let pattern = Regex::new(&format!(
            "^{}([^@]+){}(?:@.+)?$",
            regex::escape(prefix),
            regex::escape(suffix)
        ))
        .map_err(|_| ReleaseError::InvalidTagFormat {
            format: template.clone(),
        })?;

        Ok(TagFormat { template, pattern })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the tag for `version`, suffixed with `@channel` for a named channel
    ///
    /// Example: template="v${version}", version=1.2.3, channel=next -> "v1.2.3@next"
    pub fn render(&self, version: &Version, channel: Option<&Channel>) -> String {
        let tag = self
            .template
            .replace(VERSION_PLACEHOLDER, &version.to_string());
        match channel.and_then(Channel::name) {
            Some(name) => format!("{}@{}", tag, name),
            None => tag,
        }
    }

    /// The raw version text of a tag made from this template, if the tag matches
    pub fn extract<'a>(&self, tag: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(tag)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

/// One historical release found on a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseTag {
    pub git_tag: String,
    pub version: Version,
    pub channels: Vec<Channel>,
}

impl ReleaseTag {
    pub fn new(git_tag: impl Into<String>, version: Version, channels: Vec<Channel>) -> Self {
        ReleaseTag {
            git_tag: git_tag.into(),
            version,
            channels,
        }
    }

    pub fn is_on(&self, channel: &Channel) -> bool {
        self.channels.contains(channel)
    }
}

/// Versions of a tag list, in list order
pub fn versions(tags: &[ReleaseTag]) -> Vec<Version> {
    tags.iter().map(|tag| tag.version.clone()).collect()
}

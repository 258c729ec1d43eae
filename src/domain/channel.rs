use serde::{Deserialize, Serialize};
use std::fmt;

/// Distribution channel a version is published under.
///
/// The default channel has no name. Every "no channel" spelling coming from
/// configuration or tag notes (`null`, `false`, an empty string) collapses to
/// [`Channel::DEFAULT`] when the value is built, so comparisons never need to
/// care which spelling was used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub struct Channel(Option<String>);

impl Channel {
    pub const DEFAULT: Channel = Channel(None);

    /// Create a named channel; an empty name is the default channel
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Channel::DEFAULT
        } else {
            Channel(Some(name))
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<String>> for Channel {
    fn from(value: Option<String>) -> Self {
        value.map(Channel::new).unwrap_or_default()
    }
}

impl From<Channel> for Option<String> {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_default() {
        assert_eq!(Channel::new(""), Channel::DEFAULT);
        assert!(Channel::new("").is_default());
        assert_eq!(Channel::from(Some(String::new())), Channel::DEFAULT);
        assert_eq!(Channel::from(None), Channel::DEFAULT);
    }

    #[test]
    fn test_named_channel() {
        let channel = Channel::new("next");
        assert_eq!(channel.name(), Some("next"));
        assert!(!channel.is_default());
        assert_eq!(channel.to_string(), "next");
        assert_eq!(Channel::DEFAULT.to_string(), "default");
    }

    #[test]
    fn test_json_null_and_strings() {
        let channels: Vec<Channel> = serde_json::from_str(r#"[null, "next", ""]"#).unwrap();
        assert_eq!(
            channels,
            vec![Channel::DEFAULT, Channel::new("next"), Channel::DEFAULT]
        );

        let json = serde_json::to_string(&channels).unwrap();
        assert_eq!(json, r#"[null,"next",null]"#);
    }
}

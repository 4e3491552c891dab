// Item attributes and code references

use crate::config::AgentInfo;
use crate::state::TitlePath;
use serde::{Deserialize, Serialize};
use std::path::MAIN_SEPARATOR;

/// Key/value label attached to a report item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub system: bool,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
            system: false,
        }
    }

    /// Tag-style attribute without a key
    pub fn tag(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
            system: false,
        }
    }

    /// Attribute hidden from users, consumed by the server itself
    pub fn system(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
            system: true,
        }
    }
}

pub const AGENT_ATTRIBUTE_KEY: &str = "agent";
pub const SKIPPED_ISSUE_ATTRIBUTE_KEY: &str = "skippedIssue";

/// System attributes sent with the launch.
///
/// Always carries `agent = name|version`; adds `skippedIssue = false` when the
/// skipped-issue feature is turned off.
pub fn system_attributes(agent: &AgentInfo, skipped_issue: bool) -> Vec<Attribute> {
    let mut attributes = vec![Attribute::system(AGENT_ATTRIBUTE_KEY, agent.to_string())];

    if !skipped_issue {
        attributes.push(Attribute::system(SKIPPED_ISSUE_ATTRIBUTE_KEY, "false"));
    }

    attributes
}

/// Slash-joined path of a test item inside the suite hierarchy.
///
/// Empty segments and `path_to_exclude` are dropped, then the path is cut right
/// after `item_title`. Returns an empty string when `item_title` is empty or not
/// part of the hierarchy.
pub fn code_ref<T>(item: &T, item_title: &str, path_to_exclude: Option<&str>) -> String
where
    T: TitlePath + ?Sized,
{
    if item_title.is_empty() {
        return String::new();
    }

    let segments: Vec<String> = item
        .title_path()
        .into_iter()
        .filter(|segment| !segment.is_empty() && Some(segment.as_str()) != path_to_exclude)
        .collect();

    let Some(index) = segments.iter().position(|segment| segment == item_title) else {
        return String::new();
    };

    segments[..=index].join("/").replace(MAIN_SEPARATOR, "/")
}

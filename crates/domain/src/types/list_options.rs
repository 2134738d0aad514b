//! List options attached to resource queries

use serde::{Deserialize, Serialize};

/// Caller-supplied filter specification for a resource list query.
///
/// Mirrors the Kubernetes `ListOptions` shape. Only the selector pair takes
/// part in cache addressing; pagination, watch and resource-version fields
/// are deliberately left out of every digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListOptions {
    pub label_selector: String,
    pub field_selector: String,
    pub watch: bool,
    pub allow_watch_bookmarks: bool,
    pub resource_version: String,
    pub resource_version_match: String,
    pub timeout_seconds: Option<i64>,
    pub limit: i64,
    #[serde(rename = "continue")]
    pub continue_token: String,
    pub send_initial_events: Option<bool>,
}

impl ListOptions {
    pub fn with_label_selector(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = selector.into();
        self
    }

    pub fn with_field_selector(mut self, selector: impl Into<String>) -> Self {
        self.field_selector = selector.into();
        self
    }

    /// Fixed two-field projection used for hashing.
    pub fn selectors(&self) -> SelectorOptions {
        SelectorOptions::from(self)
    }
}

/// The `{labelSelector, fieldSelector}` projection of [`ListOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorOptions {
    pub label_selector: String,
    pub field_selector: String,
}

impl From<&ListOptions> for SelectorOptions {
    fn from(opts: &ListOptions) -> Self {
        Self {
            label_selector: opts.label_selector.clone(),
            field_selector: opts.field_selector.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_drops_unrelated_fields() {
        let plain = ListOptions::default().with_label_selector("app=web");
        let paged = ListOptions {
            limit: 50,
            continue_token: "eyJ2IjoibWV0YS5rOHMuaW8vdjEifQ".into(),
            resource_version: "12345".into(),
            watch: true,
            timeout_seconds: Some(30),
            ..plain.clone()
        };

        assert_eq!(plain.selectors(), paged.selectors());
    }

    #[test]
    fn test_projection_serializes_camel_case() {
        let opts = ListOptions::default()
            .with_label_selector("app=web")
            .with_field_selector("status.phase=Running");
        let json = serde_json::to_string(&opts.selectors()).unwrap();
        assert_eq!(
            json,
            r#"{"labelSelector":"app=web","fieldSelector":"status.phase=Running"}"#
        );
    }

    #[test]
    fn test_deserialize_kubernetes_shape() {
        let opts: ListOptions = serde_json::from_str(
            r#"{"labelSelector":"tier=db","limit":10,"continue":"abc"}"#,
        )
        .unwrap();
        assert_eq!(opts.label_selector, "tier=db");
        assert_eq!(opts.limit, 10);
        assert_eq!(opts.continue_token, "abc");
        assert!(opts.field_selector.is_empty());
    }
}

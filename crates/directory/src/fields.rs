//! Partial-update structure for client records.

use serde::{Deserialize, Deserializer};

/// A partial update for a client record, with named optional fields.
///
/// `alias` and `notes` are double-`Option`: the outer `None` means "field
/// omitted, leave untouched"; `Some(None)` means "explicitly cleared". Field
/// names follow the address-book wire protocol (`note`, `password`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub alias: Option<Option<String>>,

    #[serde(rename = "note", default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,

    /// Replaces the whole tag set when present; duplicates collapse.
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Per-client access secret. Only a present, non-empty value triggers a
    /// rehash; an empty string is ignored rather than clearing the secret.
    #[serde(rename = "password", default)]
    pub secret: Option<String>,
}

/// Deserialize a present-but-possibly-null field into `Some(inner)`, so an
/// omitted field (serde default, outer `None`) stays distinguishable from an
/// explicit `null`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Collapse duplicate tags, keeping first-occurrence order.
pub(crate) fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

/// Encode a tag set as the JSON array text the store expects.
pub(crate) fn tags_to_json(tags: Vec<String>) -> String {
    serde_json::to_string(&dedup_tags(tags)).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_and_cleared_are_distinguishable() {
        let omitted: ClientPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(omitted.alias, None);

        let cleared: ClientPatch = serde_json::from_str(r#"{"alias": null}"#).unwrap();
        assert_eq!(cleared.alias, Some(None));

        let set: ClientPatch = serde_json::from_str(r#"{"alias": "box"}"#).unwrap();
        assert_eq!(set.alias, Some(Some("box".to_string())));
    }

    #[test]
    fn wire_names_map_to_domain_fields() {
        let patch: ClientPatch =
            serde_json::from_str(r#"{"note": "rack 4", "password": "s3cret"}"#).unwrap();
        assert_eq!(patch.notes, Some(Some("rack 4".to_string())));
        assert_eq!(patch.secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn tags_collapse_duplicates_in_order() {
        let tags = vec!["a".into(), "b".into(), "a".into(), "c".into(), "b".into()];
        assert_eq!(dedup_tags(tags), ["a", "b", "c"]);
    }
}

//! Partial-update payloads
//!
//! Every field distinguishes "not supplied" from "supplied". Nullable
//! columns use `Option<Option<T>>`: outer `None` means absent from the
//! request, `Some(None)` means an explicit `null`.

use serde::{Deserialize, Deserializer};

/// Maps any present value, including `null`, to `Some`
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Changes to a person
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Changes to a praline
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PralinePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_vegan: Option<bool>,
    #[serde(default)]
    pub image_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_stay_none() {
        let patch: PralinePatch = serde_json::from_str(r#"{"isVegan": true}"#).unwrap();
        assert_eq!(patch.is_vegan, Some(true));
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
        assert!(patch.image_path.is_none());
    }

    #[test]
    fn test_explicit_null_is_distinguished() {
        let patch: PralinePatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(patch.description, Some(None));

        let patch: PralinePatch =
            serde_json::from_str(r#"{"description": "Zartbitter"}"#).unwrap();
        assert_eq!(patch.description, Some(Some("Zartbitter".to_string())));
    }

    #[test]
    fn test_person_patch() {
        let patch: PersonPatch = serde_json::from_str(r#"{"lastName": "Weber"}"#).unwrap();
        assert!(patch.first_name.is_none());
        assert_eq!(patch.last_name.as_deref(), Some("Weber"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<PersonPatch, _> = serde_json::from_str(r#"{"id": 3}"#);
        assert!(result.is_err());
    }
}

use super::{Column, ColumnKind, Record};
use serde::{Deserialize, Serialize};

/// Student organization keyed by its short code (e.g. `ZPR`). The code is chosen by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UCSBOrganization {
    #[serde(default)]
    pub org_code: Option<String>,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl Record for UCSBOrganization {
    type Id = String;

    const TYPE_NAME: &'static str = "UCSBOrganization";
    const PATH: &'static str = "ucsborganization";
    const TABLE: &'static str = "ucsb_organizations";
    const ID_FIELD: &'static str = "orgCode";
    const FIELDS: &'static [Column] = &[
        Column::new("orgTranslationShort", ColumnKind::Text),
        Column::new("orgTranslation", ColumnKind::Text),
        Column::new("inactive", ColumnKind::Bool),
    ];

    fn id(&self) -> Option<&String> {
        self.org_code.as_ref()
    }

    fn set_id(&mut self, id: String) {
        self.org_code = Some(id);
    }

    fn apply_update(&mut self, incoming: Self) {
        self.org_translation_short = incoming.org_translation_short;
        self.org_translation = incoming.org_translation;
        self.inactive = incoming.inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_body_without_code_deserializes() {
        let body = serde_json::json!({
            "orgCode": null,
            "orgTranslationShort": "third-organ",
            "orgTranslation": "third-organization",
            "inactive": true
        });
        let org: UCSBOrganization = serde_json::from_value(body).unwrap();
        assert_eq!(org.org_code, None);
        assert!(org.inactive);
    }

    #[test]
    fn apply_update_keeps_code() {
        let mut stored = UCSBOrganization {
            org_code: Some("FIR".into()),
            org_translation_short: "first-organ".into(),
            org_translation: "first-organization".into(),
            inactive: false,
        };
        stored.apply_update(UCSBOrganization {
            org_code: Some("SEC".into()),
            org_translation_short: "third-organ".into(),
            org_translation: "third-organization".into(),
            inactive: true,
        });
        assert_eq!(stored.org_code.as_deref(), Some("FIR"));
        assert_eq!(stored.org_translation, "third-organization");
        assert!(stored.inactive);
    }
}

use super::{Column, ColumnKind, Record};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UCSBDiningCommonsMenuItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

impl Record for UCSBDiningCommonsMenuItem {
    type Id = i64;

    const TYPE_NAME: &'static str = "UCSBDiningCommonsMenuItem";
    const PATH: &'static str = "ucsbdiningcommonsmenuitem";
    const TABLE: &'static str = "ucsb_dining_commons_menu_items";
    const ID_FIELD: &'static str = "id";
    const FIELDS: &'static [Column] = &[
        Column::new("diningCommonsCode", ColumnKind::Text),
        Column::new("name", ColumnKind::Text),
        Column::new("station", ColumnKind::Text),
    ];

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn apply_update(&mut self, incoming: Self) {
        self.dining_commons_code = incoming.dining_commons_code;
        self.name = incoming.name;
        self.station = incoming.station;
    }
}

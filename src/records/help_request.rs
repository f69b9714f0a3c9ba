use super::{Column, ColumnKind, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A student team's request for help during a lab or discussion section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

impl Record for HelpRequest {
    type Id = i64;

    const TYPE_NAME: &'static str = "HelpRequest";
    const PATH: &'static str = "HelpRequest";
    const TABLE: &'static str = "help_requests";
    const ID_FIELD: &'static str = "id";
    const FIELDS: &'static [Column] = &[
        Column::new("requesterEmail", ColumnKind::Text),
        Column::new("teamId", ColumnKind::Text),
        Column::new("tableOrBreakoutRoom", ColumnKind::Text),
        Column::new("requestTime", ColumnKind::Timestamp),
        Column::new("explanation", ColumnKind::Text),
        Column::new("solved", ColumnKind::Bool),
    ];

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn apply_update(&mut self, incoming: Self) {
        self.requester_email = incoming.requester_email;
        self.team_id = incoming.team_id;
        self.table_or_breakout_room = incoming.table_or_breakout_room;
        self.request_time = incoming.request_time;
        self.explanation = incoming.explanation;
        self.solved = incoming.solved;
    }
}

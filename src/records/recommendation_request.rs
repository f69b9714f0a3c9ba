use super::{Column, ColumnKind, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    pub date_requested: NaiveDateTime,
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

impl Record for RecommendationRequest {
    type Id = i64;

    const TYPE_NAME: &'static str = "RecommendationRequest";
    const PATH: &'static str = "recommendationrequests";
    const TABLE: &'static str = "recommendation_requests";
    const ID_FIELD: &'static str = "id";
    const FIELDS: &'static [Column] = &[
        Column::new("requesterEmail", ColumnKind::Text),
        Column::new("professorEmail", ColumnKind::Text),
        Column::new("explanation", ColumnKind::Text),
        Column::new("dateRequested", ColumnKind::Timestamp),
        Column::new("dateNeeded", ColumnKind::Timestamp),
        Column::new("done", ColumnKind::Bool),
    ];

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn apply_update(&mut self, incoming: Self) {
        self.requester_email = incoming.requester_email;
        self.professor_email = incoming.professor_email;
        self.explanation = incoming.explanation;
        self.date_requested = incoming.date_requested;
        self.date_needed = incoming.date_needed;
        self.done = incoming.done;
    }
}

use super::{Column, ColumnKind, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Review of a dining commons menu item. `item_id` refers to a
/// [`UCSBDiningCommonsMenuItem`](super::UCSBDiningCommonsMenuItem) but is not checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReview {
    #[serde(default)]
    pub id: Option<i64>,
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl Record for MenuItemReview {
    type Id = i64;

    const TYPE_NAME: &'static str = "MenuItemReview";
    const PATH: &'static str = "menuitemreview";
    const TABLE: &'static str = "menu_item_reviews";
    const ID_FIELD: &'static str = "id";
    const FIELDS: &'static [Column] = &[
        Column::new("itemId", ColumnKind::BigInt),
        Column::new("reviewerEmail", ColumnKind::Text),
        Column::new("stars", ColumnKind::Int),
        Column::new("dateReviewed", ColumnKind::Timestamp),
        Column::new("comments", ColumnKind::Text),
    ];

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    // Narrower than the other record types: item and review date stay as stored.
    fn apply_update(&mut self, incoming: Self) {
        self.reviewer_email = incoming.reviewer_email;
        self.stars = incoming.stars;
        self.comments = incoming.comments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(item_id: i64, stars: i32, when: &str, comments: &str) -> MenuItemReview {
        MenuItemReview {
            id: Some(1),
            item_id,
            reviewer_email: "carumugam@ucsb.edu".into(),
            stars,
            date_reviewed: when.parse().unwrap(),
            comments: comments.into(),
        }
    }

    #[test]
    fn apply_update_copies_only_review_fields() {
        let mut stored = review(29, 1, "2025-10-26T12:00:00", "very bad");
        let mut incoming = review(30, 5, "2025-10-27T12:00:00", "very delicious");
        incoming.reviewer_email = "rhung@ucsb.edu".into();

        stored.apply_update(incoming);

        assert_eq!(stored.item_id, 29);
        assert_eq!(stored.date_reviewed, "2025-10-26T12:00:00".parse().unwrap());
        assert_eq!(stored.stars, 5);
        assert_eq!(stored.comments, "very delicious");
        assert_eq!(stored.reviewer_email, "rhung@ucsb.edu");
    }
}

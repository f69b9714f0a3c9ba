//! Record types and the traits the generic store and handlers are written against.
//!
//! A record is a flat serde struct whose wire field names are its schema names. The identifier
//! is an `Option` so the same struct serves as a create/update payload (no id yet, or an id the
//! caller is not allowed to change) and as a stored row.

mod help_request;
mod menu_item;
mod menu_item_review;
mod organization;
mod recommendation_request;

pub use help_request::HelpRequest;
pub use menu_item::UCSBDiningCommonsMenuItem;
pub use menu_item_review::MenuItemReview;
pub use organization::UCSBOrganization;
pub use recommendation_request::RecommendationRequest;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Scalar kind of a field. Drives query-string parsing, SQL casts and DDL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    BigInt,
    Int,
    Bool,
    Timestamp,
}

impl ColumnKind {
    pub fn pg_type(&self) -> &'static str {
        match self {
            ColumnKind::Text => "TEXT",
            ColumnKind::BigInt => "BIGINT",
            ColumnKind::Int => "INTEGER",
            ColumnKind::Bool => "BOOLEAN",
            ColumnKind::Timestamp => "TIMESTAMP",
        }
    }
}

/// One field of a record, by wire (camelCase) name.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Column { name, kind }
    }
}

/// Identifier of a record type. Surrogate keys come from the store's sequence; natural keys
/// are supplied by the caller and `from_sequence` yields `None`.
pub trait RecordId:
    Clone + Debug + Display + Eq + Ord + Hash + FromStr + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ColumnKind;

    fn from_sequence(n: i64) -> Option<Self>;

    fn is_natural() -> bool {
        Self::from_sequence(1).is_none()
    }
}

impl RecordId for i64 {
    const KIND: ColumnKind = ColumnKind::BigInt;

    fn from_sequence(n: i64) -> Option<Self> {
        Some(n)
    }
}

impl RecordId for String {
    const KIND: ColumnKind = ColumnKind::Text;

    fn from_sequence(_n: i64) -> Option<Self> {
        None
    }
}

pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: RecordId;

    /// Human-readable type name used in not-found and delete messages.
    const TYPE_NAME: &'static str;
    /// Route segment under `/api/`.
    const PATH: &'static str;
    /// Table name for SQL-backed stores.
    const TABLE: &'static str;
    /// Wire name of the identifier field; also the query parameter addressing a record.
    const ID_FIELD: &'static str;
    /// Every non-identifier field, in declaration order.
    const FIELDS: &'static [Column];

    fn id(&self) -> Option<&Self::Id>;

    fn set_id(&mut self, id: Self::Id);

    /// Copy the updatable fields of `incoming` onto `self`. Never touches the identifier.
    fn apply_update(&mut self, incoming: Self);

    fn id_column() -> Column {
        Column::new(Self::ID_FIELD, <Self::Id as RecordId>::KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ids_come_from_the_sequence() {
        assert_eq!(i64::from_sequence(4), Some(4));
        assert!(!i64::is_natural());
    }

    #[test]
    fn string_ids_are_natural_keys() {
        assert_eq!(String::from_sequence(4), None);
        assert!(String::is_natural());
    }

    #[test]
    fn id_column_uses_id_kind() {
        assert_eq!(UCSBOrganization::id_column().kind, ColumnKind::Text);
        assert_eq!(UCSBOrganization::id_column().name, "orgCode");
        assert_eq!(HelpRequest::id_column().kind, ColumnKind::BigInt);
    }
}

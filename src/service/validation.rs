//! Request validation: field presence and scalar type, nothing more.

use crate::error::AppError;
use crate::records::{Column, ColumnKind, Record, RecordId};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Accepted query-string date-time layouts. Seconds may be omitted.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub struct RequestValidator;

impl RequestValidator {
    /// Build a new record from query parameters. Every field is required; natural keys are
    /// required too. Unknown parameters are ignored.
    pub fn from_query<R: Record>(params: &HashMap<String, String>) -> Result<R, AppError> {
        let mut obj = Map::new();
        if R::Id::is_natural() {
            let col = R::id_column();
            obj.insert(col.name.to_string(), query_value(&col, params)?);
        }
        for col in R::FIELDS {
            obj.insert(col.name.to_string(), query_value(col, params)?);
        }
        deserialize(Value::Object(obj))
    }

    /// Build an update payload from a JSON body. All fields are required; the identifier is
    /// optional and ignored by the caller. Date-time strings accept the same layouts as query input.
    pub fn from_body<R: Record>(body: Value) -> Result<R, AppError> {
        let mut obj = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        for col in R::FIELDS {
            let value = match obj.get_mut(col.name) {
                Some(v) if !v.is_null() => v,
                _ => return Err(AppError::Validation(format!("{} is required", col.name))),
            };
            if col.kind == ColumnKind::Timestamp {
                if let Some(parsed) = value.as_str().map(|s| convert(col, s)).transpose()? {
                    *value = parsed;
                }
            }
        }
        deserialize(Value::Object(obj))
    }
}

fn deserialize<R: Record>(value: Value) -> Result<R, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("invalid {}: {}", R::TYPE_NAME, e)))
}

fn query_value(col: &Column, params: &HashMap<String, String>) -> Result<Value, AppError> {
    let raw = params
        .get(col.name)
        .ok_or_else(|| AppError::Validation(format!("{} is required", col.name)))?;
    convert(col, raw)
}

fn convert(col: &Column, s: &str) -> Result<Value, AppError> {
    match col.kind {
        ColumnKind::Text => Ok(Value::String(s.to_string())),
        ColumnKind::BigInt | ColumnKind::Int => s
            .trim()
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| AppError::Validation(format!("{} must be an integer", col.name))),
        ColumnKind::Bool => {
            if s.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if s.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(AppError::Validation(format!("{} must be true or false", col.name)))
            }
        }
        ColumnKind::Timestamp => {
            let parsed = DATE_TIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s.trim(), f).ok())
                .ok_or_else(|| {
                    AppError::Validation(format!("{} must be a date-time like 2022-01-03T00:00:00", col.name))
                })?;
            serde_json::to_value(parsed).map_err(|e| AppError::Internal(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{HelpRequest, MenuItemReview, UCSBDiningCommonsMenuItem, UCSBOrganization};
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn builds_record_from_query() {
        let item: UCSBDiningCommonsMenuItem = RequestValidator::from_query(&params(&[
            ("diningCommonsCode", "DLG"),
            ("name", "Pancakes"),
            ("station", "Breakfast"),
        ]))
        .unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.dining_commons_code, "DLG");
        assert_eq!(item.station, "Breakfast");
    }

    #[test]
    fn query_date_times_may_omit_seconds() {
        let request: HelpRequest = RequestValidator::from_query(&params(&[
            ("requesterEmail", "cgaucho@ucsb.edu"),
            ("teamId", "04"),
            ("tableOrBreakoutRoom", "04"),
            ("requestTime", "2022-01-03T00:00"),
            ("explanation", "test_unsolved"),
            ("solved", "false"),
        ]))
        .unwrap();
        assert_eq!(request.request_time, "2022-01-03T00:00:00".parse().unwrap());
        assert!(!request.solved);
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let err = RequestValidator::from_query::<UCSBDiningCommonsMenuItem>(&params(&[
            ("diningCommonsCode", "DLG"),
            ("name", "Pancakes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "station is required"));
    }

    #[test]
    fn natural_key_is_required_on_create() {
        let err = RequestValidator::from_query::<UCSBOrganization>(&params(&[
            ("orgTranslationShort", "first-organ"),
            ("orgTranslation", "first-organization"),
            ("inactive", "false"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "orgCode is required");
    }

    #[test]
    fn rejects_mistyped_scalars() {
        let base = [
            ("itemId", "29"),
            ("reviewerEmail", "carumugam@ucsb.edu"),
            ("stars", "one"),
            ("dateReviewed", "2025-10-26T12:00:00"),
            ("comments", "very bad"),
        ];
        let err = RequestValidator::from_query::<MenuItemReview>(&params(&base)).unwrap_err();
        assert_eq!(err.to_string(), "stars must be an integer");
    }

    #[test]
    fn body_must_be_an_object_with_every_field() {
        let err = RequestValidator::from_body::<UCSBDiningCommonsMenuItem>(json!([1, 2])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = RequestValidator::from_body::<UCSBDiningCommonsMenuItem>(json!({
            "diningCommonsCode": "DLG",
            "name": null,
            "station": "Breakfast"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let ok = RequestValidator::from_body::<UCSBDiningCommonsMenuItem>(json!({
            "id": 99,
            "diningCommonsCode": "DLG",
            "name": "Pancakes",
            "station": "Breakfast"
        }))
        .unwrap();
        assert_eq!(ok.id, Some(99));
    }

    #[test]
    fn body_date_times_may_omit_seconds() {
        let review = RequestValidator::from_body::<MenuItemReview>(json!({
            "itemId": 29,
            "reviewerEmail": "carumugam@ucsb.edu",
            "stars": 3,
            "dateReviewed": "2025-11-05T12:00",
            "comments": "fine"
        }))
        .unwrap();
        assert_eq!(review.date_reviewed, "2025-11-05T12:00:00".parse().unwrap());

        let err = RequestValidator::from_body::<MenuItemReview>(json!({
            "itemId": 29,
            "reviewerEmail": "carumugam@ucsb.edu",
            "stars": 3,
            "dateReviewed": "yesterday",
            "comments": "fine"
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("dateReviewed must be a date-time")));
    }
}

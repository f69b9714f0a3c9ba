//! Builds parameterized SELECT, upsert, DELETE and DDL from record metadata.
//! Identifiers come from the record types only; every value is a text parameter cast to the
//! column's type in SQL.

use crate::case::to_snake_case;
use crate::records::{Column, ColumnKind, Record};
use serde_json::{Map, Value};

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its placeholder with the column cast, e.g. `$2::boolean`.
    fn push_param(&mut self, v: Value, kind: ColumnKind) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), kind.pg_type().to_lowercase())
    }
}

fn column_name(col: &Column) -> String {
    quoted(&to_snake_case(col.name))
}

fn all_columns<R: Record>() -> impl Iterator<Item = Column> {
    std::iter::once(R::id_column()).chain(R::FIELDS.iter().copied())
}

/// SELECT list: identifier first, then fields in declaration order.
fn select_column_list<R: Record>() -> String {
    all_columns::<R>()
        .map(|c| column_name(&c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by identifier. Caller binds the id as the sole param.
pub fn select_by_id<R: Record>(schema: &str, id: &R::Id) -> Result<QueryBuf, serde_json::Error> {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, R::TABLE);
    let id_col = R::id_column();
    let ph = q.push_param(serde_json::to_value(id)?, id_col.kind);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list::<R>(),
        table,
        column_name(&id_col),
        ph
    );
    Ok(q)
}

/// SELECT every row, ordered by identifier.
pub fn select_all<R: Record>(schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, R::TABLE);
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list::<R>(),
        table,
        column_name(&R::id_column())
    );
    q
}

/// Insert-or-replace from the record's wire representation. When the identifier is absent the
/// column is omitted so the table's sequence assigns it.
pub fn upsert<R: Record>(schema: &str, row: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, R::TABLE);
    let id_col = R::id_column();
    let has_id = row.get(id_col.name).map(|v| !v.is_null()).unwrap_or(false);

    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for col in all_columns::<R>() {
        if col.name == id_col.name && !has_id {
            continue;
        }
        let v = row.get(col.name).cloned().unwrap_or(Value::Null);
        cols.push(column_name(&col));
        placeholders.push(q.push_param(v, col.kind));
    }

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        cols.join(", "),
        placeholders.join(", ")
    );
    if has_id {
        let set_clause: Vec<String> = R::FIELDS
            .iter()
            .map(|c| {
                let name = column_name(c);
                format!("{} = EXCLUDED.{}", name, name)
            })
            .collect();
        sql.push_str(&format!(
            " ON CONFLICT ({}) DO UPDATE SET {}",
            column_name(&id_col),
            set_clause.join(", ")
        ));
    }
    sql.push_str(&format!(" RETURNING {}", select_column_list::<R>()));
    q.sql = sql;
    q
}

/// DELETE by identifier.
pub fn delete<R: Record>(schema: &str, id: &R::Id) -> Result<QueryBuf, serde_json::Error> {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, R::TABLE);
    let id_col = R::id_column();
    let ph = q.push_param(serde_json::to_value(id)?, id_col.kind);
    q.sql = format!("DELETE FROM {} WHERE {} = {}", table, column_name(&id_col), ph);
    Ok(q)
}

/// CREATE TABLE IF NOT EXISTS. Surrogate keys become BIGSERIAL, natural keys keep their type.
pub fn create_table<R: Record>(schema: &str) -> String {
    let id_col = R::id_column();
    let id_type = if <R::Id as crate::records::RecordId>::is_natural() {
        id_col.kind.pg_type()
    } else {
        "BIGSERIAL"
    };
    let mut defs = vec![format!("{} {} PRIMARY KEY", column_name(&id_col), id_type)];
    for col in R::FIELDS {
        defs.push(format!("{} {} NOT NULL", column_name(col), col.kind.pg_type()));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table(schema, R::TABLE),
        defs.join(", ")
    )
}

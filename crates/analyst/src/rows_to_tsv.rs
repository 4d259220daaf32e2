use rusqlite::types::ValueRef;
use serde_json::Value;

/// Text form of a single SQLite cell, as shown to the model in sample rows.
pub fn cell_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => v.to_string(),
        ValueRef::Text(v) => String::from_utf8_lossy(v).into_owned(),
        ValueRef::Blob(_) => "[BLOB]".to_string(),
    }
}

/// JSON form of a single SQLite cell. Non-finite reals become `null`.
pub fn cell_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::from(v),
        ValueRef::Real(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(v) => Value::String(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(_) => Value::String("[BLOB]".to_string()),
    }
}

pub fn rows_to_tsv(columns: &[String], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        "Empty result set.\n".to_string()
    } else {
        let mut tsv = columns.join("\t") + "\n";
        for row in rows {
            tsv.push_str(&row.join("\t"));
            tsv.push('\n');
        }
        tsv
    }
}

//! Shapes query rows into a single-series bar chart.

use crate::db::JsonRow;
use serde::Serialize;
use serde_json::Value;

const LABEL_KEYS: [&str; 2] = ["campaign", "name"];
const VALUE_KEYS: [&str; 1] = ["roas"];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub label_key: String,
    pub value_key: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Picks a label column (`campaign`, `name`, else the first text column)
    /// and a value column (`roas`, else the first numeric column that is not
    /// `id`). Rows lacking either value are skipped.
    pub fn from_rows(rows: &[JsonRow]) -> Option<Self> {
        let first = rows.first()?;
        let label_key = pick_key(first, &LABEL_KEYS, |v| v.is_string())?;
        let value_key = pick_key(first, &VALUE_KEYS, |v| v.is_number())?;

        let bars: Vec<Bar> = rows
            .iter()
            .filter_map(|row| {
                let label = match row.get(&label_key)? {
                    Value::String(s) => s.clone(),
                    Value::Null => return None,
                    other => other.to_string(),
                };
                let value = row.get(&value_key)?.as_f64()?;
                Some(Bar { label, value })
            })
            .collect();

        if bars.is_empty() {
            None
        } else {
            Some(Self {
                label_key,
                value_key,
                bars,
            })
        }
    }

    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

fn pick_key(row: &JsonRow, preferred: &[&str], accept: impl Fn(&Value) -> bool) -> Option<String> {
    preferred
        .iter()
        .find(|key| row.get(**key).is_some_and(&accept))
        .map(|key| key.to_string())
        .or_else(|| {
            row.iter()
                .find(|(key, value)| key.as_str() != "id" && accept(*value))
                .map(|(key, _)| key.clone())
        })
}

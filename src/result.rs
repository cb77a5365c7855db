// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Query results and the conversion from tagged wire values.
//!
//! The `/v1/query` endpoint returns rows of `{Name, Type, Value}` cells.
//! Each cell is rendered to a single string field:
//!
//! | Kind | BLOB encoding | Field |
//! |------|---------------|-------|
//! | Text, Integer, Float | either | the value's plain string form |
//! | Binary | enabled, string value | base64 of the value's bytes |
//! | Binary | enabled, other value | diagnostic naming the JSON type |
//! | Binary | disabled | empty string |
//! | Null, Other | either | empty string |

use crate::types::api::{DataRow, DataValue, ValueKind};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tracing::warn;

/// A single result row, one field per column in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub fields: Vec<String>,
}

impl ResultRow {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Rows returned by a query, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Results {
    pub rows: Vec<ResultRow>,
}

impl Results {
    /// Convert the decoded `/v1/query` body into result rows.
    pub fn from_data_rows(data: Vec<DataRow>, blob_base64: bool) -> Self {
        let rows = data
            .iter()
            .map(|row| ResultRow {
                fields: row
                    .iter()
                    .map(|value| render_value(value, blob_base64))
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }
}

impl IntoIterator for Results {
    type Item = ResultRow;
    type IntoIter = std::vec::IntoIter<ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Render one tagged cell as an output field.
///
/// Numbers keep the form `serde_json` gives them: integers print without a
/// fraction (`42`) and floats always carry one (`3.0`, `1000000.0`), never
/// exponent notation for values of that size.
pub fn render_value(value: &DataValue, blob_base64: bool) -> String {
    match value.kind {
        ValueKind::Text | ValueKind::Integer | ValueKind::Float => plain_string(&value.value),
        ValueKind::Binary if blob_base64 => match &value.value {
            Value::String(s) => STANDARD.encode(s.as_bytes()),
            other => {
                let type_name = json_type_name(other);
                warn!(
                    "Column '{}' returned a BLOB as JSON {}, expected a string",
                    value.name, type_name
                );
                format!("unexpected data type '{}' for returned BLOB", type_name)
            }
        },
        // BLOB output disabled: keep the column position with an empty placeholder
        ValueKind::Binary => String::new(),
        ValueKind::Null | ValueKind::Other => String::new(),
    }
}

/// Default string form of a JSON scalar. Strings are not quoted.
fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

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

//! DBHub.io API request/response types.
//!
//! These types map directly to the JSON structures returned by the `/v1/*`
//! endpoints. They are primarily used by `ApiClient`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Index name to owning table name, as returned by `/v1/indexes`.
pub type IndexMap = HashMap<String, String>;

/// A query result row as it arrives on the wire.
pub type DataRow = Vec<DataValue>;

/// Description of one table or view column, as returned by `/v1/columns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiColumn {
    #[serde(default)]
    pub column_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub default_value: String,
    /// Position within the primary key (1-based), or 0 when not part of it.
    #[serde(default)]
    pub primary_key: i64,
    #[serde(default)]
    pub autoincrement: bool,
    #[serde(default)]
    pub collation_seq: String,
}

impl ApiColumn {
    /// Whether the column takes part in the table's primary key.
    pub fn is_primary_key(&self) -> bool {
        self.primary_key > 0
    }
}

/// The storage class the server reports for a single query result cell.
///
/// The server sends either its numeric type code or the kind's name. Codes
/// and names outside this set (the server's `Image` code among them) decode
/// to [`ValueKind::Other`] so that new server-side kinds never break decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    Binary,
    #[default]
    Null,
    Text,
    Integer,
    Float,
    Other,
}

impl ValueKind {
    /// Map a server type code to a kind.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ValueKind::Binary,
            2 => ValueKind::Null,
            3 => ValueKind::Text,
            4 => ValueKind::Integer,
            5 => ValueKind::Float,
            _ => ValueKind::Other,
        }
    }

    /// Map a kind name (case-insensitive) to a kind.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "binary" | "blob" => ValueKind::Binary,
            "null" => ValueKind::Null,
            "text" => ValueKind::Text,
            "integer" => ValueKind::Integer,
            "float" => ValueKind::Float,
            _ => ValueKind::Other,
        }
    }
}

impl<'de> Deserialize<'de> for ValueKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw {
            Value::Number(n) => n.as_i64().map_or(ValueKind::Other, ValueKind::from_code),
            Value::String(s) => ValueKind::from_name(&s),
            _ => ValueKind::Other,
        })
    }
}

/// A single tagged cell of a query result.
///
/// `kind` decides how `value` is to be read: Text, Integer and Float arrive
/// as their natural JSON scalars, Binary arrives as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataValue {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: ValueKind,
    #[serde(rename = "Value", default)]
    pub value: Value,
}

impl DataValue {
    pub fn new(kind: ValueKind, value: Value) -> Self {
        Self {
            name: String::new(),
            kind,
            value,
        }
    }
}

/// Form parameters shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseParams<'a> {
    pub apikey: &'a str,
    pub dbowner: &'a str,
    pub dbname: &'a str,
}

/// Form parameters for `/v1/columns`.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnsRequest<'a> {
    pub apikey: &'a str,
    pub dbowner: &'a str,
    pub dbname: &'a str,
    pub table: &'a str,
}

/// Form parameters for `/v1/query`. `sql` holds the base64-encoded statement.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub apikey: &'a str,
    pub dbowner: &'a str,
    pub dbname: &'a str,
    pub sql: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind_from_numeric_code() {
        let kinds: Vec<ValueKind> = serde_json::from_str("[0, 1, 2, 3, 4, 5, 42]").unwrap();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Binary,
                ValueKind::Other,
                ValueKind::Null,
                ValueKind::Text,
                ValueKind::Integer,
                ValueKind::Float,
                ValueKind::Other,
            ]
        );
    }

    #[test]
    fn test_value_kind_from_name() {
        let kinds: Vec<ValueKind> =
            serde_json::from_str(r#"["Text", "INTEGER", "float", "Binary", "Null", "Image"]"#)
                .unwrap();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Text,
                ValueKind::Integer,
                ValueKind::Float,
                ValueKind::Binary,
                ValueKind::Null,
                ValueKind::Other,
            ]
        );
    }

    #[test]
    fn test_value_kind_unexpected_json_is_other() {
        let kind: ValueKind = serde_json::from_str("true").unwrap();
        assert_eq!(kind, ValueKind::Other);
        let kind: ValueKind = serde_json::from_str("3.5").unwrap();
        assert_eq!(kind, ValueKind::Other);
    }

    #[test]
    fn test_data_value_deserialize() {
        let value: DataValue =
            serde_json::from_str(r#"{"Name": "id", "Type": 4, "Value": 42}"#).unwrap();
        assert_eq!(value.name, "id");
        assert_eq!(value.kind, ValueKind::Integer);
        assert_eq!(value.value, json!(42));
    }

    #[test]
    fn test_data_value_missing_value_is_null() {
        let value: DataValue = serde_json::from_str(r#"{"Type": 2}"#).unwrap();
        assert_eq!(value.kind, ValueKind::Null);
        assert!(value.value.is_null());
        assert!(value.name.is_empty());
    }

    #[test]
    fn test_api_column_deserialize() {
        let body = r#"[{
            "column_id": 0,
            "name": "id",
            "data_type": "INTEGER",
            "not_null": true,
            "default_value": "",
            "primary_key": 1,
            "autoincrement": true,
            "collation_seq": ""
        }, {
            "column_id": 1,
            "name": "label",
            "data_type": "TEXT"
        }]"#;
        let columns: Vec<ApiColumn> = serde_json::from_str(body).unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert!(columns[0].not_null);
        assert!(columns[0].is_primary_key());
        assert!(columns[0].autoincrement);
        assert_eq!(columns[1].column_id, 1);
        assert_eq!(columns[1].data_type, "TEXT");
        assert!(!columns[1].is_primary_key());
    }

    #[test]
    fn test_index_map_deserialize() {
        let indexes: IndexMap =
            serde_json::from_str(r#"{"idx_name": "people", "idx_age": "people"}"#).unwrap();
        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes.get("idx_age").map(String::as_str), Some("people"));
    }
}

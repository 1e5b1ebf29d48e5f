use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::utils::{GeneratorError, Result};

/// A scalar property attached to a column definition.
///
/// Configurations are hand-written JSON, so numeric properties show up both
/// as numbers and as digit strings; the typed accessors accept either form
/// and fail on anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl PropertyValue {
    pub fn as_integer(&self) -> Result<i64> {
        match self {
            PropertyValue::Integer(n) => Ok(*n),
            PropertyValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| GeneratorError::Property(format!("'{s}' is not an integer"))),
            PropertyValue::Boolean(b) => Err(GeneratorError::Property(format!(
                "expected an integer, found boolean '{b}'"
            ))),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

/// Property bag carried by each column, keyed by property name
pub type Properties = BTreeMap<String, PropertyValue>;

/// Typed lookup over a column's property bag
pub trait PropertiesExt {
    /// Get a property as an integer, falling back to a default when absent
    fn integer_or(&self, name: &str, default: i64) -> Result<i64>;
}

impl PropertiesExt for Properties {
    fn integer_or(&self, name: &str, default: i64) -> Result<i64> {
        match self.get(name) {
            Some(value) => value.as_integer(),
            None => Ok(default),
        }
    }
}

/// One declared column: a name, a type keyword, an optional fixed/templated
/// value and a property bag.
///
/// The type is kept as the raw configuration keyword; it is resolved against
/// the closed set of generator kinds once per generation run, before any row
/// is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl Column {
    pub fn new(name: &str, column_type: &str) -> Self {
        Column {
            name: name.to_string(),
            column_type: column_type.to_string(),
            value: None,
            properties: Properties::new(),
        }
    }

    /// Set the fixed/templated value for this column
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Attach a property to this column
    pub fn with_property<V: Into<PropertyValue>>(mut self, name: &str, value: V) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }
}

/// A named generation schema: an ordered set of columns and the table the
/// output is destined for. Column order defines output column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub table_name: Option<String>,
    pub columns: Vec<Column>,
}

impl Schema {
    /// Load a schema from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load a schema from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for constructing schemas programmatically
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new(name: &str) -> Self {
        SchemaBuilder {
            schema: Schema {
                name: name.to_string(),
                table_name: None,
                columns: Vec::new(),
            },
        }
    }

    pub fn table_name(mut self, table_name: &str) -> Self {
        self.schema.table_name = Some(table_name.to_string());
        self
    }

    pub fn add_column(mut self, column: Column) -> Self {
        self.schema.columns.push(column);
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

/// A possibly schema-qualified table name, split into its parts.
///
/// `accounts.users` carries a schema name, `users` alone does not; anything
/// beyond the first two dot-separated parts is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInformation {
    pub schema_name: Option<String>,
    pub table_name: String,
}

impl TableInformation {
    pub fn new(table_name: &str) -> Result<Self> {
        if table_name.trim().is_empty() {
            return Err(GeneratorError::InvalidTableName);
        }

        let parts: Vec<&str> = table_name.split('.').collect();
        if parts.len() > 1 {
            Ok(TableInformation {
                schema_name: Some(parts[0].to_string()),
                table_name: parts[1].to_string(),
            })
        } else {
            Ok(TableInformation {
                schema_name: None,
                table_name: parts[0].to_string(),
            })
        }
    }

    pub fn has_schema_name(&self) -> bool {
        self.schema_name.is_some()
    }

    /// The name as it should appear in an INSERT statement
    pub fn qualified_name(&self) -> String {
        match &self.schema_name {
            Some(schema) => format!("{}.{}", schema, self.table_name),
            None => self.table_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_property_integer_from_number() {
        let value = PropertyValue::Integer(42);
        assert_eq!(value.as_integer().unwrap(), 42);
    }

    #[test]
    fn test_property_integer_from_text() {
        let value = PropertyValue::Text("5".to_string());
        assert_eq!(value.as_integer().unwrap(), 5);

        let negative = PropertyValue::Text("-3".to_string());
        assert_eq!(negative.as_integer().unwrap(), -3);
    }

    #[test]
    fn test_property_integer_type_mismatch() {
        assert!(PropertyValue::Boolean(true).as_integer().is_err());
        assert!(
            PropertyValue::Text("not a number".to_string())
                .as_integer()
                .is_err()
        );
    }

    #[test]
    fn test_properties_integer_or_default() {
        let mut properties = Properties::new();
        properties.insert("minValue".to_string(), PropertyValue::Integer(100));

        assert_eq!(properties.integer_or("minValue", 0).unwrap(), 100);
        assert_eq!(properties.integer_or("maxValue", 200).unwrap(), 200);
    }

    #[test]
    fn test_schema_builder() {
        let schema = SchemaBuilder::new("users")
            .table_name("app.users")
            .add_column(Column::new("Id", "guid").with_value("INDEXED"))
            .add_column(Column::new("UserName", "string").with_value("user_##INDEX##"))
            .build();

        assert_eq!(schema.name, "users");
        assert_eq!(schema.table_name.as_deref(), Some("app.users"));
        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.columns[0].name, "Id");
        assert_eq!(schema.columns[1].value.as_deref(), Some("user_##INDEX##"));
    }

    #[test]
    fn test_schema_from_json() {
        let json = r#"{
            "name": "users",
            "tableName": "app.users",
            "columns": [
                {
                    "name": "Id",
                    "type": "guid",
                    "value": "INDEXED",
                    "properties": { "guidIndex": 2 }
                },
                {
                    "name": "Age",
                    "type": "numeric",
                    "properties": { "minValue": 18, "maxValue": "65" }
                },
                {
                    "name": "UserName",
                    "type": "string",
                    "value": "user_##INDEX##"
                }
            ]
        }"#;

        let schema = Schema::from_json_str(json).unwrap();

        assert_eq!(schema.name, "users");
        assert_eq!(schema.table_name.as_deref(), Some("app.users"));
        assert_eq!(schema.columns.len(), 3);

        let id = &schema.columns[0];
        assert_eq!(id.column_type, "guid");
        assert_eq!(id.properties.integer_or("guidIndex", 0).unwrap(), 2);

        let age = &schema.columns[1];
        assert_eq!(age.value, None);
        assert_eq!(age.properties.integer_or("minValue", 0).unwrap(), 18);
        assert_eq!(age.properties.integer_or("maxValue", 0).unwrap(), 65);
    }

    #[test]
    fn test_schema_json_round_trip() {
        let schema = SchemaBuilder::new("events")
            .add_column(
                Column::new("CreatedDate", "date")
                    .with_value("NOW")
                    .with_property("addDays", -1i64),
            )
            .build();

        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("\"tableName\":null"));
        assert!(json.contains("\"type\":\"date\""));

        let restored = Schema::from_json_str(&json).unwrap();
        assert_eq!(restored.columns[0].name, "CreatedDate");
        assert_eq!(
            restored.columns[0].properties.integer_or("addDays", 0).unwrap(),
            -1
        );
    }

    #[test]
    fn test_table_information_blank_name() {
        assert!(TableInformation::new("").is_err());
        assert!(TableInformation::new(" ").is_err());
        assert!(TableInformation::new("\t").is_err());
    }

    #[test]
    fn test_table_information_table_only() {
        let info = TableInformation::new("test_table").unwrap();

        assert_eq!(info.table_name, "test_table");
        assert_eq!(info.schema_name, None);
        assert!(!info.has_schema_name());
        assert_eq!(info.qualified_name(), "test_table");
    }

    #[test]
    fn test_table_information_with_schema() {
        let info = TableInformation::new("test_schema.test_table").unwrap();

        assert_eq!(info.table_name, "test_table");
        assert_eq!(info.schema_name.as_deref(), Some("test_schema"));
        assert!(info.has_schema_name());
        assert_eq!(info.qualified_name(), "test_schema.test_table");
    }
}

//! Bulkgen is a schema-driven synthetic test-data generator.
//!
//! Given a declarative schema (named, typed columns with fixed templated
//! values or generation rules) it produces rows of formatted values ready to
//! be written as delimited text or SQL insert statements and bulk-loaded into
//! a database. Fixed values may contain `##INDEX##`, `##RANDOM(a,b)##` and
//! `{list-name}` substitution tokens.
//!
//! # Example
//!
//! ```rust
//! use bulkgen::{Column, DataGenerator, InMemoryListSource, ListStore, OutputType, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new("users")
//!     .add_column(Column::new("Id", "numeric").with_value("##INDEX##"))
//!     .add_column(Column::new("UserName", "string").with_value("user_##INDEX##"))
//!     .build();
//!
//! let lists = ListStore::new(Box::new(InMemoryListSource::new()));
//! let mut generator = DataGenerator::new(schema, lists, OutputType::Csv);
//!
//! let rows = generator.generate(2).unwrap();
//! assert_eq!(rows[0].to_csv_row(), "0,\"user_0\"");
//! assert_eq!(rows[1].to_csv_row(), "1,\"user_1\"");
//! ```

pub mod generator;
pub mod lists;
pub mod row;
pub mod schema;
pub mod template;
pub mod utils;
pub mod writer;

pub use generator::{ColumnKind, DATE_TIME_FORMAT, DataGenerator};
pub use lists::{FileListSource, InMemoryListSource, ListSource, ListStore, extract_list_names};
pub use row::{DataColumn, DataRow};
pub use schema::{Column, Properties, PropertiesExt, PropertyValue, Schema, SchemaBuilder};
pub use utils::{GeneratorError, OutputType, Result};

// Re-export the remaining collaborator-facing pieces
pub use schema::TableInformation;
pub use template::TemplateResolver;
pub use writer::{write_csv, write_sql};

//! Generate order rows and print them as one multi-row INSERT statement.

use bulkgen::{
    Column, DataGenerator, InMemoryListSource, ListStore, OutputType, SchemaBuilder,
    TableInformation, write_sql,
};
use std::io;

fn main() -> bulkgen::Result<()> {
    let schema = SchemaBuilder::new("orders")
        .table_name("shop.orders")
        .add_column(Column::new("OrderId", "guid"))
        .add_column(Column::new("CustomerName", "list").with_value("{company-name}"))
        .add_column(Column::new("Reference", "string").with_value("ORD_##INDEX##_##RANDOM(100, 999)##"))
        .add_column(Column::new("PlacedAt", "date").with_value("NOW"))
        .build();

    let source = InMemoryListSource::new().with_list(
        "company-name",
        &["Acme Corp", "Initech", "Globex", "O'Connor Ltd"],
    );

    let table = TableInformation::new(schema.table_name.as_deref().unwrap_or(&schema.name))?;
    let mut generator =
        DataGenerator::new(schema, ListStore::new(Box::new(source)), OutputType::Sql);

    let rows = generator.generate(5)?;
    write_sql(&table, &rows, &mut io::stdout().lock())?;

    Ok(())
}

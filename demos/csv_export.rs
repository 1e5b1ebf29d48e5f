//! Generate a small batch of user rows and print them as CSV.

use bulkgen::{
    Column, DataGenerator, InMemoryListSource, ListStore, OutputType, SchemaBuilder, write_csv,
};
use std::io;

fn main() -> bulkgen::Result<()> {
    let schema = SchemaBuilder::new("users")
        .table_name("app.users")
        .add_column(Column::new("Id", "guid").with_value("INDEXED"))
        .add_column(Column::new("FullName", "list").with_value("{first-name} {surname}"))
        .add_column(Column::new("SignUpDate", "date").with_value("YESTERDAY"))
        .add_column(
            Column::new("Score", "numeric")
                .with_property("minValue", 0i64)
                .with_property("maxValue", 100i64),
        )
        .add_column(Column::new("IsActive", "boolean").with_value("true"))
        .build();

    let source = InMemoryListSource::new()
        .with_list("first-name", &["Lee", "Sam", "Kim", "Alex"])
        .with_list("surname", &["Richardson", "Porter", "Hale"]);

    let mut generator =
        DataGenerator::new(schema, ListStore::new(Box::new(source)), OutputType::Csv);

    let rows = generator.generate(10)?;
    write_csv(&rows, &mut io::stdout().lock())?;

    Ok(())
}

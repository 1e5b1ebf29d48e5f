use std::io::Write;

use crate::row::DataRow;
use crate::schema::TableInformation;
use crate::utils::Result;

/// Write rows as comma-separated lines, one line per row
pub fn write_csv<W: Write>(rows: &[DataRow], out: &mut W) -> Result<()> {
    log::debug!("writing {} csv rows", rows.len());

    for row in rows {
        writeln!(out, "{}", row.to_csv_row())?;
    }

    Ok(())
}

/// Write rows as one multi-row INSERT statement. Column names are taken from
/// the first row and backtick-quoted; an empty row set writes nothing.
pub fn write_sql<W: Write>(
    table: &TableInformation,
    rows: &[DataRow],
    out: &mut W,
) -> Result<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };

    log::debug!(
        "writing {} insert values for {}",
        rows.len(),
        table.qualified_name()
    );

    let column_names = first
        .columns()
        .iter()
        .map(|col| format!("`{}`", col.name()))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "INSERT INTO {} ({})", table.qualified_name(), column_names)?;
    writeln!(out, "VALUES")?;

    for (position, row) in rows.iter().enumerate() {
        let values = row
            .columns()
            .iter()
            .map(|col| col.value())
            .collect::<Vec<_>>()
            .join(", ");

        let terminator = if position + 1 == rows.len() { ";" } else { "," };
        writeln!(out, "  ({values}){terminator}")?;
    }

    Ok(())
}

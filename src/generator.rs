use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::lists::ListStore;
use crate::row::{DataColumn, DataRow};
use crate::schema::{Column, PropertiesExt, Schema};
use crate::template::{TemplateResolver, effective_index};
use crate::utils::{GeneratorError, OutputType, Result};

/// Canonical output pattern for generated date/time values
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker emitted for absent values; rendered bare, never quoted
const NULL_VALUE: &str = "NULL";

/// The closed set of column kinds the generator knows how to produce.
/// Configuration keywords resolve to this enum once per run, before the
/// first row; dispatch below is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    String,
    Date,
    Guid,
    Numeric,
    Boolean,
    List,
}

impl ColumnKind {
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(ColumnKind::String),
            "date" => Some(ColumnKind::Date),
            "guid" => Some(ColumnKind::Guid),
            "numeric" => Some(ColumnKind::Numeric),
            "boolean" => Some(ColumnKind::Boolean),
            "list" => Some(ColumnKind::List),
            _ => None,
        }
    }
}

/// Shared per-run state threaded through every value-producing call
struct ValueContext<'a> {
    output_type: OutputType,
    quote: char,
    resolver: &'a TemplateResolver,
    lists: &'a ListStore,
    rng: &'a mut StdRng,
}

/// Produces rows of formatted column values for one schema.
///
/// One generator owns one random source and one list cache for the whole
/// run; seed it through [`DataGenerator::with_seed`] when reproducible
/// output is needed.
pub struct DataGenerator {
    schema: Schema,
    lists: ListStore,
    output_type: OutputType,
    resolver: TemplateResolver,
    rng: StdRng,
}

impl DataGenerator {
    pub fn new(schema: Schema, lists: ListStore, output_type: OutputType) -> Self {
        Self::with_rng(schema, lists, output_type, StdRng::from_entropy())
    }

    /// Construct with a seeded random source for reproducible runs
    pub fn with_seed(schema: Schema, lists: ListStore, output_type: OutputType, seed: u64) -> Self {
        Self::with_rng(schema, lists, output_type, StdRng::seed_from_u64(seed))
    }

    fn with_rng(schema: Schema, lists: ListStore, output_type: OutputType, rng: StdRng) -> Self {
        DataGenerator {
            schema,
            lists,
            output_type,
            resolver: TemplateResolver::new(),
            rng,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    /// Generate `count` rows using the output mode's conventional quote
    /// character.
    pub fn generate(&mut self, count: u64) -> Result<Vec<DataRow>> {
        self.generate_rows(count, self.output_type.quote_char())
    }

    /// Generate `count` rows in strictly increasing index order.
    ///
    /// Any error aborts the whole call; no partial row set is ever
    /// returned. A count of zero returns immediately without touching the
    /// list store.
    pub fn generate_rows(&mut self, count: u64, quote: char) -> Result<Vec<DataRow>> {
        log::info!("generating {} records for '{}'", count, self.schema.name);

        if count == 0 {
            return Ok(Vec::new());
        }

        // Resolve every declared type before producing anything, so an
        // unknown keyword fails the call with no rows generated.
        let kinds = self
            .schema
            .columns
            .iter()
            .map(|column| self.resolve_kind(column))
            .collect::<Result<Vec<_>>>()?;

        self.lists.ensure_loaded(&self.schema)?;

        let schema = &self.schema;
        let mut ctx = ValueContext {
            output_type: self.output_type,
            quote,
            resolver: &self.resolver,
            lists: &self.lists,
            rng: &mut self.rng,
        };

        let mut rows = Vec::with_capacity(count as usize);
        for index in 0..count {
            let columns = schema
                .columns
                .iter()
                .zip(&kinds)
                .map(|(column, kind)| {
                    let value = generate_value(column, *kind, index, &mut ctx)?;
                    Ok(DataColumn::new(&column.name, value))
                })
                .collect::<Result<Vec<_>>>()?;

            rows.push(DataRow::new(columns));
        }

        Ok(rows)
    }

    fn resolve_kind(&self, column: &Column) -> Result<ColumnKind> {
        ColumnKind::parse(&column.column_type).ok_or_else(|| {
            GeneratorError::UnsupportedColumnType {
                column_type: column.column_type.clone(),
                column: column.name.clone(),
                schema: self.schema.name.clone(),
            }
        })
    }
}

fn generate_value(
    column: &Column,
    kind: ColumnKind,
    index: u64,
    ctx: &mut ValueContext,
) -> Result<String> {
    match kind {
        ColumnKind::String => string_value(column, index, ctx),
        ColumnKind::Date => date_value(column, ctx.quote),
        ColumnKind::Guid => guid_value(column, index, ctx),
        ColumnKind::Numeric => numeric_value(column, index, ctx),
        ColumnKind::Boolean => Ok(boolean_value(column)),
        ColumnKind::List => list_value(column, ctx),
    }
}

fn string_value(column: &Column, index: u64, ctx: &mut ValueContext) -> Result<String> {
    let Some(template) = &column.value else {
        return Ok(NULL_VALUE.to_string());
    };

    let resolved = ctx
        .resolver
        .resolve(template, effective_index(column, index)?, ctx.rng)?;

    Ok(quote_escaped(&resolved, ctx))
}

fn date_value(column: &Column, quote: char) -> Result<String> {
    let base = match &column.value {
        None => Local::now().naive_local(),
        Some(raw) => match raw.to_uppercase().as_str() {
            "NOW" => Local::now().naive_local(),
            "YESTERDAY" => Local::now().naive_local() - Duration::days(1),
            "TOMORROW" => Local::now().naive_local() + Duration::days(1),
            _ => parse_date_literal(raw)?,
        },
    };

    let add_days = column.properties.integer_or("addDays", 0)?;
    let add_hours = column.properties.integer_or("addHours", 0)?;
    let adjusted = base + Duration::days(add_days) + Duration::hours(add_hours);

    Ok(format!("{0}{1}{0}", quote, adjusted.format(DATE_TIME_FORMAT)))
}

fn parse_date_literal(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| GeneratorError::Format(format!("'{raw}' is not a valid date/time literal")))
}

fn guid_value(column: &Column, index: u64, ctx: &mut ValueContext) -> Result<String> {
    let id = match &column.value {
        Some(v) if v.eq_ignore_ascii_case("INDEXED") => indexed_guid(column, index)?,
        _ => random_guid(ctx.rng),
    };

    Ok(format!("{0}{1}{0}", ctx.quote, id))
}

/// Deterministic identifier: the effective index as 12 hex digits, high 8
/// into the first group and low 4 into the second; `guidIndex` fills the
/// final group.
fn indexed_guid(column: &Column, index: u64) -> Result<String> {
    let effective = (effective_index(column, index)?.max(0) as u64) & 0xFFFF_FFFF_FFFF;
    let guid_index =
        (column.properties.integer_or("guidIndex", 0)? as u64) & 0xFFFF_FFFF_FFFF;

    let high = effective >> 16;
    let low = effective & 0xFFFF;

    Ok(format!("{high:08x}-{low:04x}-0000-0000-{guid_index:012x}"))
}

fn random_guid(rng: &mut StdRng) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

fn numeric_value(column: &Column, index: u64, ctx: &mut ValueContext) -> Result<String> {
    if let Some(template) = &column.value {
        return ctx
            .resolver
            .resolve(template, effective_index(column, index)?, ctx.rng);
    }

    let min = column.properties.integer_or("minValue", i32::MIN as i64)?;
    let max = column.properties.integer_or("maxValue", i32::MAX as i64)?;
    if min > max {
        return Err(GeneratorError::Range {
            name: column.name.clone(),
            min,
            max,
        });
    }

    // Inclusive on both ends; the exact upper bound must be reachable.
    Ok(ctx.rng.gen_range(min..=max).to_string())
}

fn boolean_value(column: &Column) -> String {
    match &column.value {
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => "1".to_string(),
        _ => "0".to_string(),
    }
}

fn list_value(column: &Column, ctx: &mut ValueContext) -> Result<String> {
    let template = column
        .value
        .as_deref()
        .ok_or_else(|| GeneratorError::MissingListTemplate(column.name.clone()))?;

    let resolved = ctx.lists.resolve(template, ctx.rng)?;
    Ok(quote_escaped(&resolved, ctx))
}

fn quote_escaped(value: &str, ctx: &ValueContext) -> String {
    let escaped = ctx.output_type.escape_value(value, ctx.quote);
    format!("{0}{1}{0}", ctx.quote, escaped)
}

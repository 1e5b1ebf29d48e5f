use rand::Rng;
use regex::Regex;

use crate::schema::{Column, PropertiesExt};
use crate::utils::{GeneratorError, Result};

/// Token substituted with the effective row index
pub const INDEX_TOKEN: &str = "##INDEX##";

const RANDOM_TOKEN_PATTERN: &str = r"##RANDOM\((\d+),\s*(\d+)\)##";

/// The index actually substituted for a row: the zero-based row index offset
/// by `indexStartValue` and clamped to `indexMaxValue`. Runaway sequences
/// clamp rather than overflow.
pub fn effective_index(column: &Column, row_index: u64) -> Result<i64> {
    let start = column.properties.integer_or("indexStartValue", 0)?;
    let max = column.properties.integer_or("indexMaxValue", i64::MAX)?;

    Ok(start.saturating_add(row_index as i64).min(max))
}

/// Expands `##INDEX##` and `##RANDOM(a,b)##` tokens inside fixed values.
#[derive(Debug)]
pub struct TemplateResolver {
    random_regex: Regex,
}

impl TemplateResolver {
    pub fn new() -> Self {
        TemplateResolver {
            random_regex: Regex::new(RANDOM_TOKEN_PATTERN).unwrap(),
        }
    }

    /// Resolve a template for one row. All `##INDEX##` occurrences are
    /// substituted textually before random tokens are scanned, so an index
    /// value may legally form part of a random token's bounds.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        template: &str,
        index: i64,
        rng: &mut R,
    ) -> Result<String> {
        let value = template.replace(INDEX_TOKEN, &index.to_string());
        self.resolve_random(&value, rng)
    }

    /// Each `##RANDOM(a,b)##` occurrence gets its own independent draw from
    /// the half-open range `[a, b)`, left to right. Two tokens in the same
    /// template are free to differ.
    fn resolve_random<R: Rng + ?Sized>(&self, value: &str, rng: &mut R) -> Result<String> {
        let mut result = String::with_capacity(value.len());
        let mut last = 0;

        for caps in self.random_regex.captures_iter(value) {
            let token = caps.get(0).unwrap();
            let low = parse_bound(&caps[1])?;
            let high = parse_bound(&caps[2])?;

            result.push_str(&value[last..token.start()]);
            result.push_str(&draw(low, high, rng)?.to_string());
            last = token.end();
        }

        result.push_str(&value[last..]);
        Ok(result)
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bound(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| GeneratorError::Format(format!("'{raw}' is not a valid random bound")))
}

// Upper-exclusive, matching the conventional RNG call; equal bounds collapse
// to the lower bound.
fn draw<R: Rng + ?Sized>(low: i64, high: i64, rng: &mut R) -> Result<i64> {
    if low > high {
        return Err(GeneratorError::Range {
            name: "##RANDOM##".to_string(),
            min: low,
            max: high,
        });
    }

    if low == high {
        return Ok(low);
    }

    Ok(rng.gen_range(low..high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn resolver() -> TemplateResolver {
        TemplateResolver::new()
    }

    #[test]
    fn test_index_replaces_all_occurrences() {
        let mut rng = StdRng::seed_from_u64(1);
        let value = resolver().resolve("a_##INDEX##_b_##INDEX##", 7, &mut rng).unwrap();
        assert_eq!(value, "a_7_b_7");
    }

    #[test]
    fn test_random_within_bounds() {
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let value = resolver()
                .resolve("VALUE_##RANDOM(10, 99)##_TEST", 0, &mut rng)
                .unwrap();
            let middle: i64 = value
                .strip_prefix("VALUE_")
                .and_then(|v| v.strip_suffix("_TEST"))
                .unwrap()
                .parse()
                .unwrap();
            assert!((10..99).contains(&middle), "out of range: {middle}");
        }
    }

    #[test]
    fn test_multiple_randoms_draw_independently() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = resolver()
            .resolve("##RANDOM(1, 999999)##_##RANDOM(1, 999999)##", 0, &mut rng)
            .unwrap();

        let parts: Vec<&str> = value.split('_').collect();
        assert_eq!(parts.len(), 2);
        assert_ne!(parts[0], parts[1]);
    }

    #[test]
    fn test_equal_bounds_collapse() {
        let mut rng = StdRng::seed_from_u64(3);
        let value = resolver().resolve("##RANDOM(5, 5)##", 0, &mut rng).unwrap();
        assert_eq!(value, "5");
    }

    #[test]
    fn test_inverted_bounds_fail() {
        let mut rng = StdRng::seed_from_u64(4);
        let result = resolver().resolve("##RANDOM(9, 2)##", 0, &mut rng);
        assert!(matches!(result, Err(GeneratorError::Range { .. })));
    }

    #[test]
    fn test_index_feeds_random_bounds() {
        // ##INDEX## is substituted before random tokens are scanned
        let mut rng = StdRng::seed_from_u64(5);
        let value = resolver()
            .resolve("##RANDOM(1,##INDEX##)##", 2, &mut rng)
            .unwrap();
        assert_eq!(value, "1");
    }

    #[test]
    fn test_effective_index_defaults() {
        let column = Column::new("Id", "numeric");
        assert_eq!(effective_index(&column, 0).unwrap(), 0);
        assert_eq!(effective_index(&column, 9).unwrap(), 9);
    }

    #[test]
    fn test_effective_index_start_offset() {
        let column = Column::new("Id", "numeric").with_property("indexStartValue", 10i64);
        assert_eq!(effective_index(&column, 3).unwrap(), 13);
    }

    #[test]
    fn test_effective_index_clamps_to_max() {
        let column = Column::new("Id", "numeric")
            .with_property("indexStartValue", 0i64)
            .with_property("indexMaxValue", 3i64);
        assert_eq!(effective_index(&column, 2).unwrap(), 2);
        assert_eq!(effective_index(&column, 10).unwrap(), 3);
    }
}

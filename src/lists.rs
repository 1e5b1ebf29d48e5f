use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::schema::Schema;
use crate::utils::{GeneratorError, Result};

/// Pattern for a `{list-name}` token; doubled braces are an escape and the
/// surrounding characters are checked separately since the token must not be
/// nested inside further braces.
const LIST_TOKEN_PATTERN: &str = r"\{([^{}]+)\}";

/// Backing source for named value lists.
///
/// The engine only ever asks a source for a complete list by name; whether
/// that list lives in a file, in memory or somewhere remote is the source's
/// concern.
pub trait ListSource: fmt::Debug {
    /// Produce the full contents of the named list, or fail with
    /// `ListNotFound` when no such list exists.
    fn load(&self, name: &str) -> Result<Vec<String>>;
}

/// Loads lists from a directory of `<name>.json` files, each containing a
/// JSON array of strings.
#[derive(Debug, Clone)]
pub struct FileListSource {
    location: PathBuf,
}

impl FileListSource {
    pub fn new<P: Into<PathBuf>>(location: P) -> Self {
        FileListSource {
            location: location.into(),
        }
    }
}

impl ListSource for FileListSource {
    fn load(&self, name: &str) -> Result<Vec<String>> {
        let path = self.location.join(format!("{name}.json"));
        if !path.exists() {
            return Err(GeneratorError::ListNotFound(name.to_string()));
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// In-memory list source for tests and demos
#[derive(Debug, Clone, Default)]
pub struct InMemoryListSource {
    lists: HashMap<String, Vec<String>>,
}

impl InMemoryListSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, name: &str, values: &[&str]) -> Self {
        self.lists.insert(
            name.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }
}

impl ListSource for InMemoryListSource {
    fn load(&self, name: &str) -> Result<Vec<String>> {
        self.lists
            .get(name)
            .cloned()
            .ok_or_else(|| GeneratorError::ListNotFound(name.to_string()))
    }
}

/// Cache of named value lists for one generation run.
///
/// Every list referenced anywhere in the schema is loaded before the first
/// row is generated; `pick` then samples uniformly with replacement.
#[derive(Debug)]
pub struct ListStore {
    source: Box<dyn ListSource>,
    lists: HashMap<String, Vec<String>>,
    token_regex: Regex,
}

impl ListStore {
    pub fn new(source: Box<dyn ListSource>) -> Self {
        ListStore {
            source,
            lists: HashMap::new(),
            token_regex: Regex::new(LIST_TOKEN_PATTERN).unwrap(),
        }
    }

    /// Load every list referenced by the schema's list-typed columns.
    /// Loading is idempotent per name; nothing is loaded twice in one call.
    pub fn ensure_loaded(&mut self, schema: &Schema) -> Result<()> {
        let names: BTreeSet<String> = schema
            .columns
            .iter()
            .filter(|c| c.column_type == "list")
            .filter_map(|c| c.value.as_deref())
            .flat_map(extract_list_names)
            .collect();

        for name in names {
            self.load(&name)?;
        }

        Ok(())
    }

    /// Load a single list by name, replacing any previously cached values.
    /// An empty list is rejected here rather than failing on first pick.
    pub fn load(&mut self, name: &str) -> Result<()> {
        let values = self.source.load(name)?;
        if values.is_empty() {
            return Err(GeneratorError::EmptyList(name.to_string()));
        }

        log::debug!("loaded list '{}' with {} entries", name, values.len());
        self.lists.insert(name.to_string(), values);

        Ok(())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    /// Pick one value uniformly at random from a loaded list. Every call
    /// draws independently; values repeat across picks.
    pub fn pick<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<&str> {
        let list = self
            .lists
            .get(name)
            .ok_or_else(|| GeneratorError::UnknownList(name.to_string()))?;

        let value = list
            .choose(rng)
            .ok_or_else(|| GeneratorError::EmptyList(name.to_string()))?;

        Ok(value)
    }

    /// Replace every `{name}` token in the template with an independent pick
    /// from the named list. Token occurrences are resolved left to right,
    /// each with its own draw.
    pub fn resolve<R: Rng + ?Sized>(&self, template: &str, rng: &mut R) -> Result<String> {
        let bytes = template.as_bytes();
        let mut result = String::with_capacity(template.len());
        let mut last = 0;

        for caps in self.token_regex.captures_iter(template) {
            let token = caps.get(0).unwrap();
            if is_escaped(bytes, token.start(), token.end()) {
                continue;
            }

            result.push_str(&template[last..token.start()]);
            result.push_str(self.pick(&caps[1], rng)?);
            last = token.end();
        }

        result.push_str(&template[last..]);
        Ok(result)
    }
}

/// Extract the list names referenced by `{name}` tokens in a template.
/// Doubled-brace forms (`{{name}}`) are escapes and are not matched; names
/// never contain braces and tokens do not nest.
pub fn extract_list_names(value: &str) -> Vec<String> {
    let token_regex = Regex::new(LIST_TOKEN_PATTERN).unwrap();
    let bytes = value.as_bytes();

    token_regex
        .captures_iter(value)
        .filter(|caps| {
            let token = caps.get(0).unwrap();
            !is_escaped(bytes, token.start(), token.end())
        })
        .map(|caps| caps[1].to_string())
        .collect()
}

fn is_escaped(bytes: &[u8], start: usize, end: usize) -> bool {
    let brace_before = start > 0 && bytes[start - 1] == b'{';
    let brace_after = end < bytes.len() && bytes[end] == b'}';
    brace_before || brace_after
}

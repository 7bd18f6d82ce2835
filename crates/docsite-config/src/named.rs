//! Named entries with options, shared by `markdown_extensions` and `plugins`.
//!
//! Both keys accept either a list whose items are names or single-key
//! mappings of name to options:
//!
//! ```yaml
//! markdown_extensions:
//!   - admonition
//!   - toc:
//!       permalink: true
//! ```
//!
//! or a single mapping of name to options (`null` for none).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// An extension or plugin identifier with its options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedEntry {
    /// Identifier as written in the document.
    pub name: String,
    /// Options mapping, empty when none were given.
    #[serde(skip_serializing_if = "Mapping::is_empty")]
    pub options: Mapping,
}

impl NamedEntry {
    /// Entry without options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Mapping::new(),
        }
    }

    /// Look up an option by key.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// Deserialize a list of named entries in either accepted shape.
pub(crate) fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<NamedEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    from_value(value).map_err(D::Error::custom)
}

fn from_value(value: Value) -> Result<Vec<NamedEntry>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items.into_iter().map(entry_from_item).collect(),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(name, options)| entry_from_pair(name, options))
            .collect(),
        _ => Err("expected a list of names or a mapping of name to options".to_owned()),
    }
}

fn entry_from_item(item: Value) -> Result<NamedEntry, String> {
    match item {
        Value::String(name) => Ok(NamedEntry::new(name)),
        Value::Mapping(mapping) if mapping.len() == 1 => {
            let Some((name, options)) = mapping.into_iter().next() else {
                return Err("expected a single name".to_owned());
            };
            entry_from_pair(name, options)
        }
        Value::Mapping(mapping) => Err(format!(
            "each item must name exactly one entry, found {} keys",
            mapping.len()
        )),
        other => Err(format!("expected a name, found {other:?}")),
    }
}

fn entry_from_pair(name: Value, options: Value) -> Result<NamedEntry, String> {
    let Value::String(name) = name else {
        return Err(format!("entry names must be strings, found {name:?}"));
    };
    let options = match options {
        Value::Null => Mapping::new(),
        Value::Mapping(options) => options,
        _ => return Err(format!("options for `{name}` must be a mapping")),
    };
    Ok(NamedEntry { name, options })
}

//! `!ENV` tag resolution.
//!
//! Values tagged with `!ENV` are replaced by the value of an environment
//! variable before the document is deserialized into [`Config`](crate::Config):
//!
//! - `!ENV NAME` - value of `NAME`, errors if unset
//! - `!ENV [NAME, OTHER, fallback]` - first variable that is set; if none is,
//!   the last element is used as a literal fallback
//!
//! Environment values are read back as YAML scalars, so `!ENV DEBUG` with
//! `DEBUG=true` yields a boolean.

use serde_yaml::Value;

use crate::ConfigError;

const ENV_TAG: &str = "ENV";

/// Resolve all `!ENV` tags in `value` using the process environment.
pub(crate) fn resolve_env_tags(value: &mut Value) -> Result<(), ConfigError> {
    resolve_with(value, "", &|name| std::env::var(name).ok())
}

/// Resolve tags with a custom variable lookup.
pub(crate) fn resolve_with(
    value: &mut Value,
    field: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    match value {
        Value::Tagged(tagged) => {
            if tagged.tag != ENV_TAG {
                return Err(ConfigError::Validation(format!(
                    "unsupported YAML tag {} in {}",
                    tagged.tag,
                    display_field(field)
                )));
            }
            let resolved = lookup_tag_value(&tagged.value, field, lookup)?;
            *value = resolved;
        }
        Value::Mapping(mapping) => {
            for (key, child) in mapping.iter_mut() {
                let key = key.as_str().unwrap_or("?");
                let child_field = if field.is_empty() {
                    key.to_owned()
                } else {
                    format!("{field}.{key}")
                };
                resolve_with(child, &child_field, lookup)?;
            }
        }
        Value::Sequence(items) => {
            for (i, child) in items.iter_mut().enumerate() {
                resolve_with(child, &format!("{field}[{i}]"), lookup)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn lookup_tag_value(
    tag_value: &Value,
    field: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<Value, ConfigError> {
    let (names, fallback) = match tag_value {
        Value::String(name) => (vec![name.as_str()], None),
        Value::Sequence(items) if items.len() == 1 => (vec![require_name(&items[0], field)?], None),
        Value::Sequence(items) if items.len() > 1 => {
            let names = items[..items.len() - 1]
                .iter()
                .map(|item| require_name(item, field))
                .collect::<Result<Vec<_>, _>>()?;
            (names, items.last().cloned())
        }
        _ => {
            return Err(env_error(
                field,
                "!ENV expects a variable name or a sequence of names".to_owned(),
            ));
        }
    };

    for name in &names {
        if let Some(raw) = lookup(name) {
            tracing::debug!(variable = name, field, "Resolved !ENV tag");
            return Ok(parse_scalar(raw));
        }
    }

    fallback.ok_or_else(|| env_error(field, format!("${{{}}} not set", names.join("}, ${"))))
}

fn require_name<'a>(item: &'a Value, field: &str) -> Result<&'a str, ConfigError> {
    item.as_str()
        .ok_or_else(|| env_error(field, "!ENV variable names must be strings".to_owned()))
}

/// Interpret an environment value as a YAML scalar, falling back to a string.
fn parse_scalar(raw: String) -> Value {
    if raw.is_empty() {
        return Value::String(raw);
    }
    match serde_yaml::from_str::<Value>(&raw) {
        Ok(v @ (Value::Bool(_) | Value::Number(_) | Value::Null | Value::String(_))) => v,
        _ => Value::String(raw),
    }
}

fn display_field(field: &str) -> &str {
    if field.is_empty() { "document root" } else { field }
}

fn env_error(field: &str, message: String) -> ConfigError {
    ConfigError::EnvVar {
        field: display_field(field).to_owned(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve(yaml: &str, vars: &[(&str, &str)]) -> Result<Value, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut value: Value = serde_yaml::from_str(yaml).unwrap();
        resolve_with(&mut value, "", &|name| vars.get(name).cloned())?;
        Ok(value)
    }

    #[test]
    fn test_single_variable() {
        let value = resolve("site_url: !ENV SITE_URL", &[("SITE_URL", "https://docs.test")])
            .unwrap();
        assert_eq!(value["site_url"], Value::from("https://docs.test"));
    }

    #[test]
    fn test_single_variable_unset_is_error() {
        let err = resolve("site_url: !ENV SITE_URL", &[]).unwrap_err();
        assert!(
            matches!(&err, ConfigError::EnvVar { field, .. } if field == "site_url"),
            "got {err:?}"
        );
        assert!(err.to_string().contains("SITE_URL"));
    }

    #[test]
    fn test_single_element_sequence() {
        let value = resolve("site_url: !ENV [SITE_URL]", &[("SITE_URL", "https://docs.test")])
            .unwrap();
        assert_eq!(value["site_url"], Value::from("https://docs.test"));
    }

    #[test]
    fn test_single_element_sequence_unset_is_error() {
        let err = resolve("site_url: !ENV [SITE_URL]", &[]).unwrap_err();
        assert!(
            matches!(&err, ConfigError::EnvVar { field, .. } if field == "site_url"),
            "got {err:?}"
        );
        assert!(err.to_string().contains("${SITE_URL} not set"), "got {err}");
    }

    #[test]
    fn test_sequence_first_set_variable_wins() {
        let value = resolve(
            "site_url: !ENV [PRIMARY, SECONDARY, 'https://fallback.test']",
            &[("SECONDARY", "https://secondary.test")],
        )
        .unwrap();
        assert_eq!(value["site_url"], Value::from("https://secondary.test"));
    }

    #[test]
    fn test_sequence_uses_literal_fallback() {
        let value = resolve("strict: !ENV [STRICT_BUILD, false]", &[]).unwrap();
        assert_eq!(value["strict"], Value::Bool(false));
    }

    #[test]
    fn test_values_are_typed_as_yaml_scalars() {
        let value = resolve("strict: !ENV STRICT_BUILD", &[("STRICT_BUILD", "true")]).unwrap();
        assert_eq!(value["strict"], Value::Bool(true));
    }

    #[test]
    fn test_nested_field_path_in_error() {
        let err = resolve("theme:\n  palette:\n    - scheme: !ENV SCHEME\n", &[]).unwrap_err();
        assert!(
            matches!(&err, ConfigError::EnvVar { field, .. } if field == "theme.palette[0].scheme"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = resolve("docs_dir: !relative docs", &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("docs_dir"));
    }

    #[test]
    fn test_untagged_values_are_untouched() {
        let value = resolve("site_name: Docs\nnav:\n  - Home: index.md\n", &[]).unwrap();
        assert_eq!(value["site_name"], Value::from("Docs"));
        assert_eq!(value["nav"][0]["Home"], Value::from("index.md"));
    }
}

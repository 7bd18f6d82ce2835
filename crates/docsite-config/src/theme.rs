//! Theme configuration.
//!
//! `theme` is either a bare name (`theme: material`) or a mapping with a
//! `name` and theme-specific settings. `palette` accepts a single mapping or a
//! list of variants; `font: false` disables web fonts.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Theme used when the document has no `theme` key.
pub const DEFAULT_THEME: &str = "mkdocs";

/// Resolved theme configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThemeConfig {
    /// Theme identifier.
    pub name: String,
    /// Color palette variants in declared order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub palette: Vec<PaletteEntry>,
    /// Font selection.
    pub font: FontConfig,
    /// Enabled feature flags.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub features: BTreeSet<String>,
    /// Directory with template overrides, relative to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_dir: Option<String>,
    /// Logo path or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Favicon path or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Interface language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Theme-specific settings not modeled above.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, Value>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::named(DEFAULT_THEME)
    }
}

impl ThemeConfig {
    /// Theme with the given name and default settings.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            palette: Vec::new(),
            font: FontConfig::default(),
            features: BTreeSet::new(),
            custom_dir: None,
            logo: None,
            favicon: None,
            language: None,
            options: BTreeMap::new(),
        }
    }

    /// Check that palette variants alternate between light and dark and
    /// that each one can be toggled to. Returns human-readable warnings.
    #[must_use]
    pub fn palette_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.palette.len() < 2 {
            return warnings;
        }
        for (i, pair) in self.palette.windows(2).enumerate() {
            if pair[0].scheme == pair[1].scheme {
                warnings.push(format!(
                    "theme.palette[{}] repeats scheme `{}` of the previous variant",
                    i + 1,
                    pair[1].scheme.as_str()
                ));
            }
        }
        for (i, entry) in self.palette.iter().enumerate() {
            if entry.toggle.is_none() {
                warnings.push(format!(
                    "theme.palette[{i}] has no toggle; users cannot switch to it"
                ));
            }
        }
        warnings
    }
}

/// One palette variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteEntry {
    /// Color scheme.
    #[serde(default)]
    pub scheme: ColorScheme,
    /// Primary color name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Accent color name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Media query selecting this variant automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Switch shown to the reader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle: Option<PaletteToggle>,
}

/// Palette color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light scheme.
    #[default]
    Default,
    /// Dark scheme.
    Slate,
}

impl ColorScheme {
    /// Identifier as written in the document.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Slate => "slate",
        }
    }

    /// Whether the scheme has dark intent.
    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Slate)
    }
}

impl<'de> Deserialize<'de> for ColorScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let scheme = String::deserialize(deserializer)?;
        match scheme.as_str() {
            "default" => Ok(Self::Default),
            "slate" => Ok(Self::Slate),
            other => Err(D::Error::custom(format!(
                "unknown palette scheme `{other}`, expected `default` or `slate`"
            ))),
        }
    }
}

/// Palette toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteToggle {
    /// Icon identifier, e.g. `material/weather-night`.
    pub icon: String,
    /// Label shown for the toggle.
    pub name: String,
}

/// Font configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontConfig {
    /// Use the theme's fonts.
    #[default]
    ThemeDefault,
    /// Web fonts disabled (`font: false`).
    Disabled,
    /// Explicit fonts.
    Custom {
        /// Body text font.
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Code font.
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

impl<'de> Deserialize<'de> for FontConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Fonts {
            #[serde(default)]
            text: Option<String>,
            #[serde(default)]
            code: Option<String>,
        }

        match Value::deserialize(deserializer)? {
            Value::Bool(true) => Ok(Self::ThemeDefault),
            Value::Bool(false) => Ok(Self::Disabled),
            value @ Value::Mapping(_) => {
                let fonts: Fonts = serde_yaml::from_value(value).map_err(D::Error::custom)?;
                Ok(Self::Custom {
                    text: fonts.text,
                    code: fonts.code,
                })
            }
            _ => Err(D::Error::custom(
                "theme.font must be `false` or a mapping of `text`/`code`",
            )),
        }
    }
}

#[derive(Deserialize)]
struct ThemeFields {
    name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_palette")]
    palette: Vec<PaletteEntry>,
    #[serde(default)]
    font: FontConfig,
    #[serde(default)]
    features: Vec<String>,
    custom_dir: Option<String>,
    logo: Option<String>,
    favicon: Option<String>,
    language: Option<String>,
    #[serde(flatten)]
    options: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields: ThemeFields = match Value::deserialize(deserializer)? {
            Value::String(name) => return Ok(Self::named(name)),
            value @ Value::Mapping(_) => serde_yaml::from_value(value).map_err(D::Error::custom)?,
            _ => return Err(D::Error::custom("theme must be a name or a mapping")),
        };

        let name = match (fields.name, &fields.custom_dir) {
            (Some(name), _) => name,
            (None, Some(_)) => DEFAULT_THEME.to_owned(),
            (None, None) => {
                return Err(D::Error::custom(
                    "theme requires a `name` or a `custom_dir`",
                ));
            }
        };

        Ok(Self {
            name,
            palette: fields.palette,
            font: fields.font,
            features: fields.features.into_iter().collect(),
            custom_dir: fields.custom_dir,
            logo: fields.logo,
            favicon: fields.favicon,
            language: fields.language,
            options: fields.options,
        })
    }
}

fn deserialize_palette<'de, D>(deserializer: D) -> Result<Vec<PaletteEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        value @ Value::Mapping(_) => serde_yaml::from_value::<PaletteEntry>(value)
            .map(|entry| vec![entry])
            .map_err(D::Error::custom),
        value @ Value::Sequence(_) => serde_yaml::from_value(value).map_err(D::Error::custom),
        _ => Err(D::Error::custom(
            "theme.palette must be a mapping or a list of mappings",
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(yaml: &str) -> Result<ThemeConfig, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn test_bare_name() {
        let theme = parse("material").unwrap();
        assert_eq!(theme, ThemeConfig::named("material"));
    }

    #[test]
    fn test_default_theme() {
        assert_eq!(ThemeConfig::default().name, "mkdocs");
    }

    #[test]
    fn test_full_theme() {
        let yaml = r"
name: material
palette:
  - scheme: default
    primary: indigo
    toggle:
      icon: material/weather-night
      name: Switch to dark mode
  - scheme: slate
    toggle:
      icon: material/weather-sunny
      name: Switch to light mode
font:
  text: Source Sans Pro
  code: Source Code Pro
features:
  - navigation.tabs
  - navigation.top
  - navigation.tabs
logo: img/logo.svg
";
        let theme = parse(yaml).unwrap();
        assert_eq!(theme.name, "material");
        assert_eq!(theme.palette.len(), 2);
        assert_eq!(theme.palette[0].scheme, ColorScheme::Default);
        assert_eq!(theme.palette[1].scheme, ColorScheme::Slate);
        assert_eq!(
            theme.palette[0].toggle.as_ref().map(|t| t.name.as_str()),
            Some("Switch to dark mode")
        );
        assert_eq!(
            theme.font,
            FontConfig::Custom {
                text: Some("Source Sans Pro".to_owned()),
                code: Some("Source Code Pro".to_owned()),
            }
        );
        let features: Vec<_> = theme.features.iter().map(String::as_str).collect();
        assert_eq!(features, vec!["navigation.tabs", "navigation.top"]);
        assert_eq!(theme.logo.as_deref(), Some("img/logo.svg"));
        assert!(theme.palette_warnings().is_empty());
    }

    #[test]
    fn test_single_palette_mapping() {
        let theme = parse("name: material\npalette:\n  primary: teal\n").unwrap();
        assert_eq!(theme.palette.len(), 1);
        assert_eq!(theme.palette[0].primary.as_deref(), Some("teal"));
        assert_eq!(theme.palette[0].scheme, ColorScheme::Default);
    }

    #[test]
    fn test_font_disabled() {
        let theme = parse("name: material\nfont: false\n").unwrap();
        assert_eq!(theme.font, FontConfig::Disabled);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let err = parse("name: material\npalette:\n  - scheme: neon\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("scheme `neon`"), "got {message}");
    }

    #[test]
    fn test_palette_typo_names_the_field() {
        let err = parse("name: material\npalette:\n  primery: teal\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown field `primery`"), "got {message}");
    }

    #[test]
    fn test_font_typo_names_the_field() {
        let err = parse("name: material\nfont:\n  txt: Roboto\n").unwrap_err();
        assert!(err.to_string().contains("unknown field `txt`"), "got {err}");
    }

    #[test]
    fn test_theme_of_wrong_type_is_rejected() {
        let err = parse("[material]").unwrap_err();
        assert!(err.to_string().contains("name or a mapping"), "got {err}");
    }

    #[test]
    fn test_custom_dir_without_name() {
        let theme = parse("custom_dir: overrides\n").unwrap();
        assert_eq!(theme.name, DEFAULT_THEME);
        assert_eq!(theme.custom_dir.as_deref(), Some("overrides"));
    }

    #[test]
    fn test_mapping_without_name_is_rejected() {
        let err = parse("features: [navigation.top]\n").unwrap_err();
        assert!(err.to_string().contains("name"), "got {err}");
    }

    #[test]
    fn test_extra_options_are_kept() {
        let theme = parse("name: readthedocs\nnavigation_depth: 3\n").unwrap();
        assert_eq!(
            theme.options.get("navigation_depth"),
            Some(&Value::from(3))
        );
    }

    #[test]
    fn test_palette_warnings() {
        let yaml = r"
name: material
palette:
  - scheme: slate
    toggle: {icon: a, name: Light}
  - scheme: slate
";
        let warnings = parse(yaml).unwrap().palette_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("repeats scheme `slate`"));
        assert!(warnings[1].contains("palette[1] has no toggle"));
    }
}

//! Extra JavaScript and CSS assets.

use serde::{Deserialize, Serialize};

/// An `extra_javascript` item.
///
/// Written either as a plain path/URL or as a mapping with loading flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScriptRaw")]
pub struct ExtraScript {
    /// Path relative to `docs_dir`, or an external URL.
    pub path: String,
    /// Value of the `type` attribute (e.g. `module`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,
    /// Load with the `async` attribute.
    #[serde(rename = "async", skip_serializing_if = "std::ops::Not::not")]
    pub is_async: bool,
    /// Load with the `defer` attribute.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub defer: bool,
}

impl ExtraScript {
    /// Script referenced by path only.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            script_type: None,
            is_async: false,
            defer: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptRaw {
    Path(String),
    Full {
        path: String,
        #[serde(rename = "type", default)]
        script_type: Option<String>,
        #[serde(rename = "async", default)]
        is_async: bool,
        #[serde(default)]
        defer: bool,
    },
}

impl From<ScriptRaw> for ExtraScript {
    fn from(raw: ScriptRaw) -> Self {
        match raw {
            ScriptRaw::Path(path) => Self::new(path),
            ScriptRaw::Full {
                path,
                script_type,
                is_async,
                defer,
            } => Self {
                path,
                script_type,
                is_async,
                defer,
            },
        }
    }
}

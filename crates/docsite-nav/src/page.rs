//! Page titles and URLs derived from source paths.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// First ATX level-one heading.
static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*#*[ \t]*$").expect("valid H1 regex"));

/// Fields read from page front matter.
#[derive(Deserialize)]
struct FrontMatter {
    title: Option<String>,
}

/// File stems treated as the index page of their directory.
const INDEX_STEMS: [&str; 2] = ["index", "readme"];

/// Whether `path` is the index page of its directory.
#[must_use]
pub fn is_index(path: &str) -> bool {
    let (_, name) = split_dir(path);
    INDEX_STEMS.contains(&stem(name).to_ascii_lowercase().as_str())
}

/// Output URL of a page, without leading slash.
///
/// With directory URLs, `guide/setup.md` maps to `guide/setup/` and an index
/// page maps to its directory (`""` for the root). Otherwise pages map to
/// `.html` files.
#[must_use]
pub fn page_url(path: &str, use_directory_urls: bool) -> String {
    let (dir, name) = split_dir(path);
    let dir_prefix = if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}/")
    };

    match (is_index(path), use_directory_urls) {
        (true, true) => dir_prefix,
        (true, false) => format!("{dir_prefix}index.html"),
        (false, true) => format!("{dir_prefix}{}/", stem(name)),
        (false, false) => format!("{dir_prefix}{}.html", stem(name)),
    }
}

/// Page title from content: front matter `title`, else the first H1.
#[must_use]
pub fn extract_title(content: &str) -> Option<String> {
    let (front_matter, body) = split_front_matter(content);
    front_matter
        .and_then(front_matter_title)
        .or_else(|| {
            H1_REGEX
                .captures(body)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_owned())
        })
        .filter(|title| !title.is_empty())
}

/// `title` from front matter YAML, `None` if absent, blank or unparsable.
fn front_matter_title(yaml: &str) -> Option<String> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return None;
    }
    let fields: FrontMatter = serde_yaml::from_str(trimmed).ok()?;
    fields
        .title
        .map(|title| title.trim().to_owned())
        .filter(|title| !title.is_empty())
}

/// Page title derived from its path.
///
/// `getting-started.md` becomes `Getting started`; an index page takes the
/// name of its directory, or `Home` at the root.
#[must_use]
pub fn title_from_path(path: &str) -> String {
    let (dir, name) = split_dir(path);
    if is_index(path) {
        return match dir.rsplit('/').next() {
            Some(parent) if !parent.is_empty() => title_from_name(parent),
            _ => "Home".to_owned(),
        };
    }
    title_from_name(stem(name))
}

/// Humanize a file or directory name.
#[must_use]
pub fn title_from_name(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");
    let spaced = spaced.trim();
    let mut chars = spaced.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn split_dir(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

fn stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// Split YAML front matter (`---` delimited) from the body.
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };
    match rest.find("\n---") {
        Some(end) => {
            let body = &rest[end + 4..];
            (Some(&rest[..end]), body)
        }
        None => (None, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_directory_urls() {
        assert_eq!(page_url("index.md", true), "");
        assert_eq!(page_url("guide.md", true), "guide/");
        assert_eq!(page_url("guides/install.md", true), "guides/install/");
        assert_eq!(page_url("guides/index.md", true), "guides/");
        assert_eq!(page_url("guides/README.md", true), "guides/");
    }

    #[test]
    fn test_page_url_file_urls() {
        assert_eq!(page_url("index.md", false), "index.html");
        assert_eq!(page_url("guide.md", false), "guide.html");
        assert_eq!(page_url("guides/index.md", false), "guides/index.html");
        assert_eq!(page_url("guides/install.md", false), "guides/install.html");
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path("getting-started.md"), "Getting started");
        assert_eq!(title_from_path("guides/masking_strategies.md"), "Masking strategies");
        assert_eq!(title_from_path("index.md"), "Home");
        assert_eq!(title_from_path("user-guide/index.md"), "User guide");
        assert_eq!(title_from_path("api/v1/README.md"), "V1");
    }

    #[test]
    fn test_extract_title_from_h1() {
        assert_eq!(
            extract_title("Intro text\n\n# Privacy Requests\n\nBody"),
            Some("Privacy Requests".to_owned())
        );
        assert_eq!(extract_title("# Closed heading ##"), Some("Closed heading".to_owned()));
        assert_eq!(extract_title("## Only level two"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_extract_title_prefers_front_matter() {
        let content = "---\ntitle: \"Front Title\"\ndescription: x\n---\n# Heading\n";
        assert_eq!(extract_title(content), Some("Front Title".to_owned()));
    }

    #[test]
    fn test_front_matter_without_title_uses_h1() {
        let content = "---\ndescription: x\n---\n# Heading\n";
        assert_eq!(extract_title(content), Some("Heading".to_owned()));
    }

    #[test]
    fn test_front_matter_title_styles() {
        let folded = "---\ntitle: >\n  Folded Title\n---\n# Heading\n";
        assert_eq!(extract_title(folded), Some("Folded Title".to_owned()));

        let single_quoted = "---\ntitle: 'It''s here'\n---\n";
        assert_eq!(extract_title(single_quoted), Some("It's here".to_owned()));

        let double_quoted = "---\ntitle: \"Key: value\"\n---\n";
        assert_eq!(extract_title(double_quoted), Some("Key: value".to_owned()));
    }

    #[test]
    fn test_empty_front_matter_title_uses_h1() {
        let content = "---\ntitle:\ndescription: Privacy requests\n---\n# Heading\n";
        assert_eq!(extract_title(content), Some("Heading".to_owned()));

        let blank = "---\ntitle: \"  \"\n---\n# Heading\n";
        assert_eq!(extract_title(blank), Some("Heading".to_owned()));
    }

    #[test]
    fn test_invalid_front_matter_uses_h1() {
        let content = "---\ntitle: [unclosed\n---\n# Heading\n";
        assert_eq!(extract_title(content), Some("Heading".to_owned()));
    }

    #[test]
    fn test_h1_marker_must_share_the_line() {
        assert_eq!(extract_title("#\n# Real"), Some("Real".to_owned()));
        assert_eq!(extract_title("#NoSpace\n"), None);
    }

    #[test]
    fn test_is_index() {
        assert!(is_index("index.md"));
        assert!(is_index("a/b/README.md"));
        assert!(!is_index("a/indexes.md"));
    }
}

//! YAML front matter parsing.
//!
//! A front matter block is a YAML document between two `---` lines at the very
//! top of a content file. The closing delimiter may also be `...`.
//!
//! Recognized keys are `title`, `description`, `order`, and `keywords`; every
//! other key is preserved as an opaque JSON value in [`FrontMatter::extra`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Error type for front matter operations.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// The block between the delimiters is not valid YAML for front matter.
    #[error("Invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parsed front matter.
///
/// All fields are optional. When a field is `None` (or empty), the caller
/// substitutes its own default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Display title. Empty strings are treated as absent.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Short description for listings and search results.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Sort position among siblings (lower first).
    ///
    /// Numeric strings are accepted and fractions round to the nearest
    /// integer. Any other value is ignored with a warning.
    #[serde(
        default,
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,

    /// Search keywords. Accepts a YAML list or a comma-separated string.
    #[serde(
        default,
        deserialize_with = "keyword_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub keywords: Vec<String>,

    /// Any other keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FrontMatter {
    /// Parse front matter from the YAML text between the delimiters.
    ///
    /// Empty or whitespace-only YAML yields a default instance.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::Yaml`] if the YAML is malformed or a recognized key
    /// has an unusable type (e.g. `title: [a, b]`).
    pub fn from_yaml(yaml: &str) -> Result<Self, MetaError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Title if present and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Split a file into its raw front matter YAML and the remaining body.
///
/// Returns `(None, content)` when the file does not start with a complete
/// front matter block. A leading byte-order mark is ignored.
///
/// # Examples
///
/// ```
/// use docx_meta::split_front_matter;
///
/// let (yaml, body) = split_front_matter("---\ntitle: Setup\n---\n# Body\n");
/// assert_eq!(yaml, Some("title: Setup\n"));
/// assert_eq!(body, "# Body\n");
/// ```
#[must_use]
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first_line, rest) = content.split_once('\n').unwrap_or((content, ""));
    if first_line.trim_end() != "---" {
        return (None, content);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Accept strings, numbers, and booleans as text; `null` as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            Ok(Some(v.to_string()))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

/// Accept integers, fractions, and numeric strings; anything else is `None`.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let order = match &value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(round_order)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(round_order))
        }
        _ => None,
    };
    if order.is_none() {
        tracing::warn!(order = %value, "Ignoring non-numeric order in front matter");
    }
    Ok(order)
}

/// Nearest integer, or `None` outside the `i64` range.
#[allow(clippy::cast_possible_truncation)]
fn round_order(value: f64) -> Option<i64> {
    // 2^63; i64::MAX itself is not representable as f64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let rounded = value.round();
    (rounded.is_finite() && (-LIMIT..LIMIT).contains(&rounded)).then_some(rounded as i64)
}

/// Accept a list of scalars or a comma-separated string.
fn keyword_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let scalar = |v: serde_json::Value| match v {
        serde_json::Value::String(s) => Ok(s.trim().to_owned()),
        serde_json::Value::Number(_) | serde_json::Value::Bool(_) => Ok(v.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a keyword, found {other}"
        ))),
    };

    let keywords = match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(serde_json::Value::String(s)) => s.split(',').map(|k| k.trim().to_owned()).collect(),
        Some(serde_json::Value::Array(items)) => {
            items.into_iter().map(scalar).collect::<Result<_, _>>()?
        }
        Some(other) => vec![scalar(other)?],
    };

    Ok(keywords.into_iter().filter(|k| !k.is_empty()).collect())
}

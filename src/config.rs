//! Configuration normalization for search and pagination.
//!
//! User configuration is loose: an option may be absent, a plain boolean, or
//! an object with any subset of fields. The functions here turn those raw
//! shapes into canonical [`SearchSettings`] and [`PaginationSettings`]
//! records. Parsing is permissive: malformed values fall back to defaults
//! instead of being rejected.
//!
//! # Rules
//!
//! - Absent → disabled, every other field at its default
//! - `Toggle(b)` → `enabled = b`, every other field at its default
//! - `Custom(..)` → enabled unless `enabled` is explicitly `false`
//!
//! # Examples
//!
//! ```rust
//! use datalist_widgets::config::{
//!     normalize_pagination, normalize_search, PaginationConfig, PaginationOption, SearchKeys,
//!     SearchOption,
//! };
//!
//! let search = normalize_search(Some(&SearchOption::Custom(Default::default())));
//! assert!(search.enabled);
//! assert_eq!(search.debounce_ms, 300);
//!
//! let keys = SearchKeys::parse_list(" name, category ,,name");
//! assert_eq!(keys.into_vec(), vec!["name", "category"]);
//!
//! let pages = normalize_pagination(Some(&PaginationOption::Custom(PaginationConfig {
//!     enabled: None,
//!     items_per_page: Some(0),
//! })));
//! assert!(pages.enabled);
//! assert_eq!(pages.items_per_page, 1); // clamped
//! ```

use crate::error::ConfigError;
use crate::loader::DataSource;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Default number of records per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Default trailing debounce window for live search input, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// One or more field names to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKeys {
    /// A single field name.
    One(String),
    /// An ordered list of field names.
    Many(Vec<String>),
}

impl SearchKeys {
    /// Parses the declarative comma-separated form, e.g. `"name, category"`.
    ///
    /// Entries are trimmed; empty entries are dropped.
    pub fn parse_list(list: &str) -> Self {
        SearchKeys::Many(list.split(',').map(|s| s.trim().to_string()).collect())
    }

    /// Returns the keys as an ordered, de-duplicated list without empties.
    pub fn into_vec(self) -> Vec<String> {
        let raw = match self {
            SearchKeys::One(key) => vec![key],
            SearchKeys::Many(keys) => keys,
        };
        let mut keys: Vec<String> = Vec::with_capacity(raw.len());
        for key in raw {
            let key = key.trim();
            if !key.is_empty() && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        keys
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(SearchKeys::One(s.clone())),
            Value::Array(items) => Some(SearchKeys::Many(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl From<&str> for SearchKeys {
    fn from(key: &str) -> Self {
        SearchKeys::One(key.to_string())
    }
}

impl From<Vec<&str>> for SearchKeys {
    fn from(keys: Vec<&str>) -> Self {
        SearchKeys::Many(keys.into_iter().map(str::to_string).collect())
    }
}

/// Object form of the search option. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Explicit enable flag; `None` means enabled.
    pub enabled: Option<bool>,
    /// Fields to match against.
    pub keys: Option<SearchKeys>,
    /// Debounce window for live input. Negative values clamp to 0.
    pub debounce_ms: Option<i64>,
}

/// Raw search option as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum SearchOption {
    /// `true`/`false`.
    Toggle(bool),
    /// Object form.
    Custom(SearchConfig),
}

impl From<Value> for SearchOption {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => SearchOption::Toggle(b),
            Value::Object(map) => SearchOption::Custom(SearchConfig {
                enabled: explicit_flag(map.get("enabled")),
                keys: map
                    .get("searchKeys")
                    .or_else(|| map.get("searchKey"))
                    .and_then(SearchKeys::from_json),
                debounce_ms: map.get("debounceMs").and_then(lenient_int),
            }),
            // Malformed: same as absent.
            _ => SearchOption::Toggle(false),
        }
    }
}

/// Object form of the pagination option. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Explicit enable flag; `None` means enabled.
    pub enabled: Option<bool>,
    /// Page size. Values below 1 clamp to 1.
    pub items_per_page: Option<i64>,
}

/// Raw pagination option as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum PaginationOption {
    /// `true`/`false`.
    Toggle(bool),
    /// Object form.
    Custom(PaginationConfig),
}

impl From<Value> for PaginationOption {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => PaginationOption::Toggle(b),
            Value::Object(map) => PaginationOption::Custom(PaginationConfig {
                enabled: explicit_flag(map.get("enabled")),
                items_per_page: map.get("itemsPerPage").and_then(lenient_int),
            }),
            _ => PaginationOption::Toggle(false),
        }
    }
}

/// Canonical search settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Whether live search input is wired.
    pub enabled: bool,
    /// Ordered, de-duplicated field names.
    pub search_keys: Vec<String>,
    /// Trailing debounce window for live input.
    pub debounce_ms: u64,
}

impl SearchSettings {
    /// The debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            search_keys: Vec::new(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Canonical pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    /// Whether the view is paginated.
    pub enabled: bool,
    /// Records per page, always at least 1.
    pub items_per_page: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Normalizes a raw search option.
pub fn normalize_search(option: Option<&SearchOption>) -> SearchSettings {
    match option {
        None => SearchSettings::default(),
        Some(SearchOption::Toggle(enabled)) => SearchSettings {
            enabled: *enabled,
            ..SearchSettings::default()
        },
        Some(SearchOption::Custom(config)) => SearchSettings {
            enabled: config.enabled != Some(false),
            search_keys: config
                .keys
                .clone()
                .map(SearchKeys::into_vec)
                .unwrap_or_default(),
            debounce_ms: config
                .debounce_ms
                .map(|ms| ms.max(0) as u64)
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
        },
    }
}

/// Normalizes a raw pagination option.
pub fn normalize_pagination(option: Option<&PaginationOption>) -> PaginationSettings {
    match option {
        None => PaginationSettings::default(),
        Some(PaginationOption::Toggle(enabled)) => PaginationSettings {
            enabled: *enabled,
            ..PaginationSettings::default()
        },
        Some(PaginationOption::Custom(config)) => PaginationSettings {
            enabled: config.enabled != Some(false),
            items_per_page: config
                .items_per_page
                .map(clamp_page_size)
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        },
    }
}

/// Clamps a raw page size to the valid range.
pub(crate) fn clamp_page_size(raw: i64) -> usize {
    usize::try_from(raw.max(1)).unwrap_or(usize::MAX)
}

/// A JSON list configuration, e.g. loaded from a file or a script tag.
///
/// ```rust
/// use datalist_widgets::config::ListConfig;
/// use datalist_widgets::loader::DataSource;
///
/// let config = ListConfig::from_json_str(
///     r#"{ "data": "/api/items.json", "search": { "searchKeys": ["name"] }, "pagination": true }"#,
/// ).unwrap();
/// assert_eq!(config.data, DataSource::Remote("/api/items.json".to_string()));
/// assert!(config.pagination.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfig {
    /// Where the records come from.
    pub data: DataSource,
    /// Raw search option.
    #[serde(default)]
    pub search: Option<SearchOption>,
    /// Raw pagination option.
    #[serde(default)]
    pub pagination: Option<PaginationOption>,
}

impl ListConfig {
    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn explicit_flag(value: Option<&Value>) -> Option<bool> {
    match value {
        Some(Value::Bool(b)) => Some(*b),
        _ => None,
    }
}

fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

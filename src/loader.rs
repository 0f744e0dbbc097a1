//! Data loading: resolves a [`DataSource`] into an ordered list of [`Record`]s.
//!
//! A source is either a literal JSON value already in memory or the
//! identifier of a remote JSON resource. Remote sources go through the
//! [`Fetch`] capability, which lets hosts plug in their own transport (and
//! lets tests run without a network). With the `http` feature enabled,
//! [`HttpFetcher`] fetches over HTTP(S) with `reqwest`.
//!
//! Every call performs exactly one read of the source and never retries.
//!
//! # Examples
//!
//! ```rust
//! use datalist_widgets::loader::{load, DataSource, NoFetcher};
//! use serde_json::json;
//!
//! let source = DataSource::Literal(json!([{ "name": "Widget" }, { "name": "Gadget" }]));
//! let records = futures::executor::block_on(load(&source, &NoFetcher)).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].text("name").as_deref(), Some("Gadget"));
//! ```

use crate::error::{DataError, ShapeError};
use crate::record::Record;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;

/// Where a list's records come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DataSource {
    /// Identifier (usually a URL) of a remote JSON document.
    Remote(String),
    /// A JSON value already in memory; must be an array of objects.
    Literal(Value),
}

impl DataSource {
    /// Builds a literal source from records.
    pub fn records(records: Vec<Record>) -> Self {
        let values = records
            .into_iter()
            .map(|r| serde_json::to_value(r).unwrap_or(Value::Null))
            .collect();
        DataSource::Literal(Value::Array(values))
    }

    /// Returns true for remote sources.
    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Remote(_))
    }
}

impl From<Vec<Record>> for DataSource {
    fn from(records: Vec<Record>) -> Self {
        DataSource::records(records)
    }
}

impl From<&str> for DataSource {
    fn from(url: &str) -> Self {
        DataSource::Remote(url.to_string())
    }
}

/// Capability to fetch a JSON resource by identifier.
///
/// Implementations report non-success statuses as
/// [`DataError::FetchFailed`] and undecodable bodies as
/// [`DataError::Decode`].
pub trait Fetch: Send + Sync {
    /// Fetches and decodes the resource named by `url`.
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, DataError>>;
}

/// A fetcher for hosts without network access; every fetch fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFetcher;

impl Fetch for NoFetcher {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, DataError>> {
        Box::pin(async move {
            Err(DataError::Transport(format!(
                "no fetcher configured for `{}`",
                url
            )))
        })
    }
}

/// Fetches JSON over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Creates a fetcher with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
impl Fetch for HttpFetcher {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, DataError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| DataError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(DataError::FetchFailed {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| DataError::Decode(e.to_string()))
        })
    }
}

/// The fetcher used when the caller does not supply one.
pub fn default_fetcher() -> std::sync::Arc<dyn Fetch> {
    #[cfg(feature = "http")]
    {
        std::sync::Arc::new(HttpFetcher::new())
    }
    #[cfg(not(feature = "http"))]
    {
        std::sync::Arc::new(NoFetcher)
    }
}

/// Resolves a source into records.
///
/// Literal sources resolve without suspending; remote sources suspend until
/// the single fetch completes.
pub async fn load(source: &DataSource, fetcher: &dyn Fetch) -> Result<Vec<Record>, DataError> {
    let payload = match source {
        DataSource::Literal(value) => value.clone(),
        DataSource::Remote(url) => {
            log::debug!("fetching list data from {}", url);
            fetcher.fetch_json(url).await?
        }
    };
    parse_dataset(payload)
}

/// Validates a resolved payload and converts it into records.
///
/// Fails when the payload is not an array, or when it is non-empty and its
/// first element is not an object. Later non-object elements are skipped.
pub fn parse_dataset(payload: Value) -> Result<Vec<Record>, DataError> {
    let Value::Array(items) = payload else {
        return Err(ShapeError::NotAnArray.into());
    };

    if items.first().is_some_and(|first| !first.is_object()) {
        return Err(ShapeError::NotObjects.into());
    }

    let total = items.len();
    let records: Vec<Record> = items.into_iter().filter_map(Record::from_json).collect();
    if records.len() != total {
        log::warn!(
            "skipped {} non-object item(s) in list data",
            total - records.len()
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a canned response and counts reads.
    struct StubFetcher {
        response: Result<Value, DataError>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(response: Result<Value, DataError>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Fetch for StubFetcher {
        fn fetch_json<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Result<Value, DataError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[test]
    fn non_arrays_are_rejected() {
        assert_eq!(
            parse_dataset(json!({ "items": [] })),
            Err(DataError::Shape(ShapeError::NotAnArray))
        );
    }

    #[test]
    fn first_item_must_be_an_object() {
        assert_eq!(
            parse_dataset(json!([1, { "a": 1 }])),
            Err(DataError::Shape(ShapeError::NotObjects))
        );
    }

    #[test]
    fn empty_arrays_are_valid() {
        assert_eq!(parse_dataset(json!([])), Ok(vec![]));
    }

    #[test]
    fn later_non_objects_are_skipped() {
        let records = parse_dataset(json!([{ "a": 1 }, "stray", { "a": 2 }])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("a").as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn remote_sources_fetch_exactly_once() {
        let fetcher = StubFetcher::new(Ok(json!([{ "name": "Widget" }])));
        let source = DataSource::Remote("https://example.test/items.json".to_string());

        let records = load(&source, &fetcher).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_failures_propagate_without_retry() {
        let fetcher = StubFetcher::new(Err(DataError::FetchFailed {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        }));
        let source = DataSource::from("https://example.test/items.json");

        let err = load(&source, &fetcher).await.unwrap_err();
        assert!(matches!(err, DataError::FetchFailed { status: 500, .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn literal_sources_never_fetch() {
        let fetcher = StubFetcher::new(Ok(json!([])));
        let source = DataSource::records(vec![Record::new().with("name", "Widget")]);

        let records = load(&source, &fetcher).await.unwrap();
        assert_eq!(records[0].text("name").as_deref(), Some("Widget"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_payloads_are_shape_checked() {
        let fetcher = StubFetcher::new(Ok(json!("nope")));
        let err = load(&DataSource::from("/items"), &fetcher).await.unwrap_err();
        assert_eq!(err, DataError::Shape(ShapeError::NotAnArray));
    }
}

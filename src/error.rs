//! Error types shared by the list engine, the data loader and the declarative binder.
//!
//! Three failure families exist:
//! - [`ConfigError`]: construction could not proceed (fatal, returned from `build()`)
//! - [`DataError`]: the data source could not be resolved into records
//! - [`DeclarativeWarning`]: a markup candidate was skipped or degraded during a scan

use thiserror::Error;

/// Convenience alias for results carrying the crate-wide [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for callers that do not care which stage failed.
#[derive(Debug, Error)]
pub enum Error {
    /// The list could not be constructed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The data source could not be loaded.
    #[error(transparent)]
    Data(#[from] DataError),
    /// Markup could not be parsed.
    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// Missing or unreadable construction input.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No view surface was supplied.
    #[error("container is required")]
    MissingContainer,
    /// No data source was supplied.
    #[error("data is required")]
    MissingData,
    /// No item template was supplied.
    #[error("item template is required")]
    MissingItemTemplate,
    /// A JSON configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The payload had the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The top-level value is not an array.
    #[error("data must be an array")]
    NotAnArray,
    /// The first element of a non-empty array is not an object.
    #[error("items must be objects")]
    NotObjects,
}

/// Failure to turn a data source into records.
///
/// Cloneable: load results travel inside [`LoadedMsg`](crate::list::LoadedMsg).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The remote resource answered with a non-success status.
    #[error("failed to fetch data: {status} {status_text}")]
    FetchFailed {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase, empty when unknown.
        status_text: String,
    },
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The resolved payload was not an array of objects.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Non-fatal problems found while scanning markup for declarative lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarativeWarning {
    /// The candidate's instance-id attribute is empty.
    #[error("list element has an empty instance id; skipping")]
    MissingId,
    /// The candidate has no data source attribute.
    #[error("list `{id}` has no data source; skipping")]
    MissingSource {
        /// Instance id of the skipped candidate.
        id: String,
    },
    /// The candidate has no template-marked descendant.
    #[error("list `{id}` has no item template; skipping")]
    MissingTemplate {
        /// Instance id of the skipped candidate.
        id: String,
    },
    /// More than one template-marked descendant; the first one is used.
    #[error("list `{id}` has {count} item templates; using the first")]
    ExtraTemplates {
        /// Instance id of the candidate.
        id: String,
        /// Number of templates found.
        count: usize,
    },
    /// Another list with the same id is already registered.
    #[error("list `{id}` is already registered; skipping")]
    DuplicateId {
        /// The conflicting instance id.
        id: String,
    },
}

/// Markup could not be read.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The parser's input stream failed.
    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),
    /// The markup contained no element.
    #[error("markup contains no element")]
    NoElement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_errors_use_the_documented_messages() {
        assert_eq!(ShapeError::NotAnArray.to_string(), "data must be an array");
        assert_eq!(ShapeError::NotObjects.to_string(), "items must be objects");
        let err: DataError = ShapeError::NotAnArray.into();
        assert_eq!(err.to_string(), "data must be an array");
    }

    #[test]
    fn fetch_failures_carry_status() {
        let err = DataError::FetchFailed {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "failed to fetch data: 404 Not Found");
    }

    #[test]
    fn umbrella_error_converts() {
        let err: Error = ConfigError::MissingData.into();
        assert!(matches!(err, Error::Config(ConfigError::MissingData)));
        assert_eq!(err.to_string(), "data is required");
    }
}

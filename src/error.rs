//! Error taxonomy for the gateway client.
//!
//! Every failure surfaces to the caller; nothing is retried or swallowed
//! internally. Field-level failures (`UnknownField`, `InvalidValue`) are
//! raised before any network access.

use serde_json::Value;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The field is not part of the entity's schema, or is absent from the
    /// last server snapshot.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// The value failed the field's structural validator.
    #[error("invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: Value },

    /// The gateway answered with a non-2xx status.
    #[error("gateway returned status {status}: {detail}")]
    Remote { status: u16, detail: String },

    /// The response body was not valid JSON, or had an unexpected shape.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// A unique-filter lookup matched zero or more than one record.
    #[error("expected exactly one result, got {count}")]
    AmbiguousResult { count: u64 },

    /// The availability charge table has no entry for the requested
    /// operation.
    #[error("no charge listed for operation '{0}'")]
    UnsupportedOperation(String),

    /// Connection-level HTTP failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

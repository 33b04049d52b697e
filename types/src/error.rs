//! Errors raised while parsing identifiers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("identifier {0:?} contains whitespace")]
    Whitespace(String),

    #[error("asset id {0:?} is reserved for the native currency")]
    ReservedAssetId(String),
}

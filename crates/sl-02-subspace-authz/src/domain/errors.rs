//! Error types for the subspace authorization

use thiserror::Error;

/// All errors that can occur while validating or accepting a grant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// The candidate message does not declare a target subspace
    #[error("Unsupported message type: {type_url}")]
    UnsupportedMessageType { type_url: String },

    /// The grant itself is malformed
    #[error("Invalid authorization: {0}")]
    InvalidAuthorization(String),

    /// The gas meter ran out while scanning the grant
    #[error("Out of gas: {descriptor} needed {needed}, {remaining} remaining")]
    OutOfGas {
        descriptor: String,
        needed: u64,
        remaining: u64,
    },
}

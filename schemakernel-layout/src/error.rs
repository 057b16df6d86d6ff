//! Error types for placement and connection.

use thiserror::Error;

/// Rejected `add` under [`crate::config::DuplicatePolicy::Reject`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("component id '{0}' is already placed")]
    DuplicateId(String),
}

/// Why a `connect` could not resolve its endpoints.
///
/// These never abort an instruction sequence; the engine logs them and
/// draws nothing for the connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("unknown component '{0}'")]
    UnknownComponent(String),
    #[error("component '{component}' ({kind}) has no pin '{pin}'")]
    UnknownPin {
        component: String,
        kind: String,
        pin: String,
    },
}

//! Error types surfaced by build passes and event dispatch.

use thiserror::Error;

use crate::NodeId;

/// Failure raised while building a frame.
///
/// A build error aborts the current pass. The previous frame, if any, stays
/// in place and the error is handed back to whoever drove the pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A component looked up a context value that no ancestor provided.
    ///
    /// This is a composition mistake in the caller (for example a date field
    /// rendered outside of its date fields owner) and is never defaulted.
    #[error("`{consumer}` must be rendered inside `{provider}`, but no enclosing scope was found")]
    MissingScope {
        /// Component that performed the lookup.
        consumer: &'static str,
        /// Component expected to provide the scope.
        provider: &'static str,
    },
}

/// Failure raised when delivering an input event to a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No frame has been rendered yet.
    #[error("no frame has been rendered yet")]
    NoFrame,
    /// The node does not exist in the current frame.
    #[error("node {0:?} is not part of the current frame")]
    UnknownNode(NodeId),
    /// The node exists but does not react to input.
    #[error("node {0:?} has no input handler")]
    NoHandler(NodeId),
}

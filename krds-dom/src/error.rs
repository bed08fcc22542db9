use thiserror::Error;

use crate::NodeId;

/// Errors from tree operations on a [`Document`](crate::Document).
///
/// Focus and dispatch never fail; they treat unknown or detached nodes as
/// no-ops. Only structural edits report errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} does not exist in this document")]
    NodeNotFound(NodeId),

    #[error("node {0} is not connected to the document")]
    Detached(NodeId),

    #[error("the document body cannot be removed")]
    RootRemoval,
}

//! Typed error causes carried inside `anyhow::Error`
//!
//! Every fallible call in this crate returns `anyhow::Result`. When the cause is
//! one of the engine's own failures it is one of the enums below, so callers can
//! recover it with `err.downcast_ref::<ComponentError>()`.

use crate::surface::NodeHandle;
use thiserror::Error;

/// Failures of the component lifecycle and data-binding engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// The operation needs a built/unbuilt state the component does not hold
    #[error("component {id}: {operation} requires the component to be {required}")]
    InvalidState {
        id: String,
        operation: &'static str,
        required: &'static str,
    },

    /// A list was built without any child to use as its row template
    #[error("list {id} has no child to use as a row template")]
    MissingTemplate { id: String },

    /// Strict binding: a record does not define a field a component is bound to
    #[error("record has no value for field `{field}` bound by component {id}")]
    UnresolvedField { id: String, field: String },

    /// Strict binding: a container received something other than an object
    #[error("component {id} expected an object record, got {found}")]
    NotARecord { id: String, found: &'static str },
}

impl ComponentError {
    pub(crate) fn requires_built(id: impl Into<String>, operation: &'static str) -> Self {
        ComponentError::InvalidState {
            id: id.into(),
            operation,
            required: "built",
        }
    }

    pub(crate) fn requires_unbuilt(id: impl Into<String>, operation: &'static str) -> Self {
        ComponentError::InvalidState {
            id: id.into(),
            operation,
            required: "unbuilt",
        }
    }
}

/// Failures reported by a [`Surface`](crate::surface::Surface) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The surface cannot create nodes of this kind
    #[error("unknown node kind `{0}`")]
    UnknownNodeKind(String),

    /// The handle does not refer to a node owned by this surface
    #[error("unknown node {0:?}")]
    UnknownNode(NodeHandle),

    /// `remove_child` was called with a node that is not a child of the parent
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        parent: NodeHandle,
        child: NodeHandle,
    },
}

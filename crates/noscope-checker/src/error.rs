//! Resolution errors
//!
//! One `ResolveError` describes why a scope member declaration could not be
//! bound to a member of its target type.

use noscope_model::MemberKind;
use thiserror::Error;

/// Errors that can occur while resolving a scope member
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No field or property with the name on the target type or its bases
    #[error("Member '{name}' not found on target type '{ty}'")]
    MissingMember {
        /// Effective target name
        name: String,
        /// Target type name
        ty: String,
    },

    /// The name exists on the target but belongs to a method or event
    #[error("Member '{name}' on target type '{ty}' is a {found}, not a property or field")]
    NotAPropertyOrField {
        /// Effective target name
        name: String,
        /// Target type name
        ty: String,
        /// Kind of the member that was found
        found: MemberKind,
    },

    /// No method with the name declared on the target type itself
    #[error("Method '{name}' not found on target type '{ty}'")]
    MethodNotFound {
        /// Effective target name
        name: String,
        /// Target type name
        ty: String,
    },

    /// No event with the name declared on the target type itself
    #[error("Event '{name}' not found on target type '{ty}'")]
    EventNotFound {
        /// Effective target name
        name: String,
        /// Target type name
        ty: String,
    },
}

impl ResolveError {
    /// Effective target name the lookup used
    pub fn member_name(&self) -> &str {
        match self {
            ResolveError::MissingMember { name, .. }
            | ResolveError::NotAPropertyOrField { name, .. }
            | ResolveError::MethodNotFound { name, .. }
            | ResolveError::EventNotFound { name, .. } => name,
        }
    }

    /// Target type name
    pub fn type_name(&self) -> &str {
        match self {
            ResolveError::MissingMember { ty, .. }
            | ResolveError::NotAPropertyOrField { ty, .. }
            | ResolveError::MethodNotFound { ty, .. }
            | ResolveError::EventNotFound { ty, .. } => ty,
        }
    }
}

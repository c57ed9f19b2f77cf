//! Accessor errors

use thiserror::Error;

/// Errors raised when building or using an accessor
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessorError {
    /// `get` called on an accessor without a getter
    #[error("No getter available for accessor '{member}'.")]
    NoGetter {
        /// Member the accessor is bound to
        member: String,
    },

    /// `set` called on an accessor without a setter
    #[error("No setter available for accessor '{member}'.")]
    NoSetter {
        /// Member the accessor is bound to
        member: String,
    },

    /// The member is not registered on the type with the requested kind
    #[error("{kind} '{member}' not found on type '{ty}'")]
    MemberNotFound {
        /// Type name
        ty: &'static str,
        /// Requested member
        member: String,
        /// Requested member kind
        kind: &'static str,
    },

    /// The member is registered with a different value type
    #[error("Member '{member}' on type '{ty}' has type '{found}', not '{expected}'")]
    ValueTypeMismatch {
        /// Type name
        ty: &'static str,
        /// Requested member
        member: String,
        /// Requested value type
        expected: &'static str,
        /// Registered value type
        found: &'static str,
    },
}

//! Member model errors

use thiserror::Error;

/// Errors that can occur while building a type table
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// A type with the same name is already registered
    #[error("Duplicate type '{name}'")]
    DuplicateType {
        /// Type name
        name: String,
    },

    /// Type name not registered
    #[error("Unknown type '{name}'")]
    UnknownType {
        /// Type name that was not found
        name: String,
    },

    /// Base type name not registered
    #[error("Unknown base type '{base}' for type '{ty}'")]
    UnknownBaseType {
        /// Derived type name
        ty: String,
        /// Base type name that was not found
        base: String,
    },
}

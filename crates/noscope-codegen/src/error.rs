//! Code generation errors

use thiserror::Error;

/// Errors that can occur while emitting code
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Formatting into the output buffer failed
    #[error("Failed to format generated code")]
    Format(#[from] std::fmt::Error),

    /// A generated-accessor member has no entry in its type's accessor table
    #[error("No generated accessor for member '{member}' on type '{target}'")]
    MissingAccessor {
        /// Target type name
        target: String,
        /// Target member name
        member: String,
    },
}

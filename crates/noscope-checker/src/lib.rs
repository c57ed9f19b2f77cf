//! NoScope Checker
//!
//! Resolution and analysis of scope declarations.
//!
//! This crate provides:
//! - `Resolver`: binds scope members to target members
//! - `ScopeAnalyzer`: reports NS0001..NS0004 with its own lookups
//! - Diagnostic rendering through codespan-reporting or JSON
//!
//! # Usage
//!
//! ```ignore
//! use noscope_checker::{Resolver, ScopeAnalyzer};
//!
//! let resolutions = Resolver::new(&table).resolve_scope(&scope);
//! let diagnostics = ScopeAnalyzer::new(&table).analyze(&scope);
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod diagnostic;
pub mod error;
pub mod resolver;

pub use analyzer::{has_errors, ScopeAnalyzer};
pub use diagnostic::{
    create_files, Diagnostic, DiagnosticKind, DiagnosticSeverity, ErrorCode, JsonDiagnostic,
    ScopeDiagnostic,
};
pub use error::ResolveError;
pub use resolver::{MemberResolution, ResolutionResult, ResolvedMember, Resolver};

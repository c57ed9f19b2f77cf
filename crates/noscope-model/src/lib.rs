//! NoScope Member Model
//!
//! Read-only description of target types and the scope declarations that
//! expose a curated subset of their members.
//!
//! This crate provides:
//! - Target type and member descriptions (`TargetType`, `TargetMember`)
//! - The `MemberModel` capability the resolver and analyzer query
//! - `TypeTable`, an in-memory `MemberModel` with interned type ids
//! - Scope declarations (`ScopeDeclaration`, `ScopeMemberDeclaration`)
//!
//! # Usage
//!
//! ```ignore
//! use noscope_model::{TypeTable, TargetType, TargetMember, ValueType};
//!
//! let mut table = TypeTable::new();
//! let god = table.add_type(
//!     TargetType::new("GodObject")
//!         .extensible(true)
//!         .with_member(TargetMember::field("_privateField", "i32").non_public()),
//! )?;
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod model;
pub mod scope;
pub mod span;
pub mod ty;

pub use context::TypeTable;
pub use error::ModelError;
pub use model::MemberModel;
pub use scope::{
    AccessKind, NameOverride, NameStyle, ScopeDeclaration, ScopeMemberDeclaration, ScopeMemberKind,
};
pub use span::Span;
pub use ty::{MemberKind, Parameter, TargetMember, TargetType, TypeId, ValueType, Visibility};

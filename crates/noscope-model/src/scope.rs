//! Scope declarations
//!
//! A scope declaration names a contract, binds it to exactly one target
//! type, and lists the members the contract exposes. Declaration order is
//! kept; it only affects the layout of emitted code.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::span::Span;
use crate::ty::{Parameter, TypeId, ValueType};

/// Requested access strategy for a scope member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// Let the selector decide from visibility and extensibility
    #[default]
    Auto,
    /// Forward straight to the target member
    Direct,
    /// Go through the accessor table injected into the target type
    #[serde(rename = "generated")]
    GeneratedAccessor,
    /// Go through a runtime-compiled accessor
    #[serde(rename = "reflection")]
    ReflectionAccessor,
}

impl AccessKind {
    /// Every access kind, in declaration order
    pub const ALL: [AccessKind; 4] = [
        AccessKind::Auto,
        AccessKind::Direct,
        AccessKind::GeneratedAccessor,
        AccessKind::ReflectionAccessor,
    ];

    /// Lowercase manifest spelling
    pub fn as_str(self) -> &'static str {
        match self {
            AccessKind::Auto => "auto",
            AccessKind::Direct => "direct",
            AccessKind::GeneratedAccessor => "generated",
            AccessKind::ReflectionAccessor => "reflection",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a scope member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMemberKind {
    /// Value member bound to a target field or property
    Property,
    /// Method bound to a target method
    Method,
    /// Event bound to a target event
    Event,
}

impl ScopeMemberKind {
    /// Lowercase name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeMemberKind::Property => "property",
            ScopeMemberKind::Method => "method",
            ScopeMemberKind::Event => "event",
        }
    }
}

impl fmt::Display for ScopeMemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a target-name override was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameStyle {
    /// A bare string literal
    Literal,
    /// A symbolic reference to the target member (`Type::member`)
    Symbolic,
}

/// Explicit target-member name for a scope member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOverride {
    /// The name as written
    pub name: String,
    /// Literal or symbolic
    pub style: NameStyle,
    /// Span of the override itself
    pub span: Span,
}

impl NameOverride {
    /// Literal override
    pub fn literal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: NameStyle::Literal,
            span: Span::DUMMY,
        }
    }

    /// Symbolic override
    pub fn symbolic(path: impl Into<String>) -> Self {
        Self {
            name: path.into(),
            style: NameStyle::Symbolic,
            span: Span::DUMMY,
        }
    }

    /// Attach a source span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The member name the override refers to
    ///
    /// A symbolic path resolves to its last segment.
    pub fn target_name(&self) -> &str {
        match self.style {
            NameStyle::Literal => &self.name,
            NameStyle::Symbolic => self
                .name
                .rsplit(|c: char| c == ':' || c == '.')
                .next()
                .unwrap_or(&self.name),
        }
    }

    /// Whether the override was written as a string literal
    pub fn is_literal(&self) -> bool {
        self.style == NameStyle::Literal
    }
}

/// One member of a scope declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMemberDeclaration {
    /// Local member name
    pub name: String,
    /// Member kind
    pub kind: ScopeMemberKind,
    /// Local type (return type for methods, argument type for events)
    pub ty: ValueType,
    /// Explicit target-member name
    pub name_override: Option<NameOverride>,
    /// Requested access strategy
    pub access: AccessKind,
    /// Local getter declared
    pub has_getter: bool,
    /// Local setter declared
    pub has_setter: bool,
    /// Method parameters
    pub parameters: Vec<Parameter>,
    /// Span of the declaration
    pub span: Span,
}

impl ScopeMemberDeclaration {
    fn new(name: impl Into<String>, kind: ScopeMemberKind, ty: impl Into<ValueType>) -> Self {
        Self {
            name: name.into(),
            kind,
            ty: ty.into(),
            name_override: None,
            access: AccessKind::Auto,
            has_getter: false,
            has_setter: false,
            parameters: Vec::new(),
            span: Span::DUMMY,
        }
    }

    /// Property member with the given local accessors
    pub fn property(
        name: impl Into<String>,
        ty: impl Into<ValueType>,
        has_getter: bool,
        has_setter: bool,
    ) -> Self {
        Self {
            has_getter,
            has_setter,
            ..Self::new(name, ScopeMemberKind::Property, ty)
        }
    }

    /// Method member
    pub fn method(
        name: impl Into<String>,
        return_ty: impl Into<ValueType>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            parameters,
            ..Self::new(name, ScopeMemberKind::Method, return_ty)
        }
    }

    /// Event member
    pub fn event(name: impl Into<String>, args_ty: impl Into<ValueType>) -> Self {
        Self::new(name, ScopeMemberKind::Event, args_ty)
    }

    /// Set the target-name override
    pub fn with_override(mut self, name_override: NameOverride) -> Self {
        self.name_override = Some(name_override);
        self
    }

    /// Set the requested access strategy
    pub fn with_access(mut self, access: AccessKind) -> Self {
        self.access = access;
        self
    }

    /// Attach a source span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Name looked up on the target type
    pub fn effective_target_name(&self) -> &str {
        match &self.name_override {
            Some(o) => o.target_name(),
            None => &self.name,
        }
    }
}

/// A scope contract bound to one target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeDeclaration {
    /// Contract name
    pub name: String,
    /// Target type
    pub target: TypeId,
    /// Members in declaration order
    pub members: Vec<ScopeMemberDeclaration>,
    /// Span of the declaration
    pub span: Span,
}

impl ScopeDeclaration {
    /// Create a scope without members
    pub fn new(name: impl Into<String>, target: TypeId) -> Self {
        Self {
            name: name.into(),
            target,
            members: Vec::new(),
            span: Span::DUMMY,
        }
    }

    /// Append a member
    pub fn with_member(mut self, member: ScopeMemberDeclaration) -> Self {
        self.members.push(member);
        self
    }

    /// Attach a source span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

//! Target type and member descriptions
//!
//! A `TargetType` is a nominal type with an optional base type, an
//! extensibility flag, and its own declared members in declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a target type registered in a `TypeTable`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Create a type id from its raw index
    pub fn new(id: u32) -> Self {
        TypeId(id)
    }
}

/// Value type of a member
///
/// Types are compared by identity of their canonical name. No coercion or
/// assignability is modelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueType(String);

impl ValueType {
    /// Create a value type from its canonical name
    pub fn new(name: impl Into<String>) -> Self {
        ValueType(name.into())
    }

    /// The unit type, used for methods that return nothing
    pub fn unit() -> Self {
        ValueType("()".to_string())
    }

    /// Canonical name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the unit type
    pub fn is_unit(&self) -> bool {
        self.0 == "()"
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValueType {
    fn from(name: &str) -> Self {
        ValueType::new(name)
    }
}

impl From<String> for ValueType {
    fn from(name: String) -> Self {
        ValueType(name)
    }
}

/// Declared visibility of a target member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Accessible from anywhere
    Public,
    /// Private, protected, internal, or any other restricted visibility
    NonPublic,
}

impl Visibility {
    /// Whether the member is public
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

/// Kind of a target member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// Stored field
    Field,
    /// Property with optional getter and setter
    Property,
    /// Method
    Method,
    /// Event
    Event,
}

impl MemberKind {
    /// Lowercase name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
            MemberKind::Event => "event",
        }
    }

    /// Whether a property declaration may bind to this kind
    pub fn is_property_like(self) -> bool {
        matches!(self, MemberKind::Field | MemberKind::Property)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: ValueType,
}

impl Parameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, ty: impl Into<ValueType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A member declared directly on a target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMember {
    /// Member name
    pub name: String,
    /// Member kind
    pub kind: MemberKind,
    /// Value type (return type for methods, argument type for events)
    pub ty: ValueType,
    /// Declared visibility
    pub visibility: Visibility,
    /// Field is `readonly` or `const`
    pub immutable: bool,
    /// Property has a getter
    pub has_getter: bool,
    /// Property has a setter
    pub has_setter: bool,
    /// Method parameters
    pub parameters: Vec<Parameter>,
}

impl TargetMember {
    fn new(name: impl Into<String>, kind: MemberKind, ty: impl Into<ValueType>) -> Self {
        Self {
            name: name.into(),
            kind,
            ty: ty.into(),
            visibility: Visibility::Public,
            immutable: false,
            has_getter: false,
            has_setter: false,
            parameters: Vec::new(),
        }
    }

    /// Public, mutable field
    pub fn field(name: impl Into<String>, ty: impl Into<ValueType>) -> Self {
        Self::new(name, MemberKind::Field, ty)
    }

    /// Public property with the given accessors
    pub fn property(
        name: impl Into<String>,
        ty: impl Into<ValueType>,
        has_getter: bool,
        has_setter: bool,
    ) -> Self {
        Self {
            has_getter,
            has_setter,
            ..Self::new(name, MemberKind::Property, ty)
        }
    }

    /// Public method
    pub fn method(
        name: impl Into<String>,
        return_ty: impl Into<ValueType>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            parameters,
            ..Self::new(name, MemberKind::Method, return_ty)
        }
    }

    /// Public event carrying arguments of the given type
    pub fn event(name: impl Into<String>, args_ty: impl Into<ValueType>) -> Self {
        Self::new(name, MemberKind::Event, args_ty)
    }

    /// Set the declared visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark the member non-public
    pub fn non_public(self) -> Self {
        self.with_visibility(Visibility::NonPublic)
    }

    /// Mark a field immutable
    pub fn readonly(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// Whether the member value can be read
    pub fn can_read(&self) -> bool {
        match self.kind {
            MemberKind::Field => true,
            MemberKind::Property => self.has_getter,
            MemberKind::Method | MemberKind::Event => false,
        }
    }

    /// Whether the member value can be written
    pub fn can_write(&self) -> bool {
        match self.kind {
            MemberKind::Field => !self.immutable,
            MemberKind::Property => self.has_setter,
            MemberKind::Method | MemberKind::Event => false,
        }
    }
}

/// A nominal target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    /// Type name
    pub name: String,
    /// Immediate base type
    pub base: Option<TypeId>,
    /// Whether generated members may be injected into the type
    pub extensible: bool,
    /// Own declared members, in declaration order
    pub members: Vec<TargetMember>,
}

impl TargetType {
    /// Create a non-extensible type without members
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            extensible: false,
            members: Vec::new(),
        }
    }

    /// Set the extensible flag
    pub fn extensible(mut self, extensible: bool) -> Self {
        self.extensible = extensible;
        self
    }

    /// Set the immediate base type
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Append a member
    pub fn with_member(mut self, member: TargetMember) -> Self {
        self.members.push(member);
        self
    }
}

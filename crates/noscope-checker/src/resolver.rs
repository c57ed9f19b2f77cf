//! Scope member resolution
//!
//! Binds each scope member declaration to a concrete member of the target
//! type. Resolution is a pure function of the declaration and the target
//! type: no caching, no interaction between members.
//!
//! Value members (fields and properties) are searched on the target type and
//! then on each base type, nearest first. Methods and events are looked up on
//! the target type's own members only.

use noscope_model::{
    MemberKind, MemberModel, ScopeDeclaration, ScopeMemberDeclaration, ScopeMemberKind,
    TargetMember, TypeId, ValueType, Visibility,
};
use tracing::trace;

use crate::error::ResolveError;

/// A scope member bound to a target member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// Kind of the target member
    pub kind: MemberKind,
    /// Effective target name
    pub target_name: String,
    /// Value type of the target member
    pub value_type: ValueType,
    /// Target member value can be read
    pub can_read: bool,
    /// Target member value can be written
    pub can_write: bool,
    /// Declared visibility of the target member
    pub visibility: Visibility,
    /// Type that declares the target member
    pub declaring_type: TypeId,
}

impl ResolvedMember {
    fn from_member(member: &TargetMember, declaring_type: TypeId) -> Self {
        Self {
            kind: member.kind,
            target_name: member.name.clone(),
            value_type: member.ty.clone(),
            can_read: member.can_read(),
            can_write: member.can_write(),
            visibility: member.visibility,
            declaring_type,
        }
    }

    /// Whether the member is declared on a base type rather than the target
    pub fn is_inherited(&self, target: TypeId) -> bool {
        self.declaring_type != target
    }
}

/// Result of resolving one declaration
pub type ResolutionResult = Result<ResolvedMember, ResolveError>;

/// Resolution of one member of a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberResolution {
    /// Index of the member in its scope declaration
    pub index: usize,
    /// Local member name
    pub name: String,
    /// Outcome
    pub result: ResolutionResult,
}

/// Resolves scope member declarations against a member model
pub struct Resolver<'m, M: MemberModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: MemberModel + ?Sized> Resolver<'m, M> {
    /// Create a resolver over a member model
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Resolve one declaration against a target type
    pub fn resolve(&self, decl: &ScopeMemberDeclaration, target: TypeId) -> ResolutionResult {
        let name = decl.effective_target_name();
        let result = match decl.kind {
            ScopeMemberKind::Property => self.resolve_value(name, target),
            ScopeMemberKind::Method => self.resolve_own(name, target, MemberKind::Method),
            ScopeMemberKind::Event => self.resolve_own(name, target, MemberKind::Event),
        };

        trace!(
            member = %decl.name,
            target_name = name,
            ok = result.is_ok(),
            "resolved scope member"
        );
        result
    }

    /// Resolve every member of a scope, in declaration order
    pub fn resolve_scope(&self, scope: &ScopeDeclaration) -> Vec<MemberResolution> {
        scope
            .members
            .iter()
            .enumerate()
            .map(|(index, decl)| MemberResolution {
                index,
                name: decl.name.clone(),
                result: self.resolve(decl, scope.target),
            })
            .collect()
    }

    fn resolve_value(&self, name: &str, target: TypeId) -> ResolutionResult {
        let chain = std::iter::once(target).chain(self.model.base_chain(target));

        let mut other_kind = None;
        for ty in chain {
            for member in self.model.members(ty).iter().filter(|m| m.name == name) {
                if member.kind.is_property_like() {
                    return Ok(ResolvedMember::from_member(member, ty));
                }
                other_kind.get_or_insert(member.kind);
            }
        }

        let ty = self.model.type_name(target).to_string();
        Err(match other_kind {
            Some(found) => ResolveError::NotAPropertyOrField {
                name: name.to_string(),
                ty,
                found,
            },
            None => ResolveError::MissingMember {
                name: name.to_string(),
                ty,
            },
        })
    }

    fn resolve_own(&self, name: &str, target: TypeId, kind: MemberKind) -> ResolutionResult {
        self.model
            .members(target)
            .iter()
            .find(|m| m.kind == kind && m.name == name)
            .map(|m| ResolvedMember::from_member(m, target))
            .ok_or_else(|| {
                let name = name.to_string();
                let ty = self.model.type_name(target).to_string();
                match kind {
                    MemberKind::Event => ResolveError::EventNotFound { name, ty },
                    _ => ResolveError::MethodNotFound { name, ty },
                }
            })
    }
}

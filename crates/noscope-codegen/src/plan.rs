//! Generation planning
//!
//! A `ScopePlan` is the resolved, strategy-annotated form of one scope
//! declaration. Members that fail to resolve are recorded as skipped and
//! left out of the plan; their siblings are still planned.

use noscope_checker::{ResolveError, ResolvedMember, Resolver};
use noscope_model::{MemberModel, ScopeDeclaration, ScopeMemberDeclaration, ScopeMemberKind, TypeId};
use tracing::{debug, trace};

use crate::naming;
use crate::strategy::{select_strategy, AccessStrategy};

/// A scope member ready for emission
#[derive(Debug, Clone)]
pub struct MemberPlan {
    /// The declaration as written
    pub decl: ScopeMemberDeclaration,
    /// The target member it resolved to
    pub resolved: ResolvedMember,
    /// Selected strategy
    pub strategy: AccessStrategy,
    /// Emit a getter (declared locally and readable on the target)
    pub emit_getter: bool,
    /// Emit a setter (declared locally and writable on the target)
    pub emit_setter: bool,
}

impl MemberPlan {
    /// Whether any value accessor is emitted
    pub fn has_value_access(&self) -> bool {
        self.emit_getter || self.emit_setter
    }
}

/// A member left out of generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMember {
    /// Scope the member belongs to
    pub scope: String,
    /// Local member name
    pub member: String,
    /// Why resolution failed
    pub error: ResolveError,
}

/// Plan for one scope declaration
#[derive(Debug, Clone)]
pub struct ScopePlan {
    /// Contract name
    pub contract: String,
    /// Facade struct name
    pub facade: String,
    /// Target type
    pub target: TypeId,
    /// Target type name
    pub target_name: String,
    /// Whether the target type is extensible
    pub target_extensible: bool,
    /// Emitted members, in declaration order
    pub members: Vec<MemberPlan>,
    /// Members left out
    pub skipped: Vec<SkippedMember>,
}

impl ScopePlan {
    /// Members using the given strategy
    pub fn members_with(&self, strategy: AccessStrategy) -> impl Iterator<Item = &MemberPlan> {
        self.members.iter().filter(move |m| m.strategy == strategy)
    }
}

/// Builds scope plans
pub struct Planner<'m, M: MemberModel + ?Sized> {
    model: &'m M,
    resolver: Resolver<'m, M>,
}

impl<'m, M: MemberModel + ?Sized> Planner<'m, M> {
    /// Create a planner over a member model
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            resolver: Resolver::new(model),
        }
    }

    /// Plan one scope
    pub fn plan(&self, scope: &ScopeDeclaration) -> ScopePlan {
        let extensible = self.model.is_extensible(scope.target);
        let mut members = Vec::new();
        let mut skipped = Vec::new();

        for decl in &scope.members {
            match self.resolver.resolve(decl, scope.target) {
                Ok(resolved) => {
                    let strategy = select_strategy(decl.access, resolved.visibility, extensible);
                    let is_value = decl.kind == ScopeMemberKind::Property;
                    trace!(
                        scope = %scope.name,
                        member = %decl.name,
                        strategy = %strategy,
                        "planned member"
                    );
                    members.push(MemberPlan {
                        emit_getter: is_value && decl.has_getter && resolved.can_read,
                        emit_setter: is_value && decl.has_setter && resolved.can_write,
                        decl: decl.clone(),
                        resolved,
                        strategy,
                    });
                }
                Err(error) => {
                    debug!(
                        scope = %scope.name,
                        member = %decl.name,
                        error = %error,
                        "skipping unresolved member"
                    );
                    skipped.push(SkippedMember {
                        scope: scope.name.clone(),
                        member: decl.name.clone(),
                        error,
                    });
                }
            }
        }

        ScopePlan {
            contract: scope.name.clone(),
            facade: naming::facade_type_name(&scope.name),
            target: scope.target,
            target_name: self.model.type_name(scope.target).to_string(),
            target_extensible: extensible,
            members,
            skipped,
        }
    }
}

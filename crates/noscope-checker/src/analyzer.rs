//! Scope analyzer
//!
//! Reports NS0001..NS0004 for scope declarations. Member lookups here are
//! independent of the resolver.

use noscope_model::{
    MemberKind, MemberModel, ScopeDeclaration, ScopeMemberDeclaration, ScopeMemberKind,
    TargetMember, TypeId,
};
use tracing::debug;

use crate::diagnostic::{DiagnosticKind, ScopeDiagnostic};

/// Analyzes scope declarations against a member model
pub struct ScopeAnalyzer<'m, M: MemberModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: MemberModel + ?Sized> ScopeAnalyzer<'m, M> {
    /// Create an analyzer over a member model
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Analyze one scope; diagnostics are ordered by location
    pub fn analyze(&self, scope: &ScopeDeclaration) -> Vec<ScopeDiagnostic> {
        let mut diagnostics = Vec::new();
        for decl in &scope.members {
            self.analyze_member(scope, decl, &mut diagnostics);
        }
        diagnostics.sort_by_key(|d| (d.span.start, d.span.end));

        debug!(
            scope = %scope.name,
            count = diagnostics.len(),
            "analyzed scope"
        );
        diagnostics
    }

    /// Analyze several scopes independently, keeping input order
    pub fn analyze_all(&self, scopes: &[ScopeDeclaration]) -> Vec<ScopeDiagnostic> {
        scopes.iter().flat_map(|scope| self.analyze(scope)).collect()
    }

    fn analyze_member(
        &self,
        scope: &ScopeDeclaration,
        decl: &ScopeMemberDeclaration,
        out: &mut Vec<ScopeDiagnostic>,
    ) {
        if let Some(name_override) = decl.name_override.as_ref().filter(|o| o.is_literal()) {
            let span = if name_override.span.is_empty() {
                decl.span
            } else {
                name_override.span
            };
            out.push(ScopeDiagnostic::new(
                DiagnosticKind::UseNameof,
                span,
                format!(
                    "Consider using nameof({}) instead of string literal for refactoring safety",
                    name_override.name
                ),
                &scope.name,
                &decl.name,
            ));
        }

        let target = scope.target;
        let name = decl.effective_target_name();

        match decl.kind {
            ScopeMemberKind::Property => match self.find_value_member(target, name) {
                Some(member) => self.check_value_member(scope, decl, member, out),
                None => {
                    let mut diag = self.missing_member(scope, decl, name);
                    if let Some(kind) = self.other_kind_named(target, name) {
                        diag = diag.with_note(format!("'{}' is a {}, not a property or field", name, kind));
                    }
                    out.push(diag);
                }
            },
            ScopeMemberKind::Method => {
                if self.find_own(target, name, MemberKind::Method).is_none() {
                    out.push(self.missing_member(scope, decl, name));
                }
            }
            ScopeMemberKind::Event => {
                if self.find_own(target, name, MemberKind::Event).is_none() {
                    out.push(self.missing_member(scope, decl, name));
                }
            }
        }
    }

    fn check_value_member(
        &self,
        scope: &ScopeDeclaration,
        decl: &ScopeMemberDeclaration,
        member: &TargetMember,
        out: &mut Vec<ScopeDiagnostic>,
    ) {
        if decl.ty != member.ty {
            out.push(ScopeDiagnostic::new(
                DiagnosticKind::TypeMismatch,
                decl.span,
                format!(
                    "Type mismatch: scope member '{}' has type '{}', but target member has type '{}'",
                    decl.name, decl.ty, member.ty
                ),
                &scope.name,
                &decl.name,
            ));
        }

        let readable = match member.kind {
            MemberKind::Field => true,
            MemberKind::Property => member.has_getter,
            _ => false,
        };
        let writable = match member.kind {
            MemberKind::Field => !member.immutable,
            MemberKind::Property => member.has_setter,
            _ => false,
        };

        for (declared, supported, accessor) in [
            (decl.has_getter, readable, "getter"),
            (decl.has_setter, writable, "setter"),
        ] {
            if declared && !supported {
                out.push(ScopeDiagnostic::new(
                    DiagnosticKind::MissingAccessor,
                    decl.span,
                    format!(
                        "Target member '{}' does not have a {} accessor",
                        member.name, accessor
                    ),
                    &scope.name,
                    &decl.name,
                ));
            }
        }
    }

    fn missing_member(
        &self,
        scope: &ScopeDeclaration,
        decl: &ScopeMemberDeclaration,
        name: &str,
    ) -> ScopeDiagnostic {
        ScopeDiagnostic::new(
            DiagnosticKind::MissingMember,
            decl.span,
            format!(
                "Member '{}' not found on target type '{}'",
                name,
                self.model.type_name(scope.target)
            ),
            &scope.name,
            &decl.name,
        )
    }

    /// First field or property named `name` on `ty` or its bases
    fn find_value_member(&self, ty: TypeId, name: &str) -> Option<&'m TargetMember> {
        let mut seen = Vec::new();
        let mut current = Some(ty);

        while let Some(id) = current {
            if seen.contains(&id) {
                return None;
            }
            seen.push(id);

            let found = self
                .model
                .members(id)
                .iter()
                .find(|m| m.name == name && matches!(m.kind, MemberKind::Field | MemberKind::Property));
            if found.is_some() {
                return found;
            }
            current = self.model.base(id);
        }

        None
    }

    fn find_own(&self, ty: TypeId, name: &str, kind: MemberKind) -> Option<&'m TargetMember> {
        self.model
            .members(ty)
            .iter()
            .find(|m| m.kind == kind && m.name == name)
    }

    /// Kind of the first member named `name` on `ty` or its bases
    fn other_kind_named(&self, ty: TypeId, name: &str) -> Option<MemberKind> {
        std::iter::once(ty)
            .chain(self.model.base_chain(ty))
            .find_map(|id| self.model.members(id).iter().find(|m| m.name == name))
            .map(|m| m.kind)
    }
}

/// Whether any diagnostic blocks generation
pub fn has_errors(diagnostics: &[ScopeDiagnostic]) -> bool {
    diagnostics.iter().any(ScopeDiagnostic::is_error)
}

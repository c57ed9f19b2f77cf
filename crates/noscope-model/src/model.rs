//! The read-only capability resolution runs against

use rustc_hash::FxHashSet;

use crate::ty::{TargetMember, TypeId};

/// Read-only view over nominal types
///
/// Implementations must be free of side effects and return identical
/// results for repeated calls on the same type.
pub trait MemberModel {
    /// Name of a type
    fn type_name(&self, ty: TypeId) -> &str;

    /// Own declared members of a type, in declaration order
    fn members(&self, ty: TypeId) -> &[TargetMember];

    /// Immediate base type
    fn base(&self, ty: TypeId) -> Option<TypeId>;

    /// Whether generated members may be injected into the type
    fn is_extensible(&self, ty: TypeId) -> bool;

    /// Base types, nearest first, excluding `ty` itself
    ///
    /// A base relation that loops back on itself ends the walk at the first
    /// repeated type.
    fn base_chain(&self, ty: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(ty);

        let mut current = self.base(ty);
        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }
            chain.push(id);
            current = self.base(id);
        }

        chain
    }

    /// Own members with the given name
    fn own_members_named<'a>(
        &'a self,
        ty: TypeId,
        name: &'a str,
    ) -> impl Iterator<Item = &'a TargetMember> + 'a
    where
        Self: Sized,
    {
        self.members(ty).iter().filter(move |m| m.name == name)
    }
}

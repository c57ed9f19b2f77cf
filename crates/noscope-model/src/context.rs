//! In-memory type table
//!
//! Interns target types and hands out `TypeId`s. Types may be added before
//! their base type exists; the base relation is wired afterwards through
//! `set_base`.

use rustc_hash::FxHashMap;

use crate::error::ModelError;
use crate::model::MemberModel;
use crate::ty::{TargetMember, TargetType, TypeId};

/// Table of target types
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: Vec<TargetType>,
    by_name: FxHashMap<String, TypeId>,
}

impl TypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type and return its id
    pub fn add_type(&mut self, ty: TargetType) -> Result<TypeId, ModelError> {
        if self.by_name.contains_key(&ty.name) {
            return Err(ModelError::DuplicateType { name: ty.name });
        }

        let id = TypeId(self.types.len() as u32);
        self.by_name.insert(ty.name.clone(), id);
        self.types.push(ty);
        Ok(id)
    }

    /// Look up a type id by name
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Get a registered type
    pub fn get(&self, id: TypeId) -> Option<&TargetType> {
        self.types.get(id.0 as usize)
    }

    /// Get a registered type mutably
    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut TargetType> {
        self.types.get_mut(id.0 as usize)
    }

    /// Set the base type of `ty` by name
    pub fn set_base(&mut self, ty: TypeId, base: &str) -> Result<(), ModelError> {
        let type_name = self
            .get(ty)
            .map(|t| t.name.clone())
            .ok_or_else(|| ModelError::UnknownType {
                name: format!("#{}", ty.0),
            })?;
        let base_id = self.lookup(base).ok_or_else(|| ModelError::UnknownBaseType {
            ty: type_name,
            base: base.to_string(),
        })?;

        if let Some(target) = self.get_mut(ty) {
            target.base = Some(base_id);
        }
        Ok(())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all types with their ids, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TargetType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (TypeId(i as u32), t))
    }
}

impl MemberModel for TypeTable {
    fn type_name(&self, ty: TypeId) -> &str {
        self.get(ty).map(|t| t.name.as_str()).unwrap_or("<unknown>")
    }

    fn members(&self, ty: TypeId) -> &[TargetMember] {
        self.get(ty).map(|t| t.members.as_slice()).unwrap_or(&[])
    }

    fn base(&self, ty: TypeId) -> Option<TypeId> {
        self.get(ty).and_then(|t| t.base)
    }

    fn is_extensible(&self, ty: TypeId) -> bool {
        self.get(ty).map(|t| t.extensible).unwrap_or(false)
    }
}

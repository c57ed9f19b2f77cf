//! Runtime type descriptions
//!
//! A type opts into runtime accessors by implementing `Reflect` and
//! describing its fields and properties once with `RuntimeType::builder`.
//! Registered getters and setters are stored type-erased and recovered by
//! downcasting to the exact `(T, V)` pair the caller asks for.

use rustc_hash::FxHashMap;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;

use crate::accessor::{GetterFn, SetterFn};

/// A type with a runtime member description
pub trait Reflect: Sized + 'static {
    /// The type's description, built once
    fn runtime_type() -> &'static RuntimeType;
}

/// Kind of a registered member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeMemberKind {
    /// Stored field
    Field,
    /// Getter/setter pair
    Property,
}

impl RuntimeMemberKind {
    /// Capitalized name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeMemberKind::Field => "Field",
            RuntimeMemberKind::Property => "Property",
        }
    }
}

/// One registered member
pub struct RuntimeMember {
    name: &'static str,
    kind: RuntimeMemberKind,
    value_type: &'static str,
    value_type_id: TypeId,
    immutable: bool,
    getter: Option<Box<dyn Any + Send + Sync>>,
    setter: Option<Box<dyn Any + Send + Sync>>,
}

impl RuntimeMember {
    /// Member name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Member kind
    pub fn kind(&self) -> RuntimeMemberKind {
        self.kind
    }

    /// Name of the value type
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    /// Field declared immutable
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Whether a getter is registered
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    /// Whether a setter is registered
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    /// Whether the value type is `V`
    pub fn holds<V: 'static>(&self) -> bool {
        self.value_type_id == TypeId::of::<V>()
    }

    pub(crate) fn getter<T: 'static, V: 'static>(&self) -> Option<GetterFn<T, V>> {
        self.getter.as_ref()?.downcast_ref::<GetterFn<T, V>>().cloned()
    }

    pub(crate) fn setter<T: 'static, V: 'static>(&self) -> Option<SetterFn<T, V>> {
        self.setter.as_ref()?.downcast_ref::<SetterFn<T, V>>().cloned()
    }
}

impl fmt::Debug for RuntimeMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeMember")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

/// Runtime description of a type's fields and properties
#[derive(Debug)]
pub struct RuntimeType {
    name: &'static str,
    type_id: TypeId,
    members: Vec<RuntimeMember>,
    index: FxHashMap<&'static str, usize>,
}

impl RuntimeType {
    /// Start describing `T`
    pub fn builder<T: 'static>(name: &'static str) -> RuntimeTypeBuilder<T> {
        RuntimeTypeBuilder {
            ty: RuntimeType {
                name,
                type_id: TypeId::of::<T>(),
                members: Vec::new(),
                index: FxHashMap::default(),
            },
            _marker: PhantomData,
        }
    }

    /// Type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust type id of the described type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether this describes `T`
    pub fn describes<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Member by name
    pub fn member(&self, name: &str) -> Option<&RuntimeMember> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    /// All members in registration order
    pub fn members(&self) -> &[RuntimeMember] {
        &self.members
    }
}

/// Builder for a `RuntimeType`
pub struct RuntimeTypeBuilder<T> {
    ty: RuntimeType,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static> RuntimeTypeBuilder<T> {
    /// Mutable field
    pub fn field<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.register::<V>(name, RuntimeMemberKind::Field, false, Some(getter::<T, V>(get)), Some(setter::<T, V>(set)))
    }

    /// Immutable field; accessors for it never get a setter
    pub fn readonly_field<V, G>(self, name: &'static str, get: G) -> Self
    where
        V: 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.register::<V>(name, RuntimeMemberKind::Field, true, Some(getter::<T, V>(get)), None)
    }

    /// Read-write property
    pub fn property<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.register::<V>(name, RuntimeMemberKind::Property, false, Some(getter::<T, V>(get)), Some(setter::<T, V>(set)))
    }

    /// Property with only a getter
    pub fn read_only_property<V, G>(self, name: &'static str, get: G) -> Self
    where
        V: 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.register::<V>(name, RuntimeMemberKind::Property, false, Some(getter::<T, V>(get)), None)
    }

    /// Property with only a setter
    pub fn write_only_property<V, S>(self, name: &'static str, set: S) -> Self
    where
        V: 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.register::<V>(name, RuntimeMemberKind::Property, false, None, Some(setter::<T, V>(set)))
    }

    /// Finish the description
    pub fn build(self) -> RuntimeType {
        self.ty
    }

    fn register<V: 'static>(
        mut self,
        name: &'static str,
        kind: RuntimeMemberKind,
        immutable: bool,
        getter: Option<Box<dyn Any + Send + Sync>>,
        setter: Option<Box<dyn Any + Send + Sync>>,
    ) -> Self {
        if self.ty.index.contains_key(name) {
            warn!(
                ty = self.ty.name,
                member = name,
                "member registered twice; keeping the first registration"
            );
            return self;
        }

        self.ty.index.insert(name, self.ty.members.len());
        self.ty.members.push(RuntimeMember {
            name,
            kind,
            value_type: type_name::<V>(),
            value_type_id: TypeId::of::<V>(),
            immutable,
            getter,
            setter,
        });
        self
    }
}

fn getter<T: 'static, V: 'static>(
    get: impl Fn(&T) -> V + Send + Sync + 'static,
) -> Box<dyn Any + Send + Sync> {
    let erased: GetterFn<T, V> = Arc::new(get);
    Box::new(erased)
}

fn setter<T: 'static, V: 'static>(
    set: impl Fn(&mut T, V) + Send + Sync + 'static,
) -> Box<dyn Any + Send + Sync> {
    let erased: SetterFn<T, V> = Arc::new(set);
    Box::new(erased)
}

//! Process-wide accessor cache
//!
//! Compiled accessors are cached per `(target type, kind, member, value type)`.
//! The first request for a key compiles and stores the accessor; later
//! requests, from any thread, get a clone of the stored handle. Failed
//! compilations are not cached.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use tracing::debug;

use crate::accessor::Accessor;
use crate::compiler;
use crate::reflect::{Reflect, RuntimeMemberKind};
use crate::AccessorResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    target: TypeId,
    kind: RuntimeMemberKind,
    member: String,
    value: TypeId,
}

static CACHE: Lazy<DashMap<CacheKey, Box<dyn Any + Send + Sync>>> = Lazy::new(DashMap::new);

/// Cached accessor for the field `name` of `T`
pub fn field<T: Reflect, V: 'static>(name: &str) -> AccessorResult<T, V> {
    lookup(name, RuntimeMemberKind::Field)
}

/// Cached accessor for the property `name` of `T`
pub fn property<T: Reflect, V: 'static>(name: &str) -> AccessorResult<T, V> {
    lookup(name, RuntimeMemberKind::Property)
}

fn lookup<T: Reflect, V: 'static>(name: &str, kind: RuntimeMemberKind) -> AccessorResult<T, V> {
    let key = CacheKey {
        target: TypeId::of::<T>(),
        kind,
        member: name.to_string(),
        value: TypeId::of::<V>(),
    };

    // The entry lock is held while compiling so concurrent first uses agree
    // on a single handle.
    match CACHE.entry(key) {
        Entry::Occupied(mut occupied) => {
            if let Some(accessor) = occupied.get().downcast_ref::<Accessor<T, V>>() {
                return Ok(accessor.clone());
            }
            let accessor = compiler::compile::<T, V>(name, kind)?;
            occupied.insert(Box::new(accessor.clone()));
            Ok(accessor)
        }
        Entry::Vacant(vacant) => {
            let accessor = compiler::compile::<T, V>(name, kind)?;
            debug!(
                ty = T::runtime_type().name(),
                member = name,
                kind = kind.as_str(),
                "cached accessor"
            );
            vacant.insert(Box::new(accessor.clone()));
            Ok(accessor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::RuntimeType;

    fn len() -> usize {
        CACHE.len()
    }

    struct Lamp {
        on: bool,
    }

    impl Reflect for Lamp {
        fn runtime_type() -> &'static RuntimeType {
            static TYPE: Lazy<RuntimeType> = Lazy::new(|| {
                RuntimeType::builder::<Lamp>("Lamp")
                    .field("on", |l: &Lamp| l.on, |l: &mut Lamp, v: bool| l.on = v)
                    .build()
            });
            &TYPE
        }
    }

    #[test]
    fn test_repeated_lookup_returns_same_handle() {
        let first = field::<Lamp, bool>("on").unwrap();
        let second = field::<Lamp, bool>("on").unwrap();
        assert!(first.same_handle(&second));
        assert!(len() >= 1);
    }

    #[test]
    fn test_value_type_is_part_of_key() {
        assert!(field::<Lamp, bool>("on").is_ok());
        assert!(field::<Lamp, u8>("on").is_err());
        assert!(property::<Lamp, bool>("on").is_err());
    }
}

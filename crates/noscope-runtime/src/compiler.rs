//! Accessor compilation from runtime type descriptions

use std::any::type_name;
use tracing::trace;

use crate::accessor::Accessor;
use crate::error::AccessorError;
use crate::reflect::{Reflect, RuntimeMemberKind};

/// Compile an accessor for the field `name` of `T`
pub fn compile_field<T: Reflect, V: 'static>(name: &str) -> Result<Accessor<T, V>, AccessorError> {
    compile(name, RuntimeMemberKind::Field)
}

/// Compile an accessor for the property `name` of `T`
pub fn compile_property<T: Reflect, V: 'static>(
    name: &str,
) -> Result<Accessor<T, V>, AccessorError> {
    compile(name, RuntimeMemberKind::Property)
}

pub(crate) fn compile<T: Reflect, V: 'static>(
    name: &str,
    kind: RuntimeMemberKind,
) -> Result<Accessor<T, V>, AccessorError> {
    let ty = T::runtime_type();
    let not_found = || AccessorError::MemberNotFound {
        ty: ty.name(),
        member: name.to_string(),
        kind: kind.as_str(),
    };

    if !ty.describes::<T>() {
        return Err(not_found());
    }

    let member = match ty.member(name) {
        Some(member) if member.kind() == kind => member,
        _ => return Err(not_found()),
    };

    if !member.holds::<V>() {
        return Err(AccessorError::ValueTypeMismatch {
            ty: ty.name(),
            member: name.to_string(),
            expected: type_name::<V>(),
            found: member.value_type(),
        });
    }

    let getter = member.getter::<T, V>();
    let setter = if member.is_immutable() {
        None
    } else {
        member.setter::<T, V>()
    };

    trace!(
        ty = ty.name(),
        member = name,
        kind = kind.as_str(),
        can_read = getter.is_some(),
        can_write = setter.is_some(),
        "compiled accessor"
    );

    Ok(Accessor::from_parts(name, getter, setter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::RuntimeType;
    use once_cell::sync::Lazy;

    struct Gauge {
        level: u8,
        limit: u8,
    }

    impl Gauge {
        fn level(&self) -> u8 {
            self.level
        }
    }

    impl Reflect for Gauge {
        fn runtime_type() -> &'static RuntimeType {
            static TYPE: Lazy<RuntimeType> = Lazy::new(|| {
                RuntimeType::builder::<Gauge>("Gauge")
                    .readonly_field("limit", |g: &Gauge| g.limit)
                    .property("Level", |g: &Gauge| g.level(), |g: &mut Gauge, v: u8| g.level = v)
                    .build()
            });
            &TYPE
        }
    }

    #[test]
    fn test_compile_property() {
        let accessor = compile_property::<Gauge, u8>("Level").unwrap();
        let mut gauge = Gauge { level: 1, limit: 9 };
        accessor.set(&mut gauge, 4).unwrap();
        assert_eq!(accessor.get(&gauge), Ok(4));
        assert_eq!(accessor.member(), "Level");
    }

    #[test]
    fn test_readonly_field_has_no_setter() {
        let accessor = compile_field::<Gauge, u8>("limit").unwrap();
        assert!(accessor.can_read());
        assert!(!accessor.can_write());
    }

    #[test]
    fn test_kind_must_match() {
        let err = compile_field::<Gauge, u8>("Level").unwrap_err();
        assert_eq!(err.to_string(), "Field 'Level' not found on type 'Gauge'");

        let err = compile_property::<Gauge, u8>("limit").unwrap_err();
        assert_eq!(err.to_string(), "Property 'limit' not found on type 'Gauge'");
    }

    #[test]
    fn test_value_type_must_match() {
        let err = compile_field::<Gauge, u32>("limit").unwrap_err();
        assert!(matches!(
            err,
            AccessorError::ValueTypeMismatch {
                expected: "u32",
                found: "u8",
                ..
            }
        ));
    }
}

//! Typed accessor handles
//!
//! An `Accessor<T, V>` is an optional getter and an optional setter bound to
//! one member of `T` with value type `V`. Handles are cheap to clone; clones
//! share the same underlying functions.

use std::fmt;
use std::sync::Arc;

use crate::compiler;
use crate::error::AccessorError;
use crate::reflect::Reflect;

pub(crate) type GetterFn<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;
pub(crate) type SetterFn<T, V> = Arc<dyn Fn(&mut T, V) + Send + Sync>;

/// Getter/setter pair for one member
pub struct Accessor<T, V> {
    member: String,
    getter: Option<GetterFn<T, V>>,
    setter: Option<SetterFn<T, V>>,
}

impl<T, V> Accessor<T, V> {
    /// Create an accessor with neither getter nor setter
    pub fn new(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            getter: None,
            setter: None,
        }
    }

    pub(crate) fn from_parts(
        member: impl Into<String>,
        getter: Option<GetterFn<T, V>>,
        setter: Option<SetterFn<T, V>>,
    ) -> Self {
        Self {
            member: member.into(),
            getter,
            setter,
        }
    }

    /// Attach a getter
    pub fn with_getter<G>(mut self, getter: G) -> Self
    where
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Attach a setter
    pub fn with_setter<S>(mut self, setter: S) -> Self
    where
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(setter));
        self
    }

    /// Accessor with both a getter and a setter
    pub fn from_fn<G, S>(member: impl Into<String>, getter: G, setter: S) -> Self
    where
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self::new(member).with_getter(getter).with_setter(setter)
    }

    /// Member the accessor is bound to
    pub fn member(&self) -> &str {
        &self.member
    }

    /// Whether a getter is present
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    /// Whether a setter is present
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the member
    pub fn get(&self, target: &T) -> Result<V, AccessorError> {
        match &self.getter {
            Some(getter) => Ok(getter(target)),
            None => Err(AccessorError::NoGetter {
                member: self.member.clone(),
            }),
        }
    }

    /// Write the member
    pub fn set(&self, target: &mut T, value: V) -> Result<(), AccessorError> {
        match &self.setter {
            Some(setter) => {
                setter(target, value);
                Ok(())
            }
            None => Err(AccessorError::NoSetter {
                member: self.member.clone(),
            }),
        }
    }

    /// Whether two handles share the same getter and setter
    pub fn same_handle(&self, other: &Self) -> bool {
        fn same<F: ?Sized>(a: &Option<Arc<F>>, b: &Option<Arc<F>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const (),
                (None, None) => true,
                _ => false,
            }
        }
        self.member == other.member
            && same(&self.getter, &other.getter)
            && same(&self.setter, &other.setter)
    }
}

impl<T: Reflect, V: 'static> Accessor<T, V> {
    /// Build an accessor for a registered field of `T`
    ///
    /// The setter is omitted when the field is immutable.
    pub fn for_field(name: &str) -> Result<Self, AccessorError> {
        compiler::compile_field(name)
    }

    /// Build an accessor for a registered property of `T`
    ///
    /// The getter or setter is omitted when the property cannot be read or
    /// written.
    pub fn for_property(name: &str) -> Result<Self, AccessorError> {
        compiler::compile_property(name)
    }
}

impl<T, V> Clone for Accessor<T, V> {
    fn clone(&self) -> Self {
        Self {
            member: self.member.clone(),
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Accessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("member", &self.member)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        count: i32,
    }

    #[test]
    fn test_get_and_set() {
        let accessor = Accessor::from_fn("count", |c: &Counter| c.count, |c: &mut Counter, v: i32| c.count = v);
        let mut counter = Counter { count: 1 };

        assert_eq!(accessor.get(&counter), Ok(1));
        accessor.set(&mut counter, 5).unwrap();
        assert_eq!(counter.count, 5);
    }

    #[test]
    fn test_missing_halves_are_errors() {
        let read_only = Accessor::new("count").with_getter(|c: &Counter| c.count);
        let write_only = Accessor::new("count").with_setter(|c: &mut Counter, v: i32| c.count = v);
        let mut counter = Counter { count: 3 };

        assert_eq!(
            read_only.set(&mut counter, 9),
            Err(AccessorError::NoSetter {
                member: "count".to_string()
            })
        );
        assert_eq!(counter.count, 3);
        assert_eq!(
            write_only.get(&counter),
            Err(AccessorError::NoGetter {
                member: "count".to_string()
            })
        );
    }

    #[test]
    fn test_clone_shares_handle() {
        let accessor = Accessor::new("count").with_getter(|c: &Counter| c.count);
        let copy = accessor.clone();
        let other = Accessor::new("count").with_getter(|c: &Counter| c.count);

        assert!(accessor.same_handle(&copy));
        assert!(!accessor.same_handle(&other));
    }

    #[test]
    fn test_no_getter_message() {
        let accessor: Accessor<Counter, i32> = Accessor::new("count");
        let err = accessor.get(&Counter { count: 0 }).unwrap_err();
        assert_eq!(err.to_string(), "No getter available for accessor 'count'.");
    }
}

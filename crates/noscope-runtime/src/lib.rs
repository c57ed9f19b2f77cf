//! NoScope runtime support
//!
//! Generated facades link against this crate for the pieces that cannot be
//! expressed as plain member access:
//!
//! - `Accessor`: a typed getter/setter handle, either assembled by a
//!   generated accessor table or compiled from a `Reflect` description
//! - `accessor_cache`: process-wide, thread-safe cache of compiled accessors
//! - `Event`: multicast events with sender pass-through
//!
//! The `Lazy` re-export is what generated code uses for its statics.

#![warn(missing_docs)]

pub mod accessor;
pub mod accessor_cache;
pub mod compiler;
pub mod error;
pub mod event;
pub mod reflect;

pub use accessor::Accessor;
pub use error::AccessorError;
pub use event::{Event, EventHandler, SubscriptionId};
pub use once_cell::sync::Lazy;
pub use reflect::{Reflect, RuntimeMember, RuntimeMemberKind, RuntimeType, RuntimeTypeBuilder};

/// Outcome of compiling an accessor
pub type AccessorResult<T, V> = Result<Accessor<T, V>, AccessorError>;

/// The accessor inside a compilation result
///
/// Panics with the compilation error when there is none. Generated facades
/// call this on first use of a reflection-backed member.
#[track_caller]
pub fn bound_accessor<T, V>(result: &AccessorResult<T, V>) -> &Accessor<T, V> {
    match result {
        Ok(accessor) => accessor,
        Err(err) => accessor_failure(err.clone()),
    }
}

/// Abort a facade operation whose accessor failed
#[cold]
#[track_caller]
pub fn accessor_failure(err: AccessorError) -> ! {
    panic!("{err}")
}

/// Abort a call to a member the facade cannot reach
#[cold]
#[track_caller]
pub fn unsupported_member(scope: &str, member: &str) -> ! {
    panic!(
        "Method '{member}' in scope '{scope}' is not accessible. Non-public methods require \
         reflection-based invocation which is not yet implemented."
    )
}

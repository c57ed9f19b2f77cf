//! Access-strategy selection

use noscope_model::{AccessKind, Visibility};
use std::fmt;

/// Strategy a facade member uses to reach its target member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessStrategy {
    /// Forward straight to the public target member
    Direct,
    /// Go through the accessor table injected into the target type
    GeneratedAccessor,
    /// Go through a runtime-compiled accessor
    ReflectionAccessor,
}

impl AccessStrategy {
    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            AccessStrategy::Direct => "direct",
            AccessStrategy::GeneratedAccessor => "generated",
            AccessStrategy::ReflectionAccessor => "reflection",
        }
    }
}

impl fmt::Display for AccessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the strategy for one member
///
/// An explicit request wins without validation. Otherwise public members
/// are accessed directly, members of extensible types through the generated
/// accessor table, and everything else through a runtime accessor.
pub fn select_strategy(
    requested: AccessKind,
    visibility: Visibility,
    extensible: bool,
) -> AccessStrategy {
    match requested {
        AccessKind::Direct => AccessStrategy::Direct,
        AccessKind::GeneratedAccessor => AccessStrategy::GeneratedAccessor,
        AccessKind::ReflectionAccessor => AccessStrategy::ReflectionAccessor,
        AccessKind::Auto if visibility.is_public() => AccessStrategy::Direct,
        AccessKind::Auto if extensible => AccessStrategy::GeneratedAccessor,
        AccessKind::Auto => AccessStrategy::ReflectionAccessor,
    }
}

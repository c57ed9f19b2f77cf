//! Rust source emission
//!
//! Emission writes into a `String` through `fmt::Write`; the only error is
//! `fmt::Error`, which writing to a `String` never produces in practice.

pub mod accessor_table;
pub mod facade;

pub use accessor_table::{
    accessor_fn_for, collect_tables, emit_accessor_table, AccessorEntry, AccessorTable,
};
pub use facade::emit_facade;

use noscope_model::MemberKind;

/// Getter expression for a target value member, given a receiver expression
pub(crate) fn read_expr(receiver: &str, kind: MemberKind, target_name: &str) -> String {
    match kind {
        MemberKind::Field => format!("{}.{}.clone()", receiver, target_name),
        _ => format!("{}.{}()", receiver, crate::naming::to_snake_case(target_name)),
    }
}

/// Setter statement for a target value member, given a receiver expression
pub(crate) fn write_expr(receiver: &str, kind: MemberKind, target_name: &str) -> String {
    match kind {
        MemberKind::Field => format!("{}.{} = value", receiver, target_name),
        _ => format!(
            "{}.set_{}(value)",
            receiver,
            crate::naming::to_snake_case(target_name)
        ),
    }
}

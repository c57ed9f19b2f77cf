//! Accessor tables
//!
//! One table per target type referenced by any generated-accessor member,
//! merged across every scope that targets the type. Entries are keyed by
//! accessor function name, so two scopes asking for the same member share
//! one accessor whose capabilities are the union of both requests.

use noscope_model::{MemberKind, TypeId, ValueType};
use rustc_hash::FxHashMap;
use std::fmt::{self, Write};
use tracing::{debug, warn};

use super::{read_expr, write_expr};
use crate::generator::GeneratorOptions;
use crate::naming;
use crate::plan::ScopePlan;
use crate::strategy::AccessStrategy;

/// One accessor in a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorEntry {
    /// Accessor function name
    pub fn_name: String,
    /// Target member name
    pub member: String,
    /// Target member kind
    pub kind: MemberKind,
    /// Target member value type
    pub value_type: ValueType,
    /// Getter requested by some scope
    pub getter: bool,
    /// Setter requested by some scope
    pub setter: bool,
}

/// Accessor table for one target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorTable {
    /// Target type
    pub target: TypeId,
    /// Target type name
    pub target_name: String,
    /// Entries in first-requested order
    pub entries: Vec<AccessorEntry>,
}

impl AccessorTable {
    /// Find an entry by target member name
    pub fn entry(&self, member: &str) -> Option<&AccessorEntry> {
        self.entries.iter().find(|e| e.member == member)
    }
}

/// Merge the generated-accessor members of all plans into per-type tables
///
/// Tables come back ordered by target type id. Entries are keyed by target
/// member; when two members of one type derive the same accessor name, the
/// later one gets a numbered name.
pub fn collect_tables(plans: &[ScopePlan]) -> Vec<AccessorTable> {
    let mut tables: Vec<AccessorTable> = Vec::new();
    let mut table_index: FxHashMap<TypeId, usize> = FxHashMap::default();
    let mut entry_index: FxHashMap<(TypeId, String), usize> = FxHashMap::default();

    for plan in plans {
        for member in plan.members_with(AccessStrategy::GeneratedAccessor) {
            if !member.has_value_access() {
                continue;
            }

            if !plan.target_extensible {
                warn!(
                    scope = %plan.contract,
                    member = %member.decl.name,
                    target_type = %plan.target_name,
                    "generated accessor requested on a non-extensible target"
                );
            }

            let t = *table_index.entry(plan.target).or_insert_with(|| {
                tables.push(AccessorTable {
                    target: plan.target,
                    target_name: plan.target_name.clone(),
                    entries: Vec::new(),
                });
                tables.len() - 1
            });
            let table = &mut tables[t];

            let target_member = &member.resolved.target_name;
            match entry_index.get(&(plan.target, target_member.clone())) {
                Some(&e) => {
                    let entry = &mut table.entries[e];
                    entry.getter |= member.emit_getter;
                    entry.setter |= member.emit_setter;
                }
                None => {
                    let base = naming::accessor_fn_name(target_member);
                    let fn_name = naming::unique_name(&base, |candidate| {
                        table.entries.iter().any(|e| e.fn_name == candidate)
                    });
                    if fn_name != base {
                        debug!(
                            target_type = %plan.target_name,
                            member = %target_member,
                            accessor = %fn_name,
                            "renamed colliding accessor"
                        );
                    }

                    entry_index.insert((plan.target, target_member.clone()), table.entries.len());
                    table.entries.push(AccessorEntry {
                        fn_name,
                        member: target_member.clone(),
                        kind: member.resolved.kind,
                        value_type: member.resolved.value_type.clone(),
                        getter: member.emit_getter,
                        setter: member.emit_setter,
                    });
                }
            }
        }
    }

    tables.sort_by_key(|t| t.target);
    tables
}

/// Accessor function of a target member, across a set of tables
pub fn accessor_fn_for<'t>(
    tables: &'t [AccessorTable],
    target: TypeId,
    member: &str,
) -> Option<&'t str> {
    tables
        .iter()
        .find(|t| t.target == target)
        .and_then(|t| t.entry(member))
        .map(|e| e.fn_name.as_str())
}

/// Emit the inherent `impl` block for one accessor table
pub fn emit_accessor_table(
    table: &AccessorTable,
    options: &GeneratorOptions,
    out: &mut String,
) -> fmt::Result {
    let rt = options.runtime_crate.as_str();
    let target = table.target_name.as_str();

    writeln!(
        out,
        "// @generated by noscope for `{}`. Include in the module that defines `{}`.",
        target, target
    )?;
    writeln!(out)?;
    writeln!(out, "impl {} {{", target)?;

    for (i, entry) in table.entries.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let ty = &entry.value_type;

        writeln!(out, "    #[doc(hidden)]")?;
        writeln!(
            out,
            "    pub fn {}() -> &'static {}::Accessor<{}, {}> {{",
            entry.fn_name, rt, target, ty
        )?;
        writeln!(
            out,
            "        static ACCESSOR: {rt}::Lazy<{rt}::Accessor<{target}, {ty}>> = {rt}::Lazy::new(|| {{"
        )?;
        writeln!(out, "            {}::Accessor::new({:?})", rt, entry.member)?;
        if entry.getter {
            writeln!(
                out,
                "                .with_getter(|target: &{}| {})",
                target,
                read_expr("target", entry.kind, &entry.member)
            )?;
        }
        if entry.setter {
            writeln!(
                out,
                "                .with_setter(|target: &mut {}, value: {}| {})",
                target,
                ty,
                write_expr("target", entry.kind, &entry.member)
            )?;
        }
        writeln!(out, "        }});")?;
        writeln!(out, "        &ACCESSOR")?;
        writeln!(out, "    }}")?;
    }

    writeln!(out, "}}")
}

//! Facade emission
//!
//! Writes the contract trait, the facade struct holding `&mut Target`, and
//! the trait implementation. Member bodies depend on the selected strategy.

use noscope_model::{MemberKind, ScopeMemberKind};
use std::fmt::{self, Write};

use super::accessor_table::{accessor_fn_for, AccessorTable};
use super::{read_expr, write_expr};
use crate::error::CodegenError;
use crate::generator::GeneratorOptions;
use crate::naming::{accessor_static_name, to_snake_case};
use crate::plan::{MemberPlan, ScopePlan};
use crate::strategy::AccessStrategy;

/// One trait method of the contract with its facade body
struct Item {
    signature: String,
    body: String,
    allow_unused: bool,
}

/// Emit the facade file for one scope plan
///
/// Generated-accessor members call the accessor function `tables` assigns to
/// their target member.
pub fn emit_facade(
    plan: &ScopePlan,
    tables: &[AccessorTable],
    options: &GeneratorOptions,
    out: &mut String,
) -> Result<(), CodegenError> {
    let rt = options.runtime_crate.as_str();
    let mut items = Vec::new();
    for member in &plan.members {
        items.extend(member_items(plan, member, tables, rt)?);
    }

    writeln!(
        out,
        "// @generated by noscope from scope `{}`. Do not edit.",
        plan.contract
    )?;
    writeln!(out)?;

    if options.emit_contract {
        emit_contract(plan, &items, out)?;
        writeln!(out)?;
    }

    if emit_reflection_slots(plan, rt, out)? {
        writeln!(out)?;
    }

    emit_struct(plan, rt, out)?;
    writeln!(out)?;
    emit_impl(plan, &items, out)?;
    Ok(())
}

fn emit_contract(plan: &ScopePlan, items: &[Item], out: &mut String) -> fmt::Result {
    writeln!(out, "pub trait {} {{", plan.contract)?;
    for item in items {
        writeln!(out, "    {};", item.signature)?;
    }
    writeln!(out, "}}")
}

/// Statics holding the runtime accessors of reflection-accessor members
fn emit_reflection_slots(plan: &ScopePlan, rt: &str, out: &mut String) -> Result<bool, fmt::Error> {
    let mut any = false;
    for member in plan.members_with(AccessStrategy::ReflectionAccessor) {
        if !member.has_value_access() {
            continue;
        }
        any = true;

        let constructor = match member.resolved.kind {
            MemberKind::Field => "field",
            _ => "property",
        };
        let ty = &member.resolved.value_type;
        let target = &plan.target_name;

        writeln!(
            out,
            "static {}: {rt}::Lazy<{rt}::AccessorResult<{target}, {ty}>> =",
            accessor_static_name(&plan.facade, &member.decl.name)
        )?;
        writeln!(
            out,
            "    {rt}::Lazy::new(|| {rt}::accessor_cache::{constructor}({:?}));",
            member.resolved.target_name
        )?;
    }
    Ok(any)
}

fn emit_struct(plan: &ScopePlan, rt: &str, out: &mut String) -> fmt::Result {
    let detached: Vec<&MemberPlan> = plan
        .members
        .iter()
        .filter(|m| m.decl.kind == ScopeMemberKind::Event && m.strategy != AccessStrategy::Direct)
        .collect();

    writeln!(
        out,
        "/// Facade over `{}` implementing `{}`.",
        plan.target_name, plan.contract
    )?;
    writeln!(out, "pub struct {}<'a> {{", plan.facade)?;
    writeln!(out, "    target: &'a mut {},", plan.target_name)?;
    for event in &detached {
        writeln!(
            out,
            "    {}: {}::Event<{}>,",
            to_snake_case(&event.decl.name),
            rt,
            event.decl.ty
        )?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl<'a> {}<'a> {{", plan.facade)?;
    writeln!(
        out,
        "    pub fn new(target: &'a mut {}) -> Self {{",
        plan.target_name
    )?;
    if detached.is_empty() {
        writeln!(out, "        Self {{ target }}")?;
    } else {
        writeln!(out, "        Self {{")?;
        writeln!(out, "            target,")?;
        for event in &detached {
            writeln!(
                out,
                "            {}: {}::Event::new(),",
                to_snake_case(&event.decl.name),
                rt
            )?;
        }
        writeln!(out, "        }}")?;
    }
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    pub fn target(&self) -> &{} {{", plan.target_name)?;
    writeln!(out, "        &*self.target")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    pub fn target_mut(&mut self) -> &mut {} {{", plan.target_name)?;
    writeln!(out, "        &mut *self.target")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}

fn emit_impl(plan: &ScopePlan, items: &[Item], out: &mut String) -> fmt::Result {
    writeln!(out, "impl<'a> {} for {}<'a> {{", plan.contract, plan.facade)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        if item.allow_unused {
            writeln!(out, "    #[allow(unused_variables)]")?;
        }
        writeln!(out, "    {} {{", item.signature)?;
        writeln!(out, "        {}", item.body)?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "}}")
}

fn member_items(
    plan: &ScopePlan,
    member: &MemberPlan,
    tables: &[AccessorTable],
    rt: &str,
) -> Result<Vec<Item>, CodegenError> {
    Ok(match member.decl.kind {
        ScopeMemberKind::Property => value_items(plan, member, tables, rt)?,
        ScopeMemberKind::Method => vec![method_item(plan, member, rt)],
        ScopeMemberKind::Event => event_items(member, rt),
    })
}

fn value_items(
    plan: &ScopePlan,
    member: &MemberPlan,
    tables: &[AccessorTable],
    rt: &str,
) -> Result<Vec<Item>, CodegenError> {
    if !member.has_value_access() {
        return Ok(Vec::new());
    }
    let local = to_snake_case(&member.decl.name);
    let ty = &member.decl.ty;
    let resolved = &member.resolved;
    let fail = format!(".unwrap_or_else(|err| {}::accessor_failure(err))", rt);

    let handle = match member.strategy {
        AccessStrategy::Direct => None,
        AccessStrategy::GeneratedAccessor => {
            let accessor = accessor_fn_for(tables, plan.target, &resolved.target_name).ok_or_else(
                || CodegenError::MissingAccessor {
                    target: plan.target_name.clone(),
                    member: resolved.target_name.clone(),
                },
            )?;
            Some(format!("{}::{}()", plan.target_name, accessor))
        }
        AccessStrategy::ReflectionAccessor => Some(format!(
            "{}::bound_accessor(&{})",
            rt,
            accessor_static_name(&plan.facade, &member.decl.name)
        )),
    };

    let mut items = Vec::new();
    if member.emit_getter {
        let body = match &handle {
            None => read_expr("self.target", resolved.kind, &resolved.target_name),
            Some(h) => format!("{}.get(&*self.target){}", h, fail),
        };
        items.push(Item {
            signature: format!("fn {}(&self) -> {}", local, ty),
            body,
            allow_unused: false,
        });
    }
    if member.emit_setter {
        let body = match &handle {
            None => format!(
                "{};",
                write_expr("self.target", resolved.kind, &resolved.target_name)
            ),
            Some(h) => format!("{}.set(&mut *self.target, value){};", h, fail),
        };
        items.push(Item {
            signature: format!("fn set_{}(&mut self, value: {})", local, ty),
            body,
            allow_unused: false,
        });
    }
    Ok(items)
}

fn method_item(plan: &ScopePlan, member: &MemberPlan, rt: &str) -> Item {
    let decl = &member.decl;
    let params: Vec<String> = decl
        .parameters
        .iter()
        .map(|p| format!(", {}: {}", to_snake_case(&p.name), p.ty))
        .collect();
    let ret = if decl.ty.is_unit() {
        String::new()
    } else {
        format!(" -> {}", decl.ty)
    };
    let signature = format!(
        "fn {}(&mut self{}){}",
        to_snake_case(&decl.name),
        params.concat(),
        ret
    );

    match member.strategy {
        AccessStrategy::Direct => {
            let args: Vec<String> = decl
                .parameters
                .iter()
                .map(|p| to_snake_case(&p.name))
                .collect();
            Item {
                signature,
                body: format!(
                    "self.target.{}({})",
                    to_snake_case(&member.resolved.target_name),
                    args.join(", ")
                ),
                allow_unused: false,
            }
        }
        _ => Item {
            signature,
            body: format!(
                "{}::unsupported_member({:?}, {:?})",
                rt, plan.contract, decl.name
            ),
            allow_unused: !decl.parameters.is_empty(),
        },
    }
}

fn event_items(member: &MemberPlan, rt: &str) -> Vec<Item> {
    let local = to_snake_case(&member.decl.name);
    let slot = match member.strategy {
        AccessStrategy::Direct => format!(
            "self.target.{}",
            to_snake_case(&member.resolved.target_name)
        ),
        _ => format!("self.{}", local),
    };

    vec![
        Item {
            signature: format!(
                "fn subscribe_{}(&mut self, handler: {}::EventHandler<{}>) -> {}::SubscriptionId",
                local, rt, member.decl.ty, rt
            ),
            body: format!("{}.subscribe_handler(handler)", slot),
            allow_unused: false,
        },
        Item {
            signature: format!(
                "fn unsubscribe_{}(&mut self, id: {}::SubscriptionId) -> bool",
                local, rt
            ),
            body: format!("{}.unsubscribe(id)", slot),
            allow_unused: false,
        },
    ]
}

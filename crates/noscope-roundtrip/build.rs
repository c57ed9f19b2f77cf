//! Generates the facades `src/lib.rs` includes.
//!
//! The declarations below describe the types defined in `src/lib.rs`. The
//! build fails if any scope reports an error or leaves a member unresolved.

use noscope_checker::{has_errors, ScopeAnalyzer};
use noscope_codegen::Generator;
use noscope_model::{
    AccessKind, NameOverride, Parameter, ScopeDeclaration, ScopeMemberDeclaration, TargetMember,
    TargetType, TypeTable, ValueType,
};
use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let mut table = TypeTable::new();
    let god = table.add_type(
        TargetType::new("GodObject")
            .extensible(true)
            .with_member(TargetMember::field("private_field", "i32").non_public())
            .with_member(TargetMember::field("private_string", "String").non_public())
            .with_member(
                TargetMember::field("readonly_private_field", "i32")
                    .non_public()
                    .readonly(),
            )
            .with_member(TargetMember::property("PublicProperty", "i32", true, true))
            .with_member(TargetMember::property("PrivateProperty", "i32", true, true).non_public())
            .with_member(TargetMember::property("WhoCoMesUpWiThThEsEnAmEs", "i32", true, true))
            .with_member(TargetMember::method("PublicMethod", ValueType::unit(), vec![]))
            .with_member(TargetMember::method("PublicMethodWithReturn", "i32", vec![]))
            .with_member(TargetMember::method(
                "PublicMethodWithParameters",
                "i32",
                vec![Parameter::new("a", "i32"), Parameter::new("b", "i32")],
            ))
            .with_member(TargetMember::event("ValueChanged", "i32"))
            .with_member(TargetMember::event("Tick", "u64").non_public()),
    )?;
    let sealed = table.add_type(
        TargetType::new("SealedBinaryType")
            .with_member(TargetMember::field("private_value", "i32").non_public())
            .with_member(TargetMember::field("private_name", "String").non_public())
            .with_member(TargetMember::property("SecretCode", "u32", true, false).non_public()),
    )?;
    let counter = table.add_type(
        TargetType::new("Counter")
            .extensible(true)
            .with_member(TargetMember::field("_count", "i32").non_public())
            .with_member(TargetMember::property("Count", "String", true, true).non_public()),
    )?;

    let scopes = [
        ScopeDeclaration::new("IDirectAccessorScope", god)
            .with_member(ScopeMemberDeclaration::property("PublicProperty", "i32", true, true))
            .with_member(ScopeMemberDeclaration::method("PublicMethod", ValueType::unit(), vec![]))
            .with_member(ScopeMemberDeclaration::method("PublicMethodWithReturn", "i32", vec![]))
            .with_member(ScopeMemberDeclaration::method(
                "PublicMethodWithParameters",
                "i32",
                vec![Parameter::new("a", "i32"), Parameter::new("b", "i32")],
            ))
            .with_member(
                ScopeMemberDeclaration::property("NiceName", "i32", true, true)
                    .with_override(NameOverride::symbolic("GodObject::WhoCoMesUpWiThThEsEnAmEs")),
            ),
        ScopeDeclaration::new("IGeneratedAccessorScope", god)
            .with_member(ScopeMemberDeclaration::property("private_field", "i32", true, true))
            .with_member(ScopeMemberDeclaration::property("private_string", "String", true, true))
            .with_member(ScopeMemberDeclaration::property("readonly_private_field", "i32", true, false))
            .with_member(ScopeMemberDeclaration::property("PrivateProperty", "i32", true, true)),
        ScopeDeclaration::new("IReflectionAccessorScope", sealed)
            .with_member(ScopeMemberDeclaration::property("private_value", "i32", true, true))
            .with_member(ScopeMemberDeclaration::property("SecretCode", "u32", true, false)),
        ScopeDeclaration::new("IEventScope", god)
            .with_member(ScopeMemberDeclaration::event("ValueChanged", "i32"))
            .with_member(ScopeMemberDeclaration::event("Tick", "u64")),
        ScopeDeclaration::new("IMethodScope", god).with_member(
            ScopeMemberDeclaration::method(
                "PublicMethodWithParameters",
                "i32",
                vec![Parameter::new("a", "i32"), Parameter::new("b", "i32")],
            )
            .with_access(AccessKind::ReflectionAccessor),
        ),
        ScopeDeclaration::new("ICounterScope", counter)
            .with_member(
                ScopeMemberDeclaration::property("Raw", "i32", true, true)
                    .with_override(NameOverride::symbolic("Counter::_count")),
            )
            .with_member(ScopeMemberDeclaration::property("Count", "String", true, true)),
    ];

    let diagnostics = ScopeAnalyzer::new(&table).analyze_all(&scopes);
    if has_errors(&diagnostics) {
        return Err(format!("scope analysis failed: {:?}", diagnostics).into());
    }

    let output = Generator::new(&table).generate(&scopes)?;
    if !output.skipped.is_empty() {
        return Err(format!("unresolved scope members: {:?}", output.skipped).into());
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    for file in &output.files {
        fs::write(out_dir.join(&file.path), &file.contents)?;
    }
    Ok(())
}

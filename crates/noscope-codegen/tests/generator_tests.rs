//! Integration tests for facade and accessor-table generation

use noscope_codegen::{FileKind, Generator, GeneratorOptions};
use noscope_model::{
    AccessKind, NameOverride, Parameter, ScopeDeclaration, ScopeMemberDeclaration, TargetMember,
    TargetType, TypeId, TypeTable, ValueType,
};

// ============================================================================
// Fixtures
// ============================================================================

struct Fixture {
    table: TypeTable,
    god: TypeId,
    sealed: TypeId,
}

fn fixture() -> Fixture {
    let mut table = TypeTable::new();
    let god = table
        .add_type(
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
        )
        .unwrap();
    let sealed = table
        .add_type(
            TargetType::new("SealedBinaryType")
                .with_member(TargetMember::field("private_value", "i32").non_public())
                .with_member(TargetMember::field("private_name", "String").non_public())
                .with_member(TargetMember::property("SecretCode", "u32", true, false).non_public()),
        )
        .unwrap();

    Fixture { table, god, sealed }
}

fn direct_scope(god: TypeId) -> ScopeDeclaration {
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
        )
}

fn generated_scope(god: TypeId) -> ScopeDeclaration {
    ScopeDeclaration::new("IGeneratedAccessorScope", god)
        .with_member(ScopeMemberDeclaration::property("private_field", "i32", true, true))
        .with_member(ScopeMemberDeclaration::property("private_string", "String", true, true))
        .with_member(ScopeMemberDeclaration::property("readonly_private_field", "i32", true, true))
        .with_member(ScopeMemberDeclaration::property("PrivateProperty", "i32", true, true))
}

fn reflection_scope(sealed: TypeId) -> ScopeDeclaration {
    ScopeDeclaration::new("IReflectionAccessorScope", sealed)
        .with_member(ScopeMemberDeclaration::property("private_value", "i32", true, true))
        .with_member(ScopeMemberDeclaration::property("SecretCode", "u32", true, false))
}

// ============================================================================
// Direct facades
// ============================================================================

#[test]
fn test_direct_facade() {
    let f = fixture();
    let output = Generator::new(&f.table).generate(&[direct_scope(f.god)]).unwrap();
    let file = output.file("direct_accessor_scope.g.rs").unwrap();
    let text = &file.contents;

    assert_eq!(file.kind, FileKind::Facade);
    assert!(text.contains("pub trait IDirectAccessorScope {"));
    assert!(text.contains("    fn public_property(&self) -> i32;"));
    assert!(text.contains("    fn set_public_property(&mut self, value: i32);"));
    assert!(text.contains("pub struct DirectAccessorScope<'a> {"));
    assert!(text.contains("    target: &'a mut GodObject,"));
    assert!(text.contains("impl<'a> IDirectAccessorScope for DirectAccessorScope<'a> {"));
    assert!(text.contains("        self.target.public_property()"));
    assert!(text.contains("        self.target.set_public_property(value);"));
    assert!(text.contains("    fn public_method(&mut self) {"));
    assert!(text.contains("    fn public_method_with_return(&mut self) -> i32 {"));
    assert!(text.contains("    fn public_method_with_parameters(&mut self, a: i32, b: i32) -> i32 {"));
    assert!(text.contains("        self.target.public_method_with_parameters(a, b)"));

    // no accessor table for an all-direct scope
    assert_eq!(output.files_of(FileKind::AccessorTable).count(), 0);
}

#[test]
fn test_renamed_member_targets_override() {
    let f = fixture();
    let output = Generator::new(&f.table).generate(&[direct_scope(f.god)]).unwrap();
    let text = &output.file("direct_accessor_scope.g.rs").unwrap().contents;

    assert!(text.contains("    fn nice_name(&self) -> i32 {"));
    assert!(text.contains("        self.target.who_co_mes_up_wi_th_th_es_en_am_es()"));
    assert!(text.contains("        self.target.set_who_co_mes_up_wi_th_th_es_en_am_es(value);"));
}

#[test]
fn test_direct_field_access() {
    let f = fixture();
    let scope = ScopeDeclaration::new("ForcedScope", f.god).with_member(
        ScopeMemberDeclaration::property("private_field", "i32", true, true)
            .with_access(AccessKind::Direct),
    );
    let output = Generator::new(&f.table).generate(&[scope]).unwrap();
    let text = &output.file("forced_scope_impl.g.rs").unwrap().contents;

    assert!(text.contains("pub struct ForcedScopeImpl<'a> {"));
    assert!(text.contains("        self.target.private_field.clone()"));
    assert!(text.contains("        self.target.private_field = value;"));
}

// ============================================================================
// Generated accessors
// ============================================================================

#[test]
fn test_generated_accessor_facade_and_table() {
    let f = fixture();
    let output = Generator::new(&f.table).generate(&[generated_scope(f.god)]).unwrap();

    let facade = &output.file("generated_accessor_scope.g.rs").unwrap().contents;
    assert!(facade.contains(
        "        GodObject::accessor_for_private_field().get(&*self.target).unwrap_or_else(|err| ::noscope_runtime::accessor_failure(err))"
    ));
    assert!(facade.contains(
        "        GodObject::accessor_for_private_field().set(&mut *self.target, value).unwrap_or_else(|err| ::noscope_runtime::accessor_failure(err));"
    ));
    assert!(facade.contains("    fn readonly_private_field(&self) -> i32"));
    assert!(!facade.contains("set_readonly_private_field"));

    let table = output.file("god_object_accessors.g.rs").unwrap();
    assert_eq!(table.kind, FileKind::AccessorTable);
    let text = &table.contents;
    assert!(text.contains("impl GodObject {"));
    assert!(text.contains(
        "    pub fn accessor_for_private_field() -> &'static ::noscope_runtime::Accessor<GodObject, i32> {"
    ));
    assert!(text.contains("            ::noscope_runtime::Accessor::new(\"private_field\")"));
    assert!(text.contains("                .with_getter(|target: &GodObject| target.private_field.clone())"));
    assert!(text.contains(
        "                .with_setter(|target: &mut GodObject, value: i32| target.private_field = value)"
    ));
    assert!(text.contains("                .with_getter(|target: &GodObject| target.private_property())"));
    assert!(text.contains(
        "                .with_setter(|target: &mut GodObject, value: i32| target.set_private_property(value))"
    ));
}

#[test]
fn test_readonly_field_has_no_setter_in_table() {
    let f = fixture();
    let plans = Generator::new(&f.table).plan(&[generated_scope(f.god)]);
    let tables = noscope_codegen::emit::collect_tables(&plans);

    assert_eq!(tables.len(), 1);
    let entry = tables[0].entry("readonly_private_field").unwrap();
    assert!(entry.getter);
    assert!(!entry.setter);
}

#[test]
fn test_accessor_table_deduplicated_across_scopes() {
    let f = fixture();
    let reader = ScopeDeclaration::new("IReader", f.god)
        .with_member(ScopeMemberDeclaration::property("private_field", "i32", true, false));
    let writer = ScopeDeclaration::new("IWriter", f.god)
        .with_member(ScopeMemberDeclaration::property("private_field", "i32", false, true))
        .with_member(ScopeMemberDeclaration::property("private_string", "String", true, false));

    let output = Generator::new(&f.table).generate(&[reader, writer]).unwrap();
    let tables: Vec<_> = output.files_of(FileKind::AccessorTable).collect();
    assert_eq!(tables.len(), 1);

    let text = &tables[0].contents;
    assert_eq!(text.matches("pub fn accessor_for_private_field()").count(), 1);
    assert_eq!(text.matches("pub fn accessor_for_private_string()").count(), 1);
    assert!(text.contains(".with_getter(|target: &GodObject| target.private_field.clone())"));
    assert!(text.contains(".with_setter(|target: &mut GodObject, value: i32| target.private_field = value)"));
}

#[test]
fn test_colliding_accessor_names_stay_distinct() {
    let mut table = TypeTable::new();
    let counter = table
        .add_type(
            TargetType::new("Counter")
                .extensible(true)
                .with_member(TargetMember::field("_count", "i32").non_public())
                .with_member(TargetMember::property("Count", "String", true, true).non_public()),
        )
        .unwrap();
    let scope = ScopeDeclaration::new("ICounterScope", counter)
        .with_member(
            ScopeMemberDeclaration::property("Raw", "i32", true, true)
                .with_override(NameOverride::symbolic("Counter::_count")),
        )
        .with_member(ScopeMemberDeclaration::property("Count", "String", true, true));

    let output = Generator::new(&table).generate(&[scope]).unwrap();

    let text = &output.file("counter_accessors.g.rs").unwrap().contents;
    assert!(text.contains(
        "    pub fn accessor_for_count() -> &'static ::noscope_runtime::Accessor<Counter, i32> {"
    ));
    assert!(text.contains("            ::noscope_runtime::Accessor::new(\"_count\")"));
    assert!(text.contains(
        "    pub fn accessor_for_count_2() -> &'static ::noscope_runtime::Accessor<Counter, String> {"
    ));
    assert!(text.contains("            ::noscope_runtime::Accessor::new(\"Count\")"));

    let facade = &output.file("counter_scope.g.rs").unwrap().contents;
    assert!(facade.contains("        Counter::accessor_for_count().get(&*self.target)"));
    assert!(facade.contains("        Counter::accessor_for_count_2().get(&*self.target)"));
    assert!(facade.contains("    fn count(&self) -> String"));
}

// ============================================================================
// Reflection accessors
// ============================================================================

#[test]
fn test_reflection_accessor_facade() {
    let f = fixture();
    let output = Generator::new(&f.table)
        .generate(&[reflection_scope(f.sealed)])
        .unwrap();
    let text = &output.file("reflection_accessor_scope.g.rs").unwrap().contents;

    assert!(text.contains(
        "static REFLECTION_ACCESSOR_SCOPE_PRIVATE_VALUE: ::noscope_runtime::Lazy<::noscope_runtime::AccessorResult<SealedBinaryType, i32>> ="
    ));
    assert!(text.contains(
        "    ::noscope_runtime::Lazy::new(|| ::noscope_runtime::accessor_cache::field(\"private_value\"));"
    ));
    assert!(text.contains(
        "    ::noscope_runtime::Lazy::new(|| ::noscope_runtime::accessor_cache::property(\"SecretCode\"));"
    ));
    assert!(text.contains(
        "        ::noscope_runtime::bound_accessor(&REFLECTION_ACCESSOR_SCOPE_PRIVATE_VALUE).get(&*self.target).unwrap_or_else(|err| ::noscope_runtime::accessor_failure(err))"
    ));
    assert!(!text.contains("set_secret_code"));

    // sealed types never get an accessor table
    assert_eq!(output.files_of(FileKind::AccessorTable).count(), 0);
}

// ============================================================================
// Methods and events
// ============================================================================

#[test]
fn test_non_direct_method_fails_loudly() {
    let f = fixture();
    let scope = ScopeDeclaration::new("IMethodScope", f.god).with_member(
        ScopeMemberDeclaration::method(
            "PublicMethodWithParameters",
            "i32",
            vec![Parameter::new("a", "i32"), Parameter::new("b", "i32")],
        )
        .with_access(AccessKind::ReflectionAccessor),
    );
    let output = Generator::new(&f.table).generate(&[scope]).unwrap();
    let text = &output.file("method_scope.g.rs").unwrap().contents;

    assert!(text.contains("    #[allow(unused_variables)]"));
    assert!(text.contains(
        "        ::noscope_runtime::unsupported_member(\"IMethodScope\", \"PublicMethodWithParameters\")"
    ));
}

#[test]
fn test_direct_event_forwards_to_target() {
    let f = fixture();
    let scope = ScopeDeclaration::new("IEventScope", f.god)
        .with_member(ScopeMemberDeclaration::event("ValueChanged", "i32"));
    let output = Generator::new(&f.table).generate(&[scope]).unwrap();
    let text = &output.file("event_scope.g.rs").unwrap().contents;

    assert!(text.contains(
        "    fn subscribe_value_changed(&mut self, handler: ::noscope_runtime::EventHandler<i32>) -> ::noscope_runtime::SubscriptionId;"
    ));
    assert!(text.contains("        self.target.value_changed.subscribe_handler(handler)"));
    assert!(text.contains("        self.target.value_changed.unsubscribe(id)"));
    assert!(text.contains("        Self { target }"));
}

#[test]
fn test_non_direct_event_is_detached() {
    let f = fixture();
    let scope = ScopeDeclaration::new("ITickScope", f.god)
        .with_member(ScopeMemberDeclaration::event("Tick", "u64"));
    let output = Generator::new(&f.table).generate(&[scope]).unwrap();
    let text = &output.file("tick_scope.g.rs").unwrap().contents;

    assert!(text.contains("    tick: ::noscope_runtime::Event<u64>,"));
    assert!(text.contains("            tick: ::noscope_runtime::Event::new(),"));
    assert!(text.contains("        self.tick.subscribe_handler(handler)"));
    assert!(!text.contains("self.target.tick"));
}

// ============================================================================
// Fault isolation and options
// ============================================================================

#[test]
fn test_missing_member_excluded_from_output() {
    let f = fixture();
    let scope = direct_scope(f.god)
        .with_member(ScopeMemberDeclaration::property("Ghost", "i32", true, true))
        .with_member(ScopeMemberDeclaration::method("Vanish", ValueType::unit(), vec![]));
    let output = Generator::new(&f.table).generate(&[scope]).unwrap();
    let text = &output.file("direct_accessor_scope.g.rs").unwrap().contents;

    assert!(!text.contains("ghost"));
    assert!(!text.contains("vanish"));
    assert!(text.contains("fn public_property(&self) -> i32"));

    let skipped: Vec<_> = output.skipped.iter().map(|s| s.member.as_str()).collect();
    assert_eq!(skipped, vec!["Ghost", "Vanish"]);
}

#[test]
fn test_generator_options() {
    let f = fixture();
    let options = GeneratorOptions {
        runtime_crate: "crate::rt".to_string(),
        emit_contract: false,
    };
    let output = Generator::with_options(&f.table, options)
        .generate(&[generated_scope(f.god)])
        .unwrap();

    let facade = &output.file("generated_accessor_scope.g.rs").unwrap().contents;
    assert!(!facade.contains("pub trait"));
    assert!(facade.contains("crate::rt::accessor_failure(err)"));

    let table = &output.file("god_object_accessors.g.rs").unwrap().contents;
    assert!(table.contains("&'static crate::rt::Accessor<GodObject, i32>"));
}

#[test]
fn test_generation_is_deterministic() {
    let f = fixture();
    let scopes = [
        direct_scope(f.god),
        generated_scope(f.god),
        reflection_scope(f.sealed),
    ];
    let generator = Generator::new(&f.table);

    let first = generator.generate(&scopes).unwrap();
    let second = generator.generate(&scopes).unwrap();
    assert_eq!(first.files, second.files);

    let paths: Vec<_> = first
        .files
        .iter()
        .map(|f| f.path.display().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "direct_accessor_scope.g.rs",
            "generated_accessor_scope.g.rs",
            "reflection_accessor_scope.g.rs",
            "god_object_accessors.g.rs",
        ]
    );
}

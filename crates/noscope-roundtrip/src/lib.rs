//! Target types with their generated facades
//!
//! `build.rs` runs the generator over declarations describing the types in
//! this module and writes the output to `OUT_DIR`. Accessor tables must sit
//! in the module that defines their target type, so every generated file is
//! included here.

use noscope_runtime::{Event, Lazy, Reflect, RuntimeType};

// ============================================================================
// GodObject
// ============================================================================

/// Extensible type with members of every kind and visibility
pub struct GodObject {
    private_field: i32,
    private_string: String,
    readonly_private_field: i32,
    public_property: i32,
    private_property: i32,
    who_co_mes_up_wi_th_th_es_en_am_es: i32,
    /// Number of mutating method calls
    pub method_calls: u32,
    /// Raised by `raise_value_changed`
    pub value_changed: Event<i32>,
    tick: Event<u64>,
}

impl GodObject {
    pub fn new() -> Self {
        Self {
            private_field: 42,
            private_string: "private".to_string(),
            readonly_private_field: 100,
            public_property: 10,
            private_property: 30,
            who_co_mes_up_wi_th_th_es_en_am_es: 60,
            method_calls: 0,
            value_changed: Event::new(),
            tick: Event::new(),
        }
    }

    pub fn public_property(&self) -> i32 {
        self.public_property
    }

    pub fn set_public_property(&mut self, value: i32) {
        self.public_property = value;
    }

    fn private_property(&self) -> i32 {
        self.private_property
    }

    fn set_private_property(&mut self, value: i32) {
        self.private_property = value;
    }

    pub fn who_co_mes_up_wi_th_th_es_en_am_es(&self) -> i32 {
        self.who_co_mes_up_wi_th_th_es_en_am_es
    }

    pub fn set_who_co_mes_up_wi_th_th_es_en_am_es(&mut self, value: i32) {
        self.who_co_mes_up_wi_th_th_es_en_am_es = value;
    }

    pub fn public_method(&mut self) {
        self.method_calls += 1;
    }

    pub fn public_method_with_return(&self) -> i32 {
        self.public_property * 2
    }

    pub fn public_method_with_parameters(&mut self, a: i32, b: i32) -> i32 {
        self.method_calls += 1;
        a + b
    }

    pub fn raise_value_changed(&self, value: i32) {
        self.value_changed.raise(self, &value);
    }

    pub fn raise_tick(&self, value: u64) {
        self.tick.raise(self, &value);
    }

    pub fn private_field_value(&self) -> i32 {
        self.private_field
    }

    pub fn private_string_value(&self) -> &str {
        &self.private_string
    }

    pub fn private_property_value(&self) -> i32 {
        self.private_property
    }
}

impl Default for GodObject {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SealedBinaryType
// ============================================================================

/// Non-extensible type reached through runtime metadata
pub struct SealedBinaryType {
    private_value: i32,
    private_name: String,
    secret_code: u32,
}

impl SealedBinaryType {
    pub fn new() -> Self {
        Self {
            private_value: 100,
            private_name: "sealed".to_string(),
            secret_code: 0xC0DE,
        }
    }

    pub fn get_private_value(&self) -> i32 {
        self.private_value
    }

    pub fn get_private_name(&self) -> &str {
        &self.private_name
    }
}

impl Default for SealedBinaryType {
    fn default() -> Self {
        Self::new()
    }
}

impl Reflect for SealedBinaryType {
    fn runtime_type() -> &'static RuntimeType {
        static TYPE: Lazy<RuntimeType> = Lazy::new(|| {
            RuntimeType::builder::<SealedBinaryType>("SealedBinaryType")
                .field(
                    "private_value",
                    |t: &SealedBinaryType| t.private_value,
                    |t: &mut SealedBinaryType, v: i32| t.private_value = v,
                )
                .field(
                    "private_name",
                    |t: &SealedBinaryType| t.private_name.clone(),
                    |t: &mut SealedBinaryType, v: String| t.private_name = v,
                )
                .read_only_property("SecretCode", |t: &SealedBinaryType| t.secret_code)
                .build()
        });
        &TYPE
    }
}

// ============================================================================
// Counter
// ============================================================================

/// Backing field `_count` next to an unrelated `Count` property
pub struct Counter {
    _count: i32,
    label: String,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            _count: 1,
            label: "one".to_string(),
        }
    }

    fn count(&self) -> String {
        self.label.clone()
    }

    fn set_count(&mut self, value: String) {
        self.label = value;
    }

    pub fn raw_count(&self) -> i32 {
        self._count
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Generated code
// ============================================================================

include!(concat!(env!("OUT_DIR"), "/god_object_accessors.g.rs"));
include!(concat!(env!("OUT_DIR"), "/counter_accessors.g.rs"));
include!(concat!(env!("OUT_DIR"), "/direct_accessor_scope.g.rs"));
include!(concat!(env!("OUT_DIR"), "/generated_accessor_scope.g.rs"));
include!(concat!(env!("OUT_DIR"), "/reflection_accessor_scope.g.rs"));
include!(concat!(env!("OUT_DIR"), "/event_scope.g.rs"));
include!(concat!(env!("OUT_DIR"), "/method_scope.g.rs"));
include!(concat!(env!("OUT_DIR"), "/counter_scope.g.rs"));

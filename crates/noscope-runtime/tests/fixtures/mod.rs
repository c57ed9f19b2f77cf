//! Reflectable target type shared by the accessor tests

use noscope_runtime::{Lazy, Reflect, RuntimeType};

pub struct SealedBinaryType {
    private_value: i32,
    private_name: String,
    secret_code: u32,
    pub public_value: i32,
}

impl SealedBinaryType {
    pub fn new() -> Self {
        Self {
            private_value: 100,
            private_name: "sealed".to_string(),
            secret_code: 0xC0DE,
            public_value: 200,
        }
    }

    pub fn get_private_value(&self) -> i32 {
        self.private_value
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
                .readonly_field("public_value", |t: &SealedBinaryType| t.public_value)
                .build()
        });
        &TYPE
    }
}

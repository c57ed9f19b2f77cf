//! NoScope Code Generator
//!
//! Turns scope declarations into Rust facade code.
//!
//! This crate provides:
//! - `select_strategy`: the per-member access-strategy decision
//! - `Planner`: resolution plus strategy selection, with per-member fault isolation
//! - Facade and accessor-table emission
//! - `Generator`: the driver producing all files for a set of scopes
//!
//! # Usage
//!
//! ```ignore
//! use noscope_codegen::Generator;
//!
//! let output = Generator::new(&table).generate(&scopes)?;
//! for file in &output.files {
//!     std::fs::write(out_dir.join(&file.path), &file.contents)?;
//! }
//! ```

#![warn(missing_docs)]

pub mod emit;
pub mod error;
pub mod generator;
pub mod naming;
pub mod plan;
pub mod strategy;

pub use error::CodegenError;
pub use generator::{FileKind, GeneratedFile, GeneratedOutput, Generator, GeneratorOptions};
pub use plan::{MemberPlan, Planner, ScopePlan, SkippedMember};
pub use strategy::{select_strategy, AccessStrategy};

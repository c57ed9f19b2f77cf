//! Generation driver
//!
//! Plans every scope, emits one facade file per scope, then emits one
//! accessor table per target type referenced by a generated-accessor member.

use noscope_model::{MemberModel, ScopeDeclaration};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::emit::{collect_tables, emit_accessor_table, emit_facade};
use crate::error::CodegenError;
use crate::naming;
use crate::plan::{Planner, ScopePlan, SkippedMember};

/// Options controlling emitted code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Path of the runtime crate in emitted code
    pub runtime_crate: String,
    /// Emit the contract trait next to the facade
    pub emit_contract: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_crate: "::noscope_runtime".to_string(),
            emit_contract: true,
        }
    }
}

/// What a generated file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Contract trait and facade for one scope
    Facade,
    /// Accessor table for one target type
    AccessorTable,
}

/// One emitted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative output path
    pub path: PathBuf,
    /// File kind
    pub kind: FileKind,
    /// Rust source text
    pub contents: String,
}

/// Result of a generation pass
#[derive(Debug, Clone, Default)]
pub struct GeneratedOutput {
    /// Files in emission order: facades in scope order, then accessor tables
    pub files: Vec<GeneratedFile>,
    /// Members left out because they did not resolve
    pub skipped: Vec<SkippedMember>,
}

impl GeneratedOutput {
    /// Find a file by relative path
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == PathBuf::from(path))
    }

    /// Files of one kind
    pub fn files_of(&self, kind: FileKind) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }
}

/// Facade and accessor-table generator
pub struct Generator<'m, M: MemberModel + ?Sized> {
    planner: Planner<'m, M>,
    options: GeneratorOptions,
}

impl<'m, M: MemberModel + ?Sized> Generator<'m, M> {
    /// Create a generator with default options
    pub fn new(model: &'m M) -> Self {
        Self::with_options(model, GeneratorOptions::default())
    }

    /// Create a generator with explicit options
    pub fn with_options(model: &'m M, options: GeneratorOptions) -> Self {
        Self {
            planner: Planner::new(model),
            options,
        }
    }

    /// Options in use
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Plan every scope without emitting
    pub fn plan(&self, scopes: &[ScopeDeclaration]) -> Vec<ScopePlan> {
        scopes.iter().map(|s| self.planner.plan(s)).collect()
    }

    /// Generate all files for a set of scopes
    pub fn generate(&self, scopes: &[ScopeDeclaration]) -> Result<GeneratedOutput, CodegenError> {
        let plans = self.plan(scopes);
        let tables = collect_tables(&plans);
        let mut output = GeneratedOutput::default();

        for plan in &plans {
            let mut contents = String::new();
            emit_facade(plan, &tables, &self.options, &mut contents)?;
            debug!(
                scope = %plan.contract,
                facade = %plan.facade,
                members = plan.members.len(),
                skipped = plan.skipped.len(),
                "emitted facade"
            );

            output.files.push(GeneratedFile {
                path: PathBuf::from(naming::facade_file_name(&plan.facade)),
                kind: FileKind::Facade,
                contents,
            });
            output.skipped.extend(plan.skipped.iter().cloned());
        }

        for table in &tables {
            let mut contents = String::new();
            emit_accessor_table(table, &self.options, &mut contents)?;
            debug!(
                target_type = %table.target_name,
                entries = table.entries.len(),
                "emitted accessor table"
            );

            output.files.push(GeneratedFile {
                path: PathBuf::from(naming::accessor_table_file_name(&table.target_name)),
                kind: FileKind::AccessorTable,
                contents,
            });
        }

        info!(
            scopes = scopes.len(),
            files = output.files.len(),
            skipped = output.skipped.len(),
            "generation finished"
        );
        Ok(output)
    }
}

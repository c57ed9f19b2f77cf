//! Subcommand implementations

pub mod check;
pub mod generate;

use anyhow::Context;
use noscope_checker::{create_files, JsonDiagnostic, ScopeAnalyzer, ScopeDiagnostic};
use std::path::Path;

use crate::manifest::Manifest;
use crate::output::StyledOutput;

/// Diagnostics output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

fn load(path: &Path) -> anyhow::Result<Manifest> {
    Manifest::load(path).with_context(|| format!("could not load {}", path.display()))
}

fn analyze(manifest: &Manifest) -> Vec<ScopeDiagnostic> {
    ScopeAnalyzer::new(&manifest.table).analyze_all(&manifest.scopes)
}

/// Render through codespan, pointing into the manifest text
fn emit_pretty(
    out: &mut StyledOutput,
    manifest: &Manifest,
    diagnostics: &[ScopeDiagnostic],
) -> anyhow::Result<()> {
    let files = create_files(&manifest.path, manifest.source.clone());
    for diagnostic in diagnostics {
        diagnostic
            .to_diagnostic(0)
            .emit_to(out.stream(), &files)
            .context("failed to render diagnostic")?;
    }
    Ok(())
}

/// Print a JSON array of diagnostics to stdout
fn emit_json(manifest: &Manifest, diagnostics: &[ScopeDiagnostic]) -> anyhow::Result<()> {
    let files = create_files(&manifest.path, manifest.source.clone());
    let json: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| JsonDiagnostic::from_diagnostic(&d.to_diagnostic(0), &files))
        .collect();
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

//! `noscope check`: analyze scopes and report diagnostics.

use std::path::Path;
use std::process::ExitCode;

use crate::output::{print_summary, resolve_color_choice, ColorMode, StyledOutput};

use super::{analyze, emit_json, emit_pretty, load, OutputFormat};

pub fn execute(manifest: &Path, format: OutputFormat, color: ColorMode) -> anyhow::Result<ExitCode> {
    let manifest = load(manifest)?;
    let diagnostics = analyze(&manifest);

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;

    match format {
        OutputFormat::Json => emit_json(&manifest, &diagnostics)?,
        OutputFormat::Pretty => {
            let mut out = StyledOutput::new(resolve_color_choice(color));
            emit_pretty(&mut out, &manifest, &diagnostics)?;
            print_summary(&mut out, manifest.scopes.len(), errors, warnings);
        }
    }

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

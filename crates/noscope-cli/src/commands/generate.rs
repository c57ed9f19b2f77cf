//! `noscope generate`: write facades and accessor tables.

use anyhow::Context;
use noscope_checker::has_errors;
use noscope_codegen::Generator;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::output::{resolve_color_choice, ColorMode, StyledOutput};

use super::{analyze, emit_pretty, load};

pub fn execute(
    manifest_path: &Path,
    out_dir: Option<PathBuf>,
    allow_errors: bool,
    color: ColorMode,
) -> anyhow::Result<ExitCode> {
    let manifest = load(manifest_path)?;
    let mut out = StyledOutput::new(resolve_color_choice(color));

    let diagnostics = analyze(&manifest);
    emit_pretty(&mut out, &manifest, &diagnostics)?;

    if has_errors(&diagnostics) && !allow_errors {
        out.error("error");
        out.plain(": scope analysis failed; nothing was generated (use --allow-errors to override).");
        out.newline();
        return Ok(ExitCode::FAILURE);
    }

    let out_dir = out_dir.unwrap_or_else(|| default_out_dir(manifest_path));
    let output = Generator::with_options(&manifest.table, manifest.options.clone())
        .generate(&manifest.scopes)
        .context("code generation failed")?;

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("could not create {}", out_dir.display()))?;
    for file in &output.files {
        let path = out_dir.join(&file.path);
        std::fs::write(&path, &file.contents)
            .with_context(|| format!("could not write {}", path.display()))?;
        info!(path = %path.display(), "wrote generated file");
    }

    for skipped in &output.skipped {
        out.warning("skipped");
        out.plain(&format!(" {}::{}: {}", skipped.scope, skipped.member, skipped.error));
        out.newline();
    }

    out.success("Generated");
    out.plain(&format!(
        " {} file{} in {}",
        output.files.len(),
        if output.files.len() == 1 { "" } else { "s" },
        out_dir.display()
    ));
    out.newline();
    Ok(ExitCode::SUCCESS)
}

/// `generated/` next to the manifest
fn default_out_dir(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("generated")
}

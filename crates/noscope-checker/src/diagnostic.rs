//! Diagnostic infrastructure for scope analysis
//!
//! Every analyzer finding is a `ScopeDiagnostic` with a stable code
//! (NS0001..NS0004). Findings render to the terminal through
//! codespan-reporting or to JSON for editor integration.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, LabelStyle, Severity};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::WriteColor;
use noscope_model::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity of a scope diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Blocks generation
    Error,
    /// Reported, does not block generation
    Warning,
}

impl DiagnosticSeverity {
    fn to_codespan(self) -> Severity {
        match self {
            DiagnosticSeverity::Error => Severity::Error,
            DiagnosticSeverity::Warning => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => f.write_str("error"),
            DiagnosticSeverity::Warning => f.write_str("warning"),
        }
    }
}

/// Static metadata for a diagnostic kind
pub struct DiagnosticDescriptor {
    /// Stable code, e.g. "NS0001"
    pub id: &'static str,
    /// Short name, e.g. "missing-member"
    pub name: &'static str,
    /// One-line title
    pub title: &'static str,
    /// Category
    pub category: &'static str,
    /// Severity the analyzer reports with
    pub default_severity: DiagnosticSeverity,
}

/// NS0001
pub static MISSING_MEMBER: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "NS0001",
    name: "missing-member",
    title: "Member not found",
    category: "Usage",
    default_severity: DiagnosticSeverity::Error,
};

/// NS0002
pub static TYPE_MISMATCH: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "NS0002",
    name: "type-mismatch",
    title: "Type mismatch",
    category: "Usage",
    default_severity: DiagnosticSeverity::Error,
};

/// NS0003
pub static MISSING_ACCESSOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "NS0003",
    name: "missing-accessor",
    title: "Missing accessor",
    category: "Usage",
    default_severity: DiagnosticSeverity::Error,
};

/// NS0004
pub static USE_NAMEOF: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "NS0004",
    name: "use-nameof",
    title: "Use a symbolic member reference",
    category: "Style",
    default_severity: DiagnosticSeverity::Warning,
};

/// Kind of a scope diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Target member not found
    MissingMember,
    /// Local type differs from the target member type
    TypeMismatch,
    /// Local accessor the target member cannot support
    MissingAccessor,
    /// Target-name override written as a string literal
    UseNameof,
}

impl DiagnosticKind {
    /// All kinds, in code order
    pub const ALL: [DiagnosticKind; 4] = [
        DiagnosticKind::MissingMember,
        DiagnosticKind::TypeMismatch,
        DiagnosticKind::MissingAccessor,
        DiagnosticKind::UseNameof,
    ];

    /// Static metadata
    pub fn descriptor(self) -> &'static DiagnosticDescriptor {
        match self {
            DiagnosticKind::MissingMember => &MISSING_MEMBER,
            DiagnosticKind::TypeMismatch => &TYPE_MISMATCH,
            DiagnosticKind::MissingAccessor => &MISSING_ACCESSOR,
            DiagnosticKind::UseNameof => &USE_NAMEOF,
        }
    }

    /// Stable code
    pub fn code(self) -> &'static str {
        self.descriptor().id
    }

    /// Look a kind up by its code
    pub fn from_code(code: &str) -> Option<DiagnosticKind> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }
}

/// A finding reported by the scope analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeDiagnostic {
    /// Kind
    pub kind: DiagnosticKind,
    /// Severity
    pub severity: DiagnosticSeverity,
    /// Location
    pub span: Span,
    /// Formatted message
    pub message: String,
    /// Scope the member belongs to
    pub scope: String,
    /// Local member name
    pub member: String,
    /// Extra context
    pub notes: Vec<String>,
}

impl ScopeDiagnostic {
    /// Create a diagnostic with the kind's default severity
    pub fn new(
        kind: DiagnosticKind,
        span: Span,
        message: impl Into<String>,
        scope: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: kind.descriptor().default_severity,
            span,
            message: message.into(),
            scope: scope.into(),
            member: member.into(),
            notes: Vec::new(),
        }
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Stable code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Whether the diagnostic blocks generation
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    /// Convert to a renderable diagnostic located in `file_id`
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic {
        let label = match self.kind {
            DiagnosticKind::MissingMember => "not found",
            DiagnosticKind::TypeMismatch => "type differs from target",
            DiagnosticKind::MissingAccessor => "accessor not supported by target",
            DiagnosticKind::UseNameof => "string literal",
        };

        let mut diag = Diagnostic::new(self.severity.to_codespan(), self.message.clone())
            .with_code(ErrorCode(self.code()))
            .with_primary_label(file_id, self.span, label);

        for note in &self.notes {
            diag = diag.with_note(note.clone());
        }

        if self.kind == DiagnosticKind::UseNameof {
            diag = diag.with_help("write the override as `nameof = \"Type::member\"`");
        }

        diag
    }
}

impl fmt::Display for ScopeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code(), self.message)
    }
}

/// Error code for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

/// A diagnostic message with source code context
pub struct Diagnostic {
    inner: CsDiagnostic<usize>,
    code: Option<ErrorCode>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(severity).with_message(message),
            code: None,
        }
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.inner = self.inner.with_code(code.0);
        self.code = Some(code);
        self
    }

    /// Add a primary label
    pub fn with_primary_label(
        mut self,
        file_id: usize,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let label = Label::primary(file_id, span.range()).with_message(message);
        self.inner.labels.push(label);
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Emit to any color-capable writer
    pub fn emit_to(
        &self,
        writer: &mut dyn WriteColor,
        files: &SimpleFiles<String, String>,
    ) -> Result<(), codespan_reporting::files::Error> {
        let config = term::Config::default();
        term::emit(writer, &config, files, &self.inner)
    }

    /// The underlying codespan diagnostic
    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }

    /// Convert to JSON for editor integration
    pub fn to_json(&self, files: &SimpleFiles<String, String>) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&JsonDiagnostic::from_diagnostic(self, files))
    }
}

/// JSON representation of a diagnostic
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Code (e.g. "NS0001")
    pub code: Option<String>,
    /// Severity level
    pub severity: String,
    /// Main message
    pub message: String,
    /// Source locations with labels
    pub labels: Vec<JsonLabel>,
    /// Notes and help
    pub notes: Vec<String>,
}

/// JSON representation of a diagnostic label
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLabel {
    /// File path
    pub file: String,
    /// Start line (1-indexed)
    pub start_line: usize,
    /// Start column (1-indexed)
    pub start_column: usize,
    /// End line (1-indexed)
    pub end_line: usize,
    /// End column (1-indexed)
    pub end_column: usize,
    /// Label message
    pub message: Option<String>,
    /// "primary" or "secondary"
    pub style: String,
}

impl JsonDiagnostic {
    /// Convert a diagnostic to its JSON representation
    pub fn from_diagnostic(diag: &Diagnostic, files: &SimpleFiles<String, String>) -> Self {
        let severity = match diag.inner.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Help => "help",
            Severity::Bug => "bug",
        };

        let labels = diag
            .inner
            .labels
            .iter()
            .filter_map(|label| {
                let file = files.get(label.file_id).ok()?;
                let start = file.location((), label.range.start).ok()?;
                let end = file.location((), label.range.end).ok()?;

                Some(JsonLabel {
                    file: file.name().to_string(),
                    start_line: start.line_number,
                    start_column: start.column_number,
                    end_line: end.line_number,
                    end_column: end.column_number,
                    message: Some(label.message.clone()),
                    style: match label.style {
                        LabelStyle::Primary => "primary",
                        LabelStyle::Secondary => "secondary",
                    }
                    .to_string(),
                })
            })
            .collect();

        JsonDiagnostic {
            code: diag.code.as_ref().map(|c| c.0.to_string()),
            severity: severity.to_string(),
            message: diag.inner.message.clone(),
            labels,
            notes: diag.inner.notes.clone(),
        }
    }
}

/// Create a `SimpleFiles` holding one source
pub fn create_files(path: impl Into<PathBuf>, source: impl Into<String>) -> SimpleFiles<String, String> {
    let mut files = SimpleFiles::new();
    files.add(path.into().display().to_string(), source.into());
    files
}

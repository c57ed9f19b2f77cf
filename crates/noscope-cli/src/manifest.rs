//! `noscope.toml` loading
//!
//! A manifest describes the target types, the scopes over them, and the
//! generator options. Scope spans are kept so diagnostics point back into
//! the manifest text.

use noscope_codegen::GeneratorOptions;
use noscope_model::{
    AccessKind, ModelError, NameOverride, Parameter, ScopeDeclaration,
    ScopeMemberDeclaration, Span, TargetMember, TargetType, TypeTable, ValueType, Visibility,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml::Spanned;
use tracing::debug;

/// Default manifest file name
pub const MANIFEST_NAME: &str = "noscope.toml";

/// Errors while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("scope '{scope}' targets unknown type '{target}'")]
    UnknownTarget { scope: String, target: String },

    #[error("member '{member}' of scope '{scope}' sets both `target` and `nameof`")]
    ConflictingOverride { scope: String, member: String },

    #[error("member '{member}' of scope '{scope}' has an invalid target name '{name}'")]
    InvalidOverride {
        scope: String,
        member: String,
        name: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    generator: GeneratorOptions,
    #[serde(default)]
    types: Vec<RawType>,
    #[serde(default)]
    scopes: Vec<RawScope>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawType {
    name: String,
    #[serde(default)]
    extensible: bool,
    base: Option<String>,
    #[serde(default)]
    members: Vec<RawMember>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawMemberKind {
    Field,
    Property,
    Method,
    Event,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawVisibility {
    #[default]
    Public,
    Private,
    Protected,
    Internal,
}

impl From<RawVisibility> for Visibility {
    fn from(raw: RawVisibility) -> Self {
        match raw {
            RawVisibility::Public => Visibility::Public,
            RawVisibility::Private | RawVisibility::Protected | RawVisibility::Internal => {
                Visibility::NonPublic
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMember {
    name: String,
    kind: RawMemberKind,
    #[serde(rename = "type", default = "unit_type")]
    ty: String,
    #[serde(default)]
    visibility: RawVisibility,
    #[serde(default)]
    readonly: bool,
    #[serde(default = "yes")]
    get: bool,
    #[serde(default = "yes")]
    set: bool,
    #[serde(default)]
    params: Vec<RawParam>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScope {
    name: Spanned<String>,
    target: String,
    #[serde(default)]
    members: Vec<RawScopeMember>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawScopeMemberKind {
    Property,
    Method,
    Event,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawAccess {
    #[default]
    Auto,
    Direct,
    Generated,
    Reflection,
}

impl From<RawAccess> for AccessKind {
    fn from(raw: RawAccess) -> Self {
        match raw {
            RawAccess::Auto => AccessKind::Auto,
            RawAccess::Direct => AccessKind::Direct,
            RawAccess::Generated => AccessKind::GeneratedAccessor,
            RawAccess::Reflection => AccessKind::ReflectionAccessor,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScopeMember {
    name: Spanned<String>,
    kind: RawScopeMemberKind,
    #[serde(rename = "type", default = "unit_type")]
    ty: String,
    #[serde(default = "yes")]
    get: bool,
    #[serde(default = "yes")]
    set: bool,
    #[serde(default)]
    params: Vec<RawParam>,
    target: Option<Spanned<String>>,
    nameof: Option<Spanned<String>>,
    #[serde(default)]
    access: RawAccess,
}

fn unit_type() -> String {
    "()".to_string()
}

fn yes() -> bool {
    true
}

/// A manifest converted into a member model and scope declarations
#[derive(Debug)]
pub struct Manifest {
    /// Path the manifest was read from
    pub path: PathBuf,
    /// Manifest text, for diagnostic rendering
    pub source: String,
    pub table: TypeTable,
    pub scopes: Vec<ScopeDeclaration>,
    pub options: GeneratorOptions,
}

impl Manifest {
    /// Read and convert a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, source)
    }

    /// Convert manifest text; `path` is only used for reporting
    pub fn parse(path: &Path, source: String) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(&source)?;

        let table = build_table(&raw.types)?;
        let scopes = raw
            .scopes
            .iter()
            .map(|scope| build_scope(&table, scope))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            path = %path.display(),
            types = table.len(),
            scopes = scopes.len(),
            "loaded manifest"
        );

        Ok(Self {
            path: path.to_path_buf(),
            source,
            table,
            scopes,
            options: raw.generator,
        })
    }
}

/// Types are registered first so a base may be declared after its subtype
fn build_table(types: &[RawType]) -> Result<TypeTable, ManifestError> {
    let mut table = TypeTable::new();
    let mut ids = Vec::with_capacity(types.len());

    for raw in types {
        let ty = raw
            .members
            .iter()
            .fold(TargetType::new(&raw.name).extensible(raw.extensible), |ty, m| {
                ty.with_member(build_member(m))
            });
        ids.push(table.add_type(ty)?);
    }

    for (raw, id) in types.iter().zip(ids) {
        if let Some(base) = &raw.base {
            table.set_base(id, base)?;
        }
    }
    Ok(table)
}

fn build_member(raw: &RawMember) -> TargetMember {
    let member = match raw.kind {
        RawMemberKind::Field => {
            let field = TargetMember::field(&raw.name, raw.ty.as_str());
            if raw.readonly {
                field.readonly()
            } else {
                field
            }
        }
        RawMemberKind::Property => {
            TargetMember::property(&raw.name, raw.ty.as_str(), raw.get, raw.set)
        }
        RawMemberKind::Method => {
            TargetMember::method(&raw.name, raw.ty.as_str(), build_params(&raw.params))
        }
        RawMemberKind::Event => TargetMember::event(&raw.name, raw.ty.as_str()),
    };
    member.with_visibility(raw.visibility.into())
}

fn build_params(params: &[RawParam]) -> Vec<Parameter> {
    params
        .iter()
        .map(|p| Parameter::new(&p.name, p.ty.as_str()))
        .collect()
}

fn build_scope(table: &TypeTable, raw: &RawScope) -> Result<ScopeDeclaration, ManifestError> {
    let name = raw.name.get_ref();
    let target = table
        .lookup(&raw.target)
        .ok_or_else(|| ManifestError::UnknownTarget {
            scope: name.clone(),
            target: raw.target.clone(),
        })?;

    let mut scope = ScopeDeclaration::new(name, target).with_span(Span::from(raw.name.span()));
    for member in &raw.members {
        scope = scope.with_member(build_scope_member(name, member)?);
    }
    Ok(scope)
}

fn build_scope_member(
    scope: &str,
    raw: &RawScopeMember,
) -> Result<ScopeMemberDeclaration, ManifestError> {
    let name = raw.name.get_ref();
    let ty = ValueType::new(raw.ty.as_str());

    let mut decl = match raw.kind {
        RawScopeMemberKind::Property => {
            ScopeMemberDeclaration::property(name, ty, raw.get, raw.set)
        }
        RawScopeMemberKind::Method => {
            ScopeMemberDeclaration::method(name, ty, build_params(&raw.params))
        }
        RawScopeMemberKind::Event => ScopeMemberDeclaration::event(name, ty),
    };

    let name_override = match (&raw.target, &raw.nameof) {
        (Some(_), Some(_)) => {
            return Err(ManifestError::ConflictingOverride {
                scope: scope.to_string(),
                member: name.clone(),
            })
        }
        (Some(literal), None) => Some(
            NameOverride::literal(literal.get_ref()).with_span(Span::from(literal.span())),
        ),
        (None, Some(path)) => {
            Some(NameOverride::symbolic(path.get_ref()).with_span(Span::from(path.span())))
        }
        (None, None) => None,
    };
    if let Some(name_override) = name_override {
        if !is_valid_override(&name_override) {
            return Err(ManifestError::InvalidOverride {
                scope: scope.to_string(),
                member: name.clone(),
                name: name_override.name,
            });
        }
        decl = decl.with_override(name_override);
    }

    Ok(decl
        .with_access(raw.access.into())
        .with_span(Span::from(raw.name.span())))
}

/// A literal names one member; a symbolic path is `::`/`.`-separated
/// segments, none of them empty.
fn is_valid_override(name_override: &NameOverride) -> bool {
    if name_override.is_literal() {
        return !name_override.name.is_empty();
    }
    name_override
        .name
        .split("::")
        .flat_map(|segment| segment.split('.'))
        .all(|segment| !segment.is_empty() && !segment.contains(':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use noscope_model::{MemberModel, NameStyle, ScopeMemberKind};

    const MANIFEST: &str = r#"
[generator]
emit_contract = false

[[types]]
name = "Derived"
base = "Entity"

[[types]]
name = "Entity"
extensible = true

[[types.members]]
name = "_id"
kind = "field"
type = "u64"
visibility = "private"
readonly = true

[[types.members]]
name = "Label"
kind = "property"
type = "String"
set = false

[[types.members]]
name = "Add"
kind = "method"
type = "i32"
params = [{ name = "a", type = "i32" }, { name = "b", type = "i32" }]

[[scopes]]
name = "IEntityScope"
target = "Entity"

[[scopes.members]]
name = "Id"
kind = "property"
type = "u64"
set = false
target = "_id"
access = "generated"

[[scopes.members]]
name = "Caption"
kind = "property"
type = "String"
nameof = "Entity::Label"

[[scopes.members]]
name = "Add"
kind = "method"
type = "i32"
params = [{ name = "a", type = "i32" }, { name = "b", type = "i32" }]
"#;

    fn parse(text: &str) -> Result<Manifest, ManifestError> {
        Manifest::parse(Path::new("noscope.toml"), text.to_string())
    }

    #[test]
    fn test_parse_types() {
        let manifest = parse(MANIFEST).unwrap();
        let table = &manifest.table;

        let entity = table.lookup("Entity").unwrap();
        let derived = table.lookup("Derived").unwrap();
        assert_eq!(table.base(derived), Some(entity));
        assert!(table.is_extensible(entity));
        assert!(!table.is_extensible(derived));

        let members = table.members(entity);
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].visibility, Visibility::NonPublic);
        assert!(members[0].immutable);
        assert!(members[1].has_getter && !members[1].has_setter);
        assert_eq!(members[2].parameters.len(), 2);
        assert_eq!(members[2].ty.as_str(), "i32");
    }

    #[test]
    fn test_parse_scopes() {
        let manifest = parse(MANIFEST).unwrap();
        assert_eq!(manifest.scopes.len(), 1);

        let scope = &manifest.scopes[0];
        assert_eq!(scope.name, "IEntityScope");
        assert!(scope.span.slice(&manifest.source).contains("IEntityScope"));

        let id = &scope.members[0];
        assert_eq!(id.kind, ScopeMemberKind::Property);
        assert_eq!(id.access, AccessKind::GeneratedAccessor);
        assert!(id.has_getter && !id.has_setter);
        assert_eq!(id.effective_target_name(), "_id");
        let literal = id.name_override.as_ref().unwrap();
        assert_eq!(literal.style, NameStyle::Literal);
        assert!(literal.span.slice(&manifest.source).contains("_id"));

        let caption = &scope.members[1];
        assert_eq!(caption.effective_target_name(), "Label");
        assert_eq!(caption.access, AccessKind::Auto);

        assert_eq!(scope.members[2].kind, ScopeMemberKind::Method);
    }

    #[test]
    fn test_generator_options() {
        let manifest = parse(MANIFEST).unwrap();
        assert!(!manifest.options.emit_contract);
        assert_eq!(manifest.options.runtime_crate, "::noscope_runtime");

        let empty = parse("").unwrap();
        assert_eq!(empty.options, GeneratorOptions::default());
        assert!(empty.scopes.is_empty());
    }

    #[test]
    fn test_unknown_target() {
        let err = parse("[[scopes]]\nname = \"IScope\"\ntarget = \"Nope\"\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "scope 'IScope' targets unknown type 'Nope'"
        );
    }

    #[test]
    fn test_unknown_base() {
        let err = parse("[[types]]\nname = \"A\"\nbase = \"B\"\n").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Model(ModelError::UnknownBaseType { .. })
        ));
    }

    #[test]
    fn test_duplicate_type() {
        let err = parse("[[types]]\nname = \"A\"\n\n[[types]]\nname = \"A\"\n").unwrap_err();
        assert_eq!(err.to_string(), "Duplicate type 'A'");
    }

    #[test]
    fn test_conflicting_override() {
        let text = r#"
[[types]]
name = "A"

[[scopes]]
name = "IA"
target = "A"

[[scopes.members]]
name = "X"
kind = "property"
type = "i32"
target = "x"
nameof = "A::x"
"#;
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ManifestError::ConflictingOverride { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse("[generator]\nruntime = \"x\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_empty_override_segments_rejected() {
        let scope = |field: &str, value: &str| {
            format!(
                "[[types]]\nname = \"A\"\n\n[[scopes]]\nname = \"IA\"\ntarget = \"A\"\n\n\
                 [[scopes.members]]\nname = \"X\"\nkind = \"property\"\ntype = \"i32\"\n{} = \"{}\"\n",
                field, value
            )
        };

        for path in ["A::", "::x", "A::::x", "A:x", "A..x"] {
            let err = parse(&scope("nameof", path)).unwrap_err();
            assert!(
                matches!(&err, ManifestError::InvalidOverride { name, .. } if name == path),
                "accepted '{}'",
                path
            );
        }
        assert!(matches!(
            parse(&scope("target", "")).unwrap_err(),
            ManifestError::InvalidOverride { .. }
        ));

        let ok = parse(&scope("nameof", "A::x")).unwrap();
        assert_eq!(ok.scopes[0].members[0].effective_target_name(), "x");
        let dotted = parse(&scope("nameof", "A.x")).unwrap();
        assert_eq!(dotted.scopes[0].members[0].effective_target_name(), "x");
    }
}

//! Identifier derivation for emitted code

/// Facade struct name for a contract name
///
/// `IDirectAccessorScope` becomes `DirectAccessorScope`; a name without the
/// interface prefix gets `Impl` appended.
pub fn facade_type_name(contract: &str) -> String {
    let mut chars = contract.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(next)) if next.is_ascii_uppercase() => contract[1..].to_string(),
        _ => format!("{}Impl", contract),
    }
}

/// Accessor identifier for a target member name
///
/// Strips a private-naming prefix (`_` or `m_`) and PascalCases the rest:
/// `_privateField` becomes `PrivateField`.
pub fn accessor_identifier(target_name: &str) -> String {
    let stripped = target_name
        .strip_prefix("m_")
        .unwrap_or(target_name)
        .trim_start_matches('_');
    to_pascal_case(stripped)
}

/// Accessor name for a target member, e.g. `AccessorForPrivateField`
pub fn accessor_name(target_name: &str) -> String {
    format!("AccessorFor{}", accessor_identifier(target_name))
}

/// Accessor function emitted into the target's accessor table
pub fn accessor_fn_name(target_name: &str) -> String {
    to_snake_case(&accessor_name(target_name))
}

/// First of `base`, `base_2`, `base_3`, ... that `taken` rejects
pub fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2u32..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Name of the static runtime accessor slot of a facade member
pub fn accessor_static_name(facade: &str, member: &str) -> String {
    format!(
        "{}_{}",
        to_snake_case(facade).to_uppercase(),
        to_snake_case(member).to_uppercase()
    )
}

/// Emitted file name of a facade
pub fn facade_file_name(facade: &str) -> String {
    format!("{}.g.rs", to_snake_case(facade))
}

/// Emitted file name of an accessor table
pub fn accessor_table_file_name(target: &str) -> String {
    format!("{}_accessors.g.rs", to_snake_case(target))
}

/// Convert an identifier to `snake_case`
///
/// Leading underscores are dropped; acronym runs stay together
/// (`HTTPServer` becomes `http_server`).
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.trim_start_matches('_').chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }

        out.extend(c.to_lowercase());
    }

    out
}

/// Convert an identifier to `PascalCase`
pub fn to_pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;

    for c in name.chars() {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

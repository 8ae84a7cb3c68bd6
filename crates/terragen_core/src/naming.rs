//! Define naming conventions (policy + pure helpers).
//!
//! Schema names are `snake_case` in practice, but nothing in the schema format enforces it. These helpers are total:
//! any input produces a non-empty string that is a valid Rust identifier once passed through
//! [`crate::lang::rust_keywords::escape`].

use crate::lang::rust_keywords;

/// Registry prefix Terraform adds to bare source addresses in schema documents.
pub const DEFAULT_REGISTRY_PREFIX: &str = "registry.terraform.io/";

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '.' | ' ' | '/')
}

fn guard_leading_digit(mut out: String) -> String {
    if out.is_empty() {
        return "_".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Convert a schema name to `PascalCase` (type names).
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("ebs_block_device"), "EbsBlockDevice");
/// assert_eq!(to_pascal_case("a.config"), "AConfig");
/// assert_eq!(to_pascal_case("s3_bucket"), "S3Bucket");
/// ```
pub fn to_pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if is_separator(c) {
            upper_next = true;
            continue;
        }
        if !c.is_alphanumeric() {
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    guard_leading_digit(out)
}

/// Convert a schema name to `snake_case` (fields, methods, modules).
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("instance_type"), "instance_type");
/// assert_eq!(to_snake_case("kmsKeyId"), "kms_key_id");
/// assert_eq!(to_snake_case("tls-config"), "tls_config");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if is_separator(c) {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
            continue;
        }
        if !c.is_alphanumeric() {
            continue;
        }
        if c.is_uppercase() {
            if prev_lower && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    while out.ends_with('_') && out.len() > 1 {
        out.pop();
    }
    guard_leading_digit(out)
}

/// Return the provider type (the last segment of a source address).
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::provider_type;
///
/// assert_eq!(provider_type("hashicorp/aws"), "aws");
/// assert_eq!(provider_type("registry.terraform.io/hashicorp/google-beta"), "google-beta");
/// ```
pub fn provider_type(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}

/// Return a type name with its provider prefix stripped.
///
/// Names without the `<provider>_` prefix are returned unchanged.
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::short_type_name;
///
/// assert_eq!(short_type_name("aws", "aws_instance"), "instance");
/// assert_eq!(short_type_name("aws", "instance"), "instance");
/// ```
pub fn short_type_name<'a>(provider_type: &str, type_name: &'a str) -> &'a str {
    let prefix_len = provider_type.len() + 1;
    if type_name.len() > prefix_len
        && type_name.starts_with(provider_type)
        && type_name.as_bytes()[provider_type.len()] == b'_'
    {
        &type_name[prefix_len..]
    } else {
        type_name
    }
}

/// Return the registry-qualified form of a bare source address.
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::registry_qualified;
///
/// assert_eq!(registry_qualified("hashicorp/aws"), "registry.terraform.io/hashicorp/aws");
/// ```
pub fn registry_qualified(source: &str) -> String {
    format!("{DEFAULT_REGISTRY_PREFIX}{source}")
}

/// Type names generated code spells unqualified. Records that would shadow them get a `Block` suffix.
pub const RESERVED_TYPE_NAMES: &[&str] = &["Into", "None", "Ok", "Option", "Result", "Self", "Some", "String", "Vec"];

/// Crate names generated code spells as path roots. Modules that would shadow them get a `_` suffix.
pub const RESERVED_MODULE_NAMES: &[&str] = &["alloc", "core", "std", "terra"];

/// Return the record (struct) name for a schema name.
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::record_name;
///
/// assert_eq!(record_name("ebs_block_device"), "EbsBlockDevice");
/// assert_eq!(record_name("option"), "OptionBlock");
/// ```
pub fn record_name(name: &str) -> String {
    let mut out = to_pascal_case(name);
    if RESERVED_TYPE_NAMES.contains(&out.as_str()) {
        out.push_str("Block");
    }
    out
}

/// Return the argument, reference, and state record names of one shape.
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::record_triad;
///
/// assert_eq!(record_triad("a.config"), ["AConfig", "AConfigAttributes", "AConfigState"]);
/// ```
pub fn record_triad(name: &str) -> [String; 3] {
    let args = record_name(name);
    let attributes = format!("{args}Attributes");
    let state = format!("{args}State");
    [args, attributes, state]
}

/// Return the escaped module identifier for a schema name.
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::module_name;
///
/// assert_eq!(module_name("google-beta"), "google_beta");
/// assert_eq!(module_name("type"), "r#type");
/// assert_eq!(module_name("std"), "std_");
/// ```
pub fn module_name(name: &str) -> String {
    let snake = to_snake_case(name);
    if RESERVED_MODULE_NAMES.contains(&snake.as_str()) {
        return format!("{snake}_");
    }
    rust_keywords::escape(&snake)
}

/// Return the escaped field or method identifier for a schema name.
///
/// ## Examples
/// ```rust
/// use terragen_core::naming::member_name;
///
/// assert_eq!(member_name("instanceType"), "instance_type");
/// assert_eq!(member_name("self"), "self_");
/// ```
pub fn member_name(name: &str) -> String {
    rust_keywords::escape(&to_snake_case(name))
}

/// Return the file stem of an escaped module identifier (`r#type` lives in `type.rs`).
pub fn module_file_stem(module: &str) -> &str {
    module.strip_prefix("r#").unwrap_or(module)
}

//! Rust keyword vocabulary (for codegen identifier escaping).

/// Reserved + strict keywords in Rust.
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Keywords that cannot be written as raw identifiers (`r#self` is rejected by the compiler).
pub const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Check whether an identifier is a Rust keyword.
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Escape an identifier so it is usable in Rust source.
///
/// Keywords become raw identifiers (`type` → `r#type`); the few that cannot be raw get a trailing underscore
/// (`self` → `self_`).
///
/// ## Examples
/// ```rust
/// use terragen_core::lang::rust_keywords::escape;
///
/// assert_eq!(escape("type"), "r#type");
/// assert_eq!(escape("self"), "self_");
/// assert_eq!(escape("ami"), "ami");
/// ```
pub fn escape(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        return format!("{name}_");
    }
    if is_keyword(name) {
        return format!("r#{name}");
    }
    name.to_string()
}

/// Derive the setter paired with a state field.
///
/// `count` becomes `setCount` and `a` becomes `setA`. Returns `None` for an
/// empty name so callers can surface a malformed-field error instead of
/// emitting a bare `set`.
pub fn setter_name(field: &str) -> Option<String> {
    let mut chars = field.chars();
    let first = chars.next()?;
    Some(format!("set{}{}", first.to_uppercase(), chars.as_str()))
}

/// Whether `name` can be used as a plain binding identifier.
///
/// State keys end up as `const [key, setKey]` bindings, so string keys such as
/// `"my-field"` and keywords such as `default` have to be rejected.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') && !is_reserved_word(name)
}

/// Reserved words, plus the names that cannot be bound in strict mode code.
fn is_reserved_word(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "arguments", "await", "break", "case", "catch", "class", "const", "continue",
        "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends",
        "false", "finally", "for", "function", "if", "implements", "import", "in",
        "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
        "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
        "typeof", "var", "void", "while", "with", "yield",
    ];

    RESERVED.contains(&name)
}

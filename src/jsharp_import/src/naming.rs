use phf::phf_set;

/// Script language keywords; never usable as identifiers in any context.
pub static KEYWORDS: phf::Set<&'static str> = phf_set! {
    "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
};

/// Names that collide with function-object members; excluded for static
/// members, which live on the constructor function.
pub static STATIC_RESERVED: phf::Set<&'static str> = phf_set! {
    "__defineGetter__", "__defineSetter__", "apply", "arguments", "bind",
    "call", "caller", "constructor", "hasOwnProperty", "isPrototypeOf",
    "length", "name", "propertyIsEnumerable", "prototype", "toLocaleString",
    "valueOf",
};

/// Names inherited from the object prototype; excluded for instance members.
pub static INSTANCE_RESERVED: phf::Set<&'static str> = phf_set! {
    "__defineGetter__", "__defineSetter__", "constructor", "hasOwnProperty",
    "isPrototypeOf", "propertyIsEnumerable", "toLocaleString", "valueOf",
};

pub fn is_reserved(name: &str, is_static: bool) -> bool {
    if KEYWORDS.contains(name) {
        return true;
    }
    if is_static {
        STATIC_RESERVED.contains(name)
    } else {
        INSTANCE_RESERVED.contains(name)
    }
}

pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return false;
    }
    !KEYWORDS.contains(name)
}

/// A namespace is a dot-separated chain of identifiers; the empty string is
/// the global namespace.
pub fn is_valid_namespace(ns: &str) -> bool {
    ns.is_empty() || ns.split('.').all(is_valid_identifier)
}

/// Default member casing: first character lowercased.
pub fn default_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Short generated names for minimized members: $a, $b, ... $z, $aa, ...
pub fn encode_number(mut i: usize) -> String {
    let mut tail = String::new();
    loop {
        tail.insert(0, (b'a' + (i % 26) as u8) as char);
        if i < 26 {
            break;
        }
        i = i / 26 - 1;
    }
    format!("${}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_names_are_stable() {
        assert_eq!(encode_number(0), "$a");
        assert_eq!(encode_number(25), "$z");
        assert_eq!(encode_number(26), "$aa");
        assert_eq!(encode_number(27), "$ab");
        assert_eq!(encode_number(26 + 26 * 26), "$aaa");
    }

    #[test]
    fn identifier_validation() {
        assert!(is_valid_identifier("foo"));
        assert!(is_valid_identifier("$ctor"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier("1x"));
        assert!(!is_valid_identifier("a-b"));
        assert!(!is_valid_identifier("function"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn namespace_validation() {
        assert!(is_valid_namespace(""));
        assert!(is_valid_namespace("a.b.c"));
        assert!(!is_valid_namespace("a..b"));
        assert!(!is_valid_namespace("a.1b"));
    }

    #[test]
    fn reserved_names_differ_by_context() {
        assert!(is_reserved("prototype", true));
        assert!(!is_reserved("prototype", false));
        assert!(is_reserved("hasOwnProperty", false));
        assert!(is_reserved("while", false));
    }
}

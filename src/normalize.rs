//! Identifier derivation from free-form display names.

use heck::ToUpperCamelCase;
use std::borrow::Cow;

/// Reserved words; usable as identifiers only in raw form.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate", "do", "dyn", "else",
    "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod",
    "move", "mut", "override", "priv", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords with no raw form.
const NOT_RAW: &[&str] = &["_", "crate", "self", "Self", "super"];

/// Convert a display name into an UpperCamelCase identifier.
///
/// The whole name is lowercased first, so existing capitalization never
/// introduces word boundaries: `"SECRET"` and `"secret"` both become
/// `"Secret"`. Runs of non-alphanumeric characters separate words and are
/// dropped.
pub fn to_identifier(name: &str) -> String {
    name.to_lowercase().to_upper_camel_case()
}

/// Collapse every run of characters outside `[a-zA-Z0-9_]` into a single `_`.
pub fn sanitize_origin(origin: &str) -> String {
    crate::regex!(r"[^a-zA-Z0-9_]+").replace_all(origin, "_").into_owned()
}

/// `name` with an underscore and the sanitized `origin` appended.
pub fn origin_suffixed(name: &str, origin: &str) -> String {
    format!("{name}_{}", sanitize_origin(origin))
}

/// Whether `ident` can name a Rust item, raw-escaped where [`escape_keyword`] says so.
pub fn is_emittable(ident: &str) -> bool {
    crate::regex!(r"^[A-Za-z_][A-Za-z0-9_]*$").is_match(ident) && !NOT_RAW.contains(&ident)
}

/// `ident` as it has to be spelled in Rust source.
pub fn escape_keyword(ident: &str) -> Cow<'_, str> {
    if KEYWORDS.contains(&ident) { Cow::Owned(format!("r#{ident}")) } else { Cow::Borrowed(ident) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identifiers_are_camel_cased() {
        let cases = [
            ("Secret", "Secret"),
            ("SECRET", "Secret"),
            ("voice", "Voice"),
            ("no external messages", "NoExternalMessages"),
            ("half-op", "HalfOp"),
            ("b_ircv3_extension", "BIrcv3Extension"),
            ("  padded  name ", "PaddedName"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(to_identifier(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn origin_is_sanitized() {
        assert_eq!(sanitize_origin("ircv3/extension"), "ircv3_extension");
        assert_eq!(sanitize_origin("RFC 1459"), "RFC_1459");
        assert_eq!(sanitize_origin("ircu 2.10.x"), "ircu_2_10_x");
        assert_eq!(sanitize_origin("under_score"), "under_score");
        assert_eq!(sanitize_origin(""), "");
    }

    #[test]
    fn suffix_joins_with_underscore() {
        assert_eq!(origin_suffixed("ERR_X", "hybrid / ratbox"), "ERR_X_hybrid_ratbox");
    }

    #[test]
    fn emittable_identifiers() {
        for ident in ["Ban", "RPL_WELCOME", "ERR_X_hybrid", "_private", "type", "Gen"] {
            assert!(is_emittable(ident), "{ident}");
        }
        for ident in ["", "Self", "self", "_", "1st", "RPL BAD", "Mode-X", "Ünï"] {
            assert!(!is_emittable(ident), "{ident}");
        }
    }

    #[test]
    fn keywords_are_raw_escaped() {
        assert_eq!(escape_keyword("type"), "r#type");
        assert_eq!(escape_keyword("gen"), "r#gen");
        assert_eq!(escape_keyword("Type"), "Type");
        assert_eq!(escape_keyword("RPL_WELCOME"), "RPL_WELCOME");
    }

    proptest! {
        #[test]
        fn identifier_is_alphanumeric_and_stable(name in "[ -~]{0,40}") {
            let ident = to_identifier(&name);
            prop_assert!(ident.chars().all(char::is_alphanumeric));
            prop_assert_eq!(to_identifier(&name), ident);
        }

        #[test]
        fn sanitized_origin_is_identifier_safe(origin in ".{0,40}") {
            let clean = sanitize_origin(&origin);
            prop_assert!(clean.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            prop_assert_eq!(sanitize_origin(&clean), clean.clone());
        }
    }
}

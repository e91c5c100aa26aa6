//! LaTeX special-character escaping for user-supplied text.
//!
//! Replacements run in a fixed order. Backslash goes first: every later
//! replacement introduces a backslash of its own, which must survive as-is.
//! The result is therefore NOT idempotent: escaping twice escapes the
//! backslashes introduced by the first pass.

/// Ordered (from, to) substitution table. Order is significant.
const LATEX_REPLACEMENTS: &[(&str, &str)] = &[
    ("\\", "\\textbackslash "),
    ("{", "\\{"),
    ("}", "\\}"),
    ("$", "\\$"),
    ("#", "\\#"),
    ("%", "\\%"),
    ("&", "\\&"),
    ("^", "\\^{}"),
    ("_", "\\_"),
    ("~", "\\textasciitilde{}"),
];

/// Characters that need escaping inside an `\href{...}` target.
const URL_REPLACEMENTS: &[(&str, &str)] = &[
    ("\\", ""),
    ("{", "\\{"),
    ("}", "\\}"),
    ("%", "\\%"),
    ("#", "\\#"),
];

/// Escapes `text` for verbatim use in LaTeX body text.
pub fn escape_latex(text: &str) -> String {
    apply(text, LATEX_REPLACEMENTS)
}

/// Escapes an optional field; `None` becomes the empty string.
pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape_latex).unwrap_or_default()
}

/// Escapes a URL for the first argument of `\href`. Backslashes are dropped
/// since hyperref cannot carry them through.
pub fn escape_url(url: &str) -> String {
    apply(url.trim(), URL_REPLACEMENTS)
}

fn apply(text: &str, table: &[(&str, &str)]) -> String {
    if !text.contains(|c: char| table.iter().any(|(from, _)| from.starts_with(c))) {
        return text.to_string();
    }
    table
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIALS: &[char] = &['\\', '{', '}', '$', '#', '%', '&', '^', '_', '~'];

    /// True when every special character in `escaped` is part of an escape
    /// sequence produced by `escape_latex`.
    fn all_specials_escaped(escaped: &str) -> bool {
        let mut rest = escaped;
        while let Some(pos) = rest.find(SPECIALS) {
            let tail = &rest[pos..];
            let consumed = [
                "\\textbackslash ",
                "\\textasciitilde{}",
                "\\^{}",
                "\\{",
                "\\}",
                "\\$",
                "\\#",
                "\\%",
                "\\&",
                "\\_",
            ]
            .iter()
            .find(|seq| tail.starts_with(*seq))
            .map(|seq| seq.len());
            match consumed {
                Some(len) => rest = &tail[len..],
                None => return false,
            }
        }
        true
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_latex("Jane O'Brien, Senior Engineer"), "Jane O'Brien, Senior Engineer");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(escape_latex(""), "");
        assert_eq!(escape_opt(None), "");
    }

    #[test]
    fn test_ampersand() {
        assert_eq!(escape_latex("O'Brien & Co"), "O'Brien \\& Co");
    }

    #[test]
    fn test_backslash_escaped_first() {
        // Braces introduced by later replacements must not be touched by earlier ones.
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash b");
        assert_eq!(escape_latex("\\{x}"), "\\textbackslash \\{x\\}");
    }

    #[test]
    fn test_caret_and_tilde_keep_their_braces() {
        assert_eq!(escape_latex("x^2"), "x\\^{}2");
        assert_eq!(escape_latex("~/bin"), "\\textasciitilde{}/bin");
    }

    #[test]
    fn test_every_special_character() {
        let input = "\\ { } $ # % & ^ _ ~";
        let escaped = escape_latex(input);
        assert_eq!(
            escaped,
            "\\textbackslash  \\{ \\} \\$ \\# \\% \\& \\^{} \\_ \\textasciitilde{}"
        );
        assert!(all_specials_escaped(&escaped));
    }

    #[test]
    fn test_mixed_strings_fully_escaped() {
        for input in [
            "100% of C# & F# code",
            "snake_case_name",
            "$5k budget {approx}",
            "path\\to\\file ~ home",
            "^^^___~~~",
        ] {
            let escaped = escape_latex(input);
            assert!(all_specials_escaped(&escaped), "unescaped special in {escaped:?}");
        }
    }

    #[test]
    fn test_escaping_is_not_idempotent() {
        let once = escape_latex("50%");
        let twice = escape_latex(&once);
        assert_eq!(once, "50\\%");
        assert_ne!(once, twice);
        assert_eq!(twice, "50\\textbackslash \\%");
    }

    #[test]
    fn test_non_ascii_passthrough() {
        assert_eq!(escape_latex("Zoë — Müller"), "Zoë — Müller");
    }

    #[test]
    fn test_escape_url() {
        assert_eq!(
            escape_url(" https://example.com/a%20b#frag "),
            "https://example.com/a\\%20b\\#frag"
        );
        assert_eq!(escape_url("https://github.com/jane_doe"), "https://github.com/jane_doe");
    }
}

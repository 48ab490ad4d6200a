//! Text sanitization into a safe single path segment.

/// Options shared by the sanitizer and the name converter.
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    /// Leave literal parentheses untouched instead of mapping them to
    /// square brackets. Less safe; off by default.
    pub keep_parenthesis: bool,
    /// Maximum segment length, in characters.
    pub max_len: usize,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            keep_parenthesis: false,
            max_len: 180,
        }
    }
}

/// Characters stripped from the edges and mapped to spaces inside.
const RESERVED: &[char] = &[
    '/', '\\', '?', '<', '>', ':', '*', '%', '|', '"', '\'', '`', '&', ';',
];

/// Turn arbitrary text into a safe single path segment: no separators,
/// no control characters, no markup, bounded length.
///
/// Truncation keeps the *suffix* of an over-long name. Idempotent:
/// `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(text: &str, opts: &SanitizeOptions) -> String {
    let stripped = strip_markup(text);
    let trimmed = trim_edges(&stripped);

    let mut out = String::with_capacity(trimmed.len());
    let mut pending_space = false;
    for c in trimmed.chars() {
        let mapped = match c {
            '(' | ')' if opts.keep_parenthesis => Some(c),
            '(' | '{' => Some('['),
            ')' | '}' => Some(']'),
            c if c.is_control() || c.is_whitespace() || RESERVED.contains(&c) => None,
            c => Some(c),
        };
        match mapped {
            Some(c) => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            }
            None => pending_space = true,
        }
    }

    trim_edges(&keep_suffix(&out, opts.max_len)).to_string()
}

/// Remove `<...>` markup. An unmatched `<` swallows the rest of the
/// text, matching how tag strippers behave.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Trim whitespace (including non-breaking space) and reserved
/// characters from both ends.
fn trim_edges(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || RESERVED.contains(&c))
}

/// Keep the last `max_len` characters, codepoint-aware.
fn keep_suffix(text: &str, max_len: usize) -> String {
    let count = text.chars().count();
    if count <= max_len {
        return text.to_string();
    }
    text.chars().skip(count - max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize_default(text: &str) -> String {
        sanitize(text, &SanitizeOptions::default())
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize_default("My modified title"), "My modified title");
    }

    #[test]
    fn test_edges_trimmed() {
        assert_eq!(sanitize_default("  name  "), "name");
        assert_eq!(sanitize_default("\u{a0}name\u{a0}"), "name");
        assert_eq!(sanitize_default("'name;'"), "name");
        assert_eq!(sanitize_default("/name/"), "name");
    }

    #[test]
    fn test_reserved_become_single_space() {
        assert_eq!(sanitize_default("a/b\\c"), "a b c");
        assert_eq!(sanitize_default("a:*%|b"), "a b");
        assert_eq!(sanitize_default("a \t b"), "a b");
    }

    #[test]
    fn test_parentheses_and_braces() {
        assert_eq!(sanitize_default("Café (René)"), "Café [René]");
        assert_eq!(sanitize_default("a {b}"), "a [b]");

        let keep = SanitizeOptions {
            keep_parenthesis: true,
            ..SanitizeOptions::default()
        };
        assert_eq!(sanitize("Café (René)", &keep), "Café (René)");
        assert_eq!(sanitize("a {b}", &keep), "a [b]");
    }

    #[test]
    fn test_markup_stripped() {
        assert_eq!(sanitize_default("<em>Title</em> here"), "Title here");
        assert_eq!(sanitize_default("broken <unclosed tag"), "broken");
    }

    #[test]
    fn test_truncation_keeps_suffix() {
        let long: String = "a".repeat(100) + "end";
        let opts = SanitizeOptions {
            max_len: 5,
            ..SanitizeOptions::default()
        };
        assert_eq!(sanitize(&long, &opts), "aaend");
    }

    #[test]
    fn test_idempotent() {
        let opts = SanitizeOptions::default();
        for input in [
            "My modified title",
            "  a/b\\c : d  ",
            "Café (René)",
            "<p>tagged</p> & more",
            "'quoted;' \u{a0}",
            "prefix:Other modified title",
        ] {
            let once = sanitize(input, &opts);
            assert_eq!(sanitize(&once, &opts), once, "input: {:?}", input);
        }
    }
}

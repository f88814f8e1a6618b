//! File-name pattern matching for pure and UI modules.
//!
//! Patterns are glob-like: `*` matches any run of characters, everything
//! else is literal. Only the base name of a path is matched.

use regex::Regex;

/// Default pattern set for pure modules.
pub const DEFAULT_PURE_PATTERNS: &[&str] = &["*.ts"];

/// Pattern identifying UI modules.
pub const UI_MODULE_PATTERN: &str = "*.tsx";

/// Returns the base name of `filename`, splitting on both `/` and `\`.
#[must_use]
pub fn base_name(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or(filename)
}

/// Compiles a glob-like pattern into an anchored regex.
fn compile(pattern: &str) -> Option<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).ok()
}

/// Checks whether the base name of `filename` matches `pattern`.
///
/// Matching is case-sensitive. Empty inputs never match.
///
/// ```
/// use purelint_core::patterns::matches_pattern;
///
/// assert!(matches_pattern("src/utils/date.pure.ts", "*.pure.ts"));
/// assert!(!matches_pattern("src/utils/date.ts", "*.pure.ts"));
/// ```
#[must_use]
pub fn matches_pattern(filename: &str, pattern: &str) -> bool {
    if filename.is_empty() || pattern.is_empty() {
        return false;
    }
    compile(pattern).is_some_and(|re| re.is_match(base_name(filename)))
}

/// Checks whether `filename` is a pure module.
///
/// `None` or an empty list falls back to [`DEFAULT_PURE_PATTERNS`].
#[must_use]
pub fn is_pure_module(filename: &str, patterns: Option<&[String]>) -> bool {
    match patterns {
        Some(patterns) if !patterns.is_empty() => {
            patterns.iter().any(|p| matches_pattern(filename, p))
        }
        _ => DEFAULT_PURE_PATTERNS
            .iter()
            .any(|p| matches_pattern(filename, p)),
    }
}

/// Checks whether `filename` is a UI module (`*.tsx`).
#[must_use]
pub fn is_ui_module(filename: &str) -> bool {
    matches_pattern(filename, UI_MODULE_PATTERN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn strips_directories_on_both_separators() {
        assert_eq!(base_name("a/b/c.ts"), "c.ts");
        assert_eq!(base_name("a\\b\\c.ts"), "c.ts");
        assert_eq!(base_name("c.ts"), "c.ts");
        assert!(matches_pattern("C:\\src\\widget.pure.ts", "*.pure.ts"));
    }

    #[test]
    fn matches_against_base_name_only() {
        // the directory contains ".pure" but the file does not
        assert!(!matches_pattern("/src/x.pure.ts/helpers.ts", "*.pure.*"));
        assert!(matches_pattern("/src/helpers.utils.ts", "*.utils.ts"));
    }

    #[test]
    fn escapes_regex_metacharacters() {
        assert!(matches_pattern("a+b.ts", "a+b.ts"));
        assert!(!matches_pattern("aab.ts", "a+b.ts"));
        assert!(!matches_pattern("fooxts", "*.ts"));
        assert!(matches_pattern("(x).ts", "(*).ts"));
    }

    #[test]
    fn is_case_sensitive() {
        assert!(!matches_pattern("Widget.TS", "*.ts"));
    }

    #[test]
    fn empty_inputs_never_match() {
        assert!(!matches_pattern("", "*.ts"));
        assert!(!matches_pattern("a.ts", ""));
        assert!(!is_pure_module("", None));
    }

    #[test]
    fn pure_module_defaults() {
        assert!(is_pure_module("src/a.ts", None));
        assert!(is_pure_module("src/a.ts", Some(&[])));
        assert!(!is_pure_module("src/A.tsx", None));
        assert!(!is_pure_module("src/a.js", None));
    }

    #[test]
    fn pure_module_custom_patterns() {
        let patterns = owned(&["*.pure.ts", "*.utils.ts"]);
        assert!(is_pure_module("src/date.pure.ts", Some(&patterns)));
        assert!(is_pure_module("src/date.utils.ts", Some(&patterns)));
        assert!(!is_pure_module("src/date.ts", Some(&patterns)));
    }

    #[test]
    fn ui_module_is_tsx_only() {
        for name in ["A.tsx", "dir/B.tsx", "x.y.tsx"] {
            assert!(is_ui_module(name), "{name}");
        }
        for name in ["a.ts", "a.jsx", "a.tsx.bak", "a.js"] {
            assert!(!is_ui_module(name), "{name}");
        }
    }
}

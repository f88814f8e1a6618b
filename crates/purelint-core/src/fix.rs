//! Application of automatic fixes to source text.

use crate::types::{Replacement, Violation};

/// Outcome of applying fixes to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten source.
    pub content: String,
    /// Number of replacements applied.
    pub applied: usize,
    /// Number of replacements skipped because they overlapped an earlier one
    /// or fell outside the source.
    pub skipped: usize,
}

impl FixOutcome {
    /// Returns true if the content changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Applies the replacements carried by `violations` to `content`.
///
/// Replacements are taken in source order; one that overlaps an already
/// accepted replacement is skipped, so the earliest wins. Out-of-bounds or
/// non-boundary ranges are skipped as well.
#[must_use]
pub fn apply_fixes(content: &str, violations: &[Violation]) -> FixOutcome {
    let mut fixes: Vec<&Replacement> = violations.iter().filter_map(Violation::fix).collect();
    fixes.sort_by_key(|r| (r.location.offset, r.location.end()));

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    let mut applied = 0;
    let mut skipped = 0;

    for fix in fixes {
        let (start, end) = (fix.location.offset, fix.location.end());
        if start < cursor || content.get(start..end).is_none() {
            skipped += 1;
            continue;
        }
        out.push_str(&content[cursor..start]);
        out.push_str(&fix.new_text);
        cursor = end;
        applied += 1;
    }
    out.push_str(&content[cursor..]);

    if skipped > 0 {
        tracing::debug!("skipped {skipped} overlapping fix(es)");
    }

    FixOutcome {
        content: out,
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity, Suggestion};
    use std::path::PathBuf;

    fn fixing(offset: usize, length: usize, text: &str) -> Violation {
        let location = Location::new(PathBuf::from("a.tsx"), 1, 1).with_span(offset, length);
        Violation::new("PL001", "r", Severity::Error, location.clone(), "m")
            .with_suggestion(Suggestion::with_fix("fix", Replacement::new(location, text)))
    }

    #[test]
    fn applies_in_source_order_regardless_of_input_order() {
        let content = "aaa bbb ccc";
        let outcome = apply_fixes(content, &[fixing(8, 3, "Z"), fixing(0, 3, "X")]);
        assert_eq!(outcome.content, "X bbb Z");
        assert_eq!(outcome.applied, 2);
        assert!(outcome.changed());
    }

    #[test]
    fn overlapping_fixes_apply_once() {
        // two violations for `export const { a, b } = f();` share one statement
        let content = "export const { a, b } = f();\n";
        let len = content.len() - 1;
        let outcome = apply_fixes(content, &[fixing(0, len, "A"), fixing(0, len, "B")]);
        assert_eq!(outcome.content, "A\n");
        assert_eq!((outcome.applied, outcome.skipped), (1, 1));
    }

    #[test]
    fn out_of_range_is_skipped() {
        let outcome = apply_fixes("abc", &[fixing(2, 10, "x")]);
        assert_eq!(outcome.content, "abc");
        assert_eq!(outcome.skipped, 1);
        assert!(!outcome.changed());
    }

    #[test]
    fn violations_without_fix_are_ignored() {
        let plain = Violation::new(
            "PL003",
            "r",
            Severity::Error,
            Location::new(PathBuf::from("a.ts"), 1, 1),
            "m",
        );
        let outcome = apply_fixes("abc", &[plain]);
        assert_eq!(outcome.content, "abc");
        assert_eq!((outcome.applied, outcome.skipped), (0, 0));
    }
}

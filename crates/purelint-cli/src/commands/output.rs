//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use purelint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `base_dir` is what violation paths are relative to; the text format reads
/// sources from there to render snippets.
pub fn print(result: &LintResult, format: OutputFormat, base_dir: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, base_dir),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult, base_dir: &Path) {
    let mut sources: HashMap<&PathBuf, Option<String>> = HashMap::new();

    for violation in &result.violations {
        let source = sources
            .entry(&violation.location.file)
            .or_insert_with(|| std::fs::read_to_string(base_dir.join(&violation.location.file)).ok());
        println!("{}", render(violation, source.as_deref()));
    }

    for path in &result.recovered_files {
        println!(
            "\x1b[33mnote\x1b[0m: {} has syntax errors; linted the recovered tree",
            path.display()
        );
    }

    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );

    let fixable = result.fixable_count();
    if fixable > 0 {
        println!("{fixable} violation(s) can be fixed with `purelint check --fix`");
    }
}

/// One violation as a miette report with a source snippet, or as plain
/// lines when the source is unavailable.
fn render(violation: &Violation, source: Option<&str>) -> String {
    let severity = match violation.severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    };
    let header = format!(
        "{} {} at {}:{}:{}",
        severity,
        violation.rule,
        violation.location.file.display(),
        violation.location.line,
        violation.location.column,
    );

    match source {
        Some(text) => {
            let name = violation.location.file.display().to_string();
            let report = Report::new(ViolationDiagnostic::from(violation))
                .with_source_code(NamedSource::new(name, text.to_string()));
            format!("{header}\n{report:?}")
        }
        None => {
            let mut out = format!("{header}\n  [{}] {}", violation.code, violation.message);
            if let Some(suggestion) = &violation.suggestion {
                out.push_str(&format!("\n  = help: {}", suggestion.message));
            }
            out.push('\n');
            out
        }
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purelint_core::{Location, Suggestion};

    fn violation() -> Violation {
        Violation::new(
            "PL003",
            "no-heavy-deps-in-pure-module",
            Severity::Error,
            Location::new(PathBuf::from("src/a.ts"), 1, 1).with_span(0, 26),
            "Pure module should not import heavy dependency \"react\". Consider extracting to a separate module.",
        )
        .with_suggestion(Suggestion::new("move it"))
    }

    #[test]
    fn plain_rendering_without_source() {
        let text = render(&violation(), None);
        assert!(text.contains("no-heavy-deps-in-pure-module at src/a.ts:1:1"));
        assert!(text.contains("[PL003] Pure module should not import"));
        assert!(text.contains("= help: move it"));
    }

    #[test]
    fn snippet_rendering_with_source() {
        let text = render(&violation(), Some("import React from 'react';\n"));
        assert!(text.contains("src/a.ts"));
        assert!(text.contains("PL003"));
    }

    #[test]
    fn json_is_serializable() {
        let mut result = LintResult::new();
        result.violations.push(violation());
        result.files_checked = 1;
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["violations"][0]["code"], "PL003");
        assert_eq!(json["files_checked"], 1);
    }
}

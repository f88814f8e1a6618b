//! Check command implementation.

use anyhow::{Context, Result};
use purelint_core::fix::apply_fixes;
use purelint_core::{Analyzer, Config, RuleBox, Violation};
use purelint_rules::rules_from_config;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of the `check` subcommand.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to keep.
    pub rules_filter: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Apply automatic fixes before reporting.
    pub fix: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;
    let threshold = config.fail_threshold();

    let mut rules = rules_from_config(&config).context("Invalid rule configuration")?;
    if let Some(filter) = &options.rules_filter {
        let wanted: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = filter_rules(rules, &wanted);
    }

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(options.exclude.iter().cloned())
        .rules(rules)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let mut result = analyzer.analyze().context("Analysis failed")?;

    if options.fix && result.fixable_count() > 0 {
        let fixed = fix_files(analyzer.base_dir(), &result.violations)?;
        tracing::info!("Fixed {fixed} file(s)");
        result = analyzer.analyze().context("Analysis after fixing failed")?;
    }

    super::output::print(&result, options.format, analyzer.base_dir())?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Keeps the rules named (by identifier or code) in `wanted`.
fn filter_rules(rules: Vec<RuleBox>, wanted: &[&str]) -> Vec<RuleBox> {
    for name in wanted {
        let known = rules
            .iter()
            .any(|r| r.name() == *name || r.code().eq_ignore_ascii_case(name));
        if !known {
            tracing::warn!("Unknown or disabled rule: {}", name);
        }
    }
    rules
        .into_iter()
        .filter(|r| {
            wanted
                .iter()
                .any(|w| r.name() == *w || r.code().eq_ignore_ascii_case(w))
        })
        .collect()
}

/// Applies fixes file by file. Returns the number of files rewritten.
fn fix_files(base_dir: &Path, violations: &[Violation]) -> Result<usize> {
    let mut by_file: BTreeMap<&PathBuf, Vec<Violation>> = BTreeMap::new();
    for v in violations.iter().filter(|v| v.fix().is_some()) {
        by_file.entry(&v.location.file).or_default().push(v.clone());
    }

    let mut rewritten = 0;
    for (file, fixes) in by_file {
        let path = base_dir.join(file);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let outcome = apply_fixes(&content, &fixes);
        if outcome.skipped > 0 {
            tracing::debug!(
                "{}: {} overlapping fix(es) left for a later run",
                path.display(),
                outcome.skipped
            );
        }
        if outcome.changed() {
            std::fs::write(&path, &outcome.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

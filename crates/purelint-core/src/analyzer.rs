//! Core analyzer for orchestrating lint execution.

use crate::ast::Module;
use crate::config::{Config, DEFAULT_EXCLUDES};
use crate::context::FileContext;
use crate::parser::{self, ParseError};
use crate::resolver::ImportResolver;
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File extensions picked up by the walker.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while walking the source tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// A source file could not be parsed.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors, overriding the configuration.
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.analyzer.exclude.iter().cloned());
        if patterns.is_empty() {
            patterns.extend(DEFAULT_EXCLUDES.iter().map(|s| (*s).to_string()));
        }
        let excludes = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let fail_on_parse_error = self
            .fail_on_parse_error
            .unwrap_or(config.analyzer.fail_on_parse_error);

        Ok(Analyzer {
            root,
            rules: self.rules,
            excludes,
            config,
            fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

/// Violations for one file plus whether the parse needed error recovery.
struct FileReport {
    violations: Vec<Violation>,
    recovered: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that reported paths are relative to.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        }
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// A single [`ImportResolver`] (and its alias cache) is shared by every
    /// file of the run.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file has
    /// syntax errors while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let resolver = ImportResolver::new();
        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for path in &files {
            let content = std::fs::read_to_string(path)?;
            let report = self.check_with(path, &content, &resolver)?;
            if report.recovered {
                result.recovered_files.push(self.relative(path));
            }
            result.violations.extend(report.violations);
            result.files_checked += 1;
        }

        sort_violations(&mut result.violations);

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Lints in-memory source as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Same parse failures as [`Analyzer::analyze`].
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        let resolver = ImportResolver::new();
        let mut violations = self.check_with(path, content, &resolver)?.violations;
        sort_violations(&mut violations);
        Ok(violations)
    }

    fn check_with(
        &self,
        path: &Path,
        content: &str,
        resolver: &ImportResolver,
    ) -> Result<FileReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let module = self.parse(path, content)?;
        let ctx = FileContext::new(path, content, self.base_dir(), resolver);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &module);
            violations.extend(self.apply_severity_override(rule.name(), rule_violations));
        }

        Ok(FileReport {
            violations,
            recovered: module.has_errors,
        })
    }

    fn parse(&self, path: &Path, content: &str) -> Result<Module, AnalyzerError> {
        let module = parser::parse_file(path, content).map_err(|e: ParseError| {
            AnalyzerError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        if module.has_errors {
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: "source contains syntax errors".to_string(),
                });
            }
            warn!(
                "Syntax errors in {}; linting the recovered tree",
                path.display()
            );
        }
        Ok(module)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all TypeScript sources to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .git_exclude(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) || !is_source_file(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path matches an exclude pattern, either relative to the
    /// root or as an absolute path.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(self.base_dir()).unwrap_or(path);
        self.excludes
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.base_dir())
            .unwrap_or(path)
            .to_path_buf()
    }
}

fn is_source_file(path: &Path) -> bool {
    let is_declaration = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".d.ts"));
    !is_declaration
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.location.column.cmp(&b.location.column))
    });
}

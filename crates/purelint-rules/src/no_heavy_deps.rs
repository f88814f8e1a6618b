//! Rule to keep framework and stylesheet imports out of pure modules.
//!
//! # Configuration
//!
//! - `pure_module_patterns`: file-name patterns of pure modules (default `*.ts`)
//! - `forbidden_deps`: exact specifiers to reject (default `react`, `react-dom`)
//! - `forbidden_extensions`: specifier suffixes to reject
//!   (default `.css`, `.less`, `.scss`)
//!
//! Each key falls back to its own default when absent. An explicit empty
//! list disables that check.

use purelint_core::ast::Module;
use purelint_core::patterns::is_pure_module;
use purelint_core::{ConfigError, FileContext, Location, Rule, RuleConfig, Severity, Violation};
use serde::Deserialize;

/// Rule code for no-heavy-deps-in-pure-module.
pub const CODE: &str = "PL003";

/// Rule name for no-heavy-deps-in-pure-module.
pub const NAME: &str = "no-heavy-deps-in-pure-module";

/// Violation kind reported by this rule.
pub const HEAVY_DEP_IN_PURE_MODULE: &str = "heavyDepInPureModule";

/// Dependencies rejected when `forbidden_deps` is not configured.
pub const DEFAULT_FORBIDDEN_DEPS: &[&str] = &["react", "react-dom"];

/// Suffixes rejected when `forbidden_extensions` is not configured.
pub const DEFAULT_FORBIDDEN_EXTENSIONS: &[&str] = &[".css", ".less", ".scss"];

/// Options accepted under `[rules.no-heavy-deps-in-pure-module]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoHeavyDepsOptions {
    /// File-name patterns identifying pure modules.
    #[serde(default, alias = "pureModulePatterns")]
    pub pure_module_patterns: Option<Vec<String>>,
    /// Exact specifiers to reject.
    #[serde(default, alias = "forbiddenDeps")]
    pub forbidden_deps: Option<Vec<String>>,
    /// Specifier suffixes to reject.
    #[serde(default, alias = "forbiddenExtensions")]
    pub forbidden_extensions: Option<Vec<String>>,
}

/// Forbids UI frameworks and stylesheets in pure modules.
#[derive(Debug, Clone)]
pub struct NoHeavyDepsInPureModule {
    /// Pure-module patterns; `None` means `*.ts`.
    pub pure_module_patterns: Option<Vec<String>>,
    /// Exact specifiers to reject.
    pub forbidden_deps: Vec<String>,
    /// Specifier suffixes to reject.
    pub forbidden_extensions: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoHeavyDepsInPureModule {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl NoHeavyDepsInPureModule {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pure_module_patterns: None,
            forbidden_deps: owned(DEFAULT_FORBIDDEN_DEPS),
            forbidden_extensions: owned(DEFAULT_FORBIDDEN_EXTENSIONS),
            severity: Severity::Error,
        }
    }

    /// Builds the rule from its configuration block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] for unknown or mistyped options.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let options: NoHeavyDepsOptions = config.options_as(NAME)?;
        let defaults = Self::new();
        Ok(Self {
            pure_module_patterns: options.pure_module_patterns,
            forbidden_deps: options.forbidden_deps.unwrap_or(defaults.forbidden_deps),
            forbidden_extensions: options
                .forbidden_extensions
                .unwrap_or(defaults.forbidden_extensions),
            severity: defaults.severity,
        })
    }

    /// Sets the pure-module patterns.
    #[must_use]
    pub fn pure_module_patterns(mut self, patterns: &[&str]) -> Self {
        self.pure_module_patterns = Some(owned(patterns));
        self
    }

    /// Replaces the forbidden dependency list.
    #[must_use]
    pub fn forbidden_deps(mut self, deps: &[&str]) -> Self {
        self.forbidden_deps = owned(deps);
        self
    }

    /// Replaces the forbidden extension list.
    #[must_use]
    pub fn forbidden_extensions(mut self, extensions: &[&str]) -> Self {
        self.forbidden_extensions = owned(extensions);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_forbidden(&self, source: &str) -> bool {
        self.forbidden_deps.iter().any(|dep| dep == source)
            || self
                .forbidden_extensions
                .iter()
                .any(|ext| source.ends_with(ext.as_str()))
    }
}

impl Rule for NoHeavyDepsInPureModule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids heavy UI dependencies and stylesheets in pure modules"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>, module: &Module) -> Vec<Violation> {
        if !is_pure_module(&ctx.filename(), self.pure_module_patterns.as_deref()) {
            return Vec::new();
        }

        module
            .imports()
            .filter(|import| self.is_forbidden(&import.source))
            .map(|import| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    Location::from_span(ctx.relative_path(), import.span),
                    format!(
                        "Pure module should not import heavy dependency \"{}\". \
                         Consider extracting to a separate module.",
                        import.source
                    ),
                )
                .with_kind(HEAVY_DEP_IN_PURE_MODULE)
            })
            .collect()
    }
}

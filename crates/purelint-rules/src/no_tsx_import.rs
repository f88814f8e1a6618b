//! Rule to keep pure modules from importing `.tsx` files.
//!
//! A pure module that imports a UI module drags the component and all of
//! its dependencies into every consumer of the logic. The import is caught
//! either from its literal `.tsx` suffix or by resolving the specifier on
//! disk (relative paths, tsconfig `paths` aliases, or explicitly configured
//! aliases).
//!
//! # Configuration
//!
//! - `pure_module_patterns`: file-name patterns of pure modules (default `*.ts`)
//! - `path_aliases`: alias prefix to directory map; replaces tsconfig lookup

use std::collections::BTreeMap;

use purelint_core::ast::{ImportDecl, Module};
use purelint_core::patterns::is_pure_module;
use purelint_core::{ConfigError, FileContext, Location, Rule, RuleConfig, Severity, Violation};
use serde::Deserialize;

/// Rule code for no-tsx-import-in-pure-module.
pub const CODE: &str = "PL002";

/// Rule name for no-tsx-import-in-pure-module.
pub const NAME: &str = "no-tsx-import-in-pure-module";

/// Violation kind reported by this rule.
pub const TSX_IMPORT_IN_PURE_MODULE: &str = "tsxImportInPureModule";

const TSX_EXTENSION: &str = ".tsx";

/// Options accepted under `[rules.no-tsx-import-in-pure-module]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoTsxImportOptions {
    /// File-name patterns identifying pure modules.
    #[serde(default, alias = "pureModulePatterns")]
    pub pure_module_patterns: Option<Vec<String>>,
    /// Explicit alias table, e.g. `"@/" = "./src/"`.
    #[serde(default, alias = "pathAliases")]
    pub path_aliases: Option<BTreeMap<String, String>>,
}

/// Forbids pure modules from depending on `.tsx` files.
#[derive(Debug, Clone)]
pub struct NoTsxImportInPureModule {
    /// Pure-module patterns; `None` means `*.ts`.
    pub pure_module_patterns: Option<Vec<String>>,
    /// Explicit aliases; `None` means look up the nearest tsconfig.json.
    pub path_aliases: Option<BTreeMap<String, String>>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoTsxImportInPureModule {
    fn default() -> Self {
        Self::new()
    }
}

impl NoTsxImportInPureModule {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pure_module_patterns: None,
            path_aliases: None,
            severity: Severity::Error,
        }
    }

    /// Builds the rule from its configuration block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] for unknown or mistyped options.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let options: NoTsxImportOptions = config.options_as(NAME)?;
        let mut rule = Self::new();
        rule.pure_module_patterns = options.pure_module_patterns;
        rule.path_aliases = options.path_aliases;
        Ok(rule)
    }

    /// Sets the pure-module patterns.
    #[must_use]
    pub fn pure_module_patterns(mut self, patterns: &[&str]) -> Self {
        self.pure_module_patterns = Some(patterns.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Adds an explicit path alias, disabling tsconfig lookup.
    #[must_use]
    pub fn path_alias(mut self, prefix: &str, target: &str) -> Self {
        self.path_aliases
            .get_or_insert_with(BTreeMap::new)
            .insert(prefix.to_string(), target.to_string());
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the text to report for an offending import, if any.
    fn offending_source(&self, ctx: &FileContext<'_>, import: &ImportDecl) -> Option<String> {
        if import.source.ends_with(TSX_EXTENSION) {
            return Some(import.source.clone());
        }
        let resolved = ctx
            .resolver
            .resolve(&import.source, ctx.path, self.path_aliases.as_ref())?;
        tracing::trace!(
            "{} resolved to {}",
            import.source,
            resolved.display()
        );
        resolved
            .to_string_lossy()
            .ends_with(TSX_EXTENSION)
            .then(|| format!("{} (resolves to .tsx file)", import.source))
    }
}

impl Rule for NoTsxImportInPureModule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids pure modules from importing .tsx files"
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
            .filter_map(|import| {
                let source = self.offending_source(ctx, import)?;
                Some(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        Location::from_span(ctx.relative_path(), import.span),
                        format!(
                            "Pure module should not depend on .tsx files. \
                             Import \"{source}\" is not allowed."
                        ),
                    )
                    .with_kind(TSX_IMPORT_IN_PURE_MODULE),
                )
            })
            .collect()
    }
}

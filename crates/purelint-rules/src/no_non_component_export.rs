//! Rule to keep `.tsx` files limited to component exports.
//!
//! # Rationale
//!
//! A `.tsx` file that also exports constants, helpers or stores forces every
//! consumer of those values to load the UI module and its dependencies.
//! Non-component values belong in a sibling `.ts` file.
//!
//! # Classification
//!
//! Each export statement of a `.tsx` file is taken through these steps in
//! order, and the first matching step decides:
//!
//! 1. type-only exports (`type`, `interface`, `declare`, `const enum`,
//!    overload signatures) are allowed;
//! 2. a runtime `enum` is reported as `runtimeEnumExport`;
//! 3. anything containing JSX anywhere in the statement is allowed;
//! 4. component-shaped declarations are allowed (see [`crate::component_shape`]);
//! 5. everything else is reported as `nonComponentExport`, once per exported
//!    binding.
//!
//! Named function and class declarations without JSX fall under step 5.
//! Default-exported functions are allowed unless `strict_default_exports`
//! is set. Specifier lists (`export { a }`, `export * from`) are allowed.
//!
//! # Fix
//!
//! When the binding has a name, the whole export statement is replaced by a
//! commented-out copy plus an import from a kebab-case sibling module.
//!
//! # Configuration
//!
//! - `strict_default_exports`: require JSX or a component shape for default
//!   function exports too (default: false)

use std::sync::OnceLock;

use purelint_core::ast::{Declaration, DefaultExport, Expr, ExportDecl, ExportKind, Module};
use purelint_core::jsx::contains_jsx;
use purelint_core::patterns::is_ui_module;
use purelint_core::{
    ConfigError, FileContext, Location, Replacement, Rule, RuleConfig, Severity, Suggestion,
    Violation,
};
use regex::Regex;
use serde::Deserialize;

use crate::component_shape::{is_component_shaped_declarator, is_component_shaped_expr};

/// Rule code for no-non-component-export-in-tsx.
pub const CODE: &str = "PL001";

/// Rule name for no-non-component-export-in-tsx.
pub const NAME: &str = "no-non-component-export-in-tsx";

/// Violation kind for ordinary non-component exports.
pub const NON_COMPONENT_EXPORT: &str = "nonComponentExport";

/// Violation kind for runtime enums.
pub const RUNTIME_ENUM_EXPORT: &str = "runtimeEnumExport";

/// Name reported for anonymous default exports.
const DEFAULT_EXPORT_NAME: &str = "default";

/// Name reported for named exports with no recoverable binding name.
const UNNAMED_EXPORT: &str = "<unnamed>";

/// Options accepted under `[rules.no-non-component-export-in-tsx]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoNonComponentExportOptions {
    /// Require JSX or a component shape for default function exports.
    #[serde(default, alias = "strictDefaultExports")]
    pub strict_default_exports: bool,
}

/// Forbids non-component runtime exports from `.tsx` files.
#[derive(Debug, Clone)]
pub struct NoNonComponentExportInTsx {
    /// Treat default-exported functions like any other export.
    pub strict_default_exports: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoNonComponentExportInTsx {
    fn default() -> Self {
        Self::new()
    }
}

impl NoNonComponentExportInTsx {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strict_default_exports: false,
            severity: Severity::Error,
        }
    }

    /// Builds the rule from its configuration block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] for unknown or mistyped options.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let options: NoNonComponentExportOptions = config.options_as(NAME)?;
        Ok(Self::new().strict_default_exports(options.strict_default_exports))
    }

    /// Requires default-exported functions to look like components.
    #[must_use]
    pub fn strict_default_exports(mut self, strict: bool) -> Self {
        self.strict_default_exports = strict;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn check_export(&self, ctx: &FileContext<'_>, export: &ExportDecl) -> Vec<Violation> {
        match &export.kind {
            ExportKind::Specifiers { .. } => Vec::new(),
            ExportKind::Declaration(decl) => self.check_declaration(ctx, export, decl),
            ExportKind::Default(default) => self
                .check_default(ctx, export, default)
                .into_iter()
                .collect(),
        }
    }

    fn check_declaration(
        &self,
        ctx: &FileContext<'_>,
        export: &ExportDecl,
        decl: &Declaration,
    ) -> Vec<Violation> {
        if decl.is_type_only() {
            return Vec::new();
        }
        if let Declaration::Enum(e) = decl {
            return vec![self.report(ctx, export, Some(&e.name), RUNTIME_ENUM_EXPORT)];
        }
        if contains_jsx(decl) {
            return Vec::new();
        }

        match decl {
            Declaration::Variable(var) => var
                .declarators
                .iter()
                .filter(|d| !is_component_shaped_declarator(d))
                .flat_map(|d| d.binding.bound_names())
                .map(|name| self.report(ctx, export, Some(name), NON_COMPONENT_EXPORT))
                .collect(),
            other => vec![self.report(ctx, export, other.name(), NON_COMPONENT_EXPORT)],
        }
    }

    fn check_default(
        &self,
        ctx: &FileContext<'_>,
        export: &ExportDecl,
        default: &DefaultExport,
    ) -> Option<Violation> {
        if let DefaultExport::Declaration(decl) = default {
            if decl.is_type_only() {
                return None;
            }
        }
        if contains_jsx(default) {
            return None;
        }
        if let DefaultExport::Expression(expr) = default {
            if is_component_shaped_expr(expr) {
                return None;
            }
        }
        if !self.strict_default_exports && is_function_like(default) {
            return None;
        }

        let name = match default {
            DefaultExport::Declaration(decl) => decl.name(),
            DefaultExport::Expression(_) => None,
        };
        Some(self.report(
            ctx,
            export,
            Some(name.unwrap_or(DEFAULT_EXPORT_NAME)),
            NON_COMPONENT_EXPORT,
        ))
    }

    fn report(
        &self,
        ctx: &FileContext<'_>,
        export: &ExportDecl,
        name: Option<&str>,
        kind: &str,
    ) -> Violation {
        let location = Location::from_span(ctx.relative_path(), export.span);
        let shown = name.unwrap_or(UNNAMED_EXPORT);
        let message = if kind == RUNTIME_ENUM_EXPORT {
            format!(
                "Runtime enum export \"{shown}\" is not allowed in .tsx files. \
                 Use type-only enum or extract to a separate .ts file."
            )
        } else {
            format!(
                "Non-component runtime export \"{shown}\" is not allowed in .tsx files. \
                 Extract to a separate .ts file."
            )
        };

        let fix = name
            .filter(|n| *n != DEFAULT_EXPORT_NAME)
            .zip(export.span.text(ctx.content))
            .map(|(name, text)| (to_kebab_case(name), name, text));
        let suggestion = match fix {
            Some((kebab, name, text)) => Suggestion::with_fix(
                format!("Move `{name}` to {kebab}.ts"),
                Replacement::new(location.clone(), extraction_stub(name, &kebab, text)),
            ),
            None => Suggestion::new("Move this export to a separate .ts file"),
        };

        Violation::new(CODE, NAME, self.severity, location, message)
            .with_kind(kind)
            .with_suggestion(suggestion)
    }
}

impl Rule for NoNonComponentExportInTsx {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids non-component runtime exports in .tsx files"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, module: &Module) -> Vec<Violation> {
        if !is_ui_module(&ctx.filename()) {
            return Vec::new();
        }
        module
            .exports()
            .flat_map(|export| self.check_export(ctx, export))
            .collect()
    }
}

fn is_function_like(default: &DefaultExport) -> bool {
    match default {
        DefaultExport::Declaration(decl) => matches!(decl, Declaration::Function(_)),
        DefaultExport::Expression(expr) => matches!(expr.unwrap_assertions(), Expr::Function(_)),
    }
}

/// Replacement text: the original statement commented out under a creation
/// note, followed by an import of the extracted binding.
fn extraction_stub(name: &str, kebab: &str, original: &str) -> String {
    let commented = original.replace('\n', "\n// ");
    format!(
        "// TODO: Create {kebab}.ts with:\n// {commented}\nimport {{ {name} }} from './{kebab}';\n"
    )
}

/// `PAGE_SIZE` -> `page-size`, `XMLParser` -> `xml-parser`, `fooBar` -> `foo-bar`.
#[must_use]
pub fn to_kebab_case(name: &str) -> String {
    static BOUNDARIES: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();

    let snake = name.replace('_', "-");
    let Some((lower_upper, acronym)) = BOUNDARIES.get_or_init(|| {
        Some((
            Regex::new("([a-z])([A-Z])").ok()?,
            Regex::new("([A-Z])([A-Z][a-z])").ok()?,
        ))
    }) else {
        return snake.to_lowercase();
    };

    let split = lower_upper.replace_all(&snake, "$1-$2");
    acronym.replace_all(&split, "$1-$2").to_lowercase()
}

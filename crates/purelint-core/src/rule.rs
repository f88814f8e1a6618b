//! Rule trait for defining lint rules.

use crate::ast::Module;
use crate::context::FileContext;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the typed module AST.
///
/// Rules decide for themselves whether a file is in scope (a UI module, a
/// pure module) and return an empty vector otherwise. They must not fail:
/// unexpected shapes are classified, never propagated as errors.
///
/// # Example
///
/// ```ignore
/// use purelint_core::{ast::Module, FileContext, Rule, Violation};
///
/// pub struct NoSideEffectImports;
///
/// impl Rule for NoSideEffectImports {
///     fn name(&self) -> &'static str { "no-side-effect-imports" }
///     fn code(&self) -> &'static str { "PL900" }
///
///     fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the stable identifier of this rule (e.g., "no-tsx-import-in-pure-module").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PL002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether violations from this rule may carry automatic fixes.
    fn fixable(&self) -> bool {
        false
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext<'_>, module: &Module) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ImportResolver;
    use crate::types::Location;
    use std::path::Path;

    struct CountImports;

    impl Rule for CountImports {
        fn name(&self) -> &'static str {
            "count-imports"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }

        fn check(&self, ctx: &FileContext<'_>, module: &Module) -> Vec<Violation> {
            module
                .imports()
                .map(|import| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        Location::from_span(ctx.relative_path(), import.span),
                        import.source.clone(),
                    )
                })
                .collect()
        }
    }

    #[test]
    fn defaults_and_dispatch_through_box() {
        let rule: RuleBox = Box::new(CountImports);
        assert_eq!(rule.default_severity(), Severity::Error);
        assert!(!rule.fixable());
        assert_eq!(rule.description(), "");

        let resolver = ImportResolver::new();
        let content = "import a from './a';\nimport b from 'b';\n";
        let ctx = FileContext::new(Path::new("/p/src/x.ts"), content, Path::new("/p"), &resolver);
        let module = crate::parser::parse_file(ctx.path, content).expect("parse");
        let violations = rule.check(&ctx, &module);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[1].location.line, 2);
        assert_eq!(violations[0].location.file, Path::new("src/x.ts"));
    }
}

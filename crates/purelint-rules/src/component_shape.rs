//! Syntactic heuristics for "is this export a UI component?".
//!
//! Three independent checks, any of which is sufficient:
//!
//! - explicit type: the binding is annotated `FC`/`FunctionComponent`,
//!   bare or as `React.FC`, with or without type arguments;
//! - known wrapper: the initializer is a `memo(..)` / `forwardRef(..)` call,
//!   bare or member-qualified, under any number of type assertions;
//! - higher-order wrapper: the initializer is a call whose callee looks like
//!   a HOC (`withX`, `observer`, `connect()(..)`, ...) and whose first
//!   argument looks like a component.
//!
//! No type information is used, so the margins are fuzzy in both directions.

use purelint_core::ast::{Declarator, Expr, TypeRef};

/// Type names that mark an explicitly typed function component.
const COMPONENT_TYPES: &[&str] = &["FC", "FunctionComponent"];

/// Namespace allowed to qualify [`COMPONENT_TYPES`].
const COMPONENT_TYPE_NAMESPACE: &str = "React";

/// Wrappers that always produce a component, whatever they wrap.
const COMPONENT_WRAPPERS: &[&str] = &["memo", "forwardRef"];

/// Callee names treated as higher-order components besides `with*`.
const KNOWN_HOCS: &[&str] = &["memo", "forwardRef", "observer", "connect", "inject", "compose"];

/// Bound on curried/nested HOC chains such as `a()(b()(c(X)))`.
const MAX_HOC_DEPTH: usize = 32;

/// Returns true if a variable declarator looks like a component.
#[must_use]
pub fn is_component_shaped_declarator(declarator: &Declarator) -> bool {
    declarator
        .type_annotation
        .as_ref()
        .is_some_and(is_component_type)
        || declarator.init.as_ref().is_some_and(is_component_shaped_expr)
}

/// Returns true if an expression (initializer or default export) looks like
/// a component.
#[must_use]
pub fn is_component_shaped_expr(expr: &Expr) -> bool {
    is_known_wrapper_call(expr) || is_hoc_call(expr)
}

/// `FC`, `FunctionComponent`, `React.FC<P>`, `React.FunctionComponent<P>`.
#[must_use]
pub fn is_component_type(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Named { qualifier, name } => {
            COMPONENT_TYPES.contains(&name.as_str())
                && qualifier
                    .as_deref()
                    .map_or(true, |q| q == COMPONENT_TYPE_NAMESPACE)
        }
        TypeRef::Other => false,
    }
}

/// `memo(..)`, `React.memo(..)`, `forwardRef(..) as X`.
#[must_use]
pub fn is_known_wrapper_call(expr: &Expr) -> bool {
    let Expr::Call { callee, .. } = expr.unwrap_assertions() else {
        return false;
    };
    callee_name(callee).is_some_and(|name| COMPONENT_WRAPPERS.contains(&name))
}

/// A HOC-looking call with a component-like first argument.
#[must_use]
pub fn is_hoc_call(expr: &Expr) -> bool {
    let expr = expr.unwrap_assertions();
    looks_like_hoc_call(expr, 0) && has_component_like_argument(expr, 0)
}

/// `withRouter`, `observer`, and the other [`KNOWN_HOCS`].
#[must_use]
pub fn is_hoc_name(name: &str) -> bool {
    name.starts_with("with") || KNOWN_HOCS.contains(&name)
}

/// Last identifier of an `a` or `a.b.c` callee.
fn callee_name(callee: &Expr) -> Option<&str> {
    match callee.unwrap_assertions() {
        Expr::Ident(name) => Some(name),
        Expr::Member { property, .. } => Some(property),
        _ => None,
    }
}

fn looks_like_hoc_call(expr: &Expr, depth: usize) -> bool {
    if depth > MAX_HOC_DEPTH {
        return false;
    }
    let Expr::Call { callee, .. } = expr else {
        return false;
    };
    match callee.unwrap_assertions() {
        // connect(mapState)(View), compose(withA, withB)(View)
        inner @ Expr::Call { .. } => looks_like_hoc_call(inner, depth + 1),
        other => callee_name(other).is_some_and(is_hoc_name),
    }
}

fn has_component_like_argument(expr: &Expr, depth: usize) -> bool {
    let Expr::Call { args, .. } = expr else {
        return false;
    };
    let Some(first) = args.first() else {
        return false;
    };
    match first.unwrap_assertions() {
        Expr::Ident(name) => name.chars().next().is_some_and(char::is_uppercase),
        Expr::Function(_) => true,
        call @ Expr::Call { .. } => looks_like_hoc_call(call, depth + 1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purelint_core::ast::{Declaration, DefaultExport, ExportKind, Module};
    use purelint_core::parser::{Dialect, ModuleParser};

    fn parse(src: &str) -> Module {
        ModuleParser::new(Dialect::Tsx)
            .parse(src)
            .expect("tsx grammar should load")
    }

    fn declarator_shaped(src: &str) -> bool {
        let module = parse(src);
        let export = module.exports().next().expect("one export");
        let ExportKind::Declaration(Declaration::Variable(var)) = &export.kind else {
            panic!("expected variable export in {src}");
        };
        is_component_shaped_declarator(&var.declarators[0])
    }

    fn default_shaped(src: &str) -> bool {
        let module = parse(src);
        let export = module.exports().next().expect("one export");
        let ExportKind::Default(DefaultExport::Expression(expr)) = &export.kind else {
            panic!("expected default expression in {src}");
        };
        is_component_shaped_expr(expr)
    }

    #[test]
    fn explicit_component_types() {
        assert!(declarator_shaped("export const A: FC = () => null;"));
        assert!(declarator_shaped("export const A: FunctionComponent<P> = f;"));
        assert!(declarator_shaped("export const A: React.FC = f;"));
        assert!(declarator_shaped("export const A: React.FunctionComponent<Props> = f;"));
        assert!(!declarator_shaped("export const A: Preact.FC = f;"));
        assert!(!declarator_shaped("export const A: ComponentType = f;"));
        assert!(!declarator_shaped("export const A: number = 1;"));
    }

    #[test]
    fn known_wrappers_ignore_argument_shape() {
        for src in [
            "export const A = memo(inner);",
            "export const A = React.memo(inner);",
            "export const A = forwardRef(render);",
            "export const A = React.forwardRef<HTMLDivElement, P>(render);",
            "export const A = forwardRef(render) as Typed;",
            "export const A = (memo(inner) as unknown) as Typed;",
        ] {
            assert!(declarator_shaped(src), "{src}");
        }
    }

    #[test]
    fn hoc_with_component_like_argument() {
        for src in [
            "export const A = withRouter(Page);",
            "export const A = observer(function Inner() { return null; });",
            "export const A = connect(mapState)(View);",
            "export const A = compose(withA, withB)(View);",
            "export const A = withTheme(withRouter(Page));",
            "export const A = hocs.withAuth(Page);",
        ] {
            assert!(declarator_shaped(src), "{src}");
        }
    }

    #[test]
    fn hoc_with_non_component_argument_is_rejected() {
        for src in [
            "export const A = withRouter(page);",
            "export const A = withDefaults(42);",
            "export const A = withRetry('x');",
            "export const A = withTheme(compute(Page));",
            "export const A = createStore(Reducer);",
            "export const A = withRouter();",
        ] {
            assert!(!declarator_shaped(src), "{src}");
        }
    }

    #[test]
    fn default_export_expressions() {
        assert!(default_shaped("export default withRouter(Page);"));
        assert!(default_shaped("export default React.memo(Page);"));
        assert!(!default_shaped("export default createStore(reducer);"));
        assert!(!default_shaped("export default Page;"));
    }

    #[test]
    fn pathological_currying_is_bounded() {
        let mut src = String::from("export const A = withX");
        for _ in 0..(MAX_HOC_DEPTH * 2) {
            src.push_str("()");
        }
        src.push_str("(View);");
        assert!(!declarator_shaped(&src));
    }

    #[test]
    fn hoc_names() {
        assert!(is_hoc_name("withBoundary"));
        assert!(is_hoc_name("inject"));
        assert!(!is_hoc_name("useMemo"));
        assert!(!is_hoc_name("Memo"));
    }
}

//! JSX presence detection over the typed AST.

use crate::ast::{
    Class, Declaration, Declarator, DefaultExport, EnumDecl, Expr, Function, Pattern,
    VariableDecl,
};

/// Subtree query: does this node contain a JSX element or fragment anywhere?
///
/// Traversal short-circuits on the first match. Spans and other metadata
/// are not part of the traversal.
pub trait ContainsJsx {
    /// Returns true if the node or any descendant is JSX.
    fn contains_jsx(&self) -> bool;
}

/// Convenience wrapper around [`ContainsJsx::contains_jsx`].
#[must_use]
pub fn contains_jsx<T: ContainsJsx + ?Sized>(node: &T) -> bool {
    node.contains_jsx()
}

impl<T: ContainsJsx> ContainsJsx for [T] {
    fn contains_jsx(&self) -> bool {
        self.iter().any(ContainsJsx::contains_jsx)
    }
}

impl<T: ContainsJsx> ContainsJsx for Option<T> {
    fn contains_jsx(&self) -> bool {
        self.as_ref().is_some_and(ContainsJsx::contains_jsx)
    }
}

impl ContainsJsx for Expr {
    fn contains_jsx(&self) -> bool {
        match self {
            Self::Jsx(_) => true,
            Self::Ident(_) | Self::Literal(_) => false,
            Self::Member { object, .. } => object.contains_jsx(),
            Self::Call { callee, args } => callee.contains_jsx() || args.contains_jsx(),
            Self::Function(function) => function.contains_jsx(),
            Self::Class(class) => class.contains_jsx(),
            Self::TypeAssertion(inner) | Self::Paren(inner) => inner.contains_jsx(),
            Self::Other(children) => children.contains_jsx(),
        }
    }
}

impl ContainsJsx for Function {
    fn contains_jsx(&self) -> bool {
        self.body.contains_jsx()
    }
}

impl ContainsJsx for Class {
    fn contains_jsx(&self) -> bool {
        self.body.contains_jsx()
    }
}

impl ContainsJsx for EnumDecl {
    fn contains_jsx(&self) -> bool {
        self.body.contains_jsx()
    }
}

impl ContainsJsx for Pattern {
    fn contains_jsx(&self) -> bool {
        match self {
            Self::Identifier(_) => false,
            Self::Object(items) | Self::Array(items) => items.contains_jsx(),
            Self::Rest(inner) => inner.contains_jsx(),
            Self::Assign { target, default } => target.contains_jsx() || default.contains_jsx(),
        }
    }
}

impl ContainsJsx for Declarator {
    fn contains_jsx(&self) -> bool {
        self.binding.contains_jsx() || self.init.contains_jsx()
    }
}

impl ContainsJsx for VariableDecl {
    fn contains_jsx(&self) -> bool {
        self.declarators.contains_jsx()
    }
}

impl ContainsJsx for Declaration {
    fn contains_jsx(&self) -> bool {
        match self {
            Self::Variable(var) => var.contains_jsx(),
            Self::Function(function) => function.contains_jsx(),
            Self::Class(class) => class.contains_jsx(),
            Self::Enum(decl) => decl.contains_jsx(),
            Self::Other { body, .. } => body.contains_jsx(),
            Self::TypeAlias(_)
            | Self::Interface(_)
            | Self::Ambient { .. }
            | Self::Signature { .. } => false,
        }
    }
}

impl ContainsJsx for DefaultExport {
    fn contains_jsx(&self) -> bool {
        match self {
            Self::Declaration(decl) => decl.contains_jsx(),
            Self::Expression(expr) => expr.contains_jsx(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExportKind, JsxKind, Literal, Module};
    use crate::parser::{Dialect, ModuleParser};

    fn first_export_has_jsx(src: &str) -> bool {
        let module: Module = ModuleParser::new(Dialect::Tsx)
            .parse(src)
            .expect("tsx grammar should load");
        let export = module.exports().next().expect("one export");
        match &export.kind {
            ExportKind::Declaration(decl) => contains_jsx(decl),
            ExportKind::Default(default) => contains_jsx(default),
            ExportKind::Specifiers { .. } => false,
        }
    }

    #[test]
    fn direct_jsx_nodes() {
        assert!(contains_jsx(&Expr::Jsx(JsxKind::Element)));
        assert!(contains_jsx(&Expr::Jsx(JsxKind::Fragment)));
        assert!(!contains_jsx(&Expr::Literal(Literal::Null)));
    }

    #[test]
    fn nested_in_opaque_children() {
        let expr = Expr::Other(vec![
            Expr::Ident("a".into()),
            Expr::Other(vec![Expr::Paren(Box::new(Expr::Jsx(JsxKind::Element)))]),
        ]);
        assert!(contains_jsx(&expr));
    }

    #[test]
    fn function_returning_jsx() {
        assert!(first_export_has_jsx(
            "export function renderItem(x: string) { return <li>{x}</li>; }"
        ));
    }

    #[test]
    fn config_object_with_render_callback() {
        assert!(first_export_has_jsx(
            "export const columns = [{ key: 'a', render: (v) => <b>{v}</b> }];"
        ));
    }

    #[test]
    fn jsx_in_destructuring_default() {
        assert!(first_export_has_jsx(
            "export const { icon = <Icon /> } = props;"
        ));
    }

    #[test]
    fn jsx_in_template_substitution() {
        assert!(first_export_has_jsx(
            "export const label = `${String(<span />)}`;"
        ));
    }

    #[test]
    fn plain_values_have_no_jsx() {
        assert!(!first_export_has_jsx("export const PAGE_SIZE = 20;"));
        assert!(!first_export_has_jsx(
            "export function add(a: number, b: number) { return a + b; }"
        ));
        assert!(!first_export_has_jsx("export default class Store { items = []; }"));
    }
}

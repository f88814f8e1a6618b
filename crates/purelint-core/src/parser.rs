//! TypeScript/TSX front end using Tree-sitter.
//!
//! Parses source text with the tree-sitter TypeScript grammars and lowers
//! the concrete syntax tree into the typed [`crate::ast`] model.

use std::path::Path;
use tree_sitter::{Language, Node, Parser};

use crate::ast::{
    Class, Declaration, Declarator, DefaultExport, EnumDecl, ExportDecl, ExportKind, Expr,
    Function, FunctionKind, ImportDecl, JsxKind, Literal, Module, ModuleItem, Pattern, Span,
    TypeRef, VarKind, VariableDecl,
};

/// Nesting depth after which lowering stops building typed nodes and only
/// scans the remaining subtree for JSX.
const MAX_LOWERING_DEPTH: usize = 256;

/// Errors raised while parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {dialect:?} grammar: {message}")]
    Language {
        /// Dialect whose grammar failed to load.
        dialect: Dialect,
        /// Loader error message.
        message: String,
    },
    /// Tree-sitter returned no tree.
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Source dialect, selecting the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`).
    TypeScript,
    /// TypeScript with JSX (`.tsx`, `.jsx`).
    Tsx,
}

impl Dialect {
    /// Picks the dialect from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx" | "jsx") => Self::Tsx,
            _ => Self::TypeScript,
        }
    }
}

/// Parses TypeScript/TSX source into a [`Module`].
pub struct ModuleParser {
    dialect: Dialect,
    language: Language,
}

impl ModuleParser {
    /// Creates a parser for the given dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        let language = match dialect {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        };
        Self { dialect, language }
    }

    /// Creates a parser for the dialect implied by `path`.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        Self::new(Dialect::from_path(path))
    }

    /// Returns the dialect this parser handles.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parses `source` and lowers its top-level imports and exports.
    ///
    /// Syntax errors do not fail the parse: tree-sitter recovers and the
    /// returned module has [`Module::has_errors`] set.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or no tree is produced.
    pub fn parse(&self, source: &str) -> Result<Module, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                dialect: self.dialect,
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        let lowerer = Lowerer {
            src: source.as_bytes(),
        };

        Ok(Module {
            items: lowerer.module(root),
            has_errors: root.has_error(),
        })
    }
}

/// Parses `source` with the grammar selected by `path`'s extension.
///
/// # Errors
///
/// See [`ModuleParser::parse`].
pub fn parse_file(path: &Path, source: &str) -> Result<Module, ParseError> {
    ModuleParser::for_path(path).parse(source)
}

struct Lowerer<'s> {
    src: &'s [u8],
}

impl<'s> Lowerer<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_owned())
    }

    fn span(node: Node<'_>) -> Span {
        let start = node.start_position();
        Span {
            start: node.start_byte(),
            end: node.end_byte(),
            line: start.row + 1,
            column: start.column + 1,
        }
    }

    fn has_token(node: Node<'_>, kind: &str) -> bool {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).any(|c| c.kind() == kind);
        found
    }

    fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .collect();
        children
    }

    fn module(&self, root: Node<'_>) -> Vec<ModuleItem> {
        let mut items = Vec::new();
        for node in Self::named_children(root) {
            match node.kind() {
                "import_statement" => {
                    if let Some(import) = self.import(node) {
                        items.push(ModuleItem::Import(import));
                    }
                }
                "export_statement" => items.push(ModuleItem::Export(self.export(node))),
                _ => {}
            }
        }
        items
    }

    /// `import x = require("y")` carries no `source` field and is skipped.
    fn import(&self, node: Node<'_>) -> Option<ImportDecl> {
        let source = node.child_by_field_name("source")?;
        Some(ImportDecl {
            source: self.string_value(source),
            span: Self::span(node),
        })
    }

    fn export(&self, node: Node<'_>) -> ExportDecl {
        let span = Self::span(node);
        let is_default = Self::has_token(node, "default");

        let kind = if let Some(decl) = node.child_by_field_name("declaration") {
            let decl = self.declaration(decl, false, 0);
            if is_default {
                ExportKind::Default(DefaultExport::Declaration(decl))
            } else {
                ExportKind::Declaration(decl)
            }
        } else if let Some(value) = node.child_by_field_name("value") {
            ExportKind::Default(DefaultExport::Expression(self.expr(value, 0)))
        } else {
            ExportKind::Specifiers {
                source: node
                    .child_by_field_name("source")
                    .map(|s| self.string_value(s)),
            }
        };

        ExportDecl { kind, span }
    }

    fn declaration(&self, node: Node<'_>, ambient: bool, depth: usize) -> Declaration {
        let name = self.field_text(node, "name");
        match node.kind() {
            "lexical_declaration" | "variable_declaration" if ambient => Declaration::Ambient {
                name: self.first_declarator_name(node),
            },
            "lexical_declaration" | "variable_declaration" => {
                Declaration::Variable(self.variable(node, depth))
            }
            "function_declaration" | "generator_function_declaration" if !ambient => {
                Declaration::Function(self.function(node, FunctionKind::Declaration, depth))
            }
            "class_declaration" | "abstract_class_declaration" if !ambient => {
                Declaration::Class(self.class(node, depth))
            }
            "function_signature" => Declaration::Signature { name },
            "enum_declaration" => Declaration::Enum(EnumDecl {
                name: name.unwrap_or_default(),
                is_const: Self::has_token(node, "const"),
                is_declare: ambient,
                body: self.children(node, depth),
            }),
            // `export import Z = Foo.Bar;`
            "import_alias" => Declaration::Other {
                name: Self::named_children(node)
                    .first()
                    .map(|alias| self.text(*alias).to_owned()),
                body: Vec::new(),
            },
            "type_alias_declaration" => Declaration::TypeAlias(name.unwrap_or_default()),
            "interface_declaration" => Declaration::Interface(name.unwrap_or_default()),
            "ambient_declaration" => match Self::named_children(node).first() {
                Some(inner) => self.declaration(*inner, true, depth),
                None => Declaration::Ambient { name: None },
            },
            _ if ambient => Declaration::Ambient { name },
            _ => Declaration::Other {
                name,
                body: self.children(node, depth),
            },
        }
    }

    fn first_declarator_name(&self, node: Node<'_>) -> Option<String> {
        Self::named_children(node)
            .into_iter()
            .find(|c| c.kind() == "variable_declarator")
            .and_then(|d| self.field_text(d, "name"))
    }

    fn variable(&self, node: Node<'_>, depth: usize) -> VariableDecl {
        let kind = if node.kind() == "variable_declaration" {
            VarKind::Var
        } else if Self::has_token(node, "let") {
            VarKind::Let
        } else {
            VarKind::Const
        };

        let declarators = Self::named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "variable_declarator")
            .filter_map(|d| self.declarator(d, depth))
            .collect();

        VariableDecl { kind, declarators }
    }

    fn declarator(&self, node: Node<'_>, depth: usize) -> Option<Declarator> {
        let name = node.child_by_field_name("name")?;
        let binding = self
            .pattern(name, depth)
            .unwrap_or_else(|| Pattern::Identifier(self.text(name).to_owned()));

        Some(Declarator {
            binding,
            type_annotation: node.child_by_field_name("type").map(|t| self.type_ref(t)),
            init: node
                .child_by_field_name("value")
                .map(|v| self.expr(v, depth + 1)),
        })
    }

    fn pattern(&self, node: Node<'_>, depth: usize) -> Option<Pattern> {
        if depth > MAX_LOWERING_DEPTH {
            tracing::debug!("binding pattern depth limit reached at byte {}", node.start_byte());
            return None;
        }

        match node.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                Some(Pattern::Identifier(self.text(node).to_owned()))
            }
            "object_pattern" => Some(Pattern::Object(
                Self::named_children(node)
                    .into_iter()
                    .filter_map(|c| self.pattern(c, depth + 1))
                    .collect(),
            )),
            "array_pattern" => Some(Pattern::Array(
                Self::named_children(node)
                    .into_iter()
                    .filter_map(|c| self.pattern(c, depth + 1))
                    .collect(),
            )),
            "pair_pattern" => self.pattern(node.child_by_field_name("value")?, depth + 1),
            "rest_pattern" => {
                let inner = *Self::named_children(node).first()?;
                Some(Pattern::Rest(Box::new(self.pattern(inner, depth + 1)?)))
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                let target = self.pattern(node.child_by_field_name("left")?, depth + 1)?;
                let default = node
                    .child_by_field_name("right")
                    .map_or(Expr::Other(Vec::new()), |r| self.expr(r, depth + 1));
                Some(Pattern::Assign {
                    target: Box::new(target),
                    default: Box::new(default),
                })
            }
            _ => None,
        }
    }

    fn type_ref(&self, node: Node<'_>) -> TypeRef {
        match node.kind() {
            "type_annotation" => Self::named_children(node)
                .first()
                .map_or(TypeRef::Other, |inner| self.type_ref(*inner)),
            "type_identifier" => TypeRef::Named {
                qualifier: None,
                name: self.text(node).to_owned(),
            },
            "nested_type_identifier" => match self.field_text(node, "name") {
                Some(name) => TypeRef::Named {
                    qualifier: self.field_text(node, "module"),
                    name,
                },
                None => TypeRef::Other,
            },
            "generic_type" => node
                .child_by_field_name("name")
                .map_or(TypeRef::Other, |n| self.type_ref(n)),
            _ => TypeRef::Other,
        }
    }

    fn function(&self, node: Node<'_>, kind: FunctionKind, depth: usize) -> Function {
        Function {
            kind,
            name: self.field_text(node, "name"),
            body: self.children(node, depth),
        }
    }

    fn class(&self, node: Node<'_>, depth: usize) -> Class {
        Class {
            name: self.field_text(node, "name"),
            body: self.children(node, depth),
        }
    }

    fn children(&self, node: Node<'_>, depth: usize) -> Vec<Expr> {
        Self::named_children(node)
            .into_iter()
            .map(|c| self.expr(c, depth + 1))
            .collect()
    }

    fn expr(&self, node: Node<'_>, depth: usize) -> Expr {
        if depth > MAX_LOWERING_DEPTH {
            tracing::debug!("lowering depth limit reached at byte {}", node.start_byte());
            return if Self::subtree_has_jsx(node) {
                Expr::Jsx(JsxKind::Element)
            } else {
                Expr::Other(Vec::new())
            };
        }

        match node.kind() {
            "identifier" => Expr::Ident(self.text(node).to_owned()),
            "undefined" => Expr::Literal(Literal::Undefined),
            "null" => Expr::Literal(Literal::Null),
            "true" => Expr::Literal(Literal::Bool(true)),
            "false" => Expr::Literal(Literal::Bool(false)),
            "number" => Expr::Literal(Literal::Number(self.text(node).to_owned())),
            "regex" => Expr::Literal(Literal::Regex(self.text(node).to_owned())),
            "string" => Expr::Literal(Literal::String(self.string_value(node))),
            "member_expression" => {
                match (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("property"),
                ) {
                    (Some(object), Some(property)) => Expr::Member {
                        object: Box::new(self.expr(object, depth + 1)),
                        property: self.text(property).to_owned(),
                    },
                    _ => Expr::Other(self.children(node, depth)),
                }
            }
            "call_expression" => self.call(node, depth),
            "arrow_function" => Expr::Function(self.function(node, FunctionKind::Arrow, depth)),
            "function_expression" | "function" | "generator_function" => {
                Expr::Function(self.function(node, FunctionKind::Expression, depth))
            }
            "class" => Expr::Class(self.class(node, depth)),
            "jsx_self_closing_element" => Expr::Jsx(JsxKind::Element),
            "jsx_fragment" => Expr::Jsx(JsxKind::Fragment),
            "jsx_element" => {
                let named = node
                    .child_by_field_name("open_tag")
                    .and_then(|open| open.child_by_field_name("name"))
                    .is_some();
                Expr::Jsx(if named {
                    JsxKind::Element
                } else {
                    JsxKind::Fragment
                })
            }
            "as_expression" | "satisfies_expression" | "non_null_expression" => {
                self.wrapped(node, depth, Expr::TypeAssertion, false)
            }
            // `<T>value`: the expression follows the type arguments.
            "type_assertion" => self.wrapped(node, depth, Expr::TypeAssertion, true),
            "parenthesized_expression" => self.wrapped(node, depth, Expr::Paren, false),
            _ => Expr::Other(self.children(node, depth)),
        }
    }

    fn wrapped(
        &self,
        node: Node<'_>,
        depth: usize,
        wrap: fn(Box<Expr>) -> Expr,
        last: bool,
    ) -> Expr {
        let children = Self::named_children(node);
        let inner = if last {
            children.last()
        } else {
            children.first()
        };
        match inner {
            Some(inner) => wrap(Box::new(self.expr(*inner, depth + 1))),
            None => Expr::Other(Vec::new()),
        }
    }

    fn call(&self, node: Node<'_>, depth: usize) -> Expr {
        let Some(callee) = node.child_by_field_name("function") else {
            return Expr::Other(self.children(node, depth));
        };

        // Tagged templates carry a template string instead of `arguments`.
        let args = match node.child_by_field_name("arguments") {
            Some(args) if args.kind() == "arguments" => self.children(args, depth),
            Some(other) => vec![self.expr(other, depth + 1)],
            None => Vec::new(),
        };

        Expr::Call {
            callee: Box::new(self.expr(callee, depth + 1)),
            args,
        }
    }

    fn string_value(&self, node: Node<'_>) -> String {
        let mut cursor = node.walk();
        let mut value = String::new();
        for child in node.named_children(&mut cursor) {
            if matches!(child.kind(), "string_fragment" | "escape_sequence") {
                value.push_str(self.text(child));
            }
        }
        value
    }

    fn subtree_has_jsx(node: Node<'_>) -> bool {
        let mut cursor = node.walk();
        loop {
            let kind = cursor.node().kind();
            if matches!(
                kind,
                "jsx_element" | "jsx_self_closing_element" | "jsx_fragment"
            ) {
                return true;
            }
            if cursor.goto_first_child() || cursor.goto_next_sibling() {
                continue;
            }
            loop {
                if !cursor.goto_parent() || cursor.node() == node {
                    return false;
                }
                if cursor.goto_next_sibling() {
                    break;
                }
            }
        }
    }
}

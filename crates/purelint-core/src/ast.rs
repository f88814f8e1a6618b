//! Typed module-level AST for TypeScript/TSX sources.
//!
//! The tree-sitter concrete syntax tree is lowered into these closed sum
//! types by [`crate::parser`]. Only the top-level import/export statements
//! are retained; everything the classifiers never branch on is kept as
//! [`Expr::Other`] so that subtree queries such as JSX presence still see it.

/// Byte range plus 1-indexed start position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Span {
    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the source text covered by this span, if in bounds.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// A parsed source file.
#[derive(Debug, Clone, Default)]
pub struct Module {
    /// Top-level import and export statements, in source order.
    pub items: Vec<ModuleItem>,
    /// Whether the parser had to recover from syntax errors.
    pub has_errors: bool,
}

impl Module {
    /// Iterates over the import declarations of the module.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            ModuleItem::Import(import) => Some(import),
            ModuleItem::Export(_) => None,
        })
    }

    /// Iterates over the export declarations of the module.
    pub fn exports(&self) -> impl Iterator<Item = &ExportDecl> {
        self.items.iter().filter_map(|item| match item {
            ModuleItem::Export(export) => Some(export),
            ModuleItem::Import(_) => None,
        })
    }
}

/// A top-level statement relevant to classification.
#[derive(Debug, Clone)]
pub enum ModuleItem {
    /// `import ... from "<source>"`
    Import(ImportDecl),
    /// `export ...`
    Export(ExportDecl),
}

/// `import ... from "<source>"` (including side-effect imports).
#[derive(Debug, Clone)]
pub struct ImportDecl {
    /// The module specifier, without quotes.
    pub source: String,
    /// Span of the whole statement.
    pub span: Span,
}

/// An `export` statement.
#[derive(Debug, Clone)]
pub struct ExportDecl {
    /// What is exported.
    pub kind: ExportKind,
    /// Span of the whole statement.
    pub span: Span,
}

/// The shape of an export statement.
#[derive(Debug, Clone)]
pub enum ExportKind {
    /// `export <declaration>`
    Declaration(Declaration),
    /// `export default ...`
    Default(DefaultExport),
    /// `export { a, b }`, `export * from "x"`, `export type { T }`, `export = x`.
    Specifiers {
        /// Re-export source, if any.
        source: Option<String>,
    },
}

/// The payload of `export default`.
#[derive(Debug, Clone)]
pub enum DefaultExport {
    /// `export default function Foo() {}`, `export default class Foo {}`,
    /// `export default interface Foo {}`.
    Declaration(Declaration),
    /// `export default <expression>`
    Expression(Expr),
}

/// A declaration that can follow `export`.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// `const`/`let`/`var` statement.
    Variable(VariableDecl),
    /// `function foo() {}` (including generators).
    Function(Function),
    /// `class Foo {}` (including abstract classes).
    Class(Class),
    /// `enum Foo {}`
    Enum(EnumDecl),
    /// `type Foo = ...`
    TypeAlias(String),
    /// `interface Foo {}`
    Interface(String),
    /// Namespaces, `import A = B.C` aliases and any other runtime declaration.
    Other {
        /// Declared name, if any.
        name: Option<String>,
        /// Lowered body.
        body: Vec<Expr>,
    },
    /// `declare const x: T;` and other ambient declarations (enums excepted).
    Ambient {
        /// Declared name, if any.
        name: Option<String>,
    },
    /// Function overload signature `function foo(a: string): void;`.
    Signature {
        /// Declared name.
        name: Option<String>,
    },
}

impl Declaration {
    /// Returns true if this declaration produces no runtime value.
    #[must_use]
    pub fn is_type_only(&self) -> bool {
        match self {
            Self::TypeAlias(_)
            | Self::Interface(_)
            | Self::Ambient { .. }
            | Self::Signature { .. } => true,
            Self::Enum(decl) => !decl.is_runtime(),
            Self::Variable(_) | Self::Function(_) | Self::Class(_) | Self::Other { .. } => false,
        }
    }

    /// Returns the declared name for single-name declarations.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Function(f) => f.name.as_deref(),
            Self::Class(c) => c.name.as_deref(),
            Self::Enum(e) => Some(e.name.as_str()),
            Self::TypeAlias(name) | Self::Interface(name) => Some(name.as_str()),
            Self::Other { name, .. } | Self::Ambient { name } | Self::Signature { name } => {
                name.as_deref()
            }
            Self::Variable(_) => None,
        }
    }
}

/// Variable declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// `const`
    Const,
    /// `let`
    Let,
    /// `var`
    Var,
}

/// `const a = 1, { b } = c;`
#[derive(Debug, Clone)]
pub struct VariableDecl {
    /// Declaration keyword.
    pub kind: VarKind,
    /// Declarators in source order.
    pub declarators: Vec<Declarator>,
}

/// One `binding: Type = init` entry of a variable declaration.
#[derive(Debug, Clone)]
pub struct Declarator {
    /// The bound name or destructuring pattern.
    pub binding: Pattern,
    /// Declared type annotation.
    pub type_annotation: Option<TypeRef>,
    /// Initializer expression.
    pub init: Option<Expr>,
}

/// A binding pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// `a`
    Identifier(String),
    /// `{ a, b: c, ...rest }`; properties lowered to their value patterns.
    Object(Vec<Pattern>),
    /// `[a, , b, ...rest]`; holes are dropped.
    Array(Vec<Pattern>),
    /// `...rest`
    Rest(Box<Pattern>),
    /// `a = default`
    Assign {
        /// Bound target.
        target: Box<Pattern>,
        /// Default value.
        default: Box<Expr>,
    },
}

impl Pattern {
    /// Collects every name bound by this pattern, in source order.
    #[must_use]
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Identifier(name) => out.push(name),
            Self::Object(items) | Self::Array(items) => {
                for item in items {
                    item.collect_names(out);
                }
            }
            Self::Rest(inner) => inner.collect_names(out),
            Self::Assign { target, .. } => target.collect_names(out),
        }
    }
}

/// A type annotation, reduced to what the classifiers look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `Name`, `Ns.Name`, `Name<Args>` or `Ns.Name<Args>`.
    Named {
        /// Namespace qualifier (`React` in `React.FC`).
        qualifier: Option<String>,
        /// Final type name.
        name: String,
    },
    /// Any other type expression.
    Other,
}

/// `function` or arrow function, declared or inline.
#[derive(Debug, Clone)]
pub struct Function {
    /// Syntactic flavour.
    pub kind: FunctionKind,
    /// Declared name, if any.
    pub name: Option<String>,
    /// Lowered parameters and body.
    pub body: Vec<Expr>,
}

/// Flavour of a [`Function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `function foo() {}` statement.
    Declaration,
    /// `function () {}` expression.
    Expression,
    /// `() => {}`
    Arrow,
}

/// `class Foo {}` declaration or expression.
#[derive(Debug, Clone)]
pub struct Class {
    /// Declared name, if any.
    pub name: Option<String>,
    /// Lowered heritage, decorators and body.
    pub body: Vec<Expr>,
}

/// `enum Foo {}`
#[derive(Debug, Clone)]
pub struct EnumDecl {
    /// Declared name.
    pub name: String,
    /// `const enum`
    pub is_const: bool,
    /// `declare enum`
    pub is_declare: bool,
    /// Lowered member initializers.
    pub body: Vec<Expr>,
}

impl EnumDecl {
    /// An enum emits runtime code unless it is `const` or `declare`.
    #[must_use]
    pub fn is_runtime(&self) -> bool {
        !self.is_const && !self.is_declare
    }
}

/// JSX node flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsxKind {
    /// `<div>...</div>` or `<Foo />`
    Element,
    /// `<>...</>`
    Fragment,
}

/// Literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// String literal, without quotes.
    String(String),
    /// Numeric literal, raw text.
    Number(String),
    /// `true` / `false`
    Bool(bool),
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// Regular expression literal, raw text.
    Regex(String),
}

/// An expression (or, inside [`Expr::Other`], any lowered subtree).
#[derive(Debug, Clone)]
pub enum Expr {
    /// Identifier reference.
    Ident(String),
    /// `object.property`
    Member {
        /// Object expression.
        object: Box<Expr>,
        /// Property name.
        property: String,
    },
    /// `callee(args)`
    Call {
        /// Callee expression.
        callee: Box<Expr>,
        /// Arguments in order.
        args: Vec<Expr>,
    },
    /// Inline function or arrow function.
    Function(Function),
    /// Class expression.
    Class(Class),
    /// JSX element or fragment.
    Jsx(JsxKind),
    /// `x as T`, `x satisfies T`, `x!`, `<T>x`
    TypeAssertion(Box<Expr>),
    /// `(x)`
    Paren(Box<Expr>),
    /// Literal value.
    Literal(Literal),
    /// Any other node, with its lowered children.
    Other(Vec<Expr>),
}

impl Expr {
    /// Strips parentheses and type assertions around an expression.
    #[must_use]
    pub fn unwrap_assertions(&self) -> &Expr {
        let mut current = self;
        while let Self::TypeAssertion(inner) | Self::Paren(inner) = current {
            current = inner;
        }
        current
    }

    /// Returns the identifier name if this is an identifier.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }
}

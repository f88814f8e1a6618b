//! # purelint-core
//!
//! Core framework for linting the boundary between UI component modules
//! (`*.tsx`) and pure logic modules (`*.ts`) in TypeScript projects.
//!
//! This crate provides:
//!
//! - [`parser`] lowering tree-sitter TypeScript/TSX trees into the typed [`ast`]
//! - [`patterns`] for classifying files as pure or UI modules
//! - [`resolver::ImportResolver`] for resolving import specifiers on disk
//! - [`jsx`] for JSX presence queries over the AST
//! - [`Rule`] trait and [`Analyzer`] for orchestrating lint execution
//! - [`fix::apply_fixes`] for applying automatic fixes
//!
//! ## Example
//!
//! ```ignore
//! use purelint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .config(Config::default())
//!     .rules(purelint_rules::all_rules())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod ast;
pub mod fix;
pub mod jsx;
pub mod parser;
pub mod patterns;
pub mod resolver;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, SOURCE_EXTENSIONS};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, DEFAULT_EXCLUDES};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};

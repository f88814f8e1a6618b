//! # purelint-rules
//!
//! Built-in rules separating UI component modules (`*.tsx`) from pure logic
//! modules (`*.ts`).
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PL001 | `no-non-component-export-in-tsx` | Forbids non-component runtime exports in `.tsx` files (fixable) |
//! | PL002 | `no-tsx-import-in-pure-module` | Forbids pure modules from importing `.tsx` files |
//! | PL003 | `no-heavy-deps-in-pure-module` | Forbids framework and stylesheet imports in pure modules |
//!
//! ## Usage
//!
//! ```ignore
//! use purelint_core::Analyzer;
//! use purelint_rules::{NoHeavyDepsInPureModule, NoTsxImportInPureModule};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .rule(NoTsxImportInPureModule::new())
//!     .rule(NoHeavyDepsInPureModule::new().forbidden_deps(&["react", "vue"]))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod component_shape;
pub mod no_heavy_deps;
pub mod no_non_component_export;
pub mod no_tsx_import;
mod registry;

pub use no_heavy_deps::{NoHeavyDepsInPureModule, NoHeavyDepsOptions};
pub use no_non_component_export::{
    to_kebab_case, NoNonComponentExportInTsx, NoNonComponentExportOptions,
};
pub use no_tsx_import::{NoTsxImportInPureModule, NoTsxImportOptions};
pub use registry::{all_rules, rule_by_name, rules_from_config, RULE_NAMES};

/// Re-export core types for convenience.
pub use purelint_core::{Rule, Severity, Violation};

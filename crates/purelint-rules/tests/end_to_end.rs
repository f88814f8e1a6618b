//! Whole-project runs of the built-in rules through the analyzer.

use std::fs;
use std::path::Path;

use purelint_core::fix::apply_fixes;
use purelint_core::{Analyzer, Config, LintResult, Severity};
use purelint_rules::{all_rules, rules_from_config};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

fn analyze(root: &Path) -> LintResult {
    Analyzer::builder()
        .root(root)
        .rules(all_rules())
        .build()
        .expect("analyzer")
        .analyze()
        .expect("analysis")
}

fn codes(result: &LintResult) -> Vec<(String, &str)> {
    result
        .violations
        .iter()
        .map(|v| {
            (
                v.location.file.to_string_lossy().replace('\\', "/"),
                v.code.as_str(),
            )
        })
        .collect()
}

fn sample_project() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    write(root, "package.json", "{}");
    write(
        root,
        "tsconfig.json",
        r#"{
  // path aliases
  "compilerOptions": {
    "baseUrl": "./src",
    "paths": { "@/*": ["*"], },
  },
}"#,
    );
    write(
        root,
        "src/components/UserList.tsx",
        "import React from 'react';\n\
         \n\
         export const PAGE_SIZE = 20;\n\
         \n\
         export type UserListProps = { users: string[] };\n\
         \n\
         export const UserList = ({ users }: UserListProps) => (\n  <ul>{users.map((u) => <li key={u}>{u}</li>)}</ul>\n);\n",
    );
    write(
        root,
        "src/logic/users.ts",
        "import { UserList } from '@/components/UserList';\n\
         import React from 'react';\n\
         import { PAGE_SIZE } from '../components/UserList.tsx';\n\
         import { sortBy } from 'lodash';\n\
         \n\
         export const firstPage = (all: string[]) => all.slice(0, PAGE_SIZE);\n",
    );
    write(root, "src/logic/format.ts", "export const upper = (s: string) => s.toUpperCase();\n");
    write(root, "src/types.d.ts", "import React from 'react';\nexport declare const X: number;\n");
    write(root, "node_modules/pkg/index.ts", "import React from 'react';\n");
    dir
}

#[test]
fn reports_every_rule_in_path_order() {
    let dir = sample_project();
    let result = analyze(dir.path());

    assert_eq!(result.files_checked, 3);
    assert_eq!(
        codes(&result),
        vec![
            ("src/components/UserList.tsx".to_string(), "PL001"),
            ("src/logic/users.ts".to_string(), "PL002"),
            ("src/logic/users.ts".to_string(), "PL003"),
            ("src/logic/users.ts".to_string(), "PL002"),
        ]
    );

    let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
    assert!(messages[0].contains("\"PAGE_SIZE\""));
    assert!(messages[1].contains("\"@/components/UserList (resolves to .tsx file)\""));
    assert!(messages[2].contains("\"react\""));
    assert!(messages[3].contains("\"../components/UserList.tsx\""));
    assert!(result.has_errors());
    assert_eq!(result.fixable_count(), 1);
}

#[test]
fn fixing_a_ui_module_clears_its_violations() {
    let dir = sample_project();
    let result = analyze(dir.path());

    let ui = dir.path().join("src/components/UserList.tsx");
    let content = fs::read_to_string(&ui).expect("read");
    let own: Vec<_> = result
        .violations
        .iter()
        .filter(|v| v.location.file.ends_with("UserList.tsx"))
        .cloned()
        .collect();
    let outcome = apply_fixes(&content, &own);
    assert_eq!(outcome.applied, 1);
    assert!(outcome.content.contains("// TODO: Create page-size.ts with:\n// export const PAGE_SIZE = 20;\n"));
    assert!(outcome.content.contains("import { PAGE_SIZE } from './page-size';"));
    fs::write(&ui, &outcome.content).expect("write");

    let again = analyze(dir.path());
    assert!(again
        .violations
        .iter()
        .all(|v| !v.location.file.ends_with("UserList.tsx")));
}

#[test]
fn configuration_shapes_the_run() {
    let dir = sample_project();
    let config = Config::parse(
        r#"
[rules.no-tsx-import-in-pure-module]
enabled = false

[rules.no-heavy-deps-in-pure-module]
severity = "warning"
forbiddenDeps = ["lodash"]
"#,
    )
    .expect("config");

    let result = Analyzer::builder()
        .root(dir.path())
        .rules(rules_from_config(&config).expect("rules"))
        .config(config)
        .build()
        .expect("analyzer")
        .analyze()
        .expect("analysis");

    assert_eq!(
        codes(&result),
        vec![
            ("src/components/UserList.tsx".to_string(), "PL001"),
            ("src/logic/users.ts".to_string(), "PL003"),
        ]
    );
    assert_eq!(result.violations[1].severity, Severity::Warning);
    assert!(result.violations[1].message.contains("\"lodash\""));
}

#[test]
fn clean_project_has_no_violations() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "src/App.tsx", "import { total } from './cart';\nexport default function App() { return <p>{total}</p>; }\n");
    write(dir.path(), "src/cart.ts", "export const total = 3;\n");
    let result = analyze(dir.path());
    assert_eq!(result.files_checked, 2);
    assert!(result.violations.is_empty());
    assert!(!result.has_errors());
}

#[test]
fn constant_beside_typed_component() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "Component.tsx",
        "export const PAGE_SIZE = 20;\nexport const Home: React.FC = () => <div/>;\n",
    );
    let result = analyze(dir.path());
    assert_eq!(result.violations.len(), 1);
    assert!(result.violations[0].message.contains("\"PAGE_SIZE\""));
    assert_eq!(result.violations[0].kind, "nonComponentExport");
}

#[test]
fn pure_helper_importing_tsx_and_ts() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "C.tsx", "export const C = () => <i />;\n");
    write(dir.path(), "util.ts", "export const y = 1;\n");
    write(dir.path(), "legacy.js", "module.exports = {};\n");
    write(
        dir.path(),
        "helpers.pure.ts",
        "import { X } from \"./C.tsx\";\nimport { y } from \"./util\";\nimport z from \"./legacy\";\nimport w from \"./missing\";\n",
    );
    let result = analyze(dir.path());
    let pure: Vec<_> = result
        .violations
        .iter()
        .filter(|v| v.location.file.ends_with("helpers.pure.ts"))
        .collect();
    assert_eq!(pure.len(), 1);
    assert_eq!(pure[0].kind, "tsxImportInPureModule");
    assert!(pure[0].message.contains("\"./C.tsx\""));
}

#[test]
fn pure_module_with_framework_and_stylesheet() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "utils.pure.ts",
        "import React from \"react\";\nimport \"./a.css\";\nimport data from \"./data.json\";\nimport { chunk } from \"lodash\";\n",
    );
    let result = analyze(dir.path());
    let cited: Vec<&str> = result
        .violations
        .iter()
        .map(|v| v.message.split('"').nth(1).unwrap_or_default())
        .collect();
    assert_eq!(cited, vec!["react", "./a.css"]);
    assert!(result
        .violations
        .iter()
        .all(|v| v.kind == "heavyDepInPureModule"));
}

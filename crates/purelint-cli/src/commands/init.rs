//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# purelint configuration

# Lowest severity that fails `purelint check` ("error", "warning" or "info")
# fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
]

# Respect .gitignore files
respect_gitignore = true

# Abort instead of linting files that only parse with error recovery
# fail_on_parse_error = false

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.no-non-component-export-in-tsx]
enabled = true
# Require JSX or a component shape for `export default function` too
# strict_default_exports = false

[rules.no-tsx-import-in-pure-module]
enabled = true
# pure_module_patterns = ["*.ts"]
# Replaces tsconfig.json "paths" lookup when set
# path_aliases = { "@/" = "./src/" }

[rules.no-heavy-deps-in-pure-module]
enabled = true
# severity = "warning"  # Override default severity
# pure_module_patterns = ["*.ts"]
# forbidden_deps = ["react", "react-dom"]
# forbidden_extensions = [".css", ".less", ".scss"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("purelint.toml");
    write_config(config_path, force)?;

    println!("Created purelint.toml");
    println!("\nNext steps:");
    println!("  1. Edit purelint.toml to configure rules");
    println!("  2. Run: purelint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use purelint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn template_parses_and_builds_rules() {
        let config = Config::parse(DEFAULT_CONFIG).expect("template parses");
        assert!(config.is_rule_enabled("no-heavy-deps-in-pure-module"));
        let rules = purelint_rules::rules_from_config(&config).expect("rules");
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().expect("test fixture");
        let path = tmp.path().join("purelint.toml");
        std::fs::write(&path, "# mine").expect("test fixture");

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).expect("forced write");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("# purelint configuration"));
    }
}

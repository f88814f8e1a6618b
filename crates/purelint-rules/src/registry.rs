//! Rule registry: the built-in rule set and its construction from config.

use purelint_core::{Config, ConfigError, RuleBox, RuleConfig};

use crate::{
    no_heavy_deps, no_non_component_export, no_tsx_import, NoHeavyDepsInPureModule,
    NoNonComponentExportInTsx, NoTsxImportInPureModule,
};

/// Stable identifiers of every built-in rule, in code order.
pub const RULE_NAMES: &[&str] = &[
    no_non_component_export::NAME,
    no_tsx_import::NAME,
    no_heavy_deps::NAME,
];

/// Returns all built-in rules with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoNonComponentExportInTsx::new()),
        Box::new(NoTsxImportInPureModule::new()),
        Box::new(NoHeavyDepsInPureModule::new()),
    ]
}

/// Builds one rule by identifier (`no-heavy-deps-in-pure-module`) or code
/// (`PL003`), applying the options of `config` when given.
///
/// Returns `Ok(None)` for unknown names.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOptions`] if the options do not fit the rule.
pub fn rule_by_name(
    name: &str,
    config: Option<&RuleConfig>,
) -> Result<Option<RuleBox>, ConfigError> {
    let default_config = RuleConfig::default();
    let config = config.unwrap_or(&default_config);

    let rule: RuleBox = if matches_rule(
        name,
        no_non_component_export::NAME,
        no_non_component_export::CODE,
    ) {
        let mut rule = NoNonComponentExportInTsx::from_config(config)?;
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        Box::new(rule)
    } else if matches_rule(name, no_tsx_import::NAME, no_tsx_import::CODE) {
        let mut rule = NoTsxImportInPureModule::from_config(config)?;
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        Box::new(rule)
    } else if matches_rule(name, no_heavy_deps::NAME, no_heavy_deps::CODE) {
        let mut rule = NoHeavyDepsInPureModule::from_config(config)?;
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        Box::new(rule)
    } else {
        return Ok(None);
    };
    Ok(Some(rule))
}

/// Builds every enabled rule from `config`.
///
/// # Errors
///
/// Returns the first options error encountered.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    for configured in config.rules.keys() {
        if !RULE_NAMES.contains(&configured.as_str()) {
            tracing::warn!("configuration for unknown rule `{configured}` is ignored");
        }
    }

    let mut rules = Vec::with_capacity(RULE_NAMES.len());
    for name in RULE_NAMES {
        if !config.is_rule_enabled(name) {
            tracing::debug!("rule {name} disabled by configuration");
            continue;
        }
        if let Some(rule) = rule_by_name(name, config.rule(name))? {
            rules.push(rule);
        }
    }
    Ok(rules)
}

fn matches_rule(query: &str, name: &str, code: &str) -> bool {
    query == name || query.eq_ignore_ascii_case(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use purelint_core::Severity;

    #[test]
    fn all_rules_cover_every_name() {
        let names: Vec<&str> = all_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, RULE_NAMES);
        let codes: Vec<&str> = all_rules().iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["PL001", "PL002", "PL003"]);
    }

    #[test]
    fn lookup_by_name_or_code() {
        let rule = rule_by_name("pl002", None).expect("ok").expect("known");
        assert_eq!(rule.name(), no_tsx_import::NAME);
        let rule = rule_by_name("no-heavy-deps-in-pure-module", None)
            .expect("ok")
            .expect("known");
        assert_eq!(rule.code(), "PL003");
        assert!(rule_by_name("no-such-rule", None).expect("ok").is_none());
    }

    #[test]
    fn config_disables_and_configures() {
        let config = Config::parse(
            r#"
[rules.no-tsx-import-in-pure-module]
enabled = false

[rules.no-heavy-deps-in-pure-module]
severity = "warning"
forbidden_deps = ["vue"]
"#,
        )
        .expect("parse");
        let rules = rules_from_config(&config).expect("rules");
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec![no_non_component_export::NAME, no_heavy_deps::NAME]);
        assert_eq!(rules[1].default_severity(), Severity::Warning);
        assert!(rules[0].fixable());
    }

    #[test]
    fn invalid_options_are_reported() {
        let config = Config::parse("[rules.no-heavy-deps-in-pure-module]\nforbidden_deps = \"react\"\n")
            .expect("parse");
        let err = rules_from_config(&config).err().expect("invalid");
        assert!(err.to_string().contains(no_heavy_deps::NAME));
    }
}

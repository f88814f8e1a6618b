//! List rules command implementation.

use purelint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<34} {:<6} Description", "Code", "Name", "Fix");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<8} {:<34} {:<6} {}",
            rule.code(),
            rule.name(),
            if rule.fixable() { "yes" } else { "" },
            rule.description()
        );
    }

    println!("\nAll rules are enabled at severity \"error\" unless configured otherwise.");
    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  purelint check --rules no-tsx-import-in-pure-module,no-heavy-deps-in-pure-module");
    println!("  purelint check --rules PL001,PL003");
}

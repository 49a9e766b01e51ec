//! List rules command implementation.

use design_lint_codemods::all_codemods;
use design_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - DL001, DL002 at default severity (default)");
    println!("  migration    - DL001 as warning, DL002 as error");

    println!("\nCodemods (run in this order):");
    for codemod in all_codemods() {
        println!("  {:<28} {}", codemod.name(), codemod.description());
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  design-lint check --rules no-raw-colors");
    println!("  design-lint codemod --dry --only hex-to-semantic");
}

//! List-checks command - show the registered checks.

use colored::Colorize;
use dircheck::validation::builtin_checks;

pub fn run(verbose: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let checks = builtin_checks();

    println!("{}", "Available checks:".cyan().bold());
    for check in &checks {
        println!("  {:12} {}", check.name().white().bold(), check.description());
    }

    if verbose {
        println!();
        println!(
            "Disable a check with {} or a config file",
            "--disable <CHECK>".cyan()
        );
    }

    Ok(0)
}

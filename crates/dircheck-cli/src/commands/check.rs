//! Check command - run the check family against a directory snapshot.

use std::path::PathBuf;

use colored::Colorize;
use dircheck::{CheckReport, DataCheck, DataCheckConfig, ExportFormat, Severity, Warning};

use crate::cli::OutputFormat;

/// Exit status when `--strict` is set and an ERROR was reported.
const STRICT_FAILURE: i32 = 2;

pub struct CheckArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub disable: Vec<String>,
    pub min_severity: Option<Severity>,
    pub strict: bool,
    pub verbose: bool,
}

pub fn run(args: CheckArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let mut config = match &args.config {
        Some(path) => DataCheckConfig::load(path)?,
        None => DataCheckConfig::default(),
    };
    for name in args.disable {
        config = config.with_disabled_check(name);
    }
    if let Some(severity) = args.min_severity {
        config = config.with_min_severity(severity);
    }
    tracing::debug!(?config, "resolved configuration");

    let data_check = DataCheck::with_config(config)?;

    println!(
        "{} {}",
        "Checking".cyan().bold(),
        args.file.display().to_string().white()
    );
    if args.verbose {
        println!("Checks: {}", data_check.check_names().join(", "));
        println!("Minimum severity: {}", data_check.config().min_severity);
    }

    let report = data_check.check_file(&args.file)?;

    if let Some(source) = &report.source {
        println!(
            "Loaded {} biobanks and {} collections",
            source.biobank_count.to_string().white().bold(),
            source.collection_count.to_string().white().bold()
        );
    }

    print_summary(&report);

    if args.verbose && !report.warnings.is_empty() {
        println!();
        for warning in &report.warnings {
            print_warning(warning);
        }
    }

    if let Some(output) = args.output {
        match args.format {
            OutputFormat::Json => report.save(&output)?,
            OutputFormat::Csv => report.export(&output, ExportFormat::Csv)?,
            OutputFormat::Tsv => report.export(&output, ExportFormat::Tsv)?,
        }

        println!();
        println!(
            "{} {} ({})",
            "Saved to".green().bold(),
            output.display().to_string().white(),
            args.format.extension()
        );
    }

    if args.strict && report.has_errors() {
        return Ok(STRICT_FAILURE);
    }

    Ok(0)
}

fn print_summary(report: &CheckReport) {
    let summary = &report.summary;

    println!(
        "Found {} warnings ({} errors, {} warnings)",
        summary.total.to_string().white().bold(),
        summary.by_severity.error.to_string().red(),
        summary.by_severity.warning.to_string().yellow()
    );

    if summary.total == 0 {
        println!("{}", "No issues found - directory looks consistent!".green());
        return;
    }

    println!(
        "Affected: {} biobanks, {} collections",
        summary.biobanks_affected, summary.collections_affected
    );
    for (check, count) in &summary.by_check {
        println!("  {:12} {}", check, count);
    }
}

fn print_warning(warning: &Warning) {
    let severity = match warning.severity {
        Severity::Error => warning.severity.label().red().bold(),
        Severity::Warning => warning.severity.label().yellow().bold(),
    };

    println!(
        "{:8} [{}] {} {}",
        severity,
        warning.location.cyan(),
        warning.entity_id.white(),
        warning.message
    );
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aciss::{
    AcissConfig, BatchReport, ComparisonResult, DocumentSide, FileKind, TransformMode,
    check_aciss, check_stylesheet, check_xhtml, classify_file_name, inventory_sections,
    pair_directories, read_document, transform_file, transform_pairs, verify_files,
    verify_pairs,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aciss")]
#[command(about = "Restructure EPUB chapters into the ACISS template and verify their text")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, value_name = "PATH", help = "YAML configuration file")]
    config: Option<PathBuf>,
    #[arg(long, short, global = true, value_enum, default_value = "text", help = "Output format")]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Check that a processed file kept the text of its original")]
    Verify {
        #[arg(help = "Path to the original file")]
        original: PathBuf,
        #[arg(help = "Path to the processed file")]
        processed: PathBuf,
    },
    #[command(about = "Transform one file and verify the result")]
    Transform {
        #[arg(help = "Path to the input file")]
        input: PathBuf,
        #[arg(help = "Where to write the transformed file")]
        output: PathBuf,
        #[arg(long, short, value_enum, help = "Transformation (defaults to the configured mode)")]
        mode: Option<ModeArg>,
    },
    #[command(about = "Run the structure and ACISS checks on one file")]
    Check {
        #[arg(help = "Path to the chapter")]
        file: PathBuf,
        #[arg(long, value_name = "CSS", help = "Also check this stylesheet for required classes")]
        stylesheet: Option<PathBuf>,
    },
    #[command(about = "Verify every file of a directory against its processed counterpart")]
    Batch {
        #[arg(help = "Directory of original .xhtml files")]
        input_dir: PathBuf,
        #[arg(help = "Directory of processed files")]
        output_dir: PathBuf,
        #[arg(long, help = "Transform every input into the output directory first")]
        transform: bool,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Restructure,
    Rebuild,
    PartDivider,
}

impl From<ModeArg> for TransformMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Restructure => TransformMode::Restructure,
            ModeArg::Rebuild => TransformMode::Rebuild,
            ModeArg::PartDivider => TransformMode::PartDivider,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => AcissConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AcissConfig::default(),
    };
    let canonicalizer = config.canonicalizer()?;
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Verify {
            original,
            processed,
        } => {
            let verification = verify_files(&original, &processed, &canonicalizer)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verification)?);
            } else {
                print_comparison(&processed, &verification.comparison);
            }
            Ok(verification.preserved())
        }
        Commands::Transform {
            input,
            output,
            mode,
        } => {
            let name = file_name(&input);
            let mode = config.transform.mode_for(&name, mode.map(TransformMode::from));
            let outcome = transform_file(&input, &output, mode, &canonicalizer)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("Transformed {} ({mode})", output.display());
                match &outcome.comparison {
                    Some(comparison) => print_comparison(&output, comparison),
                    None => println!("WARNING: {name} has no visible text to verify"),
                }
            }
            Ok(outcome.preserved())
        }
        Commands::Check { file, stylesheet } => {
            check_file(&file, stylesheet.as_deref(), &config, json)
        }
        Commands::Batch {
            input_dir,
            output_dir,
            transform,
        } => {
            let pairs = pair_directories(&input_dir, &output_dir)?;
            let report = if transform {
                transform_pairs(&pairs, &config.transform, &canonicalizer, &config.compliance)
            } else {
                verify_pairs(&pairs, &canonicalizer, &config.compliance)
            };
            let passed = report.meets_targets(&config.targets);
            if json {
                let value = json!({
                    "entries": report.entries,
                    "preservation_rate": report.preservation_rate(),
                    "compliance_rate": report.compliance_rate(),
                    "meets_targets": passed,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_batch(&report, &config);
            }
            Ok(passed)
        }
    }
}

fn check_file(
    file: &Path,
    stylesheet: Option<&Path>,
    config: &AcissConfig,
    json: bool,
) -> anyhow::Result<bool> {
    let content = read_document(file, DocumentSide::Input)
        .with_context(|| format!("reading {}", file.display()))?;
    let kind = classify_file_name(&file_name(file));
    let xhtml = check_xhtml(&content);
    let aciss = check_aciss(&content, &config.compliance);
    let inventory = inventory_sections(&content, &config.compliance);
    let css = match stylesheet {
        Some(path) => {
            let css = read_document(path, DocumentSide::Input)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(check_stylesheet(&css, &config.compliance.stylesheet_classes))
        }
        None => None,
    };

    let aciss_required = kind == FileKind::Chapter;
    let passed = xhtml.is_valid()
        && (!aciss_required || aciss.is_compliant())
        && css.as_ref().is_none_or(|report| report.is_complete());

    if json {
        let value = json!({
            "kind": kind,
            "xhtml": xhtml,
            "aciss": aciss,
            "inventory": inventory,
            "stylesheet": css,
            "passed": passed,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(passed);
    }

    println!("{} ({kind})", file.display());
    println!(
        "  XHTML structure: {}/{} checks passed",
        xhtml.passed_count(),
        xhtml.total()
    );
    for failure in xhtml.failures() {
        println!("    - failed {failure}");
    }
    if aciss.is_compliant() {
        println!("  ACISS compliance: PASSED");
    } else {
        println!("  ACISS compliance: {} issues", aciss.issues().len());
        for issue in aciss.issues() {
            println!("    - {issue}");
        }
    }
    println!(
        "  Words: {} ({}), page breaks: {}",
        inventory.word_count,
        if inventory.substantial { "substantial" } else { "short" },
        inventory.page_breaks
    );
    for missing in inventory.missing() {
        println!("    - no {missing} section");
    }
    if let Some(report) = &css {
        println!(
            "  Stylesheet: {} of {} classes, fonts: {}",
            report.present_classes.len(),
            report.present_classes.len() + report.missing_classes.len(),
            if report.has_fonts { "yes" } else { "no" }
        );
        for class in &report.missing_classes {
            println!("    - missing .{class}");
        }
    }
    Ok(passed)
}

fn print_comparison(processed: &Path, comparison: &ComparisonResult) {
    if comparison.equivalent {
        println!("Content preservation VERIFIED: {}", file_name(processed));
        return;
    }
    println!("Content preservation FAILED: {}", file_name(processed));
    println!("  Original length: {} characters", comparison.original_len);
    println!("  Processed length: {} characters", comparison.transformed_len);
    if let Some(divergence) = &comparison.divergence {
        println!("  First difference at position {}:", divergence.offset);
        println!("  Original: ...{}...", divergence.original_context);
        println!("  Processed: ...{}...", divergence.transformed_context);
    }
}

fn print_batch(report: &BatchReport, config: &AcissConfig) {
    for entry in &report.entries {
        println!("{}", entry.name);
        if let Some(error) = &entry.error {
            println!("  ERROR: {error}");
            continue;
        }
        for warning in &entry.warnings {
            println!("  WARNING: {warning}");
        }
        println!(
            "  Content preservation: {}",
            if entry.preserved { "PASSED" } else { "FAILED" }
        );
        if entry.compliant {
            println!("  Compliance: PASSED");
        } else {
            println!("  Compliance issues:");
            for issue in entry.issues.iter().take(3) {
                println!("    - {issue}");
            }
            if entry.issues.len() > 3 {
                println!("    ... and {} more issues", entry.issues.len() - 3);
            }
        }
    }

    let total = report.total();
    println!();
    println!("Total files: {total}");
    println!(
        "  Chapters: {}, part dividers: {}",
        report.count_of(FileKind::Chapter),
        report.count_of(FileKind::PartDivider)
    );
    println!(
        "Content preservation: {}/{total} ({:.1}%, target >= {:.0}%)",
        report.preserved_count(),
        report.preservation_rate(),
        config.targets.min_preservation_rate
    );
    println!(
        "Compliance: {}/{total} ({:.1}%, target >= {:.0}%)",
        report.compliant_count(),
        report.compliance_rate(),
        config.targets.min_compliance_rate
    );
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aciss::{CanonicalError, FileError};
    use tempfile::tempdir;

    #[test]
    fn check_names_undecodable_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("1-chapter-i-a.xhtml");
        std::fs::write(&path, [b'<', b'p', b'>', 0xC3, 0x28]).unwrap();

        let err = check_file(&path, None, &AcissConfig::default(), true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FileError>(),
            Some(FileError::Canonical(CanonicalError::Decoding {
                side: DocumentSide::Input,
                valid_up_to: 3
            }))
        ));
    }

    #[test]
    fn check_passes_a_valid_part_divider() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2-part-i.xhtml");
        std::fs::write(
            &path,
            "<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n\
             <html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>Part I</title>\
             <link rel=\"stylesheet\" href=\"style.css\" /></head>\
             <body><p>Part One</p></body></html>",
        )
        .unwrap();

        assert!(check_file(&path, None, &AcissConfig::default(), true).unwrap());
    }
}

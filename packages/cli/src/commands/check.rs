use super::load_page;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use vinyl_editor::PageBuilderStore;
use vinyl_model::{IssueLevel, ValidationIssue};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Page document or directory of page documents
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) struct CheckSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

pub fn check(args: CheckArgs, _cwd: &str) -> Result<()> {
    let summary = run_check(&args)?;

    println!();
    println!(
        "✨ {} Check complete!",
        if summary.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", summary.files);

    if summary.errors > 0 {
        println!("   {} {}", "Errors:".red(), summary.errors);
    }
    if summary.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), summary.warnings);
    }
    if summary.errors == 0 && summary.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    if summary.errors > 0 {
        bail!("{} page error(s) found", summary.errors);
    }
    Ok(())
}

pub(crate) fn run_check(args: &CheckArgs) -> Result<CheckSummary> {
    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else if args.input.is_dir() {
        find_page_files(&args.input)
    } else {
        bail!("Input path does not exist: {}", args.input.display());
    };

    let mut summary = CheckSummary::default();
    for file in files {
        let issues = check_file(&file, &args.format)?;
        summary.files += 1;
        summary.errors += issues.iter().filter(|i| i.is_error()).count();
        summary.warnings += issues.iter().filter(|i| !i.is_error()).count();
    }

    Ok(summary)
}

fn check_file(path: &Path, format: &str) -> Result<Vec<ValidationIssue>> {
    let page = match load_page(path) {
        Ok(page) => page,
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            return Ok(vec![ValidationIssue::error("unreadable", err.to_string())]);
        }
    };

    let mut store = PageBuilderStore::new();
    store.set_current_page(page);
    let issues = store.validate();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&issues)?);
        return Ok(issues);
    }

    if issues.is_empty() {
        println!("{} {}", "✓".green(), path.display());
        return Ok(issues);
    }

    println!("{}", path.display());
    for issue in &issues {
        let level = match issue.level {
            IssueLevel::Error => "error".red().bold(),
            IssueLevel::Warning => "warning".yellow().bold(),
        };
        match &issue.section_id {
            Some(section_id) => println!(
                "  {} [{}] {} {}",
                level,
                issue.rule,
                issue.message,
                format!("({})", section_id).dimmed()
            ),
            None => println!("  {} [{}] {}", level, issue.rule, issue.message),
        }
    }

    Ok(issues)
}

fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}

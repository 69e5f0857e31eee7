use super::load_page;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use vinyl_editor::{PageBuilderStore, PageLifecycle};
use vinyl_model::PageSection;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Page document to display
    pub file: PathBuf,

    /// Print the raw JSON instead
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, _cwd: &str) -> Result<()> {
    let page = load_page(&args.file)?;

    if args.json {
        println!("{}", page.to_json_pretty()?);
        return Ok(());
    }

    let mut store = PageBuilderStore::new();
    store.set_current_page(page);
    let page = store.current_page();

    let lifecycle = match store.lifecycle() {
        PageLifecycle::Published => "published".green().bold(),
        PageLifecycle::PendingDraft => "pending draft".yellow().bold(),
        PageLifecycle::Draft => "draft".blue().bold(),
    };

    println!("{} {}", page.title.bright_white().bold(), format!("/{}", page.slug).dimmed());
    println!("   Status:   {}", lifecycle);
    println!("   Id:       {}", page.id);
    if !page.description.is_empty() {
        println!("   About:    {}", page.description);
    }
    println!("   Modified: {}", page.last_modified.to_rfc3339());
    println!();

    if page.sections.is_empty() {
        println!("   {}", "No sections yet".dimmed());
        return Ok(());
    }

    println!("   {} sections", page.sections.len());
    for section in &page.sections {
        println!("   {}", describe_section(section));
    }

    Ok(())
}

fn describe_section(section: &PageSection) -> String {
    let visibility = if section.is_visible { "●".green() } else { "○".dimmed() };

    let kind = match section.config.placeholder_label() {
        Some(label) => label.red().to_string(),
        None => section.type_name().cyan().to_string(),
    };

    let title = if section.title.is_empty() {
        "(untitled)".dimmed().to_string()
    } else {
        section.title.clone()
    };

    format!("{:>2}. {} {:<12} {}", section.order, visibility, kind, title)
}

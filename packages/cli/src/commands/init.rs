use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use vinyl_editor::{PageBuilderStore, SectionTemplate, SectionUpdate};
use vinyl_model::{Clock, PageContent, SectionType, SystemClock};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for page documents
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Vinyl pages...".bright_blue().bold());

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        ..Config::default()
    };

    let pages_dir = config.get_pages_dir(cwd);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    let sample_file = pages_dir.join("home.json");
    if !sample_file.exists() {
        write_sample_page(&sample_file)?;
        println!("  {} Created home.json", "✓".green());
    }

    config.save(cwd)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: vinyl show {}/home.json", args.pages_dir);
    println!("  2. Write an edit script and run: vinyl edit {}/home.json --script ops.json", args.pages_dir);
    println!("  3. Publish with: vinyl edit {}/home.json --script ops.json --publish", args.pages_dir);

    Ok(())
}

/// Starter storefront page assembled through the store
fn write_sample_page(path: &Path) -> Result<()> {
    let mut store = PageBuilderStore::new();
    store.set_current_page(PageContent::new("Home", "home", SystemClock.now()));

    store.add_section(
        SectionType::Hero,
        Some(SectionTemplate::titled("Fresh pressings every Friday")),
    );
    let about = store.add_section(SectionType::Text, Some(SectionTemplate::titled("About the shop")));
    store.update_section(
        &about,
        SectionUpdate::content("Independent record store. New and used vinyl, turntables and accessories."),
    );
    store.add_section(SectionType::ProductGrid, Some(SectionTemplate::titled("New arrivals")));
    store.add_section(SectionType::Contact, Some(SectionTemplate::titled("Visit us")));

    fs::write(path, store.current_page().to_json_pretty()?)?;
    Ok(())
}

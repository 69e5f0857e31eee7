use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use vinyl_editor::JsonFilePersister;
use vinyl_model::{Clock, PageContent, SystemClock};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// URL slug, also the file name
    pub slug: String,

    /// Page title (defaults to the slug)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Overwrite an existing page file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new_page(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let pages_dir = config.get_pages_dir(cwd);
    let path = JsonFilePersister::new(&pages_dir).path_for(&args.slug)?;

    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let title = args.title.unwrap_or_else(|| args.slug.clone());
    let page = PageContent::new(title, args.slug.trim(), SystemClock.now());

    fs::create_dir_all(&pages_dir)?;
    fs::write(&path, page.to_json_pretty()?)?;

    println!("{} Created {} ({})", "✓".green(), path.display(), page.id.dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(slug: &str) -> NewArgs {
        NewArgs {
            slug: slug.to_string(),
            title: Some("Staff Picks".to_string()),
            force: false,
        }
    }

    #[test]
    fn test_new_page_is_unpublished_draft() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        new_page(args("staff-picks"), &cwd).unwrap();

        let json = fs::read_to_string(dir.path().join("pages/staff-picks.json")).unwrap();
        let page = PageContent::from_json(&json).unwrap();
        assert_eq!(page.title, "Staff Picks");
        assert!(page.is_draft);
        assert!(!page.is_published);
        assert!(page.sections.is_empty());
    }

    #[test]
    fn test_new_page_refuses_existing_and_bad_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        new_page(args("staff-picks"), &cwd).unwrap();
        assert!(new_page(args("staff-picks"), &cwd).is_err());
        assert!(new_page(args("../outside"), &cwd).is_err());
    }
}

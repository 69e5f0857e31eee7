use super::load_page;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use vinyl_editor::{
    JsonFilePersister, JsonFileStorage, PageBuilderStore, PageLifecycle, PageMutation,
};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Page document to edit
    pub file: PathBuf,

    /// JSON array of mutations to apply in order
    #[arg(short, long)]
    pub script: PathBuf,

    /// Publish after applying the script
    #[arg(long, conflicts_with = "draft")]
    pub publish: bool,

    /// Save as a draft, leaving the published page live
    #[arg(long)]
    pub draft: bool,
}

/// What happened to the page at the end of an edit session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Published,
    Draft,
    Saved,
}

/// Result of [`run_edit`]
pub(crate) struct EditReport {
    pub outcome: Outcome,
    /// File the page was written to, derived from its slug
    pub written: PathBuf,
    pub store: PageBuilderStore,
}

impl EditReport {
    /// A save or publish went to a different file than the one that was read
    pub fn moved_from(&self, input: &Path) -> bool {
        self.outcome != Outcome::Draft && !same_file(input, &self.written)
    }
}

pub async fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let report = run_edit(&args, &config, cwd).await?;
    let store = &report.store;

    let page = store.current_page();
    let verb = match report.outcome {
        Outcome::Published => "Published".green().bold(),
        Outcome::Draft => "Saved draft of".yellow().bold(),
        Outcome::Saved => "Saved".green().bold(),
    };
    println!("{} {} ({} sections)", verb, page.slug.bright_white(), page.sections.len());

    let status = match store.lifecycle() {
        PageLifecycle::Published => "published",
        PageLifecycle::PendingDraft => "pending draft",
        PageLifecycle::Draft => "draft",
    };
    println!("   Status: {}", status);
    println!("   Wrote:  {}", report.written.display());

    if report.moved_from(&args.file) {
        warn!(
            input = %args.file.display(),
            written = %report.written.display(),
            "Page written to a different file than it was read from"
        );
        println!(
            "   {} {} was not updated",
            "warning".yellow().bold(),
            args.file.display()
        );
    }

    for warning in store.validate().iter().filter(|i| !i.is_error()) {
        println!("   {} {}", "warning".yellow().bold(), warning.message);
    }

    Ok(())
}

pub(crate) async fn run_edit(
    args: &EditArgs,
    config: &Config,
    cwd: &str,
) -> Result<EditReport> {
    let page = load_page(&args.file)?;

    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let mutations: Vec<PageMutation> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid edit script {}", args.script.display()))?;

    let mut store = PageBuilderStore::builder()
        .history_limit(config.history_limit)
        .preference_storage(JsonFileStorage::new(config.get_preferences_path(cwd)))
        .build();
    store.set_current_page(page);

    for mutation in mutations {
        let name = mutation.name();
        if let Some(created) = store.apply(mutation) {
            info!(mutation = name, section_id = %created, "Section created");
        }
    }

    let slug = store.current_page().slug.clone();
    let (outcome, persister) = if args.publish {
        let persister = JsonFilePersister::new(config.get_pages_dir(cwd));
        store.publish_page(Some(&persister)).await?;
        (Outcome::Published, persister)
    } else if args.draft {
        let persister = JsonFilePersister::new(config.get_drafts_dir(cwd));
        store.save_changes(Some(&persister)).await?;
        (Outcome::Draft, persister)
    } else {
        let persister = JsonFilePersister::new(config.get_pages_dir(cwd));
        store.save_page(Some(&persister)).await?;
        (Outcome::Saved, persister)
    };
    let written = persister.path_for(&slug)?;

    Ok(EditReport {
        outcome,
        written,
        store,
    })
}

/// Both paths resolve to the same file on disk
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use vinyl_model::{Clock, MockClock, PageContent, SectionType};

    struct Fixture {
        dir: tempfile::TempDir,
        page_file: PathBuf,
        script_file: PathBuf,
    }

    impl Fixture {
        fn new(page: PageContent, script: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let pages = dir.path().join("pages");
            fs::create_dir_all(&pages).unwrap();

            let page_file = pages.join(format!("{}.json", page.slug));
            fs::write(&page_file, page.to_json_pretty().unwrap()).unwrap();

            let script_file = dir.path().join("ops.json");
            fs::write(&script_file, script).unwrap();

            Self {
                dir,
                page_file,
                script_file,
            }
        }

        fn cwd(&self) -> String {
            self.dir.path().display().to_string()
        }

        fn args(&self, publish: bool, draft: bool) -> EditArgs {
            EditArgs {
                file: self.page_file.clone(),
                script: self.script_file.clone(),
                publish,
                draft,
            }
        }

        fn read(&self, relative: &str) -> PageContent {
            let json = fs::read_to_string(self.dir.path().join(relative)).unwrap();
            PageContent::from_json(&json).unwrap()
        }
    }

    fn page(published: bool) -> PageContent {
        let mut page = PageContent::new("Home", "home", MockClock::default().now());
        page.is_published = published;
        page.is_draft = !published;
        page
    }

    const SCRIPT: &str = r#"[
        { "op": "addSection", "sectionType": "hero", "template": { "title": "Spring Sale" } },
        { "op": "addSection", "sectionType": "productGrid" },
        { "op": "checkpoint", "label": "Sale layout" }
    ]"#;

    #[tokio::test]
    async fn test_edit_then_save() {
        let fixture = Fixture::new(page(false), SCRIPT);
        let config = Config::default();

        let report = run_edit(&fixture.args(false, false), &config, &fixture.cwd())
            .await
            .unwrap();

        assert_eq!(report.outcome, Outcome::Saved);
        assert!(!report.store.has_unsaved_changes());
        assert!(!report.moved_from(&fixture.page_file));

        let saved = fixture.read("pages/home.json");
        assert_eq!(saved.sections.len(), 2);
        assert_eq!(saved.sections[0].title, "Spring Sale");
        assert_eq!(saved.sections[1].section_type(), Some(SectionType::ProductGrid));
    }

    #[tokio::test]
    async fn test_edit_then_publish() {
        let fixture = Fixture::new(page(false), SCRIPT);
        let config = Config::default();

        let report = run_edit(&fixture.args(true, false), &config, &fixture.cwd())
            .await
            .unwrap();

        assert_eq!(report.outcome, Outcome::Published);
        assert_eq!(report.store.lifecycle(), PageLifecycle::Published);

        let published = fixture.read("pages/home.json");
        assert!(published.is_published);
        assert!(!published.is_draft);
    }

    #[tokio::test]
    async fn test_draft_leaves_published_file_live() {
        let fixture = Fixture::new(page(true), SCRIPT);
        let config = Config::default();

        let report = run_edit(&fixture.args(false, true), &config, &fixture.cwd())
            .await
            .unwrap();

        assert_eq!(report.outcome, Outcome::Draft);
        assert_eq!(report.store.lifecycle(), PageLifecycle::PendingDraft);
        assert_eq!(report.written, fixture.dir.path().join("pages/drafts/home.json"));
        assert!(!report.moved_from(&fixture.page_file));

        let live = fixture.read("pages/home.json");
        assert!(live.is_published);
        assert!(live.sections.is_empty());

        let draft = fixture.read("pages/drafts/home.json");
        assert!(draft.is_draft);
        assert_eq!(draft.sections.len(), 2);
    }

    #[tokio::test]
    async fn test_bad_script_is_reported() {
        let fixture = Fixture::new(page(false), r#"[{ "op": "explode" }]"#);
        let config = Config::default();

        let err = match run_edit(&fixture.args(false, false), &config, &fixture.cwd()).await {
            Ok(_) => panic!("script should be rejected"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("Invalid edit script"));
    }

    #[tokio::test]
    async fn test_slug_change_writes_new_file() {
        let fixture = Fixture::new(
            page(false),
            r#"[{ "op": "updatePage", "fields": { "slug": "home-2" } }]"#,
        );
        let config = Config::default();

        let report = run_edit(&fixture.args(false, false), &config, &fixture.cwd())
            .await
            .unwrap();

        assert_eq!(report.written, fixture.dir.path().join("pages/home-2.json"));
        assert!(report.moved_from(&fixture.page_file));
        assert_eq!(fixture.read("pages/home-2.json").slug, "home-2");
        assert_eq!(fixture.read("pages/home.json").slug, "home");
    }
}

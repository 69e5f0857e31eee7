pub mod check;
pub mod edit;
pub mod init;
pub mod new;
pub mod prefs;
pub mod show;

pub use check::{check, CheckArgs};
pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use new::{new_page, NewArgs};
pub use prefs::{prefs, PrefsArgs};
pub use show::{show, ShowArgs};

use anyhow::{Context, Result};
use std::path::Path;
use vinyl_model::PageContent;

/// Read and parse a page document
pub(crate) fn load_page(path: &Path) -> Result<PageContent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    PageContent::from_json(&content).with_context(|| format!("Invalid page file {}", path.display()))
}

//! # Vinyl Editor
//!
//! Page builder state engine for the Vinyl storefront.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI layer: admin page builder, previews      │
//! └─────────────────────────────────────────────┘
//!              ↓ actions            ↑ state
//! ┌─────────────────────────────────────────────┐
//! │ editor: PageBuilderStore                    │
//! │  - section CRUD, reorder, duplicate         │
//! │  - selection + UI flags                     │
//! │  - draft vs published edit mode             │
//! │  - linear undo/redo history                 │
//! └─────────────────────────────────────────────┘
//!              ↓ persist(page)
//! ┌─────────────────────────────────────────────┐
//! │ PagePersister (HTTP endpoint, JSON files)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One owner**: the store is the only thing that mutates the document
//! 2. **Snapshots, not diffs**: history entries are whole pages
//! 3. **Mutations never fail**: bad ids are ignored; only persistence errors
//! 4. **Explicit persistence**: nothing is written unless save/publish is called
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vinyl_editor::{PageBuilderStore, JsonFilePersister, SectionUpdate};
//! use vinyl_model::SectionType;
//!
//! let mut store = PageBuilderStore::new();
//! store.set_current_page(page);
//!
//! let hero = store.add_section(SectionType::Hero, None);
//! store.update_section(&hero, SectionUpdate::content("Record Store Day"));
//! store.checkpoint(Some("Added hero"));
//!
//! let persister = JsonFilePersister::new("pages");
//! store.publish_page(Some(&persister)).await?;
//! ```

mod errors;
mod history;
mod mutations;
mod persist;
mod preferences;
mod session;
mod store;

pub use errors::{user_message, ErrorKind, ErrorRecord, PageBuilderError, PendingOperation};
pub use history::{History, HistoryEntry, DEFAULT_HISTORY_LIMIT};
pub use mutations::{MoveDirection, PageMutation, PageUpdate, SectionTemplate, SectionUpdate};
pub use persist::{FnPersister, JsonFilePersister, PagePersister, PersistError};
pub use preferences::{
    JsonFileStorage, MemoryStorage, PreferenceStorage, PreferencesError, PreviewDevice,
    UiPreferences,
};
pub use store::{PageBuilderStore, StoreBuilder};

// Re-export the document model for convenience
pub use vinyl_model::{PageContent, PageLifecycle, PageSection, SectionConfig, SectionType};

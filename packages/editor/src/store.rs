//! # Page Builder Store
//!
//! Single source of truth for the page being edited.
//!
//! The store owns the document triplet (`current_page`, `preview_page`,
//! `original_page`), the selection, UI flags, the error banner list and the
//! undo/redo history. Nothing else mutates them; every change goes through
//! the methods below.
//!
//! ## Invariants
//!
//! - after every structural change `sections[i].order == i + 1`
//! - `preview_page == current_page` after every mutation
//! - in published-edit-mode `has_unsaved_changes` is
//!   `current_page != original_page` (structural comparison)
//!
//! Document mutations never fail. Unknown section ids are ignored.
//! Persistence (save/publish) lives in `session.rs`.

use crate::errors::ErrorRecord;
use crate::history::{History, HistoryEntry, DEFAULT_HISTORY_LIMIT};
use crate::mutations::{MoveDirection, PageMutation, PageUpdate, SectionTemplate, SectionUpdate};
use crate::preferences::{PreferenceStorage, PreviewDevice, UiPreferences};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use vinyl_model::{
    validate_page, Clock, IdGenerator, PageContent, PageSection, SectionType, SystemClock,
    ValidationIssue,
};

pub struct PageBuilderStore {
    pub(crate) current_page: PageContent,
    pub(crate) preview_page: PageContent,
    pub(crate) original_page: Option<PageContent>,

    /// Selection is kept by id and resolved on read
    selected_section_id: Option<String>,

    is_editing: bool,
    is_preview_mode: bool,
    preferences: UiPreferences,

    pub(crate) is_editing_published_page: bool,
    pub(crate) has_unsaved_changes: bool,

    /// A draft snapshot was saved over the published original
    pub(crate) has_pending_draft: bool,

    pub(crate) errors: Vec<String>,
    pub(crate) last_error: Option<ErrorRecord>,

    /// Shared with the guard a save holds across its await
    pub(crate) is_saving: Arc<AtomicBool>,
    pub(crate) is_publishing: Arc<AtomicBool>,
    is_loading: bool,

    pub(crate) history: History,

    pub(crate) clock: Arc<dyn Clock>,
    section_ids: IdGenerator,
    pub(crate) error_ids: IdGenerator,
    preference_storage: Option<Box<dyn PreferenceStorage>>,
}

/// Configures a [`PageBuilderStore`]
pub struct StoreBuilder {
    clock: Arc<dyn Clock>,
    history_limit: usize,
    section_ids: IdGenerator,
    preference_storage: Option<Box<dyn PreferenceStorage>>,
}

impl StoreBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Source of new section ids; each store gets its own counter
    pub fn section_ids(mut self, ids: IdGenerator) -> Self {
        self.section_ids = ids;
        self
    }

    pub fn preference_storage(mut self, storage: impl PreferenceStorage + 'static) -> Self {
        self.preference_storage = Some(Box::new(storage));
        self
    }

    pub fn build(self) -> PageBuilderStore {
        let preferences = match self.preference_storage.as_ref().map(|s| s.load()) {
            Some(Ok(Some(stored))) => stored,
            Some(Err(err)) => {
                warn!(error = %err, "Stored UI preferences unreadable - using defaults");
                UiPreferences::default()
            }
            _ => UiPreferences::default(),
        };

        let empty = PageContent::empty(self.clock.now());

        PageBuilderStore {
            current_page: empty.clone(),
            preview_page: empty,
            original_page: None,
            selected_section_id: None,
            is_editing: false,
            is_preview_mode: false,
            preferences,
            is_editing_published_page: false,
            has_unsaved_changes: false,
            has_pending_draft: false,
            errors: Vec::new(),
            last_error: None,
            is_saving: Arc::new(AtomicBool::new(false)),
            is_publishing: Arc::new(AtomicBool::new(false)),
            is_loading: false,
            history: History::with_limit(self.history_limit),
            clock: self.clock,
            section_ids: self.section_ids,
            error_ids: IdGenerator::errors(),
            preference_storage: self.preference_storage,
        }
    }
}

impl PageBuilderStore {
    /// Store with the system clock, default history limit and no preference storage
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder {
            clock: Arc::new(SystemClock),
            history_limit: DEFAULT_HISTORY_LIMIT,
            section_ids: IdGenerator::sections(),
            preference_storage: None,
        }
    }

    // ---- read side -------------------------------------------------------

    pub fn current_page(&self) -> &PageContent {
        &self.current_page
    }

    pub fn preview_page(&self) -> &PageContent {
        &self.preview_page
    }

    pub fn original_page(&self) -> Option<&PageContent> {
        self.original_page.as_ref()
    }

    /// Live selected section, looked up in the current page
    pub fn selected_section(&self) -> Option<&PageSection> {
        self.selected_section_id
            .as_deref()
            .and_then(|id| self.current_page.find_section(id))
    }

    pub fn selected_section_id(&self) -> Option<&str> {
        self.selected_section_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_preview_mode(&self) -> bool {
        self.is_preview_mode
    }

    pub fn preferences(&self) -> &UiPreferences {
        &self.preferences
    }

    pub fn sidebar_open(&self) -> bool {
        self.preferences.sidebar_open
    }

    pub fn show_real_time_preview(&self) -> bool {
        self.preferences.show_real_time_preview
    }

    pub fn auto_save_enabled(&self) -> bool {
        self.preferences.auto_save_enabled
    }

    pub fn preview_device(&self) -> PreviewDevice {
        self.preferences.preview_device
    }

    pub fn is_editing_published_page(&self) -> bool {
        self.is_editing_published_page
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Structured record of the most recent failure
    pub fn last_error(&self) -> Option<&ErrorRecord> {
        self.last_error.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving.load(Ordering::SeqCst)
    }

    pub fn is_publishing(&self) -> bool {
        self.is_publishing.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history.index()
    }

    pub fn history_labels(&self) -> Vec<Option<&str>> {
        self.history.labels()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- page lifecycle ----------------------------------------------------

    /// Open a page for editing, replacing the whole document triplet
    pub fn set_current_page(&mut self, page: PageContent) {
        debug!(page_id = %page.id, published = page.is_published, "Opening page");

        if page.is_published {
            self.original_page = Some(page.clone());
            self.is_editing_published_page = true;
        } else {
            self.is_editing_published_page = false;
        }

        self.history.reset_to(HistoryEntry::new(
            page.clone(),
            Some("Opened page".to_string()),
            self.clock.now(),
        ));
        self.preview_page = page.clone();
        self.current_page = page;

        self.selected_section_id = None;
        self.has_unsaved_changes = false;
        self.has_pending_draft = false;
        self.errors.clear();
        self.last_error = None;
        self.is_saving.store(false, Ordering::SeqCst);
        self.is_publishing.store(false, Ordering::SeqCst);
    }

    /// Shallow-merge page fields
    pub fn update_page(&mut self, update: PageUpdate) {
        update.apply_to(&mut self.current_page);
        self.document_changed();
    }

    // ---- sections --------------------------------------------------------

    /// Append a new section; returns its id
    pub fn add_section(&mut self, section_type: SectionType, template: Option<SectionTemplate>) -> String {
        let now = self.clock.now();
        let id = self.next_section_id();

        let mut section = PageSection::new(
            id.clone(),
            section_type.default_config(),
            self.current_page.sections.len() + 1,
            now,
        );
        if let Some(template) = template {
            if !template.apply_to(&mut section, section_type) {
                warn!(section_type = %section_type, "Template config does not match section type - ignored");
            }
        }

        self.current_page.sections.push(section);
        self.current_page.renumber_sections();
        self.document_changed();

        debug!(section_id = %id, section_type = %section_type, "Section added");
        id
    }

    pub fn update_section(&mut self, section_id: &str, updates: SectionUpdate) {
        let now = self.clock.now();
        let Some(section) = self.current_page.find_section_mut(section_id) else {
            debug!(section_id, "update_section: no such section");
            return;
        };

        updates.apply_to(section, now);
        self.document_changed();
    }

    pub fn delete_section(&mut self, section_id: &str) {
        let Some(index) = self.current_page.section_index(section_id) else {
            debug!(section_id, "delete_section: no such section");
            return;
        };

        self.current_page.sections.remove(index);
        self.current_page.renumber_sections();

        if self.selected_section_id.as_deref() == Some(section_id) {
            self.selected_section_id = None;
        }

        self.document_changed();
        debug!(section_id, "Section deleted");
    }

    /// Swap with the neighbour in `direction`; no-op at either end
    pub fn move_section(&mut self, section_id: &str, direction: MoveDirection) {
        let Some(index) = self.current_page.section_index(section_id) else {
            debug!(section_id, "move_section: no such section");
            return;
        };

        let len = self.current_page.sections.len();
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => (index + 1 < len).then_some(index + 1),
        };
        let Some(target) = target else {
            return;
        };

        self.current_page.sections.swap(index, target);
        self.current_page.renumber_sections();
        self.document_changed();
    }

    /// Copy a section in place right after the original; returns the copy's id
    pub fn duplicate_section(&mut self, section_id: &str) -> Option<String> {
        let Some(index) = self.current_page.section_index(section_id) else {
            debug!(section_id, "duplicate_section: no such section");
            return None;
        };

        let now = self.clock.now();
        let id = self.next_section_id();

        let mut copy = self.current_page.sections[index].clone();
        copy.id = id.clone();
        copy.created_at = now;
        copy.updated_at = now;

        self.current_page.sections.insert(index + 1, copy);
        self.current_page.renumber_sections();
        self.document_changed();

        debug!(source = section_id, section_id = %id, "Section duplicated");
        Some(id)
    }

    /// Fresh id that is also not taken by a section loaded from elsewhere
    fn next_section_id(&self) -> String {
        loop {
            let id = self.section_ids.next_id(self.clock.as_ref());
            if self.current_page.find_section(&id).is_none() {
                return id;
            }
        }
    }

    pub fn select_section(&mut self, section_id: Option<&str>) {
        self.selected_section_id = section_id.map(str::to_string);
    }

    // ---- UI state --------------------------------------------------------

    pub fn set_editing(&mut self, is_editing: bool) {
        self.is_editing = is_editing;
    }

    pub fn set_preview_mode(&mut self, is_preview_mode: bool) {
        self.is_preview_mode = is_preview_mode;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.preferences.sidebar_open = open;
        self.store_preferences();
    }

    pub fn set_show_real_time_preview(&mut self, show: bool) {
        self.preferences.show_real_time_preview = show;
        self.store_preferences();
    }

    pub fn set_auto_save_enabled(&mut self, enabled: bool) {
        self.preferences.auto_save_enabled = enabled;
        self.store_preferences();
    }

    pub fn set_preview_device(&mut self, device: PreviewDevice) {
        self.preferences.preview_device = device;
        self.store_preferences();
    }

    fn store_preferences(&self) {
        if let Some(storage) = &self.preference_storage {
            if let Err(err) = storage.save(&self.preferences) {
                warn!(error = %err, "Failed to store UI preferences");
            }
        }
    }

    // ---- errors ----------------------------------------------------------

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
        self.last_error = None;
    }

    /// Remove the banner at `index`; out-of-range indices are ignored
    pub fn remove_error(&mut self, index: usize) {
        if index < self.errors.len() {
            self.errors.remove(index);
        }
    }

    // ---- validation ------------------------------------------------------

    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_page(&self.current_page)
    }

    /// Run validation and raise a banner per error-level issue
    pub fn record_validation_issues(&mut self) -> Vec<ValidationIssue> {
        let issues = self.validate();
        for issue in issues.iter().filter(|i| i.is_error()) {
            let record = ErrorRecord::from_validation_issue(issue, &self.error_ids, self.clock.as_ref());
            warn!(
                error_id = %record.id,
                rule = %issue.rule,
                section_id = ?issue.section_id,
                "{}",
                issue.message
            );
            self.errors.push(record.message.clone());
            self.last_error = Some(record);
        }
        issues
    }

    // ---- history ---------------------------------------------------------

    /// Record a snapshot, discarding any redo branch
    pub fn add_to_history(&mut self, page: PageContent, label: Option<&str>) {
        self.history
            .push(HistoryEntry::new(page, label.map(str::to_string), self.clock.now()));
        debug!(index = ?self.history.index(), len = self.history.len(), "History entry added");
    }

    /// Snapshot the current page
    pub fn checkpoint(&mut self, label: Option<&str>) {
        self.add_to_history(self.current_page.clone(), label);
    }

    pub fn undo(&mut self) {
        let Some(page) = self.history.undo().cloned() else {
            return;
        };
        self.current_page = page;
        self.document_changed();
        debug!(index = ?self.history.index(), "Undo");
    }

    pub fn redo(&mut self) {
        let Some(page) = self.history.redo().cloned() else {
            return;
        };
        self.current_page = page;
        self.document_changed();
        debug!(index = ?self.history.index(), "Redo");
    }

    /// Back to the initial empty-page state; UI preferences are kept
    pub fn reset(&mut self) {
        let empty = PageContent::empty(self.clock.now());

        self.current_page = empty.clone();
        self.preview_page = empty;
        self.original_page = None;
        self.selected_section_id = None;
        self.is_editing = false;
        self.is_preview_mode = false;
        self.is_editing_published_page = false;
        self.has_unsaved_changes = false;
        self.has_pending_draft = false;
        self.errors.clear();
        self.last_error = None;
        self.is_saving.store(false, Ordering::SeqCst);
        self.is_publishing.store(false, Ordering::SeqCst);
        self.is_loading = false;
        self.history.clear();
    }

    // ---- commands --------------------------------------------------------

    /// Apply a serializable command; returns the id of a created section
    pub fn apply(&mut self, mutation: PageMutation) -> Option<String> {
        debug!(mutation = mutation.name(), "Applying mutation");

        match mutation {
            PageMutation::UpdatePage { fields } => self.update_page(fields),
            PageMutation::AddSection {
                section_type,
                template,
            } => return Some(self.add_section(section_type, template)),
            PageMutation::UpdateSection {
                section_id,
                updates,
            } => self.update_section(&section_id, updates),
            PageMutation::DeleteSection { section_id } => self.delete_section(&section_id),
            PageMutation::MoveSection {
                section_id,
                direction,
            } => self.move_section(&section_id, direction),
            PageMutation::DuplicateSection { section_id } => {
                return self.duplicate_section(&section_id)
            }
            PageMutation::SelectSection { section_id } => {
                self.select_section(section_id.as_deref())
            }
            PageMutation::Checkpoint { label } => self.checkpoint(label.as_deref()),
            PageMutation::Undo => self.undo(),
            PageMutation::Redo => self.redo(),
            PageMutation::DiscardChanges => self.discard_changes(),
        }

        None
    }

    /// Sync the preview and re-derive the dirty flag after a document change
    pub(crate) fn document_changed(&mut self) {
        self.preview_page = self.current_page.clone();

        self.has_unsaved_changes = if self.is_editing_published_page {
            self.original_page
                .as_ref()
                .map_or(true, |original| *original != self.current_page)
        } else {
            true
        };
    }
}

impl Default for PageBuilderStore {
    fn default() -> Self {
        Self::new()
    }
}

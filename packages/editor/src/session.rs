//! # Edit Mode and Persistence
//!
//! Draft-vs-published reconciliation for a [`PageBuilderStore`].
//!
//! Editing a published page keeps the published snapshot as
//! `original_page`. The live document is compared against it to derive the
//! dirty flag, `discard_changes` restores it, and `save_changes` writes a
//! draft without touching the live original.
//!
//! ```text
//!   set_current_page(published) ──► editing over published (clean)
//!            │ mutate                         ▲
//!            ▼                                │ discard_changes / publish_page
//!   editing over published (dirty) ───────────┘
//!            │ save_changes
//!            ▼
//!   pending draft (original still live)
//! ```
//!
//! Save and publish suspend only at the persister call. A second call while
//! one is flagged in flight is refused with [`PageBuilderError::Busy`].

use crate::errors::{ErrorRecord, PageBuilderError, PendingOperation};
use crate::persist::{PagePersister, PersistError};
use crate::store::PageBuilderStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};
use vinyl_model::PageLifecycle;

const COMPONENT: &str = "PageBuilderStore";

/// Clears an in-flight flag when dropped, including when the caller drops
/// the save future mid-await
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl PageBuilderStore {
    /// Enter published-edit-mode against the already seeded `original_page`
    pub fn start_editing_published_page(&mut self) {
        self.is_editing_published_page = true;
        self.has_unsaved_changes = false;
    }

    /// Throw away pending edits and go back to the published original
    pub fn discard_changes(&mut self) {
        let Some(original) = self.original_page.clone() else {
            warn!("discard_changes: no published original to restore");
            return;
        };

        self.current_page = original.clone();
        self.preview_page = original.clone();
        self.has_unsaved_changes = false;
        self.has_pending_draft = false;
        self.add_to_history(original, Some("Discarded changes"));
    }

    /// Derived draft/publish state of the open page
    pub fn lifecycle(&self) -> PageLifecycle {
        if self.is_editing_published_page {
            if self.has_unsaved_changes || self.has_pending_draft {
                PageLifecycle::PendingDraft
            } else {
                PageLifecycle::Published
            }
        } else if self.current_page.is_published {
            PageLifecycle::Published
        } else {
            PageLifecycle::Draft
        }
    }

    /// Save pending edits over a published page as a draft
    pub async fn save_changes(
        &mut self,
        persister: Option<&dyn PagePersister>,
    ) -> Result<(), PageBuilderError> {
        let Some(persister) = persister else {
            return Ok(());
        };
        let in_flight = self.begin(PendingOperation::Save)?;

        let mut draft = self.current_page.clone();
        draft.is_draft = true;
        draft.is_published = false;
        draft.touch(self.clock.now());

        let result = persister.persist(&draft).await;
        drop(in_flight);

        match result {
            Ok(()) => {
                info!(page_id = %draft.id, "Draft saved");
                self.add_to_history(draft, Some("Saved draft"));
                self.has_unsaved_changes = false;
                self.has_pending_draft = true;
                Ok(())
            }
            Err(err) => Err(self.persist_failed(err, "Failed to save changes")),
        }
    }

    /// Save the page as it is (no published original involved)
    pub async fn save_page(
        &mut self,
        persister: Option<&dyn PagePersister>,
    ) -> Result<(), PageBuilderError> {
        let Some(persister) = persister else {
            return Ok(());
        };
        let in_flight = self.begin(PendingOperation::Save)?;

        let mut snapshot = self.current_page.clone();
        snapshot.touch(self.clock.now());

        let result = persister.persist(&snapshot).await;
        drop(in_flight);

        match result {
            Ok(()) => {
                info!(page_id = %snapshot.id, "Page saved");
                self.current_page = snapshot.clone();
                self.preview_page = snapshot.clone();
                self.add_to_history(snapshot, Some("Saved page"));
                self.has_unsaved_changes = false;
                Ok(())
            }
            Err(err) => Err(self.persist_failed(err, "Failed to save page")),
        }
    }

    /// Publish and re-enter published-edit-mode with a clean dirty flag
    pub async fn publish_page(
        &mut self,
        persister: Option<&dyn PagePersister>,
    ) -> Result<(), PageBuilderError> {
        let Some(persister) = persister else {
            return Ok(());
        };
        let in_flight = self.begin(PendingOperation::Publish)?;

        let mut published = self.current_page.clone();
        published.is_published = true;
        published.is_draft = false;
        published.touch(self.clock.now());

        let result = persister.persist(&published).await;
        drop(in_flight);

        match result {
            Ok(()) => {
                info!(page_id = %published.id, slug = %published.slug, "Page published");
                self.current_page = published.clone();
                self.preview_page = published.clone();
                self.original_page = Some(published.clone());
                self.is_editing_published_page = true;
                self.has_unsaved_changes = false;
                self.has_pending_draft = false;
                self.add_to_history(published, Some("Published page"));
                Ok(())
            }
            Err(err) => Err(self.persist_failed(err, "Failed to publish page")),
        }
    }

    /// Raise the in-flight flag for `operation`; it drops back when the guard does
    fn begin(&self, operation: PendingOperation) -> Result<InFlight, PageBuilderError> {
        if self.is_saving() || self.is_publishing() {
            warn!(operation = %operation, "Refusing to start while another save or publish is in flight");
            return Err(PageBuilderError::Busy(operation));
        }

        let flag = match operation {
            PendingOperation::Save => &self.is_saving,
            PendingOperation::Publish => &self.is_publishing,
        };
        flag.store(true, Ordering::SeqCst);
        Ok(InFlight(Arc::clone(flag)))
    }

    /// Log, raise a banner, and hand the original error back
    fn persist_failed(&mut self, err: PersistError, banner: &str) -> PageBuilderError {
        let record = ErrorRecord::from_persist_error(&err, &self.error_ids, self.clock.as_ref())
            .in_component(COMPONENT);

        error!(
            error_id = %record.id,
            kind = ?record.kind,
            recoverable = record.recoverable,
            details = ?record.details,
            "{}",
            banner
        );

        self.errors.push(banner.to_string());
        self.last_error = Some(record);
        PageBuilderError::Persist(err)
    }
}

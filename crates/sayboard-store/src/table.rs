use sayboard_bridge::record::AudioRecord;

use crate::{
    catalog::SourceCatalog,
    list::{Keyed, ListStore},
    record_form::RecordEditDraft,
};

/// View state of one paginated table: the current page and the row waiting
/// for delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    page: usize,
    per_page: usize,
    pending_delete: Option<String>,
}

impl TableState {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            pending_delete: None,
        }
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn rows<'a, T: Keyed>(&self, store: &'a ListStore<T>) -> &'a [T] {
        store.page(self.page, self.per_page)
    }

    pub fn page_count<T: Keyed>(&self, store: &ListStore<T>) -> usize {
        store.page_count(self.per_page)
    }

    pub fn next_page<T: Keyed>(&mut self, store: &ListStore<T>) {
        self.go_to(self.page + 1, store);
    }

    pub fn prev_page<T: Keyed>(&mut self, store: &ListStore<T>) {
        self.go_to(self.page.saturating_sub(1), store);
    }

    pub fn go_to<T: Keyed>(&mut self, page: usize, store: &ListStore<T>) {
        self.page = page.clamp(1, self.page_count(store));
    }

    /// Keeps the page in range after the store shrank.
    pub fn clamp<T: Keyed>(&mut self, store: &ListStore<T>) {
        self.go_to(self.page, store);
    }

    /// Back to the first page, forgetting any pending delete.
    pub fn reset(&mut self) {
        self.page = 1;
        self.pending_delete = None;
    }

    /// Remembers the row the confirmation dialog is asking about.
    pub fn request_delete(&mut self, key: impl Into<String>) {
        self.pending_delete = Some(key.into());
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// The dialog was cancelled or dismissed: nothing changes.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed: removes the pending row right away and returns it
    /// so the caller can issue the delete call.
    ///
    /// The row is looked up by key at confirmation time, so the removal hits
    /// the right row even if the list changed while the dialog was open.
    pub fn confirm_delete<T: Keyed>(&mut self, store: &mut ListStore<T>) -> Option<T> {
        let key = self.pending_delete.take()?;
        let Some(index) = store.position(&key) else {
            log::warn!("Row {key:?} disappeared before its deletion was confirmed");
            return None;
        };

        let removed = store.remove_at(index);
        self.clamp(store);
        removed
    }
}

/// Flips the details flag of a record row. Returns the new value, or `None`
/// when the row is gone.
pub fn toggle_details(store: &mut ListStore<AudioRecord>, name: &str) -> Option<bool> {
    let record = store.find_mut(name)?;
    record.show_details = !record.show_details;
    Some(record.show_details)
}

/// Seeds an edit draft from the row's current values.
pub fn open_edit(
    store: &ListStore<AudioRecord>,
    name: &str,
    catalog: &SourceCatalog,
) -> Option<RecordEditDraft> {
    let index = store.position(name)?;
    store
        .get(index)
        .map(|record| RecordEditDraft::seed(record, catalog))
}

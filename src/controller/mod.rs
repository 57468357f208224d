//! Page controller for an admin list page.
//!
//! Owns the transient UI state around a [`ResourceStore`]: the debounced search
//! box, the page-size selector, pagination buttons and the create/edit dialog.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::errors::AppError;
use crate::models::{PageQuery, PageSize};
use crate::store::{FetchOutcome, FormDraft, Resource, ResourceStore};

/// Search box lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    /// Nothing typed yet.
    Idle,
    /// Input changed; waiting for it to settle.
    Typing,
    /// Input committed as the active search.
    Settled,
}

/// Create/edit dialog state.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog<D> {
    Closed,
    Create(D),
    Edit { id: String, draft: D },
}

impl<D> Dialog<D> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }
}

/// Notification shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

impl From<Result<String, AppError>> for Notice {
    fn from(result: Result<String, AppError>) -> Self {
        match result {
            Ok(message) => Notice::Success(message),
            Err(e) => Notice::Error(e.to_string()),
        }
    }
}

struct ControllerState<D> {
    phase: SearchPhase,
    input: String,
    query: PageQuery,
    dialog: Dialog<D>,
    pending_search: Option<CancellationToken>,
}

/// UI controller for one resource list page.
pub struct ListController<R: Resource> {
    store: Arc<ResourceStore<R>>,
    debounce: Duration,
    state: Arc<Mutex<ControllerState<R::Draft>>>,
}

impl<R: Resource> ListController<R> {
    pub fn new(store: Arc<ResourceStore<R>>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            state: Arc::new(Mutex::new(ControllerState {
                phase: SearchPhase::Idle,
                input: String::new(),
                query: PageQuery::default(),
                dialog: Dialog::Closed,
                pending_search: None,
            })),
        }
    }

    pub fn store(&self) -> &Arc<ResourceStore<R>> {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState<R::Draft>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Query the next fetch will use.
    pub fn query(&self) -> PageQuery {
        self.lock().query.clone()
    }

    pub fn search_phase(&self) -> SearchPhase {
        self.lock().phase
    }

    /// Text currently in the search box, committed or not.
    pub fn search_input(&self) -> String {
        self.lock().input.clone()
    }

    pub fn dialog(&self) -> Dialog<R::Draft> {
        self.lock().dialog.clone()
    }

    /// Fetch the current query again.
    pub async fn refresh(&self) -> FetchOutcome {
        let query = self.query();
        self.store.fetch(query).await
    }

    /// Record a keystroke in the search box.
    ///
    /// Restarts the debounce timer; once input has been quiet for the debounce
    /// period the text becomes the active search and page 1 is fetched.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, since the commit runs on a
    /// spawned task.
    pub fn on_search_input(&self, text: impl Into<String>) {
        let token = CancellationToken::new();
        {
            let mut state = self.lock();
            state.input = text.into();
            state.phase = SearchPhase::Typing;
            if let Some(previous) = state.pending_search.replace(token.clone()) {
                previous.cancel();
            }
        }

        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }

            let query = {
                let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
                if token.is_cancelled() {
                    return;
                }
                state.pending_search = None;
                state.phase = SearchPhase::Settled;
                state.query.search = state.input.clone();
                state.query.page = 1;
                state.query.clone()
            };

            tracing::debug!("Search settled on {:?} for {}", query.search, R::ENDPOINT);
            store.fetch(query).await;
        });
    }

    /// Change rows per page and go back to the first page.
    pub async fn set_page_size(&self, page_size: PageSize) -> FetchOutcome {
        let query = {
            let mut state = self.lock();
            state.query.page_size = page_size;
            state.query.page = 1;
            state.query.clone()
        };
        self.store.fetch(query).await
    }

    /// Jump to `page`.
    ///
    /// Ignored (returns `false`) while a fetch is in flight or when `page` lies
    /// outside `[1, total_pages]`; search and page size are kept.
    pub async fn go_to_page(&self, page: u32) -> bool {
        let snapshot = self.store.snapshot();
        if snapshot.is_loading || !snapshot.window.contains_page(page) {
            tracing::debug!(
                "Ignoring navigation to page {} of {} ({})",
                page,
                snapshot.window.total_pages,
                R::ENDPOINT
            );
            return false;
        }

        let query = {
            let mut state = self.lock();
            state.query.page = page;
            state.query.clone()
        };
        self.store.fetch(query).await;
        true
    }

    pub async fn next_page(&self) -> bool {
        let current = self.store.snapshot().window.current_page;
        self.go_to_page(current.saturating_add(1)).await
    }

    pub async fn prev_page(&self) -> bool {
        let current = self.store.snapshot().window.current_page;
        self.go_to_page(current.saturating_sub(1)).await
    }

    pub async fn first_page(&self) -> bool {
        self.go_to_page(1).await
    }

    pub async fn last_page(&self) -> bool {
        let last = self.store.snapshot().window.total_pages;
        self.go_to_page(last).await
    }

    pub fn open_create(&self) {
        self.lock().dialog = Dialog::Create(Default::default());
    }

    pub fn open_edit(&self, record: &R) {
        self.lock().dialog = Dialog::Edit {
            id: record.id().to_string(),
            draft: record.to_draft(),
        };
    }

    /// Close the dialog, discarding the draft.
    pub fn cancel_dialog(&self) {
        self.lock().dialog = Dialog::Closed;
    }

    /// Validate and submit the open dialog's draft.
    ///
    /// On success the dialog closes and the current page is fetched again; on
    /// failure the dialog stays open holding `draft`.
    pub async fn submit(&self, draft: R::Draft) -> Notice {
        let errors = draft.validate();
        if !errors.is_empty() {
            return Notice::Error(errors.join("\n"));
        }

        let target = {
            let mut state = self.lock();
            match &mut state.dialog {
                Dialog::Closed => return Notice::Error("No form is open".to_string()),
                Dialog::Create(current) => {
                    *current = draft.clone();
                    None
                }
                Dialog::Edit { id, draft: current } => {
                    *current = draft.clone();
                    Some(id.clone())
                }
            }
        };

        let result = match target {
            None => self.store.create(&draft).await,
            Some(id) => self.store.update(&id, &draft).await,
        };

        if result.is_ok() {
            self.lock().dialog = Dialog::Closed;
            self.refresh().await;
        }
        Notice::from(result)
    }

    /// Activate or deactivate a record, then fetch the current page again.
    pub async fn toggle_status(&self, id: &str, active: bool) -> Notice {
        let result = self.store.change_status(id, active).await;
        if result.is_ok() {
            self.refresh().await;
        }
        Notice::from(result)
    }

    /// Drop any pending search commit.
    pub fn shutdown(&self) {
        if let Some(pending) = self.lock().pending_search.take() {
            pending.cancel();
        }
    }
}

impl<R: Resource> Drop for ListController<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::client::ApiClient;
    use crate::models::Salon;
    use crate::store::FallbackPolicy;

    #[test]
    fn test_notice_from_result() {
        let ok: Result<String, AppError> = Ok("Saved".to_string());
        assert_eq!(Notice::from(ok), Notice::Success("Saved".to_string()));

        let err: Result<String, AppError> = Err(AppError::Validation("must be positive".to_string()));
        let notice = Notice::from(err);
        assert!(!notice.is_success());
        assert_eq!(notice.message(), "must be positive");
    }

    #[test]
    #[should_panic]
    fn test_search_input_requires_runtime() {
        let client = ApiClient::new(
            "http://127.0.0.1:9/api",
            Arc::new(MemoryTokenStore::default()),
            None,
        )
        .unwrap();
        let store = Arc::new(ResourceStore::<Salon>::new(client, FallbackPolicy::default()));
        let controller = ListController::new(store, Duration::from_millis(10));

        controller.on_search_input("glow");
    }

    #[test]
    fn test_dialog_is_open() {
        assert!(!Dialog::<()>::Closed.is_open());
        assert!(Dialog::Create(()).is_open());
        assert!(Dialog::Edit { id: "1".to_string(), draft: () }.is_open());
    }
}
